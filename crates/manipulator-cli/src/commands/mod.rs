//! CLI command implementations

pub mod contrast;
pub mod flip;
pub mod info;
pub mod interactive;
pub mod rotate;

use anyhow::{Context, Result};
use manipulator_core::{ImageCodec, ImageSession, PixelBuffer};
use std::path::Path;

use crate::viewer::{NullViewer, PreviewWriter, Viewer};

/// Start a session with the image at `path`.
pub fn open_session(codec: &dyn ImageCodec, path: &Path) -> Result<ImageSession> {
    let mut session = ImageSession::new();
    session
        .load_from(codec, path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;
    Ok(session)
}

/// Save the session's processed image.
pub fn save_processed(session: &ImageSession, codec: &dyn ImageCodec, path: &Path) -> Result<()> {
    session
        .save_to(codec, path)
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Preview writer when a directory was given, otherwise a no-op viewer.
pub fn viewer_for(preview_dir: Option<&Path>) -> Box<dyn Viewer> {
    match preview_dir {
        Some(dir) => Box::new(PreviewWriter::new(dir)),
        None => Box::new(NullViewer),
    }
}

/// Shared tail of the one-shot transforms: optional preview, then save.
pub fn finish(
    session: &ImageSession,
    codec: &dyn ImageCodec,
    output: &crate::OutputArgs,
    label: &str,
) -> Result<()> {
    if let Some(dir) = &output.preview_dir {
        PreviewWriter::new(dir).show(session.processed(), label)?;
    }
    save_processed(session, codec, &output.output)?;
    println!("{}", summary(session.processed(), &output.output));
    Ok(())
}

fn summary(buffer: &PixelBuffer, path: &Path) -> String {
    format!(
        "Wrote {} ({}x{}, {} channel(s))",
        path.display(),
        buffer.width(),
        buffer.height(),
        buffer.channels().count()
    )
}
