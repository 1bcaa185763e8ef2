//! Display collaborators.
//!
//! A terminal has no window to show pixels in, so "displaying" an image
//! means handing it to a [`Viewer`]. [`PreviewWriter`] saves a labelled PNG
//! that any image viewer can open; [`NullViewer`] only says that nothing
//! was written.

use anyhow::{bail, Context, Result};
use manipulator_core::{CodecOptions, ImageCodec, ImageFileCodec, PixelBuffer};
use std::fs;
use std::path::PathBuf;

/// Something that can present a labelled image to the user.
pub trait Viewer {
    fn show(&self, buffer: &PixelBuffer, label: &str) -> Result<()>;
}

/// Viewer used when no preview directory is configured.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullViewer;

impl NullViewer {
    fn notice(buffer: &PixelBuffer, label: &str) -> String {
        format!(
            "{label} ({}x{}): no preview directory set, rerun with --preview-dir to view it",
            buffer.width(),
            buffer.height()
        )
    }
}

impl Viewer for NullViewer {
    fn show(&self, buffer: &PixelBuffer, label: &str) -> Result<()> {
        tracing::info!("{}", Self::notice(buffer, label));
        Ok(())
    }
}

/// Writes each shown image to `<dir>/<label-slug>.png`.
#[derive(Debug, Clone)]
pub struct PreviewWriter {
    dir: PathBuf,
    codec: ImageFileCodec,
}

impl PreviewWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            codec: ImageFileCodec::new(CodecOptions::default()),
        }
    }

    /// File a given label is written to. Later shows with the same label
    /// overwrite it.
    pub fn path_for(&self, label: &str) -> PathBuf {
        self.dir.join(format!("{}.png", slug(label)))
    }
}

impl Viewer for PreviewWriter {
    fn show(&self, buffer: &PixelBuffer, label: &str) -> Result<()> {
        if buffer.is_empty() {
            bail!("Nothing to display for '{label}'");
        }
        fs::create_dir_all(&self.dir).with_context(|| {
            format!("Failed to create preview directory: {}", self.dir.display())
        })?;

        let path = self.path_for(label);
        self.codec
            .encode(buffer, &path)
            .with_context(|| format!("Failed to write preview: {}", path.display()))?;
        tracing::info!("{label}: {}", path.display());
        Ok(())
    }
}

/// Lowercase ASCII alphanumerics, runs of anything else become one `-`.
fn slug(label: &str) -> String {
    let mut out = String::with_capacity(label.len());
    for c in label.chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    if out.is_empty() {
        out.push_str("preview");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::testutil::{read, square};

    #[test]
    fn test_slug() {
        assert_eq!(slug("Original Image"), "original-image");
        assert_eq!(slug("Rotated 90° Clockwise"), "rotated-90-clockwise");
        assert_eq!(
            slug("Rotated 270° (90° Counter-Clockwise)"),
            "rotated-270-90-counter-clockwise"
        );
        assert_eq!(slug("  --  "), "preview");
        assert_eq!(slug(""), "preview");
    }

    #[test]
    fn test_preview_writer_writes_png() {
        let dir = tempfile::tempdir().unwrap();
        let viewer = PreviewWriter::new(dir.path().join("previews"));

        viewer.show(&square(), "Flipped Vertically").unwrap();

        let path = viewer.path_for("Flipped Vertically");
        assert!(path.ends_with("previews/flipped-vertically.png"));
        assert_eq!(read(&path), square());
    }

    #[test]
    fn test_preview_writer_rejects_empty() {
        let dir = tempfile::tempdir().unwrap();
        let viewer = PreviewWriter::new(dir.path());
        assert!(viewer.show(&PixelBuffer::empty(), "Nothing").is_err());
        assert!(!viewer.path_for("Nothing").exists());
    }

    #[test]
    fn test_null_viewer_accepts_anything() {
        NullViewer.show(&PixelBuffer::empty(), "Original Image").unwrap();
    }

    #[test]
    fn test_null_viewer_notice_names_the_image() {
        let notice = NullViewer::notice(&square(), "Original Image");
        assert!(notice.starts_with("Original Image (2x2)"));
        assert!(notice.contains("no preview directory set"));
        assert!(notice.contains("--preview-dir"));
    }
}
