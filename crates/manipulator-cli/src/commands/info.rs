//! Image info command.
//!
//! Decodes each input the same way the transforms would (color mode and EXIF
//! orientation applied) and reports the resulting buffer shape.

use crate::InfoArgs;
use anyhow::{Context, Result};
use manipulator_core::{BufferInfo, CodecOptions, ImageCodec, ImageFileCodec};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// One record of `info --json` output.
#[derive(Debug, Serialize)]
struct InfoRecord {
    file: String,
    #[serde(flatten)]
    image: BufferInfo,
    size_bytes: u64,
}

pub fn run(args: InfoArgs, options: &CodecOptions) -> Result<()> {
    let codec = ImageFileCodec::new(*options);

    for path in &args.input {
        let record = inspect(&codec, path)?;

        if args.json {
            println!("{}", serde_json::to_string_pretty(&record)?);
        } else {
            print!("{}", format_text(&record));
        }

        if args.input.len() > 1 && !args.json {
            println!();
        }
    }

    Ok(())
}

fn inspect(codec: &dyn ImageCodec, path: &Path) -> Result<InfoRecord> {
    let size_bytes = fs::metadata(path)
        .with_context(|| format!("Failed to stat: {}", path.display()))?
        .len();
    let buffer = codec
        .decode(path)
        .with_context(|| format!("Failed to load: {}", path.display()))?;

    Ok(InfoRecord {
        file: path.display().to_string(),
        image: buffer.info(),
        size_bytes,
    })
}

fn format_text(record: &InfoRecord) -> String {
    let kind = if record.image.channels == 1 { "grayscale" } else { "color" };
    format!(
        "{}\n  Dimensions: {}x{}\n  Channels:   {} ({kind})\n  File size:  {}\n",
        record.file,
        record.image.width,
        record.image.height,
        record.image.channels,
        format_size(record.size_bytes),
    )
}

/// Format file size for display
fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}
