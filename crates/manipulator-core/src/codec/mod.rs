//! File codec: turns image files into [`PixelBuffer`]s and back.
//!
//! The session never touches the filesystem itself. It is handed an
//! [`ImageCodec`] capability for each load or save, which keeps file I/O at
//! the edge and lets tests substitute an in-memory codec.
//!
//! [`ImageFileCodec`] is the standard implementation, built on the `image`
//! crate:
//! - Decoding guesses the format from content, uprights the image using its
//!   EXIF orientation tag, and converts to 1 or 3 channels per [`ColorMode`]
//! - Encoding picks PNG, JPEG or BMP from the output path's extension
//!
//! # Examples
//!
//! ```ignore
//! use manipulator_core::codec::{ImageCodec, ImageFileCodec};
//!
//! let codec = ImageFileCodec::default();
//! let image = codec.decode("photo.jpg".as_ref()).unwrap();
//! println!("Decoded {}x{} image", image.width(), image.height());
//! ```

mod decode;
mod encode;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::buffer::{BufferError, PixelBuffer};

pub use decode::{decode_bytes, decode_file, get_orientation};
pub use encode::{encode_bytes, encode_file, format_from_name, DEFAULT_JPEG_QUALITY};

/// Error types for decode and encode operations.
#[derive(Debug, Error)]
pub enum CodecError {
    /// The file could not be read.
    #[error("Could not read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The file could not be written.
    #[error("Could not write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not a recognized image format.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),

    /// No encoder for the requested output format.
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),

    /// Attempted to encode, or decoded, an image with no pixels.
    #[error("Image has no pixels")]
    EmptyImage,

    /// The encoder rejected the data.
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Decoded data did not form a valid pixel buffer.
    #[error(transparent)]
    Buffer(#[from] BufferError),
}

/// Channel layout to produce when decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Grayscale sources stay 1-channel, everything else becomes 3-channel.
    #[default]
    Auto,
    /// Always 3 channels.
    Color,
    /// Always 1 channel.
    Grayscale,
}

/// Decode and encode settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodecOptions {
    pub color_mode: ColorMode,
    /// Upright images according to their EXIF orientation tag.
    pub apply_orientation: bool,
    /// JPEG quality (1-100).
    pub jpeg_quality: u8,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self {
            color_mode: ColorMode::Auto,
            apply_orientation: true,
            jpeg_quality: DEFAULT_JPEG_QUALITY,
        }
    }
}

/// Capability to read and write image files.
pub trait ImageCodec {
    /// Decode the file at `path`. Must not panic on missing or malformed
    /// files.
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError>;

    /// Encode `buffer` to `path` in a format chosen by the implementation.
    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), CodecError>;
}

/// [`ImageCodec`] backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFileCodec {
    options: CodecOptions,
}

impl ImageFileCodec {
    pub fn new(options: CodecOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &CodecOptions {
        &self.options
    }
}

impl ImageCodec for ImageFileCodec {
    fn decode(&self, path: &Path) -> Result<PixelBuffer, CodecError> {
        decode_file(path, &self.options)
    }

    fn encode(&self, buffer: &PixelBuffer, path: &Path) -> Result<(), CodecError> {
        encode_file(buffer, path, self.options.jpeg_quality)
    }
}
