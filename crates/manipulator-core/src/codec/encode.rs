//! Raster encoding for saving processed images.
//!
//! PNG and BMP are lossless; JPEG takes a quality setting. Grayscale buffers
//! are written as `L8`, color buffers as `Rgb8`.

use std::io::Cursor;
use std::path::Path;

use image::codecs::bmp::BmpEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder, ImageFormat};

use super::CodecError;
use crate::buffer::{Channels, PixelBuffer};

/// JPEG quality used when none is configured.
pub const DEFAULT_JPEG_QUALITY: u8 = 90;

/// Encode `buffer` and write it to `path`, choosing the format from the
/// file extension.
pub fn encode_file(buffer: &PixelBuffer, path: &Path, jpeg_quality: u8) -> Result<(), CodecError> {
    let format = ImageFormat::from_path(path)
        .map_err(|_| CodecError::UnsupportedFormat(path.display().to_string()))?;
    let bytes = encode_bytes(buffer, format, jpeg_quality)?;

    std::fs::write(path, bytes).map_err(|source| CodecError::Write {
        path: path.to_path_buf(),
        source,
    })
}

/// Resolve a format from a name or extension such as `"png"` or `"jpg"`.
pub fn format_from_name(name: &str) -> Result<ImageFormat, CodecError> {
    ImageFormat::from_extension(name.trim_start_matches('.'))
        .ok_or_else(|| CodecError::UnsupportedFormat(name.to_string()))
}

/// Encode `buffer` to an in-memory file of the given format.
///
/// # Errors
///
/// Returns `CodecError::EmptyImage` for the empty sentinel and
/// `CodecError::UnsupportedFormat` for formats other than PNG, JPEG and BMP.
pub fn encode_bytes(
    buffer: &PixelBuffer,
    format: ImageFormat,
    jpeg_quality: u8,
) -> Result<Vec<u8>, CodecError> {
    if buffer.is_empty() {
        return Err(CodecError::EmptyImage);
    }

    let color_type = match buffer.channels() {
        Channels::Gray => ExtendedColorType::L8,
        Channels::Color => ExtendedColorType::Rgb8,
    };
    let (width, height) = buffer.dimensions();
    let pixels = buffer.as_bytes();
    let mut output = Cursor::new(Vec::new());

    let result = match format {
        ImageFormat::Png => {
            PngEncoder::new(&mut output).write_image(pixels, width, height, color_type)
        }
        ImageFormat::Jpeg => {
            // Clamp quality to valid range (1-100)
            let quality = jpeg_quality.clamp(1, 100);
            JpegEncoder::new_with_quality(&mut output, quality)
                .write_image(pixels, width, height, color_type)
        }
        ImageFormat::Bmp => {
            BmpEncoder::new(&mut output).write_image(pixels, width, height, color_type)
        }
        other => return Err(CodecError::UnsupportedFormat(format!("{other:?}"))),
    };
    result.map_err(|e| CodecError::EncodingFailed(e.to_string()))?;

    Ok(output.into_inner())
}
