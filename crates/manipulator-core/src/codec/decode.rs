//! Image decoding with EXIF orientation handling.

use std::io::Cursor;
use std::path::Path;

use exif::{In, Reader, Tag};
use image::{DynamicImage, ImageFormat, ImageReader};

use super::{CodecError, CodecOptions, ColorMode};
use crate::buffer::{Channels, PixelBuffer};
use crate::transform::{apply_orientation, Orientation};

/// Read and decode the image file at `path`.
pub fn decode_file(path: &Path, options: &CodecOptions) -> Result<PixelBuffer, CodecError> {
    let bytes = std::fs::read(path).map_err(|source| CodecError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    decode_bytes(&bytes, options)
}

/// Decode an in-memory image file.
///
/// # Errors
///
/// Returns `CodecError::InvalidFormat` if the format cannot be recognized
/// from the content, and `CodecError::CorruptedFile` if decoding fails.
pub fn decode_bytes(bytes: &[u8], options: &CodecOptions) -> Result<PixelBuffer, CodecError> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))?;

    let Some(format) = reader.format() else {
        return Err(CodecError::InvalidFormat);
    };

    let img = reader
        .decode()
        .map_err(|e| CodecError::CorruptedFile(e.to_string()))?;

    let buffer = into_pixel_buffer(img, format, options.color_mode)?;
    if buffer.is_empty() {
        return Err(CodecError::EmptyImage);
    }

    if !options.apply_orientation {
        return Ok(buffer);
    }

    let orientation = extract_orientation(bytes);
    if orientation != Orientation::Normal {
        tracing::debug!(?orientation, "Applying EXIF orientation");
    }
    Ok(apply_orientation(&buffer, orientation))
}

/// Extract EXIF orientation value from image bytes (for external use).
pub fn get_orientation(bytes: &[u8]) -> Orientation {
    extract_orientation(bytes)
}

/// Convert a decoded image to the requested channel layout.
///
/// BMP has no luma pixel type: 8-bit grayscale files are palettes and decode
/// as RGB. In `Auto` mode a BMP whose pixels are all neutral is treated as a
/// grayscale source.
fn into_pixel_buffer(
    img: DynamicImage,
    format: ImageFormat,
    mode: ColorMode,
) -> Result<PixelBuffer, CodecError> {
    let grayscale = match mode {
        ColorMode::Auto => {
            !img.color().has_color() || (format == ImageFormat::Bmp && is_neutral(&img))
        }
        ColorMode::Color => false,
        ColorMode::Grayscale => true,
    };

    let buffer = if grayscale {
        let luma = img.into_luma8();
        let (width, height) = luma.dimensions();
        PixelBuffer::new(width, height, Channels::Gray, luma.into_raw())?
    } else {
        let rgb = img.into_rgb8();
        let (width, height) = rgb.dimensions();
        PixelBuffer::new(width, height, Channels::Color, rgb.into_raw())?
    };
    Ok(buffer)
}

/// True if every pixel of an RGB image has equal channels.
fn is_neutral(img: &DynamicImage) -> bool {
    img.as_rgb8()
        .is_some_and(|rgb| rgb.pixels().all(|p| p[0] == p[1] && p[1] == p[2]))
}

/// Extract EXIF orientation from image bytes.
///
/// Returns `Orientation::Normal` if no EXIF data is found or orientation
/// cannot be determined.
fn extract_orientation(bytes: &[u8]) -> Orientation {
    let exif_reader = Reader::new();
    let mut cursor = Cursor::new(bytes);

    match exif_reader.read_from_container(&mut cursor) {
        Ok(exif) => exif
            .get_field(Tag::Orientation, In::PRIMARY)
            .and_then(|field| field.value.get_uint(0))
            .map(Orientation::from)
            .unwrap_or_default(),
        Err(_) => Orientation::Normal,
    }
}
