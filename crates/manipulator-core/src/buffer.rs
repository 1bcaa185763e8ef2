//! Owned 8-bit pixel buffer.
//!
//! [`PixelBuffer`] is the only data structure the transforms read and write.
//! Samples are stored row-major with channels interleaved, so the sample at
//! `(row, col, channel)` lives at `(row * width + col) * channels + channel`.
//!
//! A buffer with zero width or zero height is the empty sentinel: it stands
//! for "no image" and every transform rejects it.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised when raw parts do not form a valid buffer.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BufferError {
    /// Sample data length doesn't match the dimensions.
    #[error("Invalid pixel data: expected {expected} bytes, got {actual}")]
    LengthMismatch { expected: usize, actual: usize },

    /// Channel count other than 1 or 3.
    #[error("Unsupported channel count: {0} (expected 1 or 3)")]
    UnsupportedChannels(u8),

    /// `width * height * channels` does not fit in `usize`.
    #[error("Image too large: {width}x{height}x{channels} samples overflow the address space")]
    TooLarge { width: u32, height: u32, channels: u8 },
}

/// Number of interleaved samples per pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum Channels {
    /// Single luminance sample.
    Gray = 1,
    /// Three samples per pixel, in codec order.
    #[default]
    Color = 3,
}

impl Channels {
    /// Samples per pixel.
    #[inline]
    pub fn count(self) -> usize {
        self as usize
    }
}

impl TryFrom<u8> for Channels {
    type Error = BufferError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Color),
            other => Err(BufferError::UnsupportedChannels(other)),
        }
    }
}

/// Serializable summary of a buffer's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferInfo {
    pub width: u32,
    pub height: u32,
    pub channels: u8,
}

/// A rectangular 8-bit image with 1 or 3 interleaved channels.
///
/// The length invariant `data.len() == width * height * channels` holds for
/// every value of this type; the checked constructor is the only public way to
/// supply raw bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    channels: Channels,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Build a buffer from raw interleaved samples.
    pub fn new(
        width: u32,
        height: u32,
        channels: Channels,
        data: Vec<u8>,
    ) -> Result<Self, BufferError> {
        let expected = checked_len(width, height, channels).ok_or(BufferError::TooLarge {
            width,
            height,
            channels: channels as u8,
        })?;
        if data.len() != expected {
            return Err(BufferError::LengthMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            channels,
            data,
        })
    }

    /// The empty sentinel.
    pub fn empty() -> Self {
        Self::default()
    }

    /// A buffer with every sample set to `value`.
    ///
    /// # Panics
    ///
    /// Panics if the sample count overflows `usize`.
    pub fn filled(width: u32, height: u32, channels: Channels, value: u8) -> Self {
        Self {
            width,
            height,
            channels,
            data: vec![value; alloc_len(width, height, channels)],
        }
    }

    /// A buffer whose samples are produced by `f(row, col, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if the sample count overflows `usize`.
    pub fn from_fn<F>(width: u32, height: u32, channels: Channels, mut f: F) -> Self
    where
        F: FnMut(u32, u32, usize) -> u8,
    {
        let mut data = Vec::with_capacity(alloc_len(width, height, channels));
        for row in 0..height {
            for col in 0..width {
                for channel in 0..channels.count() {
                    data.push(f(row, col, channel));
                }
            }
        }
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    /// Internal constructor for transform outputs whose length is correct by
    /// construction.
    pub(crate) fn from_parts(width: u32, height: u32, channels: Channels, data: Vec<u8>) -> Self {
        debug_assert_eq!(
            Some(data.len()),
            checked_len(width, height, channels),
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            channels,
            data,
        }
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn channels(&self) -> Channels {
        self.channels
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// True for the empty sentinel.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Sample at `(row, col, channel)`.
    ///
    /// # Panics
    ///
    /// Panics if any index is outside the buffer.
    #[inline]
    pub fn sample(&self, row: u32, col: u32, channel: usize) -> u8 {
        assert!(
            row < self.height && col < self.width && channel < self.channels.count(),
            "sample ({row}, {col}, {channel}) out of bounds for {}x{}x{}",
            self.width,
            self.height,
            self.channels.count()
        );
        self.data[self.offset(row, col) + channel]
    }

    /// All channels of the pixel at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the buffer.
    #[inline]
    pub fn pixel(&self, row: u32, col: u32) -> &[u8] {
        assert!(
            row < self.height && col < self.width,
            "pixel ({row}, {col}) out of bounds for {}x{}",
            self.width,
            self.height
        );
        let start = self.offset(row, col);
        &self.data[start..start + self.channels.count()]
    }

    /// Raw interleaved samples.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Consume the buffer and return its samples.
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Number of pixels.
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Size of the sample data in bytes.
    pub fn byte_size(&self) -> usize {
        self.data.len()
    }

    pub fn info(&self) -> BufferInfo {
        BufferInfo {
            width: self.width,
            height: self.height,
            channels: self.channels as u8,
        }
    }

    #[inline]
    fn offset(&self, row: u32, col: u32) -> usize {
        (row as usize * self.width as usize + col as usize) * self.channels.count()
    }
}

/// Sample count, or `None` when it overflows `usize` (reachable on 32-bit
/// targets such as wasm32).
#[inline]
fn checked_len(width: u32, height: u32, channels: Channels) -> Option<usize> {
    (width as usize)
        .checked_mul(height as usize)?
        .checked_mul(channels.count())
}

/// Length for the infallible constructors. An overflow becomes a request
/// for `usize::MAX` bytes, which the allocator rejects with a panic.
#[inline]
fn alloc_len(width: u32, height: u32, channels: Channels) -> usize {
    checked_len(width, height, channels).unwrap_or(usize::MAX)
}
