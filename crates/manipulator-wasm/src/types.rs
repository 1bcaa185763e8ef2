//! WASM-compatible wrapper types for image data.
//!
//! This module provides JavaScript-friendly types that wrap the core
//! manipulator types, handling the conversion between Rust and JavaScript
//! data representations.

use manipulator_core::{Channels, PixelBuffer};
use wasm_bindgen::prelude::*;

/// A pixel buffer wrapper for JavaScript.
///
/// # Memory Management
///
/// The pixel data is stored in WASM memory. When you call `pixels()`, a copy is made
/// to JavaScript memory as a `Uint8Array`. For performance-critical code, consider
/// keeping the image in WASM memory and only extracting pixels when needed.
///
/// The `free()` method can be called to explicitly release WASM memory, but this is
/// optional as wasm-bindgen's finalizer will handle cleanup automatically.
#[wasm_bindgen]
#[derive(Debug)]
pub struct JsPixelBuffer {
    inner: PixelBuffer,
}

#[wasm_bindgen]
impl JsPixelBuffer {
    /// Create a new JsPixelBuffer from dimensions and pixel data.
    ///
    /// # Arguments
    /// * `width` - Image width in pixels
    /// * `height` - Image height in pixels
    /// * `channels` - 1 (grayscale) or 3 (color)
    /// * `pixels` - Interleaved sample data, row-major order
    #[wasm_bindgen(constructor)]
    pub fn new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<JsPixelBuffer, JsValue> {
        Self::try_new(width, height, channels, pixels).map_err(|e| JsValue::from_str(&e))
    }

    /// Get the image width in pixels
    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.inner.width()
    }

    /// Get the image height in pixels
    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.inner.height()
    }

    /// Get the number of samples per pixel (1 or 3)
    #[wasm_bindgen(getter)]
    pub fn channels(&self) -> u8 {
        self.inner.channels() as u8
    }

    /// Get the number of bytes in the pixel buffer
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.inner.byte_size()
    }

    /// True if this is the empty "no image" buffer
    #[wasm_bindgen(getter)]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Returns the interleaved samples as Uint8Array.
    ///
    /// Note: This creates a copy of the pixel data.
    pub fn pixels(&self) -> Vec<u8> {
        self.inner.as_bytes().to_vec()
    }

    /// Returns the pixels expanded to RGBA for `ImageData`/canvas display.
    ///
    /// Grayscale samples are replicated to all three color channels and
    /// alpha is opaque.
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut rgba = Vec::with_capacity(self.inner.pixel_count() * 4);
        match self.inner.channels() {
            Channels::Gray => {
                for &v in self.inner.as_bytes() {
                    rgba.extend_from_slice(&[v, v, v, 255]);
                }
            }
            Channels::Color => {
                for px in self.inner.as_bytes().chunks_exact(3) {
                    rgba.extend_from_slice(&[px[0], px[1], px[2], 255]);
                }
            }
        }
        rgba
    }

    /// Explicitly free WASM memory.
    ///
    /// This is optional - wasm-bindgen's finalizer will handle cleanup automatically.
    /// Call this if you want to immediately release memory for a large image.
    pub fn free(self) {
        // Dropping self releases the memory
    }
}

impl JsPixelBuffer {
    /// Validate raw parts without touching `JsValue`.
    pub(crate) fn try_new(
        width: u32,
        height: u32,
        channels: u8,
        pixels: Vec<u8>,
    ) -> Result<Self, String> {
        let channels = Channels::try_from(channels).map_err(|e| e.to_string())?;
        PixelBuffer::new(width, height, channels, pixels)
            .map(Self::from_buffer)
            .map_err(|e| e.to_string())
    }

    pub(crate) fn from_buffer(inner: PixelBuffer) -> Self {
        Self { inner }
    }

    pub(crate) fn as_buffer(&self) -> &PixelBuffer {
        &self.inner
    }

    pub(crate) fn into_buffer(self) -> PixelBuffer {
        self.inner
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_js_pixel_buffer_creation() {
        let img = JsPixelBuffer::try_new(100, 50, 3, vec![0u8; 100 * 50 * 3]).unwrap();
        assert_eq!(img.width(), 100);
        assert_eq!(img.height(), 50);
        assert_eq!(img.channels(), 3);
        assert_eq!(img.byte_length(), 15000);
        assert!(!img.is_empty());
    }

    #[test]
    fn test_js_pixel_buffer_invalid_parts() {
        assert!(JsPixelBuffer::try_new(10, 10, 4, vec![0u8; 400]).is_err());
        assert!(JsPixelBuffer::try_new(10, 10, 1, vec![0u8; 99]).is_err());
        let err = JsPixelBuffer::try_new(u32::MAX, u32::MAX, 3, Vec::new()).unwrap_err();
        assert!(err.contains("too large"), "{err}");
    }

    #[test]
    fn test_js_pixel_buffer_pixels() {
        let pixels = vec![255u8, 128, 64, 32, 16, 8]; // 2 RGB pixels
        let img = JsPixelBuffer::try_new(2, 1, 3, pixels.clone()).unwrap();
        assert_eq!(img.pixels(), pixels);
    }

    #[test]
    fn test_to_rgba_gray() {
        let img = JsPixelBuffer::try_new(2, 1, 1, vec![7, 9]).unwrap();
        assert_eq!(img.to_rgba(), vec![7, 7, 7, 255, 9, 9, 9, 255]);
    }

    #[test]
    fn test_to_rgba_color() {
        let img = JsPixelBuffer::try_new(1, 1, 3, vec![1, 2, 3]).unwrap();
        assert_eq!(img.to_rgba(), vec![1, 2, 3, 255]);
    }

    #[test]
    fn test_buffer_round_trip() {
        let buffer = PixelBuffer::filled(4, 2, Channels::Gray, 5);
        let js_img = JsPixelBuffer::from_buffer(buffer.clone());
        assert_eq!(js_img.as_buffer(), &buffer);
        assert_eq!(js_img.into_buffer(), buffer);
    }
}
