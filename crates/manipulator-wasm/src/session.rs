//! WASM bindings for the image session.
//!
//! A `JsImageSession` owns one original image and the latest processed
//! result, mirroring `manipulator_core::ImageSession`. Images come in as
//! encoded file bytes (e.g. from a `File` input) or raw pixels, and go back
//! out as `JsPixelBuffer`s or encoded bytes for download.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const session = new JsImageSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//!
//! const rotated = session.rotate(90);
//! const png = session.encode_processed("png", 90);
//! ```

use manipulator_core::codec::{self, CodecOptions};
use manipulator_core::{FlipAxis, ImageSession, PixelBuffer};
use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::log;
use crate::types::JsPixelBuffer;

/// Shape of the session's slots, returned by `info()`.
#[derive(Debug, Clone, Serialize)]
struct SessionInfo {
    original: Option<manipulator_core::BufferInfo>,
    processed: Option<manipulator_core::BufferInfo>,
}

/// Image session wrapper for JavaScript.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsImageSession {
    inner: ImageSession,
}

#[wasm_bindgen]
impl JsImageSession {
    /// Create an empty session.
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode encoded image bytes (PNG, JPEG, BMP) as the original image.
    ///
    /// EXIF orientation is applied. On failure the previous images are kept.
    pub fn load_bytes(&mut self, bytes: &[u8]) -> Result<(), JsValue> {
        self.try_load_bytes(bytes).map_err(to_js)
    }

    /// Use raw pixels as the original image.
    pub fn load_pixels(&mut self, image: JsPixelBuffer) {
        self.inner.load(image.into_buffer());
    }

    /// True once an image has been loaded.
    pub fn has_image(&self) -> bool {
        self.inner.has_image()
    }

    /// Apply `clamp(alpha * x + beta, 0, 255)` to every sample.
    pub fn enhance_contrast(&mut self, alpha: f64, beta: f64) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .enhance_contrast(alpha, beta)
            .map(|buf| JsPixelBuffer::from_buffer(buf.clone()))
            .map_err(to_js)
    }

    /// Rotate clockwise by 90, 180 or 270 degrees.
    pub fn rotate(&mut self, degrees: i32) -> Result<JsPixelBuffer, JsValue> {
        self.inner
            .rotate_degrees(degrees)
            .map(|buf| JsPixelBuffer::from_buffer(buf.clone()))
            .map_err(to_js)
    }

    /// Flip along `"horizontal"`, `"vertical"` or `"both"`.
    pub fn flip(&mut self, axis: &str) -> Result<JsPixelBuffer, JsValue> {
        self.try_flip(axis)
            .map(JsPixelBuffer::from_buffer)
            .map_err(to_js)
    }

    /// Copy of the original image (empty if none loaded).
    pub fn original(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.original().clone())
    }

    /// Copy of the processed image (empty if no transform has run).
    pub fn processed(&self) -> JsPixelBuffer {
        JsPixelBuffer::from_buffer(self.inner.processed().clone())
    }

    /// Encode the processed image as `"png"`, `"jpeg"`/`"jpg"` or `"bmp"`.
    pub fn encode_processed(&self, format: &str, quality: u8) -> Result<Vec<u8>, JsValue> {
        self.try_encode_processed(format, quality).map_err(to_js)
    }

    /// `{ original: {width, height, channels} | null, processed: ... }`
    pub fn info(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.session_info())
            .map_err(|e| JsValue::from_str(&e.to_string()))
    }
}

impl JsImageSession {
    fn try_load_bytes(&mut self, bytes: &[u8]) -> Result<(), manipulator_core::Error> {
        let buffer = codec::decode_bytes(bytes, &CodecOptions::default())?;
        log(&format!(
            "Image loaded: {}x{}, {} channel(s)",
            buffer.width(),
            buffer.height(),
            buffer.channels().count()
        ));
        self.inner.load(buffer);
        Ok(())
    }

    fn try_flip(&mut self, axis: &str) -> Result<PixelBuffer, manipulator_core::Error> {
        self.inner.require_original()?;
        let axis: FlipAxis = axis.parse()?;
        self.inner.flip(axis).cloned()
    }

    fn try_encode_processed(
        &self,
        format: &str,
        quality: u8,
    ) -> Result<Vec<u8>, manipulator_core::Error> {
        let processed = self.inner.require_processed()?;
        let format = codec::format_from_name(format)?;
        Ok(codec::encode_bytes(processed, format, quality)?)
    }

    fn session_info(&self) -> SessionInfo {
        let info = |buf: &PixelBuffer| (!buf.is_empty()).then(|| buf.info());
        SessionInfo {
            original: info(self.inner.original()),
            processed: info(self.inner.processed()),
        }
    }
}

fn to_js(err: manipulator_core::Error) -> JsValue {
    JsValue::from_str(&err.to_string())
}


/// WASM-specific tests that require JsValue.
///
/// These tests use functions that return `Result<T, JsValue>` and can only
/// run on wasm32 targets. Use `wasm-pack test` to run these.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_rotate_before_load_errors() {
        let mut session = JsImageSession::new();
        assert!(session.rotate(90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_invalid_angle_errors() {
        let mut session = JsImageSession::new();
        session.load_pixels(JsPixelBuffer::try_new(1, 1, 1, vec![0]).unwrap());
        assert!(session.rotate(45).is_err());
    }

    #[wasm_bindgen_test]
    fn test_load_invalid_bytes_errors() {
        let mut session = JsImageSession::new();
        assert!(session.load_bytes(&[1, 2, 3]).is_err());
        assert!(!session.has_image());
    }

    #[wasm_bindgen_test]
    fn test_info_returns_object() {
        let session = JsImageSession::new();
        assert!(session.info().is_ok());
    }
}
