//! Stateless WASM bindings for the pixel transforms.
//!
//! These operate on a `JsPixelBuffer` directly, for callers that manage
//! their own image state instead of using `JsImageSession`.

use crate::types::JsPixelBuffer;
use manipulator_core::{adjust, transform, FlipAxis, Rotation};
use wasm_bindgen::prelude::*;

/// Apply `clamp(alpha * x + beta, 0, 255)` to every sample.
///
/// # Example (TypeScript)
///
/// ```typescript
/// // Boost contrast by 50% and brighten slightly
/// const brighter = linear_remap(image, 1.5, 20);
/// ```
#[wasm_bindgen]
pub fn linear_remap(
    image: &JsPixelBuffer,
    alpha: f64,
    beta: f64,
) -> Result<JsPixelBuffer, JsValue> {
    adjust::apply_linear_remap(image.as_buffer(), alpha, beta)
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Rotate clockwise by 90, 180 or 270 degrees.
#[wasm_bindgen]
pub fn rotate_image(image: &JsPixelBuffer, degrees: i32) -> Result<JsPixelBuffer, JsValue> {
    Rotation::from_degrees(degrees)
        .and_then(|rotation| transform::rotate(image.as_buffer(), rotation))
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Flip along `"horizontal"`, `"vertical"` or `"both"`.
#[wasm_bindgen]
pub fn flip_image(image: &JsPixelBuffer, axis: &str) -> Result<JsPixelBuffer, JsValue> {
    axis.parse::<FlipAxis>()
        .and_then(|axis| transform::flip(image.as_buffer(), axis))
        .map(JsPixelBuffer::from_buffer)
        .map_err(|e| JsValue::from_str(&e.to_string()))
}
