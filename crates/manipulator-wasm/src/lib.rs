//! Manipulator WASM - WebAssembly bindings for the image manipulator
//!
//! This crate provides WASM bindings to expose the manipulator-core
//! functionality to JavaScript/TypeScript applications.
//!
//! # Module Structure
//!
//! - `session` - `JsImageSession`, original/processed image state
//! - `transform` - Stateless contrast, rotation and flip functions
//! - `types` - WASM-compatible wrapper types for image data
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsImageSession } from '@manipulator/wasm';
//!
//! // Initialize WASM module (must call first)
//! await init();
//!
//! const session = new JsImageSession();
//! session.load_bytes(new Uint8Array(await file.arrayBuffer()));
//! const flipped = session.flip("horizontal");
//! console.log(`Flipped ${flipped.width}x${flipped.height}`);
//! ```

use wasm_bindgen::prelude::*;

mod session;
mod transform;
mod types;

// Re-export public types
pub use session::JsImageSession;
pub use transform::{flip_image, linear_remap, rotate_image};
pub use types::JsPixelBuffer;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    log(&format!("manipulator-wasm {} ready", version()));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Write a message to the browser console.
pub(crate) fn log(message: &str) {
    #[cfg(target_arch = "wasm32")]
    web_sys::console::log_1(&JsValue::from_str(message));

    #[cfg(not(target_arch = "wasm32"))]
    let _ = message;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_log_is_noop_on_native() {
        log("not a browser");
    }
}
