//! Original/processed image state.
//!
//! [`ImageSession`] holds two independent slots. `original` is replaced by
//! each load, `processed` by each transform. Transforms always read
//! `original`, so their results never depend on call order. A failed
//! operation leaves both slots untouched.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use parking_lot::Mutex;

use crate::adjust::apply_linear_remap;
use crate::buffer::PixelBuffer;
use crate::codec::ImageCodec;
use crate::error::{Error, Result};
use crate::transform::{self, FlipAxis, Rotation};

/// One loaded image and the result of the most recent transform.
#[derive(Debug, Clone, Default)]
pub struct ImageSession {
    original: PixelBuffer,
    processed: PixelBuffer,
    source_path: Option<PathBuf>,
}

impl ImageSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the original image and clear the processed one.
    pub fn load(&mut self, buffer: PixelBuffer) {
        self.original = buffer;
        self.processed = PixelBuffer::empty();
        self.source_path = None;
    }

    /// Decode `path` with `codec` and make it the original image.
    ///
    /// On failure the previous original and processed images are kept.
    pub fn load_from(&mut self, codec: &dyn ImageCodec, path: &Path) -> Result<()> {
        let buffer = decode_logged(codec, path)?;
        self.install(buffer, path);
        Ok(())
    }

    fn install(&mut self, buffer: PixelBuffer, path: &Path) {
        self.load(buffer);
        self.source_path = Some(path.to_path_buf());
    }

    /// Apply `clamp(alpha * x + beta, 0, 255)` to the original image.
    pub fn enhance_contrast(&mut self, alpha: f64, beta: f64) -> Result<&PixelBuffer> {
        let output = apply_linear_remap(self.require_original()?, alpha, beta)?;
        tracing::info!(alpha, beta, "Contrast enhanced");
        Ok(self.set_processed(output))
    }

    /// Rotate the original image clockwise.
    pub fn rotate(&mut self, rotation: Rotation) -> Result<&PixelBuffer> {
        let output = transform::rotate(self.require_original()?, rotation)?;
        tracing::info!(degrees = rotation.degrees(), "Image rotated");
        Ok(self.set_processed(output))
    }

    /// Rotate the original image clockwise by 90, 180 or 270 degrees.
    ///
    /// The loaded image is checked before the angle, so an unloaded session
    /// always reports [`Error::NoImageLoaded`].
    pub fn rotate_degrees(&mut self, degrees: i32) -> Result<&PixelBuffer> {
        self.require_original()?;
        let rotation = Rotation::from_degrees(degrees).map_err(|e| {
            tracing::warn!("{e}");
            e
        })?;
        self.rotate(rotation)
    }

    /// Mirror the original image.
    pub fn flip(&mut self, axis: FlipAxis) -> Result<&PixelBuffer> {
        let output = transform::flip(self.require_original()?, axis)?;
        tracing::info!(%axis, "Image flipped");
        Ok(self.set_processed(output))
    }

    /// Encode the processed image to `path` with `codec`.
    pub fn save_to(&self, codec: &dyn ImageCodec, path: &Path) -> Result<()> {
        let processed = self.require_processed()?;
        codec.encode(processed, path).map_err(|e| {
            tracing::warn!("Could not save image: {e}");
            Error::from(e)
        })?;
        tracing::info!(path = %path.display(), "Image saved");
        Ok(())
    }

    /// The original image, or the empty sentinel.
    pub fn original(&self) -> &PixelBuffer {
        &self.original
    }

    /// The processed image, or the empty sentinel.
    pub fn processed(&self) -> &PixelBuffer {
        &self.processed
    }

    pub fn has_image(&self) -> bool {
        !self.original.is_empty()
    }

    pub fn has_processed(&self) -> bool {
        !self.processed.is_empty()
    }

    /// Path of the last successful file load.
    pub fn source_path(&self) -> Option<&Path> {
        self.source_path.as_deref()
    }

    /// The original image, or [`Error::NoImageLoaded`].
    pub fn require_original(&self) -> Result<&PixelBuffer> {
        if self.original.is_empty() {
            tracing::warn!("No image loaded");
            return Err(Error::NoImageLoaded);
        }
        Ok(&self.original)
    }

    /// The processed image, or [`Error::NoProcessedImage`].
    pub fn require_processed(&self) -> Result<&PixelBuffer> {
        if self.processed.is_empty() {
            tracing::warn!("No processed image available");
            return Err(Error::NoProcessedImage);
        }
        Ok(&self.processed)
    }

    fn set_processed(&mut self, output: PixelBuffer) -> &PixelBuffer {
        debug_assert_eq!(output.channels(), self.original.channels());
        self.processed = output;
        &self.processed
    }
}

/// An [`ImageSession`] behind one lock, for drivers that share it across
/// threads.
///
/// Each method holds the lock for the whole "read original, compute, replace
/// processed" sequence, so a concurrent load never interleaves with a
/// transform. Transform results are returned as owned copies.
#[derive(Debug, Clone, Default)]
pub struct SharedSession {
    inner: Arc<Mutex<ImageSession>>,
}

impl SharedSession {
    pub fn new(session: ImageSession) -> Self {
        Self {
            inner: Arc::new(Mutex::new(session)),
        }
    }

    pub fn load(&self, buffer: PixelBuffer) {
        self.inner.lock().load(buffer);
    }

    /// Decodes without holding the lock; only the swap is exclusive.
    pub fn load_from(&self, codec: &dyn ImageCodec, path: &Path) -> Result<()> {
        let buffer = decode_logged(codec, path)?;
        self.inner.lock().install(buffer, path);
        Ok(())
    }

    pub fn enhance_contrast(&self, alpha: f64, beta: f64) -> Result<PixelBuffer> {
        self.inner.lock().enhance_contrast(alpha, beta).cloned()
    }

    pub fn rotate(&self, rotation: Rotation) -> Result<PixelBuffer> {
        self.inner.lock().rotate(rotation).cloned()
    }

    pub fn flip(&self, axis: FlipAxis) -> Result<PixelBuffer> {
        self.inner.lock().flip(axis).cloned()
    }

    pub fn save_to(&self, codec: &dyn ImageCodec, path: &Path) -> Result<()> {
        self.inner.lock().save_to(codec, path)
    }

    pub fn has_image(&self) -> bool {
        self.inner.lock().has_image()
    }

    /// Run `f` with exclusive access to the session.
    pub fn with<R>(&self, f: impl FnOnce(&mut ImageSession) -> R) -> R {
        f(&mut self.inner.lock())
    }
}

fn decode_logged(codec: &dyn ImageCodec, path: &Path) -> Result<PixelBuffer> {
    let buffer = codec.decode(path).map_err(|e| {
        tracing::warn!("Could not load image from {}: {e}", path.display());
        Error::from(e)
    })?;

    tracing::info!(
        path = %path.display(),
        width = buffer.width(),
        height = buffer.height(),
        channels = buffer.channels().count(),
        "Image loaded"
    );
    Ok(buffer)
}
