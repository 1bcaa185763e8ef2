//! Manipulator Core - pixel-level image transform library
//!
//! This crate provides the core of the image manipulator: an owned 8-bit
//! pixel buffer, a linear brightness/contrast remap, exact right-angle
//! rotations and axis flips, and a session that keeps the original image
//! apart from the most recent processed result.
//!
//! File decoding and encoding go through the [`codec::ImageCodec`]
//! capability so that the transforms themselves never perform I/O.
//!
//! # Module Structure
//!
//! - `buffer` - [`PixelBuffer`], the only data structure transforms touch
//! - `adjust` - Linear remap `clamp(alpha * x + beta, 0, 255)`
//! - `transform` - Rotation, flips and EXIF orientation
//! - `session` - [`ImageSession`] original/processed state
//! - `codec` - File decode/encode on top of the `image` crate

pub mod adjust;
pub mod buffer;
pub mod codec;
pub mod error;
pub mod session;
pub mod transform;

pub use adjust::{apply_linear_remap, LinearRemapLut};
pub use buffer::{BufferError, BufferInfo, Channels, PixelBuffer};
pub use codec::{CodecError, CodecOptions, ColorMode, ImageCodec, ImageFileCodec};
pub use error::{Error, Result};
pub use session::{ImageSession, SharedSession};
pub use transform::{flip, rotate, FlipAxis, Orientation, Rotation};
