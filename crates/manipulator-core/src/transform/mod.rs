//! Geometric transforms: right-angle rotation and axis flips.
//!
//! Every operation here is an exact pixel permutation. No interpolation is
//! performed, every output pixel is a verbatim copy of exactly one input
//! pixel, and all channels of a pixel move together.
//!
//! # Coordinate System
//!
//! - Rotation angles are in degrees, positive = clockwise
//! - Indices are `(row, col)` with the origin at the top-left corner
//! - `W`/`H` denote the input width and height

mod orientation;
mod remap;

pub use orientation::{FlipAxis, Orientation, Rotation};
pub use remap::{apply_orientation, flip, rotate};
