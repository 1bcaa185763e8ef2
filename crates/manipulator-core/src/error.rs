//! Error types shared by the session and the transforms.

use thiserror::Error;

use crate::codec::CodecError;

/// Errors reported by session operations and transforms.
///
/// Every variant is recoverable: a failed operation leaves the session's
/// original and processed buffers exactly as they were.
#[derive(Debug, Error)]
pub enum Error {
    /// A transform was requested before any image was loaded.
    #[error("No image loaded")]
    NoImageLoaded,

    /// Save or display of the processed image was requested before any
    /// transform produced one.
    #[error("No processed image available")]
    NoProcessedImage,

    /// A rotation angle or flip axis outside the supported set.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Decode or encode failure reported by the codec.
    #[error(transparent)]
    Io(#[from] CodecError),
}

/// Result alias for session and transform operations.
pub type Result<T> = std::result::Result<T, Error>;
