//! Error types for the image crate.

use thiserror::Error;

/// Result type alias for image operations.
pub type Result<T> = std::result::Result<T, ImageError>;

/// Errors that can occur during image operations.
#[derive(Debug, Error)]
pub enum ImageError {
    /// Unknown image format
    #[error("Unknown image format")]
    UnknownFormat,

    /// Invalid image data
    #[error("Invalid image data: {0}")]
    InvalidData(String),

    /// Encoding error
    #[error("Encode error: {0}")]
    Encode(String),

    /// Decoding or encoding failure reported by the image crate
    #[error("Image processing error: {0}")]
    Processing(#[from] image::ImageError),
}
