//! Thumbnail error types

use thiserror::Error;

/// Errors that can occur while processing a downloaded thumbnail
#[derive(Debug, Error)]
pub enum ThumbnailError {
    /// Bytes could not be decoded as an image
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// Decoded image has a zero dimension
    #[error("Image is empty ({0}x{1})")]
    EmptyImage(u32, u32),
}

/// Result type for thumbnail operations
pub type Result<T> = std::result::Result<T, ThumbnailError>;
