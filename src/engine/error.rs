//! Browse engine error types
//!
//! Only the intent methods return these to the caller. Failures inside
//! completion handlers (transport, wire and thumbnail errors) are converted
//! into `BrowseError` for logging and never propagate: the engine just keeps
//! the state it had.

use thiserror::Error;

/// Errors reported by the browse engine
#[derive(Debug, Error)]
pub enum BrowseError {
    /// Next page requested while none is available
    #[error("No next results")]
    NoNextPage,

    /// Previous page requested while none is available
    #[error("No previous results")]
    NoPreviousPage,

    /// Operation on a `uid` that is not cached
    #[error("Model {0} is not available")]
    UnknownAsset(String),

    /// Request failed in the transport
    #[error("Transport error: {0}")]
    Transport(#[from] crate::transport::TransportError),

    /// Response body could not be decoded
    #[error("Response error: {0}")]
    Wire(#[from] crate::catalog::WireError),

    /// Downloaded image could not be processed
    #[error("Thumbnail error: {0}")]
    Thumbnail(#[from] crate::thumbnail::ThumbnailError),
}

/// Result type for engine intents
pub type Result<T> = std::result::Result<T, BrowseError>;
