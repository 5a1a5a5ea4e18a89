//! Wire format error types

use thiserror::Error;

/// Errors raised while decoding catalog responses
#[derive(Debug, Error)]
pub enum WireError {
    /// Body is not valid JSON or does not have the expected shape
    #[error("Malformed catalog response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Result type for wire decoding
pub type Result<T> = std::result::Result<T, WireError>;
