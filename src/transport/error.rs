//! Transport error types

use thiserror::Error;

/// Errors reported by a transport
#[derive(Debug, Error)]
pub enum TransportError {
    /// Server answered with a non-success status
    #[error("Request to {url} failed with status {status}")]
    Status { url: String, status: u16 },

    /// Request could not be sent or the body could not be read
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Invalid header value (e.g. a malformed API token)
    #[error("Invalid header value: {0}")]
    InvalidHeader(String),

    /// Worker pool could not be started
    #[error("Failed to start transport workers: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}
