//! Request transport abstraction
//!
//! The engine never performs I/O itself. It hands a URL and a completion
//! callback to a [`Transport`] and carries on; the transport runs the request
//! wherever it likes and invokes the callback exactly once, possibly on
//! another thread. No ordering between completions is assumed.
//!
//! [`HttpTransport`] is the production implementation (blocking `reqwest`
//! client on a `rayon` worker pool). Tests substitute an in-memory queue.

mod error;
mod http;

pub use error::TransportError;
pub use http::HttpTransport;

/// Callback invoked with the raw response body or the failure
pub type Completion = Box<dyn FnOnce(Result<Vec<u8>, TransportError>) + Send + 'static>;

/// Fire-and-forget request executor
pub trait Transport: Send + Sync {
    /// Start a GET request for `url` and call `on_complete` when it finishes
    ///
    /// Must not block on the request and must call `on_complete` exactly once.
    /// Implementations may call it before `issue` returns.
    fn issue(&self, url: &str, on_complete: Completion);
}
