//! asset-browser - A client-side browsing engine for a remote 3D model catalog
//!
//! This library issues catalog searches, tracks pagination cursors, caches
//! result records keyed by model `uid`, downloads and normalizes thumbnails,
//! and lazily fetches per-model detail. Network completions may arrive in any
//! order on any thread; the [`BrowseEngine`] applies them to one consistent
//! state and notifies the caller through a refresh callback.
//!
//! ```no_run
//! use asset_browser::{BrowseEngine, BrowserConfig, HttpTransport, SearchParams};
//! use std::sync::Arc;
//!
//! let config = BrowserConfig::load()?;
//! let transport = Arc::new(HttpTransport::new(&config)?);
//! let engine = BrowseEngine::new(transport, &config)
//!     .with_refresh(|| println!("results changed"));
//!
//! engine.search(&SearchParams::new("dragon"));
//! # Ok::<(), asset_browser::BrowserError>(())
//! ```

use thiserror::Error;

pub mod cache;
pub mod catalog;
pub mod cli;
pub mod config;
pub mod cursor;
pub mod engine;
pub mod output;
pub mod query;
pub mod thumbnail;
pub mod transport;

#[cfg(test)]
pub mod testing;

pub use catalog::{AssetDetail, AssetRecord};
pub use config::BrowserConfig;
pub use engine::{BrowseEngine, BrowseError, RefreshCallback};
pub use query::{SearchParams, SearchQuery, SortBy};
pub use thumbnail::{Bitmap, ProcessedImage};
pub use transport::{Completion, HttpTransport, Transport, TransportError};

/// Error enum, contains all failure states of the program
#[derive(Debug, Error)]
pub enum BrowserError {
    /// Browse engine error
    #[error("Browse error: {0}")]
    BrowseError(#[from] BrowseError),
    /// Transport setup or request error
    #[error("Transport error: {0}")]
    TransportError(#[from] TransportError),
    /// Represents a configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] ::config::ConfigError),
    /// Invalid input error
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    /// The catalog did not answer in time
    #[error("Timed out waiting for {0}")]
    Timeout(String),
}
