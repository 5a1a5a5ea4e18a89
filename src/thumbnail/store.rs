//! Decoded image memoisation

use super::pipeline::ProcessedImage;
use crate::config::BrowserConfig;
use moka::sync::Cache;
use std::time::Duration;

/// Processed images keyed by the URL they were downloaded from
///
/// Lets a new search that returns already-seen models attach their imagery
/// without another download. Entries expire after the configured TTL.
#[derive(Clone)]
pub struct ImageStore {
    cache: Cache<String, ProcessedImage>,
}

impl ImageStore {
    /// Create a store sized from the browser configuration
    #[must_use]
    pub fn new(config: &BrowserConfig) -> Self {
        Self::with_cache_config(
            Duration::from_secs(config.image_cache_ttl_secs),
            config.image_cache_capacity,
        )
    }

    /// Create a store with explicit TTL and capacity
    ///
    /// # Arguments
    ///
    /// * `ttl` - Time-to-live for cached images
    /// * `max_capacity` - Maximum number of cached images
    #[must_use]
    pub fn with_cache_config(ttl: Duration, max_capacity: u64) -> Self {
        let cache = Cache::builder()
            .time_to_live(ttl)
            .max_capacity(max_capacity)
            .build();

        Self { cache }
    }

    #[must_use]
    pub fn get(&self, url: &str) -> Option<ProcessedImage> {
        self.cache.get(url)
    }

    pub fn insert(&self, url: &str, image: ProcessedImage) {
        self.cache.insert(url.to_string(), image);
    }
}
