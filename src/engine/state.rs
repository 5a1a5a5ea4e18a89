//! Mutable engine state and the requests it produces
//!
//! State transitions here never perform I/O. They return [`Request`]s which
//! the engine issues once the state lock has been released.

use crate::cache::{ResultCache, ThumbnailFetch};
use crate::catalog::CategoryMap;
use crate::config::BrowserConfig;
use crate::cursor::CursorTracker;
use std::collections::HashSet;

/// Catalog endpoints, copied out of the configuration
#[derive(Debug, Clone)]
pub(super) struct Endpoints {
    pub search: String,
    pub model: String,
    pub categories: String,
}

impl From<&BrowserConfig> for Endpoints {
    fn from(config: &BrowserConfig) -> Self {
        Self {
            search: config.search_endpoint.clone(),
            model: config.model_endpoint.clone(),
            categories: config.categories_endpoint.clone(),
        }
    }
}

/// A request to hand to the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum Request {
    /// Search or page load; responses from older generations are dropped
    Page { url: String, generation: u64 },
    /// Thumbnail or preview download for one model
    Image { uid: String, url: String },
    /// Detail fetch for one model
    Detail { uid: String, url: String },
    /// Category listing
    Categories { url: String },
}

impl From<ThumbnailFetch> for Request {
    fn from(fetch: ThumbnailFetch) -> Self {
        Self::Image {
            uid: fetch.uid,
            url: fetch.url,
        }
    }
}

/// Everything guarded by the engine's state lock
#[derive(Debug)]
pub(super) struct BrowseState {
    pub cache: ResultCache,
    pub cursors: CursorTracker,
    pub categories: CategoryMap,
    /// Encoded query of the current search, re-issued when paging
    pub last_query: String,
    /// Incremented on every page request
    pub generation: u64,
    pub is_fetching: bool,
    /// Set once previews were requested for the current page
    pub previews_requested: bool,
    /// `uid`s with a detail request in flight
    pub pending_details: HashSet<String>,
}

impl BrowseState {
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            cache: ResultCache::new(config),
            cursors: CursorTracker::new(config.page_size),
            categories: CategoryMap::default(),
            last_query: String::new(),
            generation: 0,
            is_fetching: false,
            previews_requested: false,
            pending_details: HashSet::new(),
        }
    }

    /// Reset results and cursors, then request page 1 of `query`
    pub fn start_search(&mut self, query: String, endpoints: &Endpoints) -> Request {
        self.cache.reset();
        self.cursors.reset();
        self.last_query = query;
        self.start_page(None, endpoints)
    }

    /// Request a page of the current query
    pub fn start_page(&mut self, cursor: Option<&str>, endpoints: &Endpoints) -> Request {
        self.generation += 1;
        self.is_fetching = true;
        self.previews_requested = false;

        let mut url = format!("{}{}", endpoints.search, self.last_query);
        if let Some(cursor) = cursor {
            url.push_str("&cursor=");
            url.push_str(cursor);
        }

        Request::Page {
            url,
            generation: self.generation,
        }
    }
}
