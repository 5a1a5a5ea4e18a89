//! Browse engine
//!
//! Orchestrates catalog browsing: turns caller intents (search, page, detail,
//! previews, categories) into transport requests and applies the completions
//! to the result cache.
//!
//! # Architecture
//!
//! - **State**: cache, cursors, categories and flags live in one
//!   [`BrowseState`] behind a `parking_lot::Mutex`. Every completion handler
//!   does its read-modify-write in a single critical section, so two
//!   completions never interleave on the same record.
//! - **Effects**: state transitions return [`Request`]s. They are issued, and
//!   the refresh callback is invoked, only after the lock is released, so a
//!   transport may complete synchronously and a refresh callback may read
//!   results without deadlocking.
//! - **Staleness**: nothing is cancelled. Page responses carry the generation
//!   they were issued under and are dropped if a newer page was requested;
//!   image and detail responses for a `uid` that is no longer cached are
//!   dropped.
//!
//! # Flow
//!
//! ```text
//! search() ──► reset cache ──► Page request ──► handle_page()
//!                                                  │ cursors, cache upsert
//!                                                  ├─► refresh()
//!                                                  └─► Image requests ──► handle_image()
//!                                                                           │ decode/crop/resize
//!                                                                           └─► refresh()
//! ```

mod error;
mod state;

pub use error::{BrowseError, Result};

use crate::cache::ThumbnailFetch;
use crate::catalog::wire::{CategoriesResponse, ModelDetailResponse, SearchResponse};
use crate::catalog::{AssetDetail, AssetRecord, CategoryMap};
use crate::config::BrowserConfig;
use crate::query::{SearchParams, SearchQuery};
use crate::thumbnail::{ImageStore, ProcessedImage, ThumbnailPipeline};
use crate::transport::{Transport, TransportError};
use parking_lot::{Mutex, RwLock};
use state::{BrowseState, Endpoints, Request};
use std::collections::HashSet;
use std::sync::{Arc, Weak};
use tracing::{debug, info, instrument, warn};

/// Notification invoked whenever new state is ready for display
pub type RefreshCallback = Arc<dyn Fn() + Send + Sync>;

/// Handle to a browse session
///
/// Cheap to clone; clones share the same session.
#[derive(Clone)]
pub struct BrowseEngine {
    inner: Arc<Inner>,
}

struct Inner {
    state: Mutex<BrowseState>,
    transport: Arc<dyn Transport>,
    pipeline: ThumbnailPipeline,
    images: ImageStore,
    endpoints: Endpoints,
    refresh: RwLock<Option<RefreshCallback>>,
}

impl BrowseEngine {
    /// Create an engine that issues requests through `transport`
    ///
    /// No request is made until an intent method is called.
    #[must_use]
    pub fn new<T: Transport + 'static>(transport: Arc<T>, config: &BrowserConfig) -> Self {
        let transport: Arc<dyn Transport> = transport;

        Self {
            inner: Arc::new(Inner {
                state: Mutex::new(BrowseState::new(config)),
                transport,
                pipeline: ThumbnailPipeline::new(config),
                images: ImageStore::new(config),
                endpoints: Endpoints::from(config),
                refresh: RwLock::new(None),
            }),
        }
    }

    /// Builder-style variant of [`BrowseEngine::set_refresh_callback`]
    #[must_use]
    pub fn with_refresh(self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.set_refresh_callback(callback);
        self
    }

    /// Install the callback invoked when new state is ready
    ///
    /// The callback runs on whichever thread delivered the completion. The
    /// engine owns the callback, so a callback that captures a clone of this
    /// engine keeps it (and its transport) alive forever; signal another
    /// owner through a channel instead, as the binary does.
    pub fn set_refresh_callback(&self, callback: impl Fn() + Send + Sync + 'static) {
        *self.inner.refresh.write() = Some(Arc::new(callback));
    }

    /// Start a new search, discarding all cached results
    #[instrument(level = "debug", skip(self))]
    pub fn search(&self, params: &SearchParams) {
        let request = {
            let mut state = self.inner.state.lock();
            if !params.category.is_empty() && state.categories.slug(&params.category).is_none() {
                warn!(category = %params.category, "unknown category, searching all categories");
            }
            let query = params.to_query(&state.categories).encode();
            state.start_search(query, &self.inner.endpoints)
        };

        self.inner.dispatch(vec![request]);
    }

    /// Start the default search: staff picks, newest first
    #[instrument(level = "debug", skip(self))]
    pub fn initial_search(&self) {
        let request = {
            let mut state = self.inner.state.lock();
            state.start_search(SearchQuery::initial().encode(), &self.inner.endpoints)
        };

        self.inner.dispatch(vec![request]);
    }

    /// Load the next page of the current search
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::NoNextPage` (and issues nothing) if the current
    /// page is the last one.
    #[instrument(level = "debug", skip(self))]
    pub fn request_next_page(&self) -> Result<()> {
        let request = {
            let mut state = self.inner.state.lock();
            if !state.cursors.has_next() {
                warn!("next page requested but none is available");
                return Err(BrowseError::NoNextPage);
            }
            let cursor = state.cursors.next().to_string();
            state.cache.clear_page();
            state.start_page(Some(&cursor), &self.inner.endpoints)
        };

        self.inner.dispatch(vec![request]);
        Ok(())
    }

    /// Load the previous page of the current search
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::NoPreviousPage` (and issues nothing) if there is
    /// no previous page.
    #[instrument(level = "debug", skip(self))]
    pub fn request_previous_page(&self) -> Result<()> {
        let request = {
            let mut state = self.inner.state.lock();
            if !state.cursors.has_previous() {
                warn!("previous page requested but none is available");
                return Err(BrowseError::NoPreviousPage);
            }
            let cursor = state.cursors.previous().to_string();
            state.cache.clear_page();
            state.start_page(Some(&cursor), &self.inner.endpoints)
        };

        self.inner.dispatch(vec![request]);
        Ok(())
    }

    /// Fetch extended detail for a cached model
    ///
    /// Does nothing if the detail is already loaded or a request for it is in
    /// flight.
    ///
    /// # Errors
    ///
    /// Returns `BrowseError::UnknownAsset` if `uid` is not cached.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_detail(&self, uid: &str) -> Result<()> {
        let request = {
            let mut state = self.inner.state.lock();
            let Some(record) = state.cache.get(uid) else {
                warn!(%uid, "detail requested for a model that is not available");
                return Err(BrowseError::UnknownAsset(uid.to_string()));
            };

            if record.detail_fetched || state.pending_details.contains(uid) {
                debug!(%uid, "detail already fetched or pending");
                return Ok(());
            }

            state.pending_details.insert(uid.to_string());
            Request::Detail {
                uid: uid.to_string(),
                url: format!("{}/{}", self.inner.endpoints.model, uid),
            }
        };

        self.inner.dispatch(vec![request]);
        Ok(())
    }

    /// Request large previews for the current page
    ///
    /// Runs at most once per page load; later calls are ignored until the
    /// next page arrives. Calls made while a page is still loading do
    /// nothing.
    #[instrument(level = "debug", skip(self))]
    pub fn fetch_thumbnails(&self) {
        let (requests, attached) = {
            let mut state = self.inner.state.lock();
            if state.is_fetching || state.previews_requested {
                return;
            }
            state.previews_requested = true;

            let mut seen = HashSet::new();
            let wanted: Vec<ThumbnailFetch> = state
                .cache
                .page()
                .into_iter()
                .filter(|record| record.preview.is_none() && seen.insert(record.uid()))
                .filter_map(|record| {
                    record.preview_url.as_ref().map(|url| ThumbnailFetch {
                        uid: record.uid().to_string(),
                        url: url.clone(),
                    })
                })
                .collect();

            self.inner.resolve_images(&mut state, wanted)
        };

        if attached {
            self.inner.notify();
        }
        self.inner.dispatch(requests);
    }

    /// Fetch the category list, replacing the current one on success
    #[instrument(level = "debug", skip(self))]
    pub fn reload_categories(&self) {
        let url = self.inner.endpoints.categories.clone();
        self.inner.dispatch(vec![Request::Categories { url }]);
    }

    /// Records of the current page, in server order
    #[must_use]
    pub fn results(&self) -> Vec<AssetRecord> {
        let state = self.inner.state.lock();
        state.cache.page().into_iter().cloned().collect()
    }

    /// Category display names, starting with "All"
    #[must_use]
    pub fn categories(&self) -> Vec<String> {
        self.inner.state.lock().categories.names()
    }

    /// Look up a cached model
    #[must_use]
    pub fn model(&self, uid: &str) -> Option<AssetRecord> {
        let record = self.inner.state.lock().cache.get(uid).cloned();
        if record.is_none() {
            warn!(%uid, "model is not available");
        }
        record
    }

    #[must_use]
    pub fn has_next_results(&self) -> bool {
        self.inner.state.lock().cursors.has_next()
    }

    #[must_use]
    pub fn has_previous_results(&self) -> bool {
        self.inner.state.lock().cursors.has_previous()
    }

    /// True while a search or page request is outstanding
    #[must_use]
    pub fn is_fetching(&self) -> bool {
        self.inner.state.lock().is_fetching
    }

    /// True once every cached model has its list thumbnail
    #[must_use]
    pub fn can_display_models(&self) -> bool {
        self.inner.state.lock().cache.all_ready()
    }

    /// Encoded query of the current search
    #[must_use]
    pub fn last_query(&self) -> String {
        self.inner.state.lock().last_query.clone()
    }
}

impl Inner {
    fn dispatch(self: &Arc<Self>, requests: Vec<Request>) {
        for request in requests {
            let engine = Arc::downgrade(self);
            match request {
                Request::Page { url, generation } => {
                    self.transport.issue(
                        &url,
                        Box::new(move |result| {
                            with_engine(&engine, |inner| inner.handle_page(generation, result));
                        }),
                    );
                }
                Request::Image { uid, url } => {
                    let source = url.clone();
                    self.transport.issue(
                        &url,
                        Box::new(move |result| {
                            with_engine(&engine, |inner| inner.handle_image(&uid, &source, result));
                        }),
                    );
                }
                Request::Detail { uid, url } => {
                    self.transport.issue(
                        &url,
                        Box::new(move |result| {
                            with_engine(&engine, |inner| inner.handle_detail(&uid, result));
                        }),
                    );
                }
                Request::Categories { url } => {
                    self.transport.issue(
                        &url,
                        Box::new(move |result| {
                            with_engine(&engine, |inner| inner.handle_categories(result));
                        }),
                    );
                }
            }
        }
    }

    fn handle_page(self: &Arc<Self>, generation: u64, result: std::result::Result<Vec<u8>, TransportError>) {
        let response = match decode_page(result) {
            Ok(response) => response,
            Err(e) => {
                warn!(error = %e, "search response rejected, keeping previous state");
                let mut state = self.state.lock();
                if state.generation == generation {
                    state.is_fetching = false;
                }
                return;
            }
        };

        let requests = {
            let mut state = self.state.lock();
            if state.generation != generation {
                debug!(generation, current = state.generation, "stale page response dropped");
                return;
            }

            if let Some(next) = response.next_cursor() {
                state.cursors.advance(next);
            }
            let fetches = state.cache.upsert_from_search_response(&response.results);
            state.is_fetching = false;
            state.previews_requested = false;

            info!(
                results = response.results.len(),
                has_next = state.cursors.has_next(),
                has_previous = state.cursors.has_previous(),
                "page loaded"
            );

            let (requests, _) = self.resolve_images(&mut state, fetches);
            requests
        };

        self.notify();
        self.dispatch(requests);
    }

    fn handle_image(&self, uid: &str, url: &str, result: std::result::Result<Vec<u8>, TransportError>) {
        let image = match self.decode_image(result) {
            Ok(image) => image,
            Err(e) => {
                warn!(%uid, %url, error = %e, "thumbnail discarded");
                return;
            }
        };

        self.images.insert(url, image.clone());

        let attached = self.state.lock().cache.attach_image(uid, image);
        if attached {
            self.notify();
        } else {
            debug!(%uid, "thumbnail response dropped, model no longer cached");
        }
    }

    fn handle_detail(&self, uid: &str, result: std::result::Result<Vec<u8>, TransportError>) {
        let detail = decode_detail(result);

        let merged = {
            let mut state = self.state.lock();
            state.pending_details.remove(uid);
            match detail {
                Ok(detail) => state.cache.merge_detail(uid, detail),
                Err(e) => {
                    warn!(%uid, error = %e, "detail response rejected");
                    return;
                }
            }
        };

        if merged {
            self.notify();
        } else {
            debug!(%uid, "detail response dropped, model no longer cached");
        }
    }

    fn handle_categories(&self, result: std::result::Result<Vec<u8>, TransportError>) {
        let pairs = match result
            .map_err(BrowseError::from)
            .and_then(|body| Ok(CategoriesResponse::from_slice(&body)?))
        {
            Ok(response) => response.into_pairs(),
            Err(e) => {
                warn!(error = %e, "category list rejected, keeping previous categories");
                return;
            }
        };

        let count = pairs.len();
        self.state.lock().categories = CategoryMap::from_pairs(pairs);
        info!(count, "categories loaded");
        self.notify();
    }

    /// Attach images already in the store; return requests for the rest
    fn resolve_images(
        &self,
        state: &mut BrowseState,
        wanted: Vec<ThumbnailFetch>,
    ) -> (Vec<Request>, bool) {
        let mut requests = Vec::new();
        let mut attached = false;

        for fetch in wanted {
            match self.images.get(&fetch.url) {
                Some(image) => attached |= state.cache.attach_image(&fetch.uid, image),
                None => requests.push(Request::from(fetch)),
            }
        }

        (requests, attached)
    }

    fn decode_image(&self, result: std::result::Result<Vec<u8>, TransportError>) -> Result<ProcessedImage> {
        let body = result?;
        Ok(self.pipeline.process(&body)?)
    }

    fn notify(&self) {
        let callback = self.refresh.read().clone();
        if let Some(callback) = callback {
            callback();
        }
    }
}

fn with_engine(engine: &Weak<Inner>, f: impl FnOnce(&Arc<Inner>)) {
    match engine.upgrade() {
        Some(inner) => f(&inner),
        None => debug!("completion arrived after the engine was dropped"),
    }
}

fn decode_page(result: std::result::Result<Vec<u8>, TransportError>) -> Result<SearchResponse> {
    let body = result?;
    Ok(SearchResponse::from_slice(&body)?)
}

fn decode_detail(result: std::result::Result<Vec<u8>, TransportError>) -> Result<AssetDetail> {
    let body = result?;
    Ok(ModelDetailResponse::from_slice(&body)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{QueuedTransport, categories_body, detail_body, png_bytes, search_body};
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct Harness {
        transport: Arc<QueuedTransport>,
        engine: BrowseEngine,
        refreshes: Arc<AtomicUsize>,
    }

    impl Harness {
        fn new() -> Self {
            let transport = QueuedTransport::new();
            let refreshes = Arc::new(AtomicUsize::new(0));
            let counter = Arc::clone(&refreshes);
            let engine = BrowseEngine::new(Arc::clone(&transport), &BrowserConfig::default())
                .with_refresh(move || {
                    counter.fetch_add(1, Ordering::SeqCst);
                });

            Self {
                transport,
                engine,
                refreshes,
            }
        }

        fn refresh_count(&self) -> usize {
            self.refreshes.load(Ordering::SeqCst)
        }

        fn load_page(&self, uids: &[&str], next: Option<&str>) {
            assert!(self.transport.complete("/v3/search", search_body(uids, next)));
        }
    }

    #[test]
    fn test_search_issues_page_request() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));

        assert!(h.engine.is_fetching());
        assert_eq!(
            h.transport.urls(),
            vec!["https://api.sketchfab.com/v3/search?type=models&downloadable=true&q=dragon"]
        );
        assert!(h.engine.results().is_empty());
    }

    #[test]
    fn test_page_response_populates_results() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1", "a2"], Some("24"));

        let uids: Vec<String> = h.engine.results().iter().map(|r| r.uid().to_string()).collect();
        assert_eq!(uids, vec!["a1", "a2"]);
        assert!(!h.engine.is_fetching());
        assert!(h.engine.has_next_results());
        assert!(!h.engine.has_previous_results());
        assert_eq!(h.refresh_count(), 1);

        // One list thumbnail per new model
        assert_eq!(h.transport.len(), 2);
        assert!(h.transport.urls().iter().all(|u| u.ends_with("/256.jpeg")));
    }

    #[test]
    fn test_malformed_response_keeps_state() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));

        h.engine.request_next_page().unwrap();
        assert!(h.transport.complete("cursor=24", b"{\"detail\": \"throttled\"}".to_vec()));

        assert!(!h.engine.is_fetching());
        assert!(h.engine.has_next_results());
        assert_eq!(h.refresh_count(), 1);
        assert!(h.engine.model("a1").is_some());
    }

    #[test]
    fn test_transport_failure_keeps_state() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        assert!(h.transport.fail("/v3/search"));

        assert!(!h.engine.is_fetching());
        assert!(h.engine.results().is_empty());
        assert_eq!(h.refresh_count(), 0);
    }

    #[test]
    fn test_next_page_without_cursor_rejected() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], None);
        let issued = h.transport.len();

        assert!(matches!(h.engine.request_next_page(), Err(BrowseError::NoNextPage)));
        assert!(matches!(
            h.engine.request_previous_page(),
            Err(BrowseError::NoPreviousPage)
        ));
        assert_eq!(h.transport.len(), issued);
    }

    #[test]
    fn test_paging_forward_and_back() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));

        h.engine.request_next_page().unwrap();
        assert!(h.engine.results().is_empty());
        assert!(h.engine.model("a1").is_some());
        h.load_page(&["b1"], Some("48"));

        assert!(h.engine.has_previous_results());
        h.engine.request_previous_page().unwrap();
        assert!(h.transport.urls().iter().any(|u| u.ends_with("&cursor=0")));
    }

    #[test]
    fn test_new_search_drops_stale_page() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.engine.search(&SearchParams::new("castle"));

        // Response to the first search arrives after the second was issued
        assert!(h.transport.complete("q=dragon", search_body(&["d1"], Some("24"))));
        assert!(h.engine.results().is_empty());
        assert!(h.engine.is_fetching());

        assert!(h.transport.complete("q=castle", search_body(&["c1"], Some("24"))));
        assert_eq!(h.engine.results()[0].uid(), "c1");
    }

    #[test]
    fn test_thumbnail_attached() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));
        assert!(!h.engine.can_display_models());

        assert!(h.transport.complete("/a1/256.jpeg", png_bytes(256, 144)));

        let record = h.engine.model("a1").unwrap();
        let thumbnail = record.thumbnail.unwrap();
        assert_eq!((thumbnail.width(), thumbnail.height()), (128, 128));
        assert!(h.engine.can_display_models());
        assert_eq!(h.refresh_count(), 2);
    }

    #[test]
    fn test_thumbnail_after_reset_dropped() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));
        h.engine.search(&SearchParams::new("castle"));

        assert!(h.transport.complete("/a1/256.jpeg", png_bytes(256, 144)));

        assert!(h.engine.model("a1").is_none());
        assert_eq!(h.refresh_count(), 1);
    }

    #[test]
    fn test_undecodable_thumbnail_ignored() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));

        assert!(h.transport.complete("/a1/256.jpeg", b"<html>not found</html>".to_vec()));
        assert!(h.engine.model("a1").unwrap().thumbnail.is_none());
    }

    #[test]
    fn test_cached_image_reused_across_searches() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));
        assert!(h.transport.complete("/a1/256.jpeg", png_bytes(256, 144)));

        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));

        assert!(h.transport.is_empty());
        assert!(h.engine.model("a1").unwrap().thumbnail.is_some());
    }

    #[test]
    fn test_fetch_detail_once() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));
        let before = h.transport.len();

        h.engine.fetch_detail("a1").unwrap();
        h.engine.fetch_detail("a1").unwrap();
        assert_eq!(h.transport.len(), before + 1);

        assert!(h.transport.complete("/v3/models/a1", detail_body("a1", 3)));
        let record = h.engine.model("a1").unwrap();
        assert!(record.detail_fetched);
        assert_eq!(record.has_animation, Some(true));

        h.engine.fetch_detail("a1").unwrap();
        assert!(!h.transport.urls().iter().any(|u| u.contains("/v3/models/")));
    }

    #[test]
    fn test_fetch_detail_unknown_uid() {
        let h = Harness::new();
        assert!(matches!(
            h.engine.fetch_detail("nope"),
            Err(BrowseError::UnknownAsset(uid)) if uid == "nope"
        ));
        assert!(h.transport.is_empty());
    }

    #[test]
    fn test_failed_detail_can_be_retried() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1"], Some("24"));

        h.engine.fetch_detail("a1").unwrap();
        assert!(h.transport.fail("/v3/models/a1"));
        assert!(!h.engine.model("a1").unwrap().detail_fetched);

        h.engine.fetch_detail("a1").unwrap();
        assert!(h.transport.urls().iter().any(|u| u.ends_with("/v3/models/a1")));
    }

    #[test]
    fn test_fetch_thumbnails_once_per_page() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));
        h.load_page(&["a1", "a2"], Some("24"));

        h.engine.fetch_thumbnails();
        h.engine.fetch_thumbnails();
        let previews: Vec<String> = h
            .transport
            .urls()
            .into_iter()
            .filter(|u| u.ends_with("/720.jpeg"))
            .collect();
        assert_eq!(previews.len(), 2);

        assert!(h.transport.complete("/a1/720.jpeg", png_bytes(720, 405)));
        let preview = h.engine.model("a1").unwrap().preview.unwrap();
        assert_eq!((preview.width(), preview.height()), (512, 288));

        // A new page load re-arms the guard
        h.engine.request_next_page().unwrap();
        h.load_page(&["b1"], Some("48"));
        h.engine.fetch_thumbnails();
        assert!(h.transport.urls().iter().any(|u| u.ends_with("/b1/720.jpeg")));
    }

    #[test]
    fn test_categories_reload() {
        let h = Harness::new();
        assert_eq!(h.engine.categories(), vec!["All"]);

        h.engine.reload_categories();
        assert!(h.transport.complete(
            "/v3/categories",
            categories_body(&[("Animals & Pets", "animals-pets"), ("Science", "science")]),
        ));

        assert_eq!(h.engine.categories(), vec!["All", "Animals & Pets", "Science"]);
        assert_eq!(h.refresh_count(), 1);

        let mut params = SearchParams::new("cat");
        params.category = "Animals & Pets".into();
        h.engine.search(&params);
        assert!(h.engine.last_query().ends_with("&categories=animals-pets"));
    }

    #[test]
    fn test_initial_search_query() {
        let h = Harness::new();
        h.engine.initial_search();
        assert_eq!(
            h.engine.last_query(),
            "?type=models&downloadable=true&staffpicked=true&sort_by=-publishedAt"
        );
        assert!(h.engine.is_fetching());
    }

    #[test]
    fn test_refresh_callback_can_read_results() {
        let transport = QueuedTransport::new();
        let engine = BrowseEngine::new(Arc::clone(&transport), &BrowserConfig::default());
        let seen = Arc::new(AtomicUsize::new(0));

        let reader = Arc::downgrade(&engine.inner);
        let counter = Arc::clone(&seen);
        engine.set_refresh_callback(move || {
            if let Some(inner) = reader.upgrade() {
                counter.store(inner.state.lock().cache.page().len(), Ordering::SeqCst);
            }
        });

        engine.search(&SearchParams::new("dragon"));
        assert!(transport.complete("/v3/search", search_body(&["a1", "a2", "a3"], None)));
        assert_eq!(seen.load(Ordering::SeqCst), 3);

        let weak = Arc::downgrade(&engine.inner);
        drop(engine);
        assert!(weak.upgrade().is_none());
    }

    #[test]
    fn test_fetch_thumbnails_while_loading_waits_for_page() {
        let h = Harness::new();
        h.engine.search(&SearchParams::new("dragon"));

        h.engine.fetch_thumbnails();
        h.load_page(&["a1", "a2"], Some("24"));
        h.engine.fetch_thumbnails();

        let previews = h
            .transport
            .urls()
            .into_iter()
            .filter(|u| u.ends_with("/720.jpeg"))
            .count();
        assert_eq!(previews, 2);
    }
}
