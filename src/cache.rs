//! Result cache
//!
//! Owns every [`AssetRecord`] the browser has seen since the last search,
//! keyed by `uid`, plus the ordered `uid` list of the page currently shown.
//! Records outlive the page they arrived on (paging only clears the page
//! list), so a caller holding a `uid` from an earlier page can still look it
//! up until the next search resets everything.
//!
//! The cache itself is single-threaded; the engine serializes access.

use crate::catalog::wire::ModelNode;
use crate::catalog::{AssetDetail, AssetRecord};
use crate::config::BrowserConfig;
use crate::thumbnail::ProcessedImage;
use std::collections::HashMap;

/// A list thumbnail download requested by [`ResultCache::upsert_from_search_response`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThumbnailFetch {
    pub uid: String,
    pub url: String,
}

/// `uid → AssetRecord` map plus the current result page
#[derive(Debug, Clone)]
pub struct ResultCache {
    page: Vec<String>,
    records: HashMap<String, AssetRecord>,
    preview_max_width: u32,
    thumbnail_max_width: u32,
}

impl Default for ResultCache {
    fn default() -> Self {
        Self::new(&BrowserConfig::default())
    }
}

impl ResultCache {
    #[must_use]
    pub fn new(config: &BrowserConfig) -> Self {
        Self {
            page: Vec::new(),
            records: HashMap::new(),
            preview_max_width: config.preview_max_width,
            thumbnail_max_width: config.thumbnail_max_width,
        }
    }

    /// Drop the page and every cached record
    pub fn reset(&mut self) {
        self.page.clear();
        self.records.clear();
    }

    /// Drop the page list only; records stay addressable by `uid`
    pub fn clear_page(&mut self) {
        self.page.clear();
    }

    /// Apply the results of a search or page response
    ///
    /// The page becomes exactly the response's `uid`s in server order,
    /// duplicates included. Known `uid`s get their summary fields replaced;
    /// new ones get a record and a list thumbnail download, returned to the
    /// caller to issue. Applying the same response twice leaves the same page
    /// and requests nothing the second time.
    pub fn upsert_from_search_response(&mut self, nodes: &[ModelNode]) -> Vec<ThumbnailFetch> {
        let mut fetches = Vec::new();
        self.page.clear();

        for node in nodes {
            self.page.push(node.uid.clone());

            if let Some(record) = self.records.get_mut(&node.uid) {
                record.apply_summary(node);
                continue;
            }

            let mut record = AssetRecord::from_summary(node);
            record.preview_url = node.thumbnail_url(self.preview_max_width).map(String::from);

            if let Some(url) = node.thumbnail_url(self.thumbnail_max_width) {
                fetches.push(ThumbnailFetch {
                    uid: node.uid.clone(),
                    url: url.to_string(),
                });
            }

            self.records.insert(node.uid.clone(), record);
        }

        fetches
    }

    /// Merge detail fields into a cached record
    ///
    /// Returns `false` (and changes nothing) if `uid` is not cached.
    pub fn merge_detail(&mut self, uid: &str, detail: AssetDetail) -> bool {
        match self.records.get_mut(uid) {
            Some(record) => {
                record.merge_detail(detail);
                true
            }
            None => false,
        }
    }

    /// Attach a processed image to a cached record
    ///
    /// Returns `false` (and changes nothing) if `uid` is not cached, which is
    /// how completions that outlived a reset are discarded.
    pub fn attach_image(&mut self, uid: &str, image: ProcessedImage) -> bool {
        match self.records.get_mut(uid) {
            Some(record) => {
                record.attach_image(image);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn get(&self, uid: &str) -> Option<&AssetRecord> {
        self.records.get(uid)
    }

    #[must_use]
    pub fn contains(&self, uid: &str) -> bool {
        self.records.contains_key(uid)
    }

    /// True when every cached record has its list thumbnail
    #[must_use]
    pub fn all_ready(&self) -> bool {
        self.records.values().all(AssetRecord::has_thumbnail)
    }

    /// Records of the current page, in page order
    #[must_use]
    pub fn page(&self) -> Vec<&AssetRecord> {
        self.page
            .iter()
            .filter_map(|uid| self.records.get(uid))
            .collect()
    }

    /// `uid`s of the current page, in page order
    #[must_use]
    pub fn page_uids(&self) -> &[String] {
        &self.page
    }

    /// Number of cached records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
