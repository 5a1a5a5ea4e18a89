//! Cached catalog records

use super::wire::ModelNode;
use crate::thumbnail::{Bitmap, ProcessedImage};
use serde_json::Value;

/// Extended fields delivered by a detail fetch
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AssetDetail {
    pub has_animation: bool,
    /// License descriptor, passed through as the catalog sent it
    pub license: Option<Value>,
    /// Rigged/skinned flag; many responses do not carry it
    pub has_skin: Option<bool>,
}

/// One catalog model as seen by the browser
///
/// Created from a search summary, then enriched by detail fetches and
/// thumbnail completions. The `uid` is fixed at construction.
#[derive(Debug, Clone)]
pub struct AssetRecord {
    uid: String,

    pub name: String,
    pub author: String,
    /// Description with `<br>` markers removed
    pub description: String,
    pub vertex_count: u64,
    pub face_count: u64,

    /// `None` until the detail fetch completes
    pub has_animation: Option<bool>,
    pub license: Option<Value>,
    pub has_skin: Option<bool>,

    /// Small square list thumbnail
    pub thumbnail: Option<Bitmap>,
    /// Large preview image
    pub preview: Option<Bitmap>,
    /// Source of the preview image, fetched on demand
    pub preview_url: Option<String>,

    pub detail_fetched: bool,
}

impl AssetRecord {
    /// Build a record from a search summary
    #[must_use]
    pub fn from_summary(node: &ModelNode) -> Self {
        let mut record = Self {
            uid: node.uid.clone(),
            name: String::new(),
            author: String::new(),
            description: String::new(),
            vertex_count: 0,
            face_count: 0,
            has_animation: None,
            license: None,
            has_skin: None,
            thumbnail: None,
            preview: None,
            preview_url: None,
            detail_fetched: false,
        };
        record.apply_summary(node);
        record
    }

    #[must_use]
    pub fn uid(&self) -> &str {
        &self.uid
    }

    /// Overwrite the summary fields from a newer search response
    pub fn apply_summary(&mut self, node: &ModelNode) {
        self.name = node.name.clone().unwrap_or_default();
        self.author = node.author().to_string();
        self.description = strip_line_breaks(node.description.as_deref().unwrap_or_default());
        self.vertex_count = node.vertex_count.unwrap_or(0);
        self.face_count = node.face_count.unwrap_or(0);
    }

    /// Merge extended fields; values already set are never cleared
    pub fn merge_detail(&mut self, detail: AssetDetail) {
        self.has_animation = Some(detail.has_animation);
        if detail.license.is_some() {
            self.license = detail.license;
        }
        if detail.has_skin.is_some() {
            self.has_skin = detail.has_skin;
        }
        self.detail_fetched = true;
    }

    /// Store a processed image in the matching slot
    pub fn attach_image(&mut self, image: ProcessedImage) {
        match image {
            ProcessedImage::Preview(bitmap) => self.preview = Some(bitmap),
            ProcessedImage::Thumbnail(bitmap) => self.thumbnail = Some(bitmap),
        }
    }

    /// Whether the list thumbnail has arrived
    #[must_use]
    pub const fn has_thumbnail(&self) -> bool {
        self.thumbnail.is_some()
    }
}

fn strip_line_breaks(text: &str) -> String {
    text.replace("<br>", "")
}
