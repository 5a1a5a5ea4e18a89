//! Catalog response shapes
//!
//! Only the fields the browser reads are modelled; everything else in the
//! catalog's JSON is ignored. A search response without a `results` array
//! fails to decode, which the engine treats as "leave state untouched".

use super::error::Result;
use super::types::AssetDetail;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Body of a search (or page) response
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResponse {
    pub results: Vec<ModelNode>,
    #[serde(default)]
    pub cursors: Option<Cursors>,
}

impl SearchResponse {
    /// Decode a search response body
    ///
    /// # Errors
    ///
    /// Returns `WireError::Malformed` if the body is not JSON or has no
    /// `results` array.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Next-page token reported by the server, if a `cursors` object was sent
    #[must_use]
    pub fn next_cursor(&self) -> Option<Option<&str>> {
        self.cursors.as_ref().map(|c| c.next.as_deref())
    }
}

/// Pagination tokens
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Cursors {
    /// Numeric offset of the next page; sent as a string, a number or null
    #[serde(default, deserialize_with = "cursor_token")]
    pub next: Option<String>,
}

/// Summary of one model as returned by search
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelNode {
    pub uid: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub user: Option<UserNode>,
    #[serde(default)]
    pub vertex_count: Option<u64>,
    #[serde(default)]
    pub face_count: Option<u64>,
    #[serde(default)]
    pub thumbnails: Option<Thumbnails>,
}

impl ModelNode {
    /// Pick the widest thumbnail strictly narrower than `max_width`
    ///
    /// Returns `None` when the model has no thumbnail under the cap.
    #[must_use]
    pub fn thumbnail_url(&self, max_width: u32) -> Option<&str> {
        let mut images: Vec<&ThumbnailImage> = self.thumbnails.as_ref()?.images.iter().collect();
        images.sort_by(|a, b| b.width.cmp(&a.width));

        images
            .into_iter()
            .find(|image| image.width < max_width)
            .map(|image| image.url.as_str())
    }

    /// Display name of the uploading user
    #[must_use]
    pub fn author(&self) -> &str {
        self.user
            .as_ref()
            .and_then(|u| u.display_name.as_deref())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserNode {
    #[serde(default)]
    pub display_name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Thumbnails {
    #[serde(default)]
    pub images: Vec<ThumbnailImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ThumbnailImage {
    #[serde(default)]
    pub width: u32,
    pub url: String,
}

/// Body of a model detail response
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDetailResponse {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub animation_count: Option<u64>,
    #[serde(default)]
    pub license: Option<Value>,
    #[serde(default)]
    pub metadata: Option<ModelMetadata>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelMetadata {
    #[serde(default)]
    pub is_rigged: Option<bool>,
}

impl ModelDetailResponse {
    /// Decode a detail response body
    ///
    /// # Errors
    ///
    /// Returns `WireError::Malformed` if the body is not a JSON object.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

impl From<ModelDetailResponse> for AssetDetail {
    fn from(response: ModelDetailResponse) -> Self {
        Self {
            has_animation: response.animation_count.unwrap_or(0) > 0,
            license: response.license.filter(Value::is_object),
            has_skin: response.metadata.and_then(|m| m.is_rigged),
        }
    }
}

/// Body of the category listing
#[derive(Debug, Clone, Deserialize)]
pub struct CategoriesResponse {
    pub results: Vec<CategoryNode>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CategoryNode {
    pub name: String,
    pub slug: String,
}

impl CategoriesResponse {
    /// Decode a category listing body
    ///
    /// # Errors
    ///
    /// Returns `WireError::Malformed` if the body has no `results` array.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        Ok(serde_json::from_slice(body)?)
    }

    /// `(name, slug)` pairs in server order
    #[must_use]
    pub fn into_pairs(self) -> Vec<(String, String)> {
        self.results.into_iter().map(|c| (c.name, c.slug)).collect()
    }
}

fn cursor_token<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(token) => Some(token),
        Value::Number(offset) => Some(offset.to_string()),
        _ => None,
    })
}
