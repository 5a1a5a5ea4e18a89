//! Testing utilities for asset-browser
//!
//! Provides an in-memory [`QueuedTransport`] that holds requests until a test
//! completes them, plus builders for catalog response bodies and images.
//!
//! Only available when compiled with `cfg(test)`.

use crate::catalog::wire::ModelNode;
use crate::thumbnail::Bitmap;
use crate::transport::{Completion, Transport, TransportError};
use image::{DynamicImage, ImageFormat, RgbaImage};
use parking_lot::Mutex;
use serde_json::{Value, json};
use std::io::Cursor;
use std::sync::Arc;

struct PendingRequest {
    url: String,
    on_complete: Completion,
}

/// Transport that queues requests until the test resolves them
///
/// Completions run on the calling thread with the queue unlocked, so a
/// completion may issue further requests.
#[derive(Default)]
pub struct QueuedTransport {
    pending: Mutex<Vec<PendingRequest>>,
}

impl QueuedTransport {
    #[must_use]
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// URLs of requests not yet completed, in issue order
    #[must_use]
    pub fn urls(&self) -> Vec<String> {
        self.pending.lock().iter().map(|r| r.url.clone()).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pending.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pending.lock().is_empty()
    }

    /// Complete the oldest request whose URL contains `pattern` with `body`
    ///
    /// Returns `false` if no pending request matches.
    pub fn complete(&self, pattern: &str, body: Vec<u8>) -> bool {
        match self.take(pattern) {
            Some(request) => {
                (request.on_complete)(Ok(body));
                true
            }
            None => false,
        }
    }

    /// Fail the oldest request whose URL contains `pattern` with a 503
    pub fn fail(&self, pattern: &str) -> bool {
        match self.take(pattern) {
            Some(request) => {
                let error = TransportError::Status {
                    url: request.url,
                    status: 503,
                };
                (request.on_complete)(Err(error));
                true
            }
            None => false,
        }
    }

    fn take(&self, pattern: &str) -> Option<PendingRequest> {
        let mut pending = self.pending.lock();
        let index = pending.iter().position(|r| r.url.contains(pattern))?;
        Some(pending.remove(index))
    }
}

impl Transport for QueuedTransport {
    fn issue(&self, url: &str, on_complete: Completion) {
        self.pending.lock().push(PendingRequest {
            url: url.to_string(),
            on_complete,
        });
    }
}

/// Search summary JSON for `uid`
///
/// Thumbnails are offered at widths 1024, 720, 256 and 100 under
/// `https://media.test/<uid>/<width>.jpeg`.
#[must_use]
pub fn model_json(uid: &str) -> Value {
    let images: Vec<Value> = [1024, 720, 256, 100]
        .iter()
        .map(|w| json!({ "width": w, "url": format!("https://media.test/{uid}/{w}.jpeg") }))
        .collect();

    json!({
        "uid": uid,
        "name": format!("Model {uid}"),
        "description": "Low poly<br>game ready",
        "user": { "displayName": "artist" },
        "vertexCount": 1200,
        "faceCount": 800,
        "thumbnails": { "images": images }
    })
}

#[must_use]
pub fn model_node(uid: &str) -> ModelNode {
    serde_json::from_value(model_json(uid)).unwrap()
}

/// Search response body with the given results and `cursors.next`
#[must_use]
pub fn search_body(uids: &[&str], next: Option<&str>) -> Vec<u8> {
    let results: Vec<Value> = uids.iter().map(|uid| model_json(uid)).collect();
    serde_json::to_vec(&json!({ "results": results, "cursors": { "next": next } })).unwrap()
}

/// Model detail body
#[must_use]
pub fn detail_body(uid: &str, animation_count: u64) -> Vec<u8> {
    serde_json::to_vec(&json!({
        "uid": uid,
        "animationCount": animation_count,
        "license": { "label": "CC Attribution" },
        "metadata": { "isRigged": true }
    }))
    .unwrap()
}

/// Category listing body from `(name, slug)` pairs
#[must_use]
pub fn categories_body(pairs: &[(&str, &str)]) -> Vec<u8> {
    let results: Vec<Value> = pairs
        .iter()
        .map(|(name, slug)| json!({ "name": name, "slug": slug }))
        .collect();
    serde_json::to_vec(&json!({ "results": results })).unwrap()
}

/// PNG-encoded solid image
#[must_use]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = DynamicImage::ImageRgba8(RgbaImage::from_pixel(
        width,
        height,
        image::Rgba([200, 120, 40, 255]),
    ));
    let mut bytes = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
        .unwrap();
    bytes
}

#[must_use]
pub fn bitmap(width: u32, height: u32) -> Bitmap {
    Bitmap::from(RgbaImage::new(width, height))
}
