//! Pagination cursor bookkeeping
//!
//! The catalog pages results with numeric offset cursors (`"24"`, `"48"`, ...)
//! but only ever reports the *next* one. The previous-page cursor is derived
//! locally by stepping back one page from the next cursor we held before the
//! response arrived:
//!
//! ```text
//! response next | previous afterwards
//! --------------+--------------------
//!   "24"        | ""      (first page, nothing before it)
//!   "48"        | "0"     (stored "24" minus one page)
//!   "72"        | "24"    (stored "48" minus one page)
//! ```
//!
//! The literal string `"null"` is treated like an empty cursor.

use tracing::warn;

/// Cursor string the catalog has been seen to send for "no cursor"
const NULL_CURSOR: &str = "null";

/// Tracks the previous and next page cursors for the current query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CursorTracker {
    page_size: u64,
    previous: String,
    next: String,
}

impl CursorTracker {
    /// Create an empty tracker for the given page size
    #[must_use]
    pub const fn new(page_size: u64) -> Self {
        Self {
            page_size,
            previous: String::new(),
            next: String::new(),
        }
    }

    /// Forget both cursors
    pub fn reset(&mut self) {
        self.previous.clear();
        self.next.clear();
    }

    /// Apply the `cursors.next` value of a page response
    ///
    /// `None` (absent or null on the wire) means there is no next page.
    pub fn advance(&mut self, reported_next: Option<&str>) {
        let reported_offset = reported_next.and_then(|n| n.parse::<u64>().ok());

        if reported_offset == Some(self.page_size) {
            self.previous.clear();
        } else if is_present(&self.next) {
            match self.next.parse::<u64>() {
                Ok(offset) => {
                    self.previous = offset.saturating_sub(self.page_size).to_string();
                }
                Err(_) => {
                    warn!(cursor = %self.next, "non-numeric cursor, previous page unavailable");
                    self.previous.clear();
                }
            }
        }

        self.next = reported_next.unwrap_or_default().to_string();
    }

    #[must_use]
    pub fn has_next(&self) -> bool {
        !self.next.is_empty()
    }

    #[must_use]
    pub fn has_previous(&self) -> bool {
        is_present(&self.previous)
    }

    #[must_use]
    pub fn next(&self) -> &str {
        &self.next
    }

    #[must_use]
    pub fn previous(&self) -> &str {
        &self.previous
    }
}

fn is_present(cursor: &str) -> bool {
    !cursor.is_empty() && cursor != NULL_CURSOR
}
