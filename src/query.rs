//! Catalog search query construction
//!
//! Turns search parameters into the encoded query string appended to the
//! catalog's search endpoint. Everything in this module is pure: identical
//! inputs always produce identical strings, and [`SearchQuery::parse`]
//! recovers the parameters from a string produced by [`SearchQuery::encode`].
//!
//! # Parameter order
//!
//! ```text
//! ?type=models&downloadable=true[&q=..][&face_count=..][&staffpicked=true]
//!     [&animated=true][&sort_by=..][&categories=..]
//! ```
//!
//! The server does not care about ordering, but a fixed order keeps the
//! output stable for tests and for re-issuing the same query while paging.

use crate::catalog::CategoryMap;
use clap::ValueEnum;
use std::fmt;
use url::form_urlencoded;

/// Sort order requested from the catalog
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Server default ordering; no `sort_by` parameter is sent
    #[default]
    Relevance,
    /// Most liked first
    Likes,
    /// Most viewed first
    Views,
    /// Most recently published first
    Recent,
}

impl SortBy {
    /// Descending sort key understood by the catalog, `None` for relevance
    #[must_use]
    pub const fn sort_key(self) -> Option<&'static str> {
        match self {
            Self::Relevance => None,
            Self::Likes => Some("-likeCount"),
            Self::Views => Some("-viewCount"),
            Self::Recent => Some("-publishedAt"),
        }
    }

    fn from_sort_key(key: &str) -> Option<Self> {
        match key {
            "-likeCount" => Some(Self::Likes),
            "-viewCount" => Some(Self::Views),
            "-publishedAt" => Some(Self::Recent),
            _ => None,
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Relevance => "relevance",
            Self::Likes => "likes",
            Self::Views => "views",
            Self::Recent => "recent",
        };
        f.write_str(name)
    }
}

/// User-facing search intent
///
/// Mirrors what a search form collects: the category is a display name and
/// the face-count filter is raw text. [`SearchParams::to_query`] resolves both
/// into a [`SearchQuery`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchParams {
    /// Free-text search term
    pub term: String,
    /// Only staff-picked models
    pub staff_picked: bool,
    /// Only animated models
    pub animated: bool,
    /// Category display name (see [`CategoryMap`])
    pub category: String,
    /// Sort order
    pub sort_by: SortBy,
    /// Maximum face count as typed by the user; ignored unless it is an integer
    pub max_face_count: String,
}

impl SearchParams {
    /// Create parameters for a plain text search
    #[must_use]
    pub fn new(term: impl Into<String>) -> Self {
        Self {
            term: term.into(),
            ..Self::default()
        }
    }

    /// Resolve display-level parameters into an encodable query
    ///
    /// Unknown category names contribute no parameter.
    #[must_use]
    pub fn to_query(&self, categories: &CategoryMap) -> SearchQuery {
        let category_slug = categories.slug(&self.category).unwrap_or_default();

        SearchQuery {
            term: self.term.clone(),
            max_face_count: parse_face_count(&self.max_face_count),
            staff_picked: self.staff_picked,
            animated: self.animated,
            sort_by: self.sort_by,
            category_slug: category_slug.to_string(),
        }
    }
}

/// Resolved search query, ready to encode
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchQuery {
    pub term: String,
    pub max_face_count: Option<i64>,
    pub staff_picked: bool,
    pub animated: bool,
    pub sort_by: SortBy,
    pub category_slug: String,
}

impl SearchQuery {
    /// Query issued when a browser opens: staff picks, newest first
    #[must_use]
    pub fn initial() -> Self {
        Self {
            staff_picked: true,
            sort_by: SortBy::Recent,
            ..Self::default()
        }
    }

    /// Encode into the query string appended to the search endpoint
    ///
    /// The result always starts with `?type=models&downloadable=true`.
    #[must_use]
    pub fn encode(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::from("?"));
        serializer
            .append_pair("type", "models")
            .append_pair("downloadable", "true");

        if !self.term.is_empty() {
            serializer.append_pair("q", &self.term);
        }
        if let Some(faces) = self.max_face_count {
            serializer.append_pair("face_count", &faces.to_string());
        }
        if self.staff_picked {
            serializer.append_pair("staffpicked", "true");
        }
        if self.animated {
            serializer.append_pair("animated", "true");
        }
        if let Some(key) = self.sort_by.sort_key() {
            serializer.append_pair("sort_by", key);
        }
        if !self.category_slug.is_empty() {
            serializer.append_pair("categories", &self.category_slug);
        }

        serializer.finish()
    }

    /// Recover the parameters from an encoded query string
    ///
    /// Accepts the output of [`SearchQuery::encode`], with or without the
    /// leading `?`. Unknown pairs (such as `cursor`) are ignored.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        let mut parsed = Self::default();

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            match key.as_ref() {
                "q" => parsed.term = value.into_owned(),
                "face_count" => parsed.max_face_count = parse_face_count(&value),
                "staffpicked" => parsed.staff_picked = value == "true",
                "animated" => parsed.animated = value == "true",
                "sort_by" => {
                    parsed.sort_by = SortBy::from_sort_key(&value).unwrap_or_default();
                }
                "categories" => parsed.category_slug = value.into_owned(),
                _ => {}
            }
        }

        parsed
    }
}

/// Parse a face-count filter, dropping anything that is not an integer
fn parse_face_count(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}
