//! Catalog data model
//!
//! This module holds everything the engine knows about the remote catalog:
//!
//! - `types`: [`AssetRecord`], the cached view of one catalog model
//! - `wire`: serde shapes of the search, detail and category responses
//! - `categories`: [`CategoryMap`], display name to API slug
//!
//! Wire types are kept separate from [`AssetRecord`] so that a response can be
//! parsed (and rejected) before any cached state is touched.

mod categories;
mod error;
mod types;
pub mod wire;

pub use categories::{ALL_CATEGORIES, CategoryMap};
pub use error::{Result, WireError};
pub use types::{AssetDetail, AssetRecord};
