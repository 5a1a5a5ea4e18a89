//! Thumbnail processing
//!
//! Catalog thumbnails arrive as encoded bytes from the transport. This module
//! turns them into the two image sizes the browser displays:
//!
//! - **List thumbnail**: small square, for result grids
//! - **Preview**: large image for the detail view
//!
//! Which one a download becomes is decided from the decoded width alone (see
//! [`ThumbnailPipeline::process`]), so a completion does not need to know which
//! URL was requested. Decoded results are memoised per source URL in an
//! [`ImageStore`].

mod error;
mod pipeline;
mod store;

pub use error::{Result, ThumbnailError};
pub use pipeline::{Bitmap, ProcessedImage, ThumbnailPipeline};
pub use store::ImageStore;
