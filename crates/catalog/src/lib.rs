//! # Catalog Crate
//!
//! Domain types for movie and series records served by an external catalog
//! provider, plus the plumbing to get those records into memory.
//!
//! ## Main Components
//!
//! - **types**: `CatalogItem`, `MediaKind`, `ItemKey`, `CatalogDetail`,
//!   `ReferenceContext`, `ExclusionSet`
//! - **wire**: normalize provider JSON (TMDB v3) into domain types
//! - **index**: in-memory `CatalogIndex` loaded from a JSON fixture
//! - **error**: error types for loading and normalization
//!
//! ## Example Usage
//!
//! ```ignore
//! use catalog::{CatalogIndex, ItemKey, MediaKind, ReferenceContext};
//! use std::path::Path;
//!
//! let index = CatalogIndex::load_from_file(Path::new("data/sample_catalog.json"))?;
//! let key = ItemKey::new(550, MediaKind::Movie);
//!
//! let detail = index.get_detail(&key).unwrap();
//! let reference = ReferenceContext::from_detail(&detail);
//! let pool = index.similar_to(&key);
//! ```

pub mod error;
pub mod index;
pub mod types;
pub mod wire;

// Re-export commonly used types for convenience
pub use error::{CatalogError, Result};
pub use index::CatalogIndex;
pub use types::{
    // Type aliases
    CatalogId,
    GenreId,
    // Core types
    CatalogDetail,
    CatalogItem,
    ExclusionSet,
    Genre,
    ItemKey,
    MediaKind,
    ReferenceContext,
};
