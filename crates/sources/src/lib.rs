//! # Sources Crate
//!
//! Catalog providers: where reference records, "similar" pools and trending
//! streams come from.
//!
//! ## Components
//!
//! ### CatalogProvider
//! Async trait implemented by every backend. Lists are returned in provider
//! order; nothing in this crate reorders them.
//!
//! ### TmdbProvider
//! HTTP client for the TMDB v3 API (`reqwest`).
//!
//! ### InMemoryProvider
//! Serves a `CatalogIndex` loaded from a JSON fixture. No network.
//!
//! ### SeedSet
//! Fixed movie and series keys for the home feed when trending is down.
//!
//! ## Example Usage
//!
//! ```ignore
//! use sources::{CatalogProvider, TmdbProvider};
//! use catalog::{ItemKey, MediaKind};
//!
//! let provider = TmdbProvider::new(api_key).with_language("en-US");
//! let key = ItemKey::new(550, MediaKind::Movie);
//!
//! let (detail, pool) = tokio::join!(provider.get_detail(key), provider.get_candidates(key));
//! ```

pub mod error;
pub mod memory;
pub mod provider;
pub mod seeds;
pub mod tmdb;

pub use error::{ProviderError, Result};
pub use memory::InMemoryProvider;
pub use provider::CatalogProvider;
pub use seeds::SeedSet;
pub use tmdb::{DEFAULT_API_URL, DEFAULT_LANGUAGE, TmdbProvider};
