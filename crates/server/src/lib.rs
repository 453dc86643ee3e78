//! Server crate for the catalog recommendation engine.
//!
//! Holds the orchestrator that sits between a `CatalogProvider` and the
//! synchronous ranking core: it does all the I/O, then hands fully fetched
//! data to the scorer and assembler.

pub mod config;
pub mod orchestrator;

pub use config::{DEFAULT_FETCH_TIMEOUT, OrchestratorConfig};
pub use orchestrator::{FeedSource, HomeFeed, Recommendations, RecommendationOrchestrator};
