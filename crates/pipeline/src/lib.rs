//! Ranking core for catalog recommendations and feeds.
//!
//! This crate provides:
//! - Filter trait and implementations for dropping excluded or repeated items
//! - FilterPipeline for composing filters
//! - RecommendationScorer: genre-overlap scoring plus a tier cascade
//! - `assemble`: exclusion-aware round-robin merge of two streams
//!
//! Everything here is synchronous and pure over already-fetched data.
//! Fetching, timeouts and fallbacks live in the caller.
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{assemble, RecommendationScorer, DEFAULT_FEED_CAP, DEFAULT_RECOMMENDATION_LIMIT};
//!
//! // Detail page
//! let reference = ReferenceContext::from_detail(&detail);
//! let ranked = RecommendationScorer::new()
//!     .score(&reference, &pool, DEFAULT_RECOMMENDATION_LIMIT)?;
//!
//! // Home page
//! let feed = assemble(movies, series, &already_shown, DEFAULT_FEED_CAP)?;
//! ```

pub mod assembler;
pub mod error;
pub mod filter_pipeline;
pub mod filters;
pub mod scorer;
pub mod tiers;
pub mod traits;

// Re-export main types
pub use assembler::{DEFAULT_FEED_CAP, assemble, interleave};
pub use error::{PipelineError, Result};
pub use filter_pipeline::FilterPipeline;
pub use scorer::{
    DEFAULT_RECOMMENDATION_LIMIT, Ranking, RecommendationScorer, ScoredCandidate, score,
    score_candidate,
};
pub use tiers::{Floor, Tier, TierCascade};
pub use traits::Filter;
