//! Filter implementations for the candidate pipeline.
//!
//! This module contains all the concrete filter implementations
//! that can be composed into a FilterPipeline.

pub mod duplicate;
pub mod exclusion;

// Re-export for convenience
pub use duplicate::DuplicateFilter;
pub use exclusion::ExclusionFilter;
