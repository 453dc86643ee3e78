//! Error types for the ranking core.
//!
//! Scoring and assembly never fail on data: an empty pool or a pool with no
//! genre overlap simply produces an empty list. The only errors are caller
//! bugs, and they are reported instead of being clamped away.

use thiserror::Error;

#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineError {
    /// `score` was asked for zero recommendations
    #[error("Recommendation limit must be greater than zero")]
    InvalidLimit,

    /// `assemble` was asked for a zero-length feed
    #[error("Feed cap must be greater than zero")]
    InvalidCap,
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, PipelineError>;
