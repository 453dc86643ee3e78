//! Errors raised while talking to a catalog provider.

use catalog::{CatalogError, ItemKey};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("HTTP client error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog provider returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Could not decode provider response: {0}")]
    Decode(#[from] CatalogError),

    #[error("Not found: {key}")]
    NotFound { key: ItemKey },

    /// A batch lookup where every single lookup failed
    #[error("None of the {requested} requested items could be fetched")]
    Empty { requested: usize },

    /// A spawned lookup task panicked or was cancelled
    #[error("Provider task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
