//! Error types for the catalog crate.
//!
//! Covers reading a catalog fixture from disk and normalizing provider
//! payloads into domain types.

use crate::types::MediaKind;
use thiserror::Error;

/// Errors that can occur while loading or normalizing catalog data
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Fixture file could not be found or opened
    #[error("Failed to open file: {path}")]
    FileNotFound { path: String },

    /// I/O error occurred while reading a file
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// Payload was not valid JSON, or did not have the expected shape
    #[error("Malformed catalog payload: {0}")]
    Json(#[from] serde_json::Error),

    /// A field had a value outside its allowed range
    #[error("Invalid value for {field}: {value}")]
    InvalidValue { field: String, value: String },

    /// Referenced item doesn't exist (e.g. a similar-list entry for an unknown item)
    #[error("Missing reference: {kind} with id {id}")]
    MissingReference { kind: MediaKind, id: u64 },

    /// Data validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

/// Convenience type alias for Results in this crate
pub type Result<T> = std::result::Result<T, CatalogError>;
