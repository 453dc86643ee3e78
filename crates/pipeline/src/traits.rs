//! Core traits for the filtering pipeline.
//!
//! This module defines the Filter trait that allows composable,
//! extensible filters to be applied to catalog items before ranking
//! or assembly.

use catalog::CatalogItem;

/// Core trait for filtering catalog items.
///
/// ## Design Note
/// - `Send + Sync` allows filters to be shared across tasks
/// - Filters take ownership of the Vec<CatalogItem> and return a filtered Vec
/// - Filters must keep the relative order of the items they retain;
///   downstream tie-breaking relies on provider order
pub trait Filter: Send + Sync {
    /// Returns the name of this filter (for logging/debugging)
    fn name(&self) -> &str;

    /// Apply this filter to a set of items.
    fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem>;
}
