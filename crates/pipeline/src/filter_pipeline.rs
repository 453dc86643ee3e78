//! The FilterPipeline orchestrates multiple filters.
//!
//! This module provides the main FilterPipeline struct that chains
//! multiple filters together using the builder pattern.

use crate::traits::Filter;
use catalog::CatalogItem;
use tracing::debug;

/// Chains multiple filters together into a processing pipeline.
///
/// ## Usage
/// ```ignore
/// let exclude: ExclusionSet = [reference.key()].into_iter().collect();
/// let pipeline = FilterPipeline::new()
///     .add_filter(ExclusionFilter::new(&exclude))
///     .add_filter(DuplicateFilter);
///
/// let pool = pipeline.apply(candidates);
/// ```
pub struct FilterPipeline<'a> {
    filters: Vec<Box<dyn Filter + 'a>>,
}

impl<'a> FilterPipeline<'a> {
    /// Create a new empty FilterPipeline.
    pub fn new() -> Self {
        Self {
            filters: Vec::new(),
        }
    }

    /// Add a filter to the pipeline (builder pattern).
    pub fn add_filter(mut self, filter: impl Filter + 'a) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// Number of filters in the pipeline
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }

    /// Apply all filters in sequence to the items.
    ///
    /// ## Algorithm
    /// 1. Start with the input items
    /// 2. For each filter in order:
    ///    a. Log filter name and input count
    ///    b. Apply the filter
    ///    c. Log output count
    /// 3. Return final filtered set
    pub fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let mut current = items;
        for filter in &self.filters {
            let input_count = current.len();
            current = filter.apply(current);
            debug!(
                filter = filter.name(),
                input_count,
                output_count = current.len(),
                "Filter applied"
            );
        }
        current
    }
}

impl Default for FilterPipeline<'_> {
    fn default() -> Self {
        Self::new()
    }
}
