//! Filter to drop repeated items from a provider page.
//!
//! Provider pages are not guaranteed unique; the same title can show up
//! twice in a "similar" pool when it is listed under two collections.

use crate::traits::Filter;
use catalog::{CatalogItem, ItemKey};
use std::collections::HashSet;

/// Keeps the first occurrence of each `(id, kind)`.
///
/// ## Algorithm
/// Single pass with a HashSet of seen keys, so the surviving items keep
/// their provider order.
pub struct DuplicateFilter;

impl Filter for DuplicateFilter {
    fn name(&self) -> &str {
        "DuplicateFilter"
    }

    fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        let mut seen: HashSet<ItemKey> = HashSet::with_capacity(items.len());
        items
            .into_iter()
            .filter(|item| seen.insert(item.key()))
            .collect()
    }
}
