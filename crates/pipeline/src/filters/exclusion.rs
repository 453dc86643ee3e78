//! Filter to remove items already shown elsewhere on the page.

use crate::traits::Filter;
use catalog::{CatalogItem, ExclusionSet};

/// Removes items whose `(id, kind)` is in an [`ExclusionSet`].
///
/// Matching is on the full key: excluding `movie:42` leaves `series:42` alone.
pub struct ExclusionFilter<'a> {
    exclude: &'a ExclusionSet,
}

impl<'a> ExclusionFilter<'a> {
    pub fn new(exclude: &'a ExclusionSet) -> Self {
        Self { exclude }
    }
}

impl Filter for ExclusionFilter<'_> {
    fn name(&self) -> &str {
        "ExclusionFilter"
    }

    fn apply(&self, items: Vec<CatalogItem>) -> Vec<CatalogItem> {
        if self.exclude.is_empty() {
            return items;
        }
        items
            .into_iter()
            .filter(|item| !self.exclude.excludes(item))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ItemKey, MediaKind};

    #[test]
    fn test_exclusion_filter() {
        let exclude: ExclusionSet = [
            ItemKey::new(100, MediaKind::Movie),
            ItemKey::new(200, MediaKind::Series),
        ]
        .into_iter()
        .collect();

        let items = vec![
            CatalogItem::new(100, MediaKind::Movie, "excluded"),
            CatalogItem::new(100, MediaKind::Series, "same id, other kind"),
            CatalogItem::new(200, MediaKind::Series, "excluded"),
            CatalogItem::new(300, MediaKind::Movie, "kept"),
        ];

        let filtered = ExclusionFilter::new(&exclude).apply(items);

        assert_eq!(filtered.len(), 2);
        assert_eq!(filtered[0].key(), ItemKey::new(100, MediaKind::Series));
        assert_eq!(filtered[1].key(), ItemKey::new(300, MediaKind::Movie));
    }

    #[test]
    fn test_empty_exclusion_set_keeps_everything() {
        let exclude = ExclusionSet::new();
        let items = vec![
            CatalogItem::new(1, MediaKind::Movie, "a"),
            CatalogItem::new(2, MediaKind::Movie, "b"),
        ];
        assert_eq!(ExclusionFilter::new(&exclude).apply(items.clone()), items);
    }
}
