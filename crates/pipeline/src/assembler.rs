//! Exclusion-aware feed assembly.
//!
//! Merges two independently ranked streams (movies and series on the home
//! page) into one feed.
//!
//! ## Algorithm
//! 1. Drop items from each stream whose `(id, kind)` is excluded
//! 2. Round-robin merge: `p0, s0, p1, s1, ...`; once one stream runs out the
//!    rest of the other follows contiguously
//! 3. Truncate to `cap`
//!
//! When either stream could not be fetched this module is not involved at
//! all; the caller serves the seed list instead.

use crate::error::{PipelineError, Result};
use crate::filters::ExclusionFilter;
use crate::traits::Filter;
use catalog::{CatalogItem, ExclusionSet};
use tracing::debug;

/// Feed length used by the home page
pub const DEFAULT_FEED_CAP: usize = 14;

/// Build the feed. See the module docs for the exact merge order.
pub fn assemble(
    primary: Vec<CatalogItem>,
    secondary: Vec<CatalogItem>,
    exclude: &ExclusionSet,
    cap: usize,
) -> Result<Vec<CatalogItem>> {
    if cap == 0 {
        return Err(PipelineError::InvalidCap);
    }

    let filter = ExclusionFilter::new(exclude);
    let (primary_in, secondary_in) = (primary.len(), secondary.len());
    let primary = filter.apply(primary);
    let secondary = filter.apply(secondary);

    let mut feed = interleave(primary, secondary);
    feed.truncate(cap);

    debug!(
        primary_in,
        secondary_in,
        excluded = exclude.len(),
        assembled = feed.len(),
        "Assembled feed"
    );
    Ok(feed)
}

/// Round-robin merge that keeps the longer stream's tail.
pub fn interleave<T>(primary: Vec<T>, secondary: Vec<T>) -> Vec<T> {
    let mut merged = Vec::with_capacity(primary.len() + secondary.len());
    let mut primary = primary.into_iter();
    let mut secondary = secondary.into_iter();

    loop {
        match (primary.next(), secondary.next()) {
            (None, None) => break,
            (p, s) => {
                merged.extend(p);
                merged.extend(s);
            }
        }
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{ItemKey, MediaKind};

    fn movie(id: u64) -> CatalogItem {
        CatalogItem::new(id, MediaKind::Movie, format!("M{}", id))
    }

    fn series(id: u64) -> CatalogItem {
        CatalogItem::new(id, MediaKind::Series, format!("S{}", id))
    }

    fn titles(items: &[CatalogItem]) -> Vec<&str> {
        items.iter().map(|i| i.title.as_str()).collect()
    }

    #[test]
    fn test_assemble_excludes_and_interleaves() {
        let exclude: ExclusionSet = [ItemKey::new(2, MediaKind::Movie)].into_iter().collect();
        let feed = assemble(
            vec![movie(1), movie(2), movie(3)],
            vec![series(1), series(2)],
            &exclude,
            14,
        )
        .unwrap();

        assert_eq!(titles(&feed), vec!["M1", "S1", "M3", "S2"]);
    }

    #[test]
    fn test_exclusion_respects_kind() {
        // Excluding movie 1 must not hide series 1
        let exclude: ExclusionSet = [ItemKey::new(1, MediaKind::Movie)].into_iter().collect();
        let feed = assemble(vec![movie(1)], vec![series(1)], &exclude, 14).unwrap();
        assert_eq!(titles(&feed), vec!["S1"]);
    }

    #[test]
    fn test_longer_tail_is_contiguous() {
        let feed = assemble(
            vec![movie(1)],
            vec![series(1), series(2), series(3)],
            &ExclusionSet::new(),
            14,
        )
        .unwrap();
        assert_eq!(titles(&feed), vec!["M1", "S1", "S2", "S3"]);
    }

    #[test]
    fn test_cap_truncates() {
        let primary: Vec<CatalogItem> = (0..20).map(movie).collect();
        let secondary: Vec<CatalogItem> = (0..20).map(series).collect();
        let feed = assemble(primary, secondary, &ExclusionSet::new(), 14).unwrap();

        assert_eq!(feed.len(), 14);
        assert_eq!(feed[12].title, "M6");
        assert_eq!(feed[13].title, "S6");
    }

    #[test]
    fn test_zero_cap_is_rejected() {
        let result = assemble(vec![movie(1)], vec![], &ExclusionSet::new(), 0);
        assert_eq!(result, Err(PipelineError::InvalidCap));
    }

    #[test]
    fn test_everything_excluded_is_empty_not_error() {
        let exclude: ExclusionSet = [
            ItemKey::new(1, MediaKind::Movie),
            ItemKey::new(1, MediaKind::Series),
        ]
        .into_iter()
        .collect();
        let feed = assemble(vec![movie(1)], vec![series(1)], &exclude, 14).unwrap();
        assert!(feed.is_empty());
    }

    #[test]
    fn test_interleave_empty_sides() {
        assert_eq!(interleave::<u8>(vec![], vec![]), Vec::<u8>::new());
        assert_eq!(interleave(vec![1, 2], vec![]), vec![1, 2]);
        assert_eq!(interleave(vec![], vec![7]), vec![7]);
        assert_eq!(interleave(vec![1, 3, 5, 6], vec![2, 4]), vec![1, 2, 3, 4, 5, 6]);
    }
}
