//! Static seed lists used when trending streams are unavailable.

use catalog::{CatalogId, ItemKey, MediaKind};

const SEED_MOVIES: [CatalogId; 7] = [550, 155, 680, 13, 27205, 603, 157336];
const SEED_SERIES: [CatalogId; 7] = [1396, 1399, 66732, 60059, 94605, 100088, 1668];

/// Ordered movie and series seed keys
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedSet {
    movies: Vec<ItemKey>,
    series: Vec<ItemKey>,
}

impl SeedSet {
    pub fn new(movies: Vec<ItemKey>, series: Vec<ItemKey>) -> Self {
        Self { movies, series }
    }

    /// Well-known titles that every catalog carries
    pub fn standard() -> Self {
        Self {
            movies: SEED_MOVIES
                .iter()
                .map(|&id| ItemKey::new(id, MediaKind::Movie))
                .collect(),
            series: SEED_SERIES
                .iter()
                .map(|&id| ItemKey::new(id, MediaKind::Series))
                .collect(),
        }
    }

    pub fn keys(&self, kind: MediaKind) -> &[ItemKey] {
        match kind {
            MediaKind::Movie => &self.movies,
            MediaKind::Series => &self.series,
        }
    }

    pub fn len(&self) -> usize {
        self.movies.len() + self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty() && self.series.is_empty()
    }
}

impl Default for SeedSet {
    fn default() -> Self {
        Self::standard()
    }
}
