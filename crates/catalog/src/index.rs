//! In-memory catalog built from a JSON fixture.
//!
//! Serves the same questions the remote provider answers (detail, similar,
//! trending, lookup by key) without touching the network. The fixture
//! format mirrors the index itself:
//!
//! ```json
//! {
//!   "genres":   [{"id": 28, "name": "Action"}],
//!   "items":    [{"id": 550, "kind": "movie", "title": "Fight Club",
//!                 "genre_ids": [18], "vote_average": 8.4, "vote_count": 26000}],
//!   "similar":  {"movie:550": ["movie:680"]},
//!   "trending": ["movie:550", "series:1396"]
//! }
//! ```

use crate::error::{CatalogError, Result};
use crate::types::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// On-disk shape of a catalog fixture
#[derive(Debug, Default, Serialize, Deserialize)]
struct CatalogFixture {
    #[serde(default)]
    genres: Vec<Genre>,
    #[serde(default)]
    items: Vec<CatalogItem>,
    #[serde(default)]
    similar: HashMap<ItemKey, Vec<ItemKey>>,
    #[serde(default)]
    trending: Vec<ItemKey>,
}

/// Items keyed by `(id, kind)` plus the provider-ordered lists that reference them
#[derive(Debug, Default)]
pub struct CatalogIndex {
    items: HashMap<ItemKey, CatalogItem>,
    genres: BTreeMap<GenreId, String>,
    /// Provider-ranked "similar" pool per item
    similar: HashMap<ItemKey, Vec<ItemKey>>,
    /// Popularity-ordered, both kinds mixed
    trending: Vec<ItemKey>,
}

impl CatalogIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load and validate a fixture file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(CatalogError::FileNotFound {
                path: path.display().to_string(),
            });
        }
        let body = fs::read_to_string(path)?;
        let index = Self::from_json(&body)?;

        let (items, genres, similar) = index.counts();
        info!(
            path = %path.display(),
            items,
            genres,
            similar,
            "Loaded catalog fixture"
        );
        Ok(index)
    }

    /// Build and validate an index from fixture JSON
    pub fn from_json(body: &str) -> Result<Self> {
        let fixture: CatalogFixture = serde_json::from_str(body)?;
        let mut index = CatalogIndex::new();

        for genre in fixture.genres {
            index.insert_genre(genre);
        }
        for item in fixture.items {
            index.insert_item(item);
        }
        for (key, pool) in fixture.similar {
            index.insert_similar(key, pool);
        }
        index.trending = fixture.trending;

        index.validate()?;
        Ok(index)
    }

    pub fn insert_item(&mut self, item: CatalogItem) {
        self.items.insert(item.key(), item);
    }

    pub fn insert_genre(&mut self, genre: Genre) {
        self.genres.insert(genre.id, genre.name);
    }

    pub fn insert_similar(&mut self, key: ItemKey, pool: Vec<ItemKey>) {
        self.similar.insert(key, pool);
    }

    pub fn push_trending(&mut self, key: ItemKey) {
        self.trending.push(key);
    }

    pub fn get_item(&self, key: &ItemKey) -> Option<&CatalogItem> {
        self.items.get(key)
    }

    /// Full detail record for an item, with genre names resolved
    pub fn get_detail(&self, key: &ItemKey) -> Option<CatalogDetail> {
        let item = self.items.get(key)?;
        let genres = item
            .genre_ids
            .iter()
            .map(|&id| Genre {
                id,
                name: self.genre_name(id),
            })
            .collect();
        Some(CatalogDetail::new(item.clone(), genres))
    }

    pub fn genre_name(&self, id: GenreId) -> String {
        self.genres
            .get(&id)
            .cloned()
            .unwrap_or_else(|| format!("#{}", id))
    }

    /// "Similar" pool for an item, in fixture order. Unknown items have an empty pool.
    pub fn similar_to(&self, key: &ItemKey) -> Vec<CatalogItem> {
        self.resolve(self.similar.get(key).map(|v| v.as_slice()).unwrap_or(&[]))
    }

    /// Trending items of one kind, in fixture order
    pub fn trending(&self, kind: MediaKind) -> Vec<CatalogItem> {
        let keys: Vec<ItemKey> = self
            .trending
            .iter()
            .filter(|key| key.kind == kind)
            .copied()
            .collect();
        self.resolve(&keys)
    }

    fn resolve(&self, keys: &[ItemKey]) -> Vec<CatalogItem> {
        keys.iter()
            .filter_map(|key| self.items.get(key).cloned())
            .collect()
    }

    /// Check that every key referenced by a list exists as an item
    pub fn validate(&self) -> Result<()> {
        let referenced = self
            .similar
            .iter()
            .flat_map(|(key, pool)| std::iter::once(key).chain(pool.iter()))
            .chain(self.trending.iter());

        for key in referenced {
            if !self.items.contains_key(key) {
                return Err(CatalogError::MissingReference {
                    kind: key.kind,
                    id: key.id,
                });
            }
        }

        for item in self.items.values() {
            if !(0.0..=10.0).contains(&item.vote_average) {
                return Err(CatalogError::InvalidValue {
                    field: "vote_average".to_string(),
                    value: item.vote_average.to_string(),
                });
            }
        }
        debug!("Catalog index validated");
        Ok(())
    }

    /// (items, genres, similar pools) for debugging/validation
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.items.len(), self.genres.len(), self.similar.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"{
        "genres": [{"id": 28, "name": "Action"}, {"id": 18, "name": "Drama"}],
        "items": [
            {"id": 1, "kind": "movie", "title": "Ref", "genre_ids": [28, 18],
             "vote_average": 8.0, "vote_count": 900},
            {"id": 2, "kind": "movie", "title": "Close", "genre_ids": [28],
             "vote_average": 7.2, "vote_count": 300},
            {"id": 2, "kind": "series", "title": "Same Id Show", "genre_ids": [18]},
            {"id": 3, "kind": "movie", "title": "Untitled Genres", "genre_ids": [99]}
        ],
        "similar": {"movie:1": ["movie:2", "series:2", "movie:3"]},
        "trending": ["series:2", "movie:1", "movie:2"]
    }"#;

    #[test]
    fn test_from_json() {
        let index = CatalogIndex::from_json(FIXTURE).unwrap();
        assert_eq!(index.counts(), (4, 2, 1));
        assert_eq!(
            index.get_item(&ItemKey::new(2, MediaKind::Series)).unwrap().title,
            "Same Id Show"
        );
    }

    #[test]
    fn test_similar_preserves_order() {
        let index = CatalogIndex::from_json(FIXTURE).unwrap();
        let pool = index.similar_to(&ItemKey::new(1, MediaKind::Movie));
        let keys: Vec<String> = pool.iter().map(|i| i.key().to_string()).collect();
        assert_eq!(keys, vec!["movie:2", "series:2", "movie:3"]);

        assert!(index.similar_to(&ItemKey::new(99, MediaKind::Movie)).is_empty());
    }

    #[test]
    fn test_trending_by_kind() {
        let index = CatalogIndex::from_json(FIXTURE).unwrap();
        let movies = index.trending(MediaKind::Movie);
        assert_eq!(movies.iter().map(|i| i.id).collect::<Vec<_>>(), vec![1, 2]);
        assert_eq!(index.trending(MediaKind::Series).len(), 1);
    }

    #[test]
    fn test_detail_resolves_genre_names() {
        let index = CatalogIndex::from_json(FIXTURE).unwrap();
        let detail = index.get_detail(&ItemKey::new(1, MediaKind::Movie)).unwrap();
        assert_eq!(detail.genre_names(), vec!["Drama", "Action"]);

        let unnamed = index.get_detail(&ItemKey::new(3, MediaKind::Movie)).unwrap();
        assert_eq!(unnamed.genre_names(), vec!["#99"]);
    }

    #[test]
    fn test_missing_reference_fails_validation() {
        let body = r#"{"items": [], "trending": ["movie:1"]}"#;
        assert!(matches!(
            CatalogIndex::from_json(body),
            Err(CatalogError::MissingReference { id: 1, .. })
        ));
    }

    #[test]
    fn test_missing_file() {
        let result = CatalogIndex::load_from_file(Path::new("does/not/exist.json"));
        assert!(matches!(result, Err(CatalogError::FileNotFound { .. })));
    }
}
