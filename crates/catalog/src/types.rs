//! Core domain types for catalog records.
//!
//! A catalog record is identified by its id *and* its media kind: the
//! provider numbers movies and series independently, so `550` the movie and
//! `550` the series are different items.

use crate::error::{CatalogError, Result};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

// =============================================================================
// Type Aliases
// =============================================================================

/// Provider identifier, unique only within a [`MediaKind`]
pub type CatalogId = u64;

/// Provider genre identifier (e.g. 28 = Action, 18 = Drama)
pub type GenreId = u32;

// =============================================================================
// Media kind and identity
// =============================================================================

/// The two kinds of media the catalog serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Movie,
    #[serde(alias = "tv")]
    Series,
}

impl MediaKind {
    /// Path segment the provider uses for this kind
    pub fn provider_segment(self) -> &'static str {
        match self {
            MediaKind::Movie => "movie",
            MediaKind::Series => "tv",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaKind::Movie => f.write_str("movie"),
            MediaKind::Series => f.write_str("series"),
        }
    }
}

impl FromStr for MediaKind {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "movie" => Ok(MediaKind::Movie),
            "series" | "tv" => Ok(MediaKind::Series),
            other => Err(CatalogError::InvalidValue {
                field: "media kind".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Joint identity of a catalog item: `(id, kind)`
///
/// Written as `kind:id` (e.g. `movie:550`) in fixtures and on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ItemKey {
    pub id: CatalogId,
    pub kind: MediaKind,
}

impl ItemKey {
    pub fn new(id: CatalogId, kind: MediaKind) -> Self {
        Self { id, kind }
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for ItemKey {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self> {
        let (kind, id) = s.split_once(':').ok_or_else(|| CatalogError::InvalidValue {
            field: "item key".to_string(),
            value: s.to_string(),
        })?;
        let kind = kind.parse()?;
        let id = id.trim().parse().map_err(|_| CatalogError::InvalidValue {
            field: "item id".to_string(),
            value: id.to_string(),
        })?;
        Ok(ItemKey { id, kind })
    }
}

impl TryFrom<String> for ItemKey {
    type Error = CatalogError;

    fn try_from(value: String) -> Result<Self> {
        value.parse()
    }
}

impl From<ItemKey> for String {
    fn from(key: ItemKey) -> Self {
        key.to_string()
    }
}

// =============================================================================
// Catalog records
// =============================================================================

/// A normalized provider record, as returned by list and "similar" endpoints
///
/// Summary records may omit genres entirely; an empty `genre_ids` on a
/// summary record does not mean the item has no genres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: CatalogId,
    pub kind: MediaKind,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub genre_ids: BTreeSet<GenreId>,
    /// Provider rating on a 0.0–10.0 scale; 0 when the provider sent none
    #[serde(default)]
    pub vote_average: f32,
    #[serde(default)]
    pub vote_count: u32,
}

impl CatalogItem {
    /// Create an item with no genres and no votes
    pub fn new(id: CatalogId, kind: MediaKind, title: impl Into<String>) -> Self {
        Self {
            id,
            kind,
            title: title.into(),
            genre_ids: BTreeSet::new(),
            vote_average: 0.0,
            vote_count: 0,
        }
    }

    pub fn with_genres(mut self, genres: impl IntoIterator<Item = GenreId>) -> Self {
        self.genre_ids = genres.into_iter().collect();
        self
    }

    pub fn with_votes(mut self, vote_average: f32, vote_count: u32) -> Self {
        self.vote_average = vote_average;
        self.vote_count = vote_count;
        self
    }

    pub fn key(&self) -> ItemKey {
        ItemKey::new(self.id, self.kind)
    }
}

/// A named provider genre
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
}

/// A full detail record. Unlike summaries, its genre list is authoritative.
///
/// Fields are private so the item's genre set always mirrors `genres`;
/// deserialization goes through [`CatalogDetail::new`] as well.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "DetailParts")]
pub struct CatalogDetail {
    item: CatalogItem,
    genres: Vec<Genre>,
}

#[derive(Deserialize)]
struct DetailParts {
    item: CatalogItem,
    #[serde(default)]
    genres: Vec<Genre>,
}

impl From<DetailParts> for CatalogDetail {
    fn from(parts: DetailParts) -> Self {
        Self::new(parts.item, parts.genres)
    }
}

impl CatalogDetail {
    /// Build a detail record; the item's genre set is replaced by `genres`
    pub fn new(mut item: CatalogItem, genres: Vec<Genre>) -> Self {
        item.genre_ids = genres.iter().map(|g| g.id).collect();
        Self { item, genres }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    pub fn genres(&self) -> &[Genre] {
        &self.genres
    }

    pub fn into_item(self) -> CatalogItem {
        self.item
    }

    pub fn key(&self) -> ItemKey {
        self.item.key()
    }

    pub fn genre_names(&self) -> Vec<&str> {
        self.genres.iter().map(|g| g.name.as_str()).collect()
    }
}

// =============================================================================
// Scoring inputs
// =============================================================================

/// Genre profile of the item the user is currently viewing
///
/// Only constructible from a [`CatalogDetail`], so a summary record with
/// missing genres can never stand in as the reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceContext {
    key: ItemKey,
    genre_ids: BTreeSet<GenreId>,
}

impl ReferenceContext {
    pub fn from_detail(detail: &CatalogDetail) -> Self {
        Self {
            key: detail.key(),
            genre_ids: detail.genres.iter().map(|g| g.id).collect(),
        }
    }

    /// Key of the reference item itself
    pub fn key(&self) -> ItemKey {
        self.key
    }

    pub fn genre_ids(&self) -> &BTreeSet<GenreId> {
        &self.genre_ids
    }

    /// Number of genres `item` shares with the reference
    pub fn common_genres(&self, item: &CatalogItem) -> usize {
        self.genre_ids.intersection(&item.genre_ids).count()
    }
}

impl From<&CatalogDetail> for ReferenceContext {
    fn from(detail: &CatalogDetail) -> Self {
        Self::from_detail(detail)
    }
}

/// Items already shown elsewhere on the page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExclusionSet {
    keys: HashSet<ItemKey>,
}

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, key: ItemKey) -> bool {
        self.keys.insert(key)
    }

    pub fn contains(&self, key: &ItemKey) -> bool {
        self.keys.contains(key)
    }

    /// True if the item's `(id, kind)` is excluded
    pub fn excludes(&self, item: &CatalogItem) -> bool {
        self.keys.contains(&item.key())
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ItemKey> {
        self.keys.iter()
    }
}

impl FromIterator<ItemKey> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = ItemKey>>(iter: I) -> Self {
        Self {
            keys: iter.into_iter().collect(),
        }
    }
}

impl Extend<ItemKey> for ExclusionSet {
    fn extend<I: IntoIterator<Item = ItemKey>>(&mut self, iter: I) {
        self.keys.extend(iter);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_item_key_parse_and_display() {
        let key: ItemKey = "movie:550".parse().unwrap();
        assert_eq!(key, ItemKey::new(550, MediaKind::Movie));
        assert_eq!(key.to_string(), "movie:550");

        let tv: ItemKey = "tv:1396".parse().unwrap();
        assert_eq!(tv.kind, MediaKind::Series);
        assert_eq!(tv.to_string(), "series:1396");
    }

    #[test]
    fn test_item_key_rejects_garbage() {
        assert!("550".parse::<ItemKey>().is_err());
        assert!("person:1".parse::<ItemKey>().is_err());
        assert!("movie:abc".parse::<ItemKey>().is_err());
    }

    #[test]
    fn test_same_id_different_kind_are_distinct() {
        let movie = CatalogItem::new(42, MediaKind::Movie, "A");
        let series = CatalogItem::new(42, MediaKind::Series, "B");
        assert_ne!(movie.key(), series.key());

        let exclude: ExclusionSet = [movie.key()].into_iter().collect();
        assert!(exclude.excludes(&movie));
        assert!(!exclude.excludes(&series));
    }

    fn genre(id: GenreId, name: &str) -> Genre {
        Genre {
            id,
            name: name.to_string(),
        }
    }

    #[test]
    fn test_detail_genres_are_authoritative() {
        let summary = CatalogItem::new(1, MediaKind::Movie, "Heat").with_genres([99]);
        let detail = CatalogDetail::new(summary, vec![genre(28, "Action"), genre(80, "Crime")]);
        let reference = ReferenceContext::from_detail(&detail);

        assert_eq!(
            reference.genre_ids().iter().copied().collect::<Vec<_>>(),
            vec![28, 80]
        );
        assert_eq!(detail.genre_names(), vec!["Action", "Crime"]);
        assert!(!detail.item().genre_ids.contains(&99));
    }

    #[test]
    fn test_deserialized_detail_ignores_summary_genres() {
        // The embedded item carries a stale summary genre list
        let body = r#"{
            "item": {"id": 1, "kind": "movie", "title": "Heat", "genre_ids": [99]},
            "genres": [{"id": 28, "name": "Action"}, {"id": 80, "name": "Crime"}]
        }"#;
        let detail: CatalogDetail = serde_json::from_str(body).unwrap();
        let reference = ReferenceContext::from_detail(&detail);

        let expected: BTreeSet<GenreId> = [28, 80].into_iter().collect();
        assert_eq!(detail.item().genre_ids, expected);
        assert_eq!(reference.genre_ids(), &expected);
    }

    #[test]
    fn test_detail_without_genres_has_empty_reference() {
        let body = r#"{"item": {"id": 1, "kind": "movie", "title": "Heat", "genre_ids": [28]}}"#;
        let detail: CatalogDetail = serde_json::from_str(body).unwrap();

        assert!(ReferenceContext::from_detail(&detail).genre_ids().is_empty());
    }

    #[test]
    fn test_common_genres() {
        let detail = CatalogDetail::new(
            CatalogItem::new(1, MediaKind::Movie, "Ref"),
            vec![genre(28, "Action"), genre(18, "Drama")],
        );
        let reference = ReferenceContext::from(&detail);

        let both = CatalogItem::new(2, MediaKind::Movie, "Both").with_genres([18, 28, 35]);
        let none = CatalogItem::new(3, MediaKind::Movie, "None").with_genres([35]);
        assert_eq!(reference.common_genres(&both), 2);
        assert_eq!(reference.common_genres(&none), 0);
    }

    #[test]
    fn test_media_kind_serde() {
        let kind: MediaKind = serde_json::from_str("\"tv\"").unwrap();
        assert_eq!(kind, MediaKind::Series);
        assert_eq!(serde_json::to_string(&MediaKind::Series).unwrap(), "\"series\"");
    }
}
