//! Normalization of catalog provider payloads.
//!
//! The provider speaks TMDB v3 JSON:
//! - list pages: `{"page": 1, "results": [{"id", "title"|"name", "genre_ids", ...}]}`
//! - detail records: `{"id", "title"|"name", "genres": [{"id", "name"}], ...}`
//!
//! Rating fields are frequently missing or `null` on obscure titles and are
//! read as zero. Mixed-media pages tag each record with `media_type`; records
//! that are neither movies nor series are dropped.

use crate::error::{CatalogError, Result};
use crate::types::{CatalogDetail, CatalogItem, Genre, GenreId, MediaKind};
use serde::Deserialize;
use tracing::warn;

/// One record as the provider sends it, before validation
#[derive(Debug, Deserialize)]
struct RawRecord {
    id: u64,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    media_type: Option<String>,
    #[serde(default)]
    genre_ids: Option<Vec<GenreId>>,
    #[serde(default)]
    genres: Option<Vec<Genre>>,
    #[serde(default)]
    vote_average: Option<f32>,
    #[serde(default)]
    vote_count: Option<u32>,
}

#[derive(Debug, Deserialize)]
struct RawPage {
    #[serde(default)]
    results: Vec<RawRecord>,
}

/// Parse a list/"similar"/trending page into items, in provider order.
///
/// `kind` is used for records without a `media_type` tag. Records that fail
/// validation are skipped with a warning rather than failing the page.
pub fn parse_page(body: &str, kind: MediaKind) -> Result<Vec<CatalogItem>> {
    let page: RawPage = serde_json::from_str(body)?;
    let total = page.results.len();

    let items: Vec<CatalogItem> = page
        .results
        .into_iter()
        .filter_map(|raw| {
            let id = raw.id;
            match normalize_summary(raw, kind) {
                Ok(item) => item,
                Err(e) => {
                    warn!(id, error = %e, "Dropping invalid catalog record");
                    None
                }
            }
        })
        .collect();

    if items.len() != total {
        warn!(kept = items.len(), total, "Some records in page were dropped");
    }
    Ok(items)
}

/// Parse a full detail record.
///
/// A detail record without a `genres` field yields an empty genre list.
pub fn parse_detail(body: &str, kind: MediaKind) -> Result<CatalogDetail> {
    let mut raw: RawRecord = serde_json::from_str(body)?;
    let genres = raw.genres.take().unwrap_or_default();
    let item = normalize_summary(raw, kind)?.ok_or_else(|| {
        CatalogError::ValidationError("detail record is not a movie or series".to_string())
    })?;
    Ok(CatalogDetail::new(item, genres))
}

/// Validate one record. `Ok(None)` means "not a movie or series".
fn normalize_summary(raw: RawRecord, default_kind: MediaKind) -> Result<Option<CatalogItem>> {
    let kind = match raw.media_type.as_deref() {
        None => default_kind,
        Some("movie") => MediaKind::Movie,
        Some("tv") => MediaKind::Series,
        Some(_) => return Ok(None),
    };

    let vote_average = raw.vote_average.unwrap_or(0.0);
    if !vote_average.is_finite() || !(0.0..=10.0).contains(&vote_average) {
        return Err(CatalogError::InvalidValue {
            field: "vote_average".to_string(),
            value: vote_average.to_string(),
        });
    }

    let title = raw.title.or(raw.name).unwrap_or_default();
    let genre_ids = match (raw.genre_ids, raw.genres) {
        (Some(ids), _) => ids.into_iter().collect(),
        (None, Some(genres)) => genres.into_iter().map(|g| g.id).collect(),
        (None, None) => Default::default(),
    };

    Ok(Some(CatalogItem {
        id: raw.id,
        kind,
        title,
        genre_ids,
        vote_average,
        vote_count: raw.vote_count.unwrap_or(0),
    }))
}
