//! Genre-overlap recommendation scoring.
//!
//! Ranks a provider "similar" pool against the genres of the item being
//! viewed.
//!
//! ## Algorithm
//! For each candidate:
//! 1. `common` = genres shared with the reference
//! 2. `common == 0` scores 0 and is never eligible, whatever its rating
//! 3. otherwise start at `common * 20`
//! 4. rating below 6.0 halves the score; 7.0 or above adds 15;
//!    ratings in `[6.0, 7.0)` are left alone
//! 5. fewer than 100 votes multiplies by 0.7
//!
//! Step 4 runs before step 5, so a poorly rated, barely voted candidate is
//! penalized twice. The scored pool then goes through the
//! [`TierCascade`](crate::tiers::TierCascade).

use crate::error::{PipelineError, Result};
use crate::tiers::TierCascade;
use catalog::{CatalogItem, ReferenceContext};
use tracing::{debug, instrument};

/// Recommendation count used by the detail page
pub const DEFAULT_RECOMMENDATION_LIMIT: usize = 12;

pub const GENRE_MATCH_POINTS: f64 = 20.0;
pub const LOW_RATING_CUTOFF: f32 = 6.0;
pub const LOW_RATING_MULTIPLIER: f64 = 0.5;
pub const HIGH_RATING_CUTOFF: f32 = 7.0;
pub const HIGH_RATING_BONUS: f64 = 15.0;
pub const LOW_CONFIDENCE_VOTES: u32 = 100;
pub const LOW_CONFIDENCE_MULTIPLIER: f64 = 0.7;

/// Score a single candidate against the reference genres.
pub fn score_candidate(reference: &ReferenceContext, candidate: &CatalogItem) -> f64 {
    let common = reference.common_genres(candidate);
    if common == 0 {
        return 0.0;
    }

    let mut score = common as f64 * GENRE_MATCH_POINTS;

    if candidate.vote_average < LOW_RATING_CUTOFF {
        score *= LOW_RATING_MULTIPLIER;
    } else if candidate.vote_average >= HIGH_RATING_CUTOFF {
        score += HIGH_RATING_BONUS;
    }

    if candidate.vote_count < LOW_CONFIDENCE_VOTES {
        score *= LOW_CONFIDENCE_MULTIPLIER;
    }

    score
}

/// A candidate paired with its score. Never mutates the underlying item.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate {
    item: CatalogItem,
    score: f64,
}

impl ScoredCandidate {
    pub fn new(item: CatalogItem, score: f64) -> Self {
        Self { item, score }
    }

    pub fn item(&self) -> &CatalogItem {
        &self.item
    }

    /// 0 means "not eligible"
    pub fn score(&self) -> f64 {
        self.score
    }

    pub fn into_item(self) -> CatalogItem {
        self.item
    }
}

/// Result of running the cascade: the winning tier and its ranked members
#[derive(Debug, Clone, PartialEq)]
pub struct Ranking {
    /// Name of the tier that produced the list; `None` when nothing was eligible
    pub tier: Option<&'static str>,
    pub candidates: Vec<ScoredCandidate>,
}

impl Ranking {
    pub fn empty() -> Self {
        Self {
            tier: None,
            candidates: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    pub fn into_items(self) -> Vec<CatalogItem> {
        self.candidates
            .into_iter()
            .map(ScoredCandidate::into_item)
            .collect()
    }
}

/// Scores candidate pools and selects the best tier.
///
/// Holds no mutable state; one instance can serve any number of
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct RecommendationScorer {
    cascade: TierCascade,
}

impl RecommendationScorer {
    /// Scorer with the standard three-tier cascade
    pub fn new() -> Self {
        Self {
            cascade: TierCascade::standard(),
        }
    }

    /// Replace the tier cascade (builder pattern)
    pub fn with_cascade(mut self, cascade: TierCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn cascade(&self) -> &TierCascade {
        &self.cascade
    }

    /// Score every candidate, in input order.
    pub fn score_candidates(
        &self,
        reference: &ReferenceContext,
        candidates: &[CatalogItem],
    ) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|candidate| {
                ScoredCandidate::new(candidate.clone(), score_candidate(reference, candidate))
            })
            .collect()
    }

    /// Score and rank, keeping scores for explanation.
    #[instrument(
        skip_all,
        fields(reference = %reference.key(), pool = candidates.len(), limit = limit)
    )]
    pub fn rank(
        &self,
        reference: &ReferenceContext,
        candidates: &[CatalogItem],
        limit: usize,
    ) -> Result<Ranking> {
        if limit == 0 {
            return Err(PipelineError::InvalidLimit);
        }

        let scored = self.score_candidates(reference, candidates);
        let ranking = self.cascade.select(&scored, limit);

        debug!(
            tier = ranking.tier.unwrap_or("none"),
            selected = ranking.candidates.len(),
            "Ranked candidate pool"
        );
        Ok(ranking)
    }

    /// Ranked items only: at most `limit`, best first, ties in input order.
    pub fn score(
        &self,
        reference: &ReferenceContext,
        candidates: &[CatalogItem],
        limit: usize,
    ) -> Result<Vec<CatalogItem>> {
        Ok(self.rank(reference, candidates, limit)?.into_items())
    }
}

impl Default for RecommendationScorer {
    fn default() -> Self {
        Self::new()
    }
}

/// Rank `candidates` with the standard cascade.
pub fn score(
    reference: &ReferenceContext,
    candidates: &[CatalogItem],
    limit: usize,
) -> Result<Vec<CatalogItem>> {
    RecommendationScorer::new().score(reference, candidates, limit)
}
