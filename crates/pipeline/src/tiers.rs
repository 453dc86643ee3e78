//! Tier cascade: progressive relaxation of the score floor.
//!
//! Each tier is tried in order against the *full* scored pool (not the
//! survivors of the previous tier). The first tier that admits at least its
//! `min_count` candidates wins; the last tier always wins, even when empty.
//!
//! The standard cascade:
//!
//! | tier       | admits          | wins when   |
//! |------------|-----------------|-------------|
//! | `strong`   | score >= 30     | 6 or more   |
//! | `moderate` | score >= 20     | 1 or more   |
//! | `any`      | score > 0       | always      |

use crate::scorer::{Ranking, ScoredCandidate};

/// Lower bound on the score a tier admits.
///
/// A score of 0 is never admitted, whatever the floor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Floor {
    AtLeast(f64),
    Above(f64),
}

impl Floor {
    pub fn admits(self, score: f64) -> bool {
        if score <= 0.0 {
            return false;
        }
        match self {
            Floor::AtLeast(floor) => score >= floor,
            Floor::Above(floor) => score > floor,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tier {
    pub name: &'static str,
    pub floor: Floor,
    /// Minimum number of admitted candidates for this tier to be used
    pub min_count: usize,
}

impl Tier {
    pub const fn new(name: &'static str, floor: Floor, min_count: usize) -> Self {
        Self {
            name,
            floor,
            min_count,
        }
    }
}

/// Ordered list of tiers, strictest first
#[derive(Debug, Clone, PartialEq)]
pub struct TierCascade {
    tiers: Vec<Tier>,
}

impl TierCascade {
    pub fn new(tiers: Vec<Tier>) -> Self {
        Self { tiers }
    }

    pub fn standard() -> Self {
        Self::new(vec![
            Tier::new("strong", Floor::AtLeast(30.0), 6),
            Tier::new("moderate", Floor::AtLeast(20.0), 1),
            Tier::new("any", Floor::Above(0.0), 0),
        ])
    }

    pub fn tiers(&self) -> &[Tier] {
        &self.tiers
    }

    /// Pick the first satisfied tier and return its members, best first.
    ///
    /// Sorting is stable, so equal scores keep their pool order.
    pub fn select(&self, scored: &[ScoredCandidate], limit: usize) -> Ranking {
        let last = self.tiers.len().saturating_sub(1);

        for (position, tier) in self.tiers.iter().enumerate() {
            let admitted: Vec<&ScoredCandidate> = scored
                .iter()
                .filter(|candidate| tier.floor.admits(candidate.score()))
                .collect();

            if admitted.len() < tier.min_count && position != last {
                continue;
            }
            if admitted.is_empty() {
                return Ranking::empty();
            }

            let mut candidates: Vec<ScoredCandidate> = admitted.into_iter().cloned().collect();
            candidates.sort_by(|a, b| b.score().total_cmp(&a.score()));
            candidates.truncate(limit);

            return Ranking {
                tier: Some(tier.name),
                candidates,
            };
        }

        Ranking::empty()
    }
}

impl Default for TierCascade {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::{CatalogItem, MediaKind};

    fn scored(scores: &[f64]) -> Vec<ScoredCandidate> {
        scores
            .iter()
            .enumerate()
            .map(|(i, &s)| {
                ScoredCandidate::new(CatalogItem::new(i as u64, MediaKind::Movie, ""), s)
            })
            .collect()
    }

    fn ids(ranking: &Ranking) -> Vec<u64> {
        ranking.candidates.iter().map(|c| c.item().id).collect()
    }

    #[test]
    fn test_floor_never_admits_zero() {
        assert!(!Floor::AtLeast(0.0).admits(0.0));
        assert!(!Floor::Above(0.0).admits(0.0));
        assert!(Floor::AtLeast(30.0).admits(30.0));
        assert!(!Floor::Above(30.0).admits(30.0));
    }

    #[test]
    fn test_strong_tier_wins_with_six() {
        let pool = scored(&[35.0, 55.0, 30.0, 95.0, 40.0, 31.0, 20.0, 14.0]);
        let ranking = TierCascade::standard().select(&pool, 12);

        assert_eq!(ranking.tier, Some("strong"));
        assert_eq!(ids(&ranking), vec![3, 1, 4, 0, 5, 2]);
    }

    #[test]
    fn test_falls_back_to_moderate_below_six() {
        // Only five reach 30; the moderate tier re-reads the full pool.
        let pool = scored(&[35.0, 55.0, 30.0, 95.0, 40.0, 20.0, 14.0, 0.0]);
        let ranking = TierCascade::standard().select(&pool, 12);

        assert_eq!(ranking.tier, Some("moderate"));
        assert_eq!(ids(&ranking), vec![3, 1, 4, 0, 2, 5]);
    }

    #[test]
    fn test_falls_back_to_any() {
        let pool = scored(&[14.0, 0.0, 10.0, 0.0]);
        let ranking = TierCascade::standard().select(&pool, 12);

        assert_eq!(ranking.tier, Some("any"));
        assert_eq!(ids(&ranking), vec![0, 2]);
    }

    #[test]
    fn test_all_zero_is_empty() {
        let pool = scored(&[0.0, 0.0]);
        assert_eq!(TierCascade::standard().select(&pool, 12), Ranking::empty());
        assert_eq!(TierCascade::standard().select(&[], 12), Ranking::empty());
    }

    #[test]
    fn test_ties_keep_pool_order() {
        let pool = scored(&[35.0, 35.0, 55.0, 35.0, 35.0, 35.0, 35.0]);
        let ranking = TierCascade::standard().select(&pool, 12);
        assert_eq!(ids(&ranking), vec![2, 0, 1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_truncates_to_limit() {
        let pool = scored(&[40.0; 20]);
        let ranking = TierCascade::standard().select(&pool, 12);
        assert_eq!(ranking.candidates.len(), 12);
        assert_eq!(ids(&ranking), (0..12).collect::<Vec<u64>>());
    }

    #[test]
    fn test_custom_cascade() {
        let cascade = TierCascade::new(vec![
            Tier::new("great", Floor::AtLeast(50.0), 2),
            Tier::new("fallback", Floor::Above(0.0), 0),
        ]);
        let pool = scored(&[55.0, 10.0, 60.0]);
        let ranking = cascade.select(&pool, 12);
        assert_eq!(ranking.tier, Some("great"));
        assert_eq!(ids(&ranking), vec![2, 0]);

        assert_eq!(TierCascade::new(Vec::new()).select(&pool, 12), Ranking::empty());
    }
}
