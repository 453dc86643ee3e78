//! # Recommendation Orchestrator
//!
//! Coordinates the two page flows around the synchronous ranking core:
//!
//! **Detail page**
//! 1. Fetch the reference detail and its "similar" pool concurrently
//! 2. Drop the reference itself and repeated entries from the pool
//! 3. Score and rank (`RecommendationScorer`)
//!
//! **Home page**
//! 1. Fetch the trending movie and series streams concurrently
//! 2. Assemble them into one feed, skipping already-shown items
//! 3. If either stream fails, switch to the seed path: look up the fixed
//!    seed keys by ID and show them as-is, without exclusion or interleaving
//!
//! Every provider call is bounded by `OrchestratorConfig::fetch_timeout`.

use std::future::Future;
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, info, instrument, warn};

use catalog::{CatalogDetail, CatalogItem, ExclusionSet, ItemKey, MediaKind, ReferenceContext};
use pipeline::filters::{DuplicateFilter, ExclusionFilter};
use pipeline::{FilterPipeline, PipelineError, Ranking, RecommendationScorer, assemble};
use sources::{CatalogProvider, SeedSet};

use crate::config::OrchestratorConfig;

/// Detail-page result
#[derive(Debug, Clone)]
pub struct Recommendations {
    pub reference: CatalogDetail,
    pub ranking: Ranking,
}

/// Which path produced a home feed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedSource {
    /// Trending streams, filtered and interleaved
    Assembled,
    /// Fixed seed keys, fetched by ID
    Seed,
    /// Both paths failed; render the "no recommendations" state
    Unavailable,
}

impl std::fmt::Display for FeedSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            FeedSource::Assembled => "assembled",
            FeedSource::Seed => "seed",
            FeedSource::Unavailable => "unavailable",
        };
        f.write_str(label)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HomeFeed {
    pub source: FeedSource,
    pub items: Vec<CatalogItem>,
}

impl HomeFeed {
    fn unavailable() -> Self {
        Self {
            source: FeedSource::Unavailable,
            items: Vec::new(),
        }
    }
}

/// Main orchestrator that coordinates provider I/O and ranking
#[derive(Clone)]
pub struct RecommendationOrchestrator {
    provider: Arc<dyn CatalogProvider>,
    scorer: RecommendationScorer,
    seeds: SeedSet,
    config: OrchestratorConfig,
}

impl RecommendationOrchestrator {
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self {
            provider,
            scorer: RecommendationScorer::new(),
            seeds: SeedSet::standard(),
            config: OrchestratorConfig::default(),
        }
    }

    pub fn with_config(mut self, config: OrchestratorConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_scorer(mut self, scorer: RecommendationScorer) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn with_seeds(mut self, seeds: SeedSet) -> Self {
        self.seeds = seeds;
        self
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    pub fn provider_name(&self) -> &'static str {
        self.provider.name()
    }

    /// Detail-page recommendations for `key`.
    ///
    /// Fails when the reference or its pool cannot be fetched; an empty
    /// ranking is a success.
    #[instrument(skip(self), fields(key = %key, provider = self.provider.name()))]
    pub async fn similar_for(&self, key: ItemKey) -> Result<Recommendations> {
        let start_time = Instant::now();

        let (detail, pool) = tokio::join!(
            self.bounded("reference detail", self.provider.get_detail(key)),
            self.bounded("similar pool", self.provider.get_candidates(key))
        );
        let detail = detail.with_context(|| format!("Failed to fetch reference {}", key))?;
        let pool = pool.with_context(|| format!("Failed to fetch similar pool for {}", key))?;
        debug!(pool = pool.len(), "Fetched reference and pool");

        // Scoring is synchronous and cheap; it runs inline on this task.
        let reference = ReferenceContext::from_detail(&detail);
        let exclude: ExclusionSet = [reference.key()].into_iter().collect();
        let pool = FilterPipeline::new()
            .add_filter(ExclusionFilter::new(&exclude))
            .add_filter(DuplicateFilter)
            .apply(pool);
        let ranking = self
            .scorer
            .rank(&reference, &pool, self.config.recommendation_limit)?;

        info!(
            tier = ranking.tier.unwrap_or("none"),
            recommended = ranking.candidates.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Detail page recommendations ready"
        );

        Ok(Recommendations {
            reference: detail,
            ranking,
        })
    }

    /// Home-page feed. Only invalid configuration is an error; provider
    /// failures end in the seed path or in `FeedSource::Unavailable`.
    #[instrument(
        skip(self, exclude),
        fields(excluded = exclude.len(), provider = self.provider.name())
    )]
    pub async fn home_feed(&self, exclude: &ExclusionSet) -> Result<HomeFeed> {
        let cap = self.config.feed_cap;
        if cap == 0 {
            return Err(PipelineError::InvalidCap.into());
        }
        let start_time = Instant::now();

        let (movies, series) = tokio::join!(
            self.bounded("trending movies", self.provider.get_trending(MediaKind::Movie)),
            self.bounded("trending series", self.provider.get_trending(MediaKind::Series))
        );

        let feed = match (movies, series) {
            (Ok(movies), Ok(series)) => HomeFeed {
                source: FeedSource::Assembled,
                items: assemble(movies, series, exclude, cap)?,
            },
            (movies, series) => {
                if let Err(e) = movies {
                    warn!(error = %e, "Trending movies unavailable");
                }
                if let Err(e) = series {
                    warn!(error = %e, "Trending series unavailable");
                }
                self.seed_feed().await
            }
        };

        info!(
            source = %feed.source,
            items = feed.items.len(),
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "Home feed ready"
        );
        Ok(feed)
    }

    /// Seed path: never touches the assembler, never fails.
    async fn seed_feed(&self) -> HomeFeed {
        let keys: Vec<ItemKey> = self
            .seeds
            .keys(MediaKind::Movie)
            .iter()
            .chain(self.seeds.keys(MediaKind::Series))
            .copied()
            .collect();
        info!(seeds = keys.len(), "Falling back to seed lookup");

        match self
            .bounded("seed lookup", self.provider.get_by_ids(&keys))
            .await
        {
            Ok(items) => HomeFeed {
                source: FeedSource::Seed,
                items,
            },
            Err(e) => {
                warn!(error = %e, "Seed lookup failed");
                HomeFeed::unavailable()
            }
        }
    }

    /// Run a provider call under the configured timeout
    async fn bounded<T>(
        &self,
        what: &str,
        call: impl Future<Output = sources::Result<T>>,
    ) -> Result<T> {
        let timeout = self.config.fetch_timeout;
        match tokio::time::timeout(timeout, call).await {
            Ok(result) => Ok(result.with_context(|| format!("Fetching {} failed", what))?),
            Err(_) => Err(anyhow!("Fetching {} timed out after {:?}", what, timeout)),
        }
    }
}
