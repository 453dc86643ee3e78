//! Orchestrator settings.

use pipeline::{DEFAULT_FEED_CAP, DEFAULT_RECOMMENDATION_LIMIT};
use std::time::Duration;

pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrchestratorConfig {
    /// Detail-page recommendation count
    pub recommendation_limit: usize,
    /// Home feed length
    pub feed_cap: usize,
    /// Upper bound on every provider call; an elapsed timeout counts as a failure
    pub fetch_timeout: Duration,
}

impl OrchestratorConfig {
    pub fn with_recommendation_limit(mut self, limit: usize) -> Self {
        self.recommendation_limit = limit;
        self
    }

    pub fn with_feed_cap(mut self, cap: usize) -> Self {
        self.feed_cap = cap;
        self
    }

    pub fn with_fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            recommendation_limit: DEFAULT_RECOMMENDATION_LIMIT,
            feed_cap: DEFAULT_FEED_CAP,
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}
