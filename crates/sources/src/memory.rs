//! Provider backed by an in-memory `CatalogIndex`, used for offline runs,
//! demos and tests.

use crate::error::{ProviderError, Result};
use crate::provider::CatalogProvider;
use async_trait::async_trait;
use catalog::{CatalogDetail, CatalogIndex, CatalogItem, ItemKey, MediaKind};
use std::sync::Arc;
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct InMemoryProvider {
    index: Arc<CatalogIndex>,
}

impl InMemoryProvider {
    pub fn new(index: Arc<CatalogIndex>) -> Self {
        Self { index }
    }

    pub fn index(&self) -> &CatalogIndex {
        &self.index
    }
}

#[async_trait]
impl CatalogProvider for InMemoryProvider {
    async fn get_detail(&self, key: ItemKey) -> Result<CatalogDetail> {
        self.index
            .get_detail(&key)
            .ok_or(ProviderError::NotFound { key })
    }

    #[instrument(skip(self), fields(key = %key))]
    async fn get_candidates(&self, key: ItemKey) -> Result<Vec<CatalogItem>> {
        if self.index.get_item(&key).is_none() {
            return Err(ProviderError::NotFound { key });
        }
        let pool = self.index.similar_to(&key);
        debug!(count = pool.len(), "Resolved similar pool");
        Ok(pool)
    }

    async fn get_trending(&self, kind: MediaKind) -> Result<Vec<CatalogItem>> {
        Ok(self.index.trending(kind))
    }

    fn clone_for_task(&self) -> Arc<dyn CatalogProvider> {
        Arc::new(self.clone())
    }

    fn name(&self) -> &'static str {
        "fixture"
    }
}
