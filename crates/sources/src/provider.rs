use crate::error::{ProviderError, Result};
use async_trait::async_trait;
use catalog::{CatalogDetail, CatalogItem, ItemKey, MediaKind};
use std::sync::Arc;
use tracing::warn;

/// Catalog provider abstraction
///
/// Every list a provider returns is in provider order (popularity first);
/// the scorer's tie-break relies on that order being passed through untouched.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Full detail record. Its genre list is authoritative, unlike the
    /// summaries returned by the list endpoints.
    async fn get_detail(&self, key: ItemKey) -> Result<CatalogDetail>;

    /// Provider-ranked "similar items" pool for `key`
    async fn get_candidates(&self, key: ItemKey) -> Result<Vec<CatalogItem>>;

    /// Trending items of one kind, most popular first
    async fn get_trending(&self, kind: MediaKind) -> Result<Vec<CatalogItem>>;

    /// Direct lookup of several items, in request order.
    ///
    /// Default implementation fetches each detail record in parallel.
    /// Individual failures are logged and skipped; the call only fails when
    /// nothing at all could be fetched.
    async fn get_by_ids(&self, keys: &[ItemKey]) -> Result<Vec<CatalogItem>> {
        let mut tasks = Vec::with_capacity(keys.len());
        for &key in keys {
            let provider = self.clone_for_task();
            tasks.push(tokio::spawn(async move { provider.get_detail(key).await }));
        }

        let mut items = Vec::with_capacity(keys.len());
        let mut failures = 0usize;
        for (key, task) in keys.iter().zip(tasks) {
            match task.await {
                Ok(Ok(detail)) => items.push(detail.into_item()),
                Ok(Err(e)) => {
                    warn!(provider = self.name(), %key, error = %e, "Lookup failed");
                    failures += 1;
                }
                Err(e) => {
                    let error = ProviderError::from(e);
                    warn!(provider = self.name(), %key, %error, "Lookup task failed");
                    failures += 1;
                }
            }
        }

        if failures > 0 {
            warn!(
                provider = self.name(),
                success_count = items.len(),
                error_count = failures,
                "Partial lookup failure"
            );
        }
        if items.is_empty() && !keys.is_empty() {
            return Err(ProviderError::Empty {
                requested: keys.len(),
            });
        }
        Ok(items)
    }

    /// Clone provider for parallel task execution
    fn clone_for_task(&self) -> Arc<dyn CatalogProvider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::Genre;

    /// Resolves every key except the one it is told to panic on
    #[derive(Clone)]
    struct PanickingProvider {
        poisoned: ItemKey,
    }

    #[async_trait]
    impl CatalogProvider for PanickingProvider {
        async fn get_detail(&self, key: ItemKey) -> Result<CatalogDetail> {
            if key == self.poisoned {
                panic!("lookup of {} blew up", key);
            }
            let item = CatalogItem::new(key.id, key.kind, format!("item {}", key.id));
            let genres = vec![Genre {
                id: 18,
                name: "Drama".to_string(),
            }];
            Ok(CatalogDetail::new(item, genres))
        }

        async fn get_candidates(&self, _key: ItemKey) -> Result<Vec<CatalogItem>> {
            Ok(Vec::new())
        }

        async fn get_trending(&self, _kind: MediaKind) -> Result<Vec<CatalogItem>> {
            Ok(Vec::new())
        }

        fn clone_for_task(&self) -> Arc<dyn CatalogProvider> {
            Arc::new(self.clone())
        }

        fn name(&self) -> &'static str {
            "panicking"
        }
    }

    #[tokio::test]
    async fn test_join_error_maps_to_task() {
        let join_error = tokio::spawn(async { panic!("boom") }).await.unwrap_err();
        let error = ProviderError::from(join_error);

        assert!(matches!(error, ProviderError::Task(_)));
        assert!(error.to_string().starts_with("Provider task failed"));
    }

    #[tokio::test]
    async fn test_get_by_ids_skips_panicked_lookups() {
        let poisoned = ItemKey::new(2, MediaKind::Movie);
        let provider = PanickingProvider { poisoned };
        let keys = [
            ItemKey::new(1, MediaKind::Movie),
            poisoned,
            ItemKey::new(3, MediaKind::Series),
        ];

        let items = provider.get_by_ids(&keys).await.unwrap();
        let found: Vec<ItemKey> = items.iter().map(CatalogItem::key).collect();
        assert_eq!(found, vec![keys[0], keys[2]]);
    }

    #[tokio::test]
    async fn test_get_by_ids_all_panicked_is_empty_error() {
        let poisoned = ItemKey::new(2, MediaKind::Movie);
        let provider = PanickingProvider { poisoned };

        let result = provider.get_by_ids(&[poisoned]).await;
        assert!(matches!(result, Err(ProviderError::Empty { requested: 1 })));
    }
}
