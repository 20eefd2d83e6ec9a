use std::sync::Arc;

use crate::cache::{CacheConfig, CacheStats, MemoryCache, SearchCache};
use crate::core::{GameDetails, SearchResult};
use crate::error::Result;
use crate::providers::CatalogProvider;

/// Main catalog orchestrator: one provider, one search cache.
///
/// Search goes cache-first; details always hit the provider (a details
/// record is rebuilt from the latest payload on every fetch). The
/// check-then-fetch-then-store sequence is not atomic, so two concurrent
/// searches for the same cold query may both reach the network; results
/// are idempotent per query, last write wins.
pub struct CatalogEngine {
    cache: Arc<dyn SearchCache>,
    provider: Arc<dyn CatalogProvider>,
}

impl CatalogEngine {
    /// Create an engine with the default in-memory cache
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_cache(provider, Arc::new(MemoryCache::new(CacheConfig::default())))
    }

    /// Create an engine over a specific cache
    pub fn with_cache(provider: Arc<dyn CatalogProvider>, cache: Arc<dyn SearchCache>) -> Self {
        Self { cache, provider }
    }

    /// Search for games, serving repeated and narrowed queries from cache
    pub async fn search(&self, query: &str, exact: bool) -> Result<Vec<SearchResult>> {
        if let Some(cached) = self.cache.get(query, exact) {
            tracing::debug!(query, count = cached.len(), "search served from cache");
            return Ok(cached);
        }

        let results = self.provider.search(query, exact).await?;
        self.cache.set(query, results.clone(), exact);
        Ok(results)
    }

    /// Fetch the full record for one game (never cached)
    pub async fn get_details(&self, id: &str) -> Result<GameDetails> {
        self.provider.get_details(id).await
    }

    /// Drop all cached searches; for host lifecycle events
    pub fn clear_cache(&self) {
        self.cache.clear();
    }

    /// Get cache statistics
    pub fn cache_stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CatalogError;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FakeProvider {
        results: Vec<SearchResult>,
        search_calls: AtomicUsize,
        details_calls: AtomicUsize,
    }

    impl FakeProvider {
        fn new(names: &[&str]) -> Self {
            Self {
                results: names
                    .iter()
                    .enumerate()
                    .map(|(i, name)| SearchResult::new(i.to_string(), *name))
                    .collect(),
                search_calls: AtomicUsize::new(0),
                details_calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CatalogProvider for FakeProvider {
        async fn search(&self, _query: &str, _exact: bool) -> Result<Vec<SearchResult>> {
            self.search_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.results.clone())
        }

        async fn get_details(&self, id: &str) -> Result<GameDetails> {
            self.details_calls.fetch_add(1, Ordering::SeqCst);
            Ok(GameDetails::new(id))
        }

        fn name(&self) -> &str {
            "fake"
        }
    }

    #[tokio::test]
    async fn test_repeated_search_hits_cache() {
        let provider = Arc::new(FakeProvider::new(&["Catan", "Catan Junior"]));
        let engine = CatalogEngine::new(provider.clone());

        let first = engine.search("catan", false).await.unwrap();
        let second = engine.search("catan", false).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);
        assert_eq!(engine.cache_stats().hits, 1);
    }

    #[tokio::test]
    async fn test_narrowed_search_reuses_superset_entry() {
        let provider = Arc::new(FakeProvider::new(&["Catan", "Carcassonne"]));
        let engine = CatalogEngine::new(provider.clone());

        engine.search("catan", false).await.unwrap();
        let narrowed = engine.search("cata", false).await.unwrap();

        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 1);
        let names: Vec<&str> = narrowed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Catan"]);
    }

    #[tokio::test]
    async fn test_exact_flag_partitions_cache() {
        let provider = Arc::new(FakeProvider::new(&["Azul"]));
        let engine = CatalogEngine::new(provider.clone());

        engine.search("azul", false).await.unwrap();
        engine.search("azul", true).await.unwrap();

        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_details_never_cached() {
        let provider = Arc::new(FakeProvider::new(&[]));
        let engine = CatalogEngine::new(provider.clone());

        engine.get_details("13").await.unwrap();
        engine.get_details("13").await.unwrap();

        assert_eq!(provider.details_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_clear_cache_forces_refetch() {
        let provider = Arc::new(FakeProvider::new(&["Root"]));
        let engine = CatalogEngine::new(provider.clone());

        engine.search("root", false).await.unwrap();
        engine.clear_cache();
        engine.search("root", false).await.unwrap();

        assert_eq!(provider.search_calls.load(Ordering::SeqCst), 2);
    }

    struct BrokenProvider;

    #[async_trait]
    impl CatalogProvider for BrokenProvider {
        async fn search(&self, query: &str, _exact: bool) -> Result<Vec<SearchResult>> {
            Err(CatalogError::SearchFailed {
                query: query.to_string(),
                source: Box::new(CatalogError::Status {
                    status: 503,
                    url: "http://bgg.test/search".to_string(),
                }),
            })
        }

        async fn get_details(&self, id: &str) -> Result<GameDetails> {
            Err(CatalogError::MissingItem(id.to_string()))
        }

        fn name(&self) -> &str {
            "broken"
        }
    }

    #[tokio::test]
    async fn test_provider_failure_is_not_cached() {
        let engine = CatalogEngine::new(Arc::new(BrokenProvider));

        assert!(engine.search("ra", false).await.is_err());
        // The failed search left nothing behind.
        assert_eq!(engine.cache_stats().entries, 0);
    }
}
