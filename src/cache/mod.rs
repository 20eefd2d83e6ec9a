pub mod memory;

use std::time::Duration;

use crate::core::SearchResult;

pub use memory::MemoryCache;

/// Trait for search-result cache implementations
pub trait SearchCache: Send + Sync {
    /// Cached results for a query, honoring TTL and the exact-search flag.
    /// Falls back to filtering a cached superset query when possible.
    fn get(&self, query: &str, exact: bool) -> Option<Vec<SearchResult>>;

    /// Store results under the normalized query
    fn set(&self, query: &str, results: Vec<SearchResult>, exact: bool);

    /// Drop all entries (host lifecycle only, e.g. plugin unload)
    fn clear(&self);

    /// Get cache statistics
    fn stats(&self) -> CacheStats;
}

/// Cache tuning
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// Maximum entry age before it is considered stale
    pub ttl: Duration,
    /// Entry count that triggers pruning on insert
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(15 * 60),
            max_entries: 256,
        }
    }
}

/// Cache statistics
#[derive(Debug, Clone, Default)]
pub struct CacheStats {
    pub entries: usize,
    pub hits: usize,
    pub misses: usize,
    pub evictions: usize,
    pub expired: usize,
}
