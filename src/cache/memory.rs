use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Instant;

use crate::cache::{CacheConfig, CacheStats, SearchCache};
use crate::core::SearchResult;

/// Extra entries removed beyond the limit so inserts don't prune every time
const PRUNE_MARGIN: usize = 10;

/// A cached superset query may be at most this many characters longer than
/// the requested one to be reused
const FUZZY_LENGTH_SLACK: usize = 3;

struct CacheEntry {
    data: Vec<SearchResult>,
    inserted_at: Instant,
    exact: bool,
}

/// In-memory TTL + size-bounded search cache.
///
/// Lookups that miss the exact key scan for a non-expired cached query that
/// contains the requested one and is at most [`FUZZY_LENGTH_SLACK`] chars
/// longer, then narrow that entry's results by name. This assumes the
/// provider's search is substring-stable: narrowing a broader search is
/// treated as safe, which is a heuristic, not a guarantee.
pub struct MemoryCache {
    entries: Mutex<HashMap<String, CacheEntry>>,
    config: CacheConfig,
    hits: AtomicUsize,
    misses: AtomicUsize,
    evictions: AtomicUsize,
    expired: AtomicUsize,
}

impl MemoryCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            config,
            hits: AtomicUsize::new(0),
            misses: AtomicUsize::new(0),
            evictions: AtomicUsize::new(0),
            expired: AtomicUsize::new(0),
        }
    }

    /// Normalize query for consistent cache lookups
    fn normalize_query(query: &str) -> String {
        query.trim().to_lowercase()
    }

    fn is_expired(&self, entry: &CacheEntry) -> bool {
        entry.inserted_at.elapsed() > self.config.ttl
    }

    fn find_partial_match(
        &self,
        entries: &HashMap<String, CacheEntry>,
        query: &str,
    ) -> Option<Vec<SearchResult>> {
        for (cached_query, entry) in entries.iter() {
            if self.is_expired(entry) {
                continue;
            }
            if cached_query.contains(query) && cached_query.len() - query.len() <= FUZZY_LENGTH_SLACK
            {
                let filtered = entry
                    .data
                    .iter()
                    .filter(|game| game.name.to_lowercase().contains(query))
                    .cloned()
                    .collect();
                return Some(filtered);
            }
        }
        None
    }

    /// Drop expired entries, then the oldest ones until the count is below
    /// the limit with some headroom.
    fn prune(&self, entries: &mut HashMap<String, CacheEntry>) {
        let before = entries.len();
        entries.retain(|_, entry| entry.inserted_at.elapsed() <= self.config.ttl);
        self.expired.fetch_add(before - entries.len(), Ordering::Relaxed);

        if entries.len() >= self.config.max_entries {
            let mut by_age: Vec<(String, Instant)> = entries
                .iter()
                .map(|(key, entry)| (key.clone(), entry.inserted_at))
                .collect();
            by_age.sort_by_key(|(_, inserted_at)| *inserted_at);

            let to_remove = entries.len() - self.config.max_entries + PRUNE_MARGIN;
            for (key, _) in by_age.into_iter().take(to_remove) {
                entries.remove(&key);
                self.evictions.fetch_add(1, Ordering::Relaxed);
            }
        }
    }
}

impl SearchCache for MemoryCache {
    fn get(&self, query: &str, exact: bool) -> Option<Vec<SearchResult>> {
        let normalized = Self::normalize_query(query);
        let mut entries = self.entries.lock().unwrap();

        match entries.get(&normalized) {
            Some(entry) => {
                if self.is_expired(entry) {
                    // Stale data is never served; the entry goes away now
                    // rather than waiting for the next prune.
                    entries.remove(&normalized);
                    self.expired.fetch_add(1, Ordering::Relaxed);
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    return None;
                }
                if entry.exact == exact {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    return Some(entry.data.clone());
                }
                self.misses.fetch_add(1, Ordering::Relaxed);
                None
            }
            None => match self.find_partial_match(&entries, &normalized) {
                Some(filtered) => {
                    self.hits.fetch_add(1, Ordering::Relaxed);
                    Some(filtered)
                }
                None => {
                    self.misses.fetch_add(1, Ordering::Relaxed);
                    None
                }
            },
        }
    }

    fn set(&self, query: &str, results: Vec<SearchResult>, exact: bool) {
        let normalized = Self::normalize_query(query);
        let mut entries = self.entries.lock().unwrap();

        if entries.len() >= self.config.max_entries {
            self.prune(&mut entries);
        }

        entries.insert(
            normalized,
            CacheEntry {
                data: results,
                inserted_at: Instant::now(),
                exact,
            },
        );
    }

    fn clear(&self) {
        self.entries.lock().unwrap().clear();
    }

    fn stats(&self) -> CacheStats {
        CacheStats {
            entries: self.entries.lock().unwrap().len(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            evictions: self.evictions.load(Ordering::Relaxed),
            expired: self.expired.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn results(names: &[&str]) -> Vec<SearchResult> {
        names
            .iter()
            .enumerate()
            .map(|(i, name)| SearchResult::new(i.to_string(), *name))
            .collect()
    }

    fn short_ttl(ttl_ms: u64) -> CacheConfig {
        CacheConfig {
            ttl: Duration::from_millis(ttl_ms),
            max_entries: 256,
        }
    }

    #[test]
    fn test_exact_key_round_trip() {
        let cache = MemoryCache::new(CacheConfig::default());
        let stored = results(&["Catan", "Catan Junior", "Catan: Seafarers"]);

        cache.set("Catan", stored.clone(), false);
        assert_eq!(cache.get("catan", false), Some(stored.clone()));
        assert_eq!(cache.get("  CATAN  ", false), Some(stored));
    }

    #[test]
    fn test_exact_flag_must_match() {
        let cache = MemoryCache::new(CacheConfig::default());
        cache.set("catan", results(&["Catan"]), false);

        assert!(cache.get("catan", true).is_none());
        assert!(cache.get("catan", false).is_some());
    }

    #[test]
    fn test_fuzzy_superset_narrowing() {
        let cache = MemoryCache::new(CacheConfig::default());
        cache.set(
            "catan",
            results(&["Catan", "Catan Junior", "Carcassonne"]),
            false,
        );

        // "cata" is contained in the cached "catan" (1 char shorter), so the
        // cached list is narrowed by name.
        let narrowed = cache.get("cata", false).unwrap();
        let names: Vec<&str> = narrowed.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Catan", "Catan Junior"]);

        // No substring relationship: absent.
        assert!(cache.get("catanzzzz", false).is_none());
    }

    #[test]
    fn test_fuzzy_length_slack_limit() {
        let cache = MemoryCache::new(CacheConfig::default());
        cache.set("wingspan", results(&["Wingspan"]), false);

        // "wing" is 4 chars shorter than "wingspan", past the slack.
        assert!(cache.get("wing", false).is_none());
        // "wings" is 3 shorter, within the slack.
        assert!(cache.get("wings", false).is_some());
    }

    #[test]
    fn test_ttl_expiry_removes_entry() {
        let cache = MemoryCache::new(short_ttl(30));
        cache.set("catan", results(&["Catan"]), false);
        assert!(cache.get("catan", false).is_some());

        std::thread::sleep(Duration::from_millis(45));
        assert!(cache.get("catan", false).is_none());

        // The expired entry was physically removed by the lookup.
        assert_eq!(cache.stats().entries, 0);
        assert_eq!(cache.stats().expired, 1);
    }

    #[test]
    fn test_expired_entries_skipped_by_fuzzy_scan() {
        let cache = MemoryCache::new(short_ttl(30));
        cache.set("catan", results(&["Catan"]), false);
        std::thread::sleep(Duration::from_millis(45));

        assert!(cache.get("cata", false).is_none());
    }

    #[test]
    fn test_size_bound_holds_after_every_insert() {
        let config = CacheConfig {
            ttl: Duration::from_secs(600),
            max_entries: 64,
        };
        let cache = MemoryCache::new(config.clone());

        for i in 0..(config.max_entries + 50) {
            cache.set(&format!("query {}", i), results(&["Game"]), false);
            assert!(
                cache.stats().entries <= config.max_entries,
                "cache grew past the bound on insert {}",
                i
            );
        }
        assert!(cache.stats().evictions > 0);
    }

    #[test]
    fn test_clear_empties_cache() {
        let cache = MemoryCache::new(CacheConfig::default());
        cache.set("catan", results(&["Catan"]), false);
        cache.set("wingspan", results(&["Wingspan"]), false);

        cache.clear();
        assert_eq!(cache.stats().entries, 0);
        assert!(cache.get("catan", false).is_none());
    }

    #[test]
    fn test_stats_count_hits_and_misses() {
        let cache = MemoryCache::new(CacheConfig::default());
        cache.set("catan", results(&["Catan"]), false);

        cache.get("catan", false);
        cache.get("catan", false);
        cache.get("azul", false);

        let stats = cache.stats();
        assert_eq!(stats.hits, 2);
        assert_eq!(stats.misses, 1);
    }
}
