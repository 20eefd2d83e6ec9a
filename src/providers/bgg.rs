//! BoardGameGeek XML API 2 provider.
//!
//! All traffic goes through one [`RequestThrottler`]; search additionally
//! fans out one details fetch per hit to backfill the fields the search
//! payload does not carry. The fan-out is enqueued all at once and awaited
//! together, so wall-clock time stays rate-limit-bound rather than
//! round-trip-bound.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;

use crate::core::{GameDetails, SearchResult};
use crate::error::{CatalogError, Result};
use crate::providers::{parse, CatalogProvider};
use crate::throttle::{Fetch, HttpFetcher, RequestThrottler, ThrottleConfig};

const BGG_API_BASE: &str = "https://api.geekdo.com/xmlapi2";

/// BoardGameGeek provider
pub struct BggProvider {
    throttler: RequestThrottler,
    base_url: String,
}

impl BggProvider {
    /// Create a provider against the live API, optionally authenticated
    pub fn new(auth_token: Option<String>) -> Self {
        Self::with_fetcher(
            Arc::new(HttpFetcher::new(auth_token)),
            ThrottleConfig::default(),
            BGG_API_BASE,
        )
    }

    /// Create a provider over an injected fetch capability; tests point
    /// this at scripted fetchers
    pub fn with_fetcher(
        fetcher: Arc<dyn Fetch>,
        config: ThrottleConfig,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            throttler: RequestThrottler::new(fetcher, config),
            base_url: base_url.into(),
        }
    }

    async fn search_games(&self, query: &str, exact: bool) -> Result<Vec<SearchResult>> {
        let url = format!(
            "{}/search?query={}&type=boardgame&exact={}",
            self.base_url,
            urlencoding::encode(query),
            exact as u8,
        );
        let response = self.throttler.enqueue(&url).await?;
        let results = parse::parse_search(&response.body)?;
        tracing::debug!(query, count = results.len(), "search payload parsed");

        // The search payload has no thumbnails or player/time numbers, so
        // every hit needs a details fetch. Enqueue them all up front; the
        // throttler serializes the actual requests.
        let detail_fetches = results
            .iter()
            .map(|result| {
                let id = result.id.clone();
                async move { self.fetch_details(&id).await }
            })
            .collect::<Vec<_>>();
        let detail_results = join_all(detail_fetches).await;

        let mut enriched = Vec::with_capacity(results.len());
        for (mut result, details) in results.into_iter().zip(detail_results) {
            match details {
                Ok(details) => {
                    result.thumbnail = Some(details.thumbnail).filter(|t| !t.is_empty());
                    result.min_players = Some(details.min_players);
                    result.max_players = Some(details.max_players);
                    result.playing_time = Some(details.playing_time);
                    enriched.push(result);
                }
                // One bad item never sinks the search; it is dropped whole
                // rather than returned half-filled.
                Err(e) => {
                    tracing::warn!(id = %result.id, error = %e, "dropping result, details fetch failed");
                }
            }
        }

        Ok(enriched)
    }

    async fn fetch_details(&self, id: &str) -> Result<GameDetails> {
        let url = format!("{}/thing?id={}&stats=1", self.base_url, id);
        let response = self.throttler.enqueue(&url).await?;
        parse::parse_details(&response.body, id)
    }
}

#[async_trait]
impl CatalogProvider for BggProvider {
    async fn search(&self, query: &str, exact: bool) -> Result<Vec<SearchResult>> {
        self.search_games(query, exact)
            .await
            .map_err(|e| CatalogError::SearchFailed {
                query: query.to_string(),
                source: Box::new(e),
            })
    }

    async fn get_details(&self, id: &str) -> Result<GameDetails> {
        self.fetch_details(id)
            .await
            .map_err(|e| CatalogError::DetailsFailed {
                id: id.to_string(),
                source: Box::new(e),
            })
    }

    fn name(&self) -> &str {
        "bgg"
    }
}
