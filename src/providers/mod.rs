pub mod bgg;
pub mod parse;
pub mod xml;

use async_trait::async_trait;

use crate::core::{GameDetails, SearchResult};
use crate::error::Result;

pub use bgg::BggProvider;

/// Trait for board-game catalog providers
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Search the catalog; `exact` asks the provider for exact-name matches
    async fn search(&self, query: &str, exact: bool) -> Result<Vec<SearchResult>>;

    /// Fetch the full record for one game
    async fn get_details(&self, id: &str) -> Result<GameDetails>;

    /// Get provider name
    fn name(&self) -> &str;
}
