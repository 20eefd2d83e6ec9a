//! # BGG Catalog Engine
//!
//! BoardGameGeek catalog client with:
//! - Serialized request queue respecting the provider's global rate limit,
//!   with requeue-and-retry on 202/429 throttle responses
//! - Tolerant XML parsing into typed search results, game details and
//!   community polls
//! - In-memory TTL search cache with substring-superset reuse
//! - Async/await architecture
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use bgg_catalog_engine::{BggProvider, CatalogEngine};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let engine = CatalogEngine::new(Arc::new(BggProvider::new(None)));
//!
//!     let results = engine.search("wingspan", false).await?;
//!     for game in &results {
//!         println!("{} [{}]", game.display_name(), game.id);
//!     }
//!
//!     let details = engine.get_details(&results[0].id).await?;
//!     println!("{} rated {:.1}/10", details.name, details.rating);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod core;
pub mod engine;
pub mod error;
pub mod providers;
pub mod sanitize;
pub mod throttle;

// Re-export primary types
pub use crate::cache::{CacheConfig, CacheStats, MemoryCache, SearchCache};
pub use crate::core::{
    GameDetails, PlayerCountVote, Poll, PollResult, SearchResult, SuggestedPlayerCount,
};
pub use crate::engine::CatalogEngine;
pub use crate::error::{CatalogError, Result};
pub use crate::providers::{BggProvider, CatalogProvider};
pub use crate::throttle::{Fetch, HttpFetcher, RawResponse, RequestThrottler, ThrottleConfig};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
