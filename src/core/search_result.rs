use serde::{Deserialize, Serialize};

/// One row of a catalog search.
///
/// The search payload itself only carries id, name, year and kind; thumbnail
/// and the player/time numbers are joined in from a per-item details fetch
/// and stay `None` when that fetch is skipped.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Provider-assigned stable identifier
    pub id: String,

    /// Game name
    pub name: String,

    /// Publication year, as the provider reports it
    #[serde(default)]
    pub year_published: Option<String>,

    /// Provider category tag (e.g. "boardgame", "boardgameexpansion")
    #[serde(default)]
    pub kind: String,

    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail: Option<String>,

    /// Minimum player count
    #[serde(default)]
    pub min_players: Option<u32>,

    /// Maximum player count
    #[serde(default)]
    pub max_players: Option<u32>,

    /// Typical playing time in minutes
    #[serde(default)]
    pub playing_time: Option<u32>,
}

impl SearchResult {
    /// Create a new result with the fields the search payload carries
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            year_published: None,
            kind: String::new(),
            thumbnail: None,
            min_players: None,
            max_players: None,
            playing_time: None,
        }
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        match &self.year_published {
            Some(year) => format!("{} ({})", self.name, year),
            None => self.name.clone(),
        }
    }
}
