use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::poll::{PlayerCountVote, Poll};

/// Best/recommended player-count summary from the provider's poll-summary
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SuggestedPlayerCount {
    pub best: String,
    pub recommended: String,
}

/// Full game record from a details fetch.
///
/// Built fresh from the latest payload on every fetch; details are never
/// cached, so there is no cross-call identity. Absent numeric fields default
/// to 0 and absent text to empty, so nothing here is ever null downstream.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GameDetails {
    /// Provider-assigned stable identifier
    pub id: String,

    /// Game name (sanitized)
    #[serde(default)]
    pub name: String,

    /// Publication year, as the provider reports it
    #[serde(default)]
    pub year_published: Option<String>,

    /// Multi-line description (sanitized)
    #[serde(default)]
    pub description: String,

    /// Full-size image URL
    #[serde(default)]
    pub image: String,

    /// Thumbnail image URL
    #[serde(default)]
    pub thumbnail: String,

    #[serde(default)]
    pub min_players: u32,

    #[serde(default)]
    pub max_players: u32,

    /// Typical playing time in minutes
    #[serde(default)]
    pub playing_time: u32,

    #[serde(default)]
    pub min_play_time: u32,

    #[serde(default)]
    pub max_play_time: u32,

    /// Publisher's minimum age
    #[serde(default)]
    pub min_age: u32,

    /// Community average rating, 0–10, 0.0 when unrated
    #[serde(default)]
    pub rating: f64,

    /// Complexity score, 0–5, 0.0 when unrated
    #[serde(default)]
    pub weight: f64,

    /// Best/recommended player-count text pair, when the provider sent one
    #[serde(default)]
    pub suggested_player_count: Option<SuggestedPlayerCount>,

    /// Player-count suitability poll, document order
    #[serde(default)]
    pub player_count_poll: Vec<PlayerCountVote>,

    /// Recommended-age poll
    #[serde(default)]
    pub player_age_poll: Poll,

    /// Language-dependence poll
    #[serde(default)]
    pub language_dependence_poll: Poll,

    /// Timestamp when this record was fetched
    #[serde(default = "Utc::now")]
    pub fetched_at: DateTime<Utc>,
}

impl GameDetails {
    /// Create an empty record for the given id
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            year_published: None,
            description: String::new(),
            image: String::new(),
            thumbnail: String::new(),
            min_players: 0,
            max_players: 0,
            playing_time: 0,
            min_play_time: 0,
            max_play_time: 0,
            min_age: 0,
            rating: 0.0,
            weight: 0.0,
            suggested_player_count: None,
            player_count_poll: Vec::new(),
            player_age_poll: Poll::default(),
            language_dependence_poll: Poll::default(),
            fetched_at: Utc::now(),
        }
    }

    /// Get display name (for logging/UI)
    pub fn display_name(&self) -> String {
        match &self.year_published {
            Some(year) => format!("{} ({})", self.name, year),
            None => self.name.clone(),
        }
    }

    /// Serialize to JSON string
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Deserialize from JSON string
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults() {
        let details = GameDetails::new("13");
        assert_eq!(details.id, "13");
        assert_eq!(details.min_players, 0);
        assert_eq!(details.rating, 0.0);
        assert!(details.player_count_poll.is_empty());
        assert_eq!(details.player_age_poll.total_votes, 0);
    }

    #[test]
    fn test_json_round_trip() {
        let mut details = GameDetails::new("13");
        details.name = "Catan".to_string();
        details.rating = 7.1;
        details.year_published = Some("1995".to_string());

        let json = details.to_json().unwrap();
        let back = GameDetails::from_json(&json).unwrap();
        assert_eq!(details, back);
    }
}
