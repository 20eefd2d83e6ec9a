use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Community vote tally for one candidate player count.
///
/// `player_count` is kept verbatim ("4", "4+", ...) and the vote labels are
/// whatever the provider sent ("Best", "Recommended", "Not Recommended",
/// possibly others later): an open string-keyed map in document order, not
/// a closed enum.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlayerCountVote {
    pub player_count: String,

    /// Label → vote count, in document order
    pub votes: IndexMap<String, u32>,

    /// Sum of all counts in this bucket
    pub total: u32,
}

impl PlayerCountVote {
    /// Votes for a specific label, 0 when the provider never sent it
    pub fn votes_for(&self, label: &str) -> u32 {
        self.votes.get(label).copied().unwrap_or(0)
    }
}

/// One labelled entry of an age or language-dependence poll
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PollResult {
    pub value: String,
    pub votes: u32,
}

/// Aggregated age or language-dependence poll.
///
/// `results` holds only entries that actually received votes; `total_votes`
/// still counts the zero-vote entries the provider listed.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct Poll {
    pub results: Vec<PollResult>,
    pub total_votes: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_votes_for_unknown_label_is_zero() {
        let mut vote = PlayerCountVote {
            player_count: "4".to_string(),
            ..Default::default()
        };
        vote.votes.insert("Best".to_string(), 12);
        vote.total = 12;

        assert_eq!(vote.votes_for("Best"), 12);
        assert_eq!(vote.votes_for("Recommended"), 0);
        assert_eq!(vote.votes_for("Something New"), 0);
    }

    #[test]
    fn test_votes_preserve_insertion_order() {
        let mut vote = PlayerCountVote::default();
        vote.votes.insert("Best".to_string(), 1);
        vote.votes.insert("Recommended".to_string(), 2);
        vote.votes.insert("Not Recommended".to_string(), 3);

        let labels: Vec<&str> = vote.votes.keys().map(String::as_str).collect();
        assert_eq!(labels, vec!["Best", "Recommended", "Not Recommended"]);
    }
}
