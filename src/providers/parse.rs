//! Mapping from raw XML payload structs into the domain model.
//!
//! Parsing is deliberately forgiving: an absent or unparsable numeric
//! attribute becomes 0 and absent text becomes empty, so callers never see
//! a null. The single hard failure is a details payload without an `<item>`
//! root; there is nothing to build from.

use quick_xml::de::from_str;

use crate::core::{GameDetails, PlayerCountVote, Poll, PollResult, SearchResult, SuggestedPlayerCount};
use crate::error::{CatalogError, Result};
use crate::providers::xml::{PollElement, SearchItems, ThingItem, ThingItems, ValueAttr};
use crate::sanitize::sanitize_text;

/// Parse a search payload into bare results (no detail fields joined yet)
pub fn parse_search(xml: &str) -> Result<Vec<SearchResult>> {
    let payload: SearchItems = from_str(xml)?;

    Ok(payload
        .items
        .into_iter()
        .map(|item| {
            let mut result = SearchResult::new(item.id.clone(), item.primary_name());
            result.kind = item.kind.clone();
            result.year_published = non_empty(&item.yearpublished);
            result
        })
        .collect())
}

/// Parse a details payload. `id` is only used for error reporting; the
/// returned record carries the id the payload itself declares when present.
pub fn parse_details(xml: &str, id: &str) -> Result<GameDetails> {
    let payload: ThingItems = from_str(xml)?;
    let item = payload
        .items
        .into_iter()
        .next()
        .ok_or_else(|| CatalogError::MissingItem(id.to_string()))?;

    Ok(map_thing_item(item, id))
}

fn map_thing_item(item: ThingItem, fallback_id: &str) -> GameDetails {
    let mut details = GameDetails::new(if item.id.is_empty() {
        fallback_id.to_string()
    } else {
        item.id.clone()
    });

    details.name = sanitize_text(item.primary_name());
    details.year_published = non_empty(&item.yearpublished);
    details.description = sanitize_text(item.description.as_deref().unwrap_or(""));
    details.image = item.image.clone().unwrap_or_default();
    details.thumbnail = item.thumbnail.clone().unwrap_or_default();
    details.min_players = attr_u32(&item.minplayers);
    details.max_players = attr_u32(&item.maxplayers);
    details.playing_time = attr_u32(&item.playingtime);
    details.min_play_time = attr_u32(&item.minplaytime);
    details.max_play_time = attr_u32(&item.maxplaytime);
    details.min_age = attr_u32(&item.minage);

    if let Some(stats) = &item.statistics {
        details.rating = attr_f64(&stats.ratings.average);
        details.weight = attr_f64(&stats.ratings.averageweight);
    }

    for poll in &item.polls {
        match poll.name.as_str() {
            "suggested_numplayers" => details.player_count_poll = parse_player_count_poll(poll),
            "suggested_playerage" => details.player_age_poll = parse_vote_poll(poll),
            "language_dependence" => details.language_dependence_poll = parse_vote_poll(poll),
            _ => {}
        }
    }

    if let Some(summary) = &item.poll_summary {
        details.suggested_player_count = Some(SuggestedPlayerCount {
            best: summary.value_of("bestwith").unwrap_or("").to_string(),
            // The provider really does spell it with three m's.
            recommended: summary.value_of("recommmendedwith").unwrap_or("").to_string(),
        });
    }

    details
}

/// One vote bucket per `<results numplayers="N">` block, document order.
/// Labels are taken verbatim from the payload.
pub fn parse_player_count_poll(poll: &PollElement) -> Vec<PlayerCountVote> {
    poll.results
        .iter()
        .map(|block| {
            let mut vote = PlayerCountVote {
                player_count: block.numplayers.clone().unwrap_or_default(),
                ..Default::default()
            };
            for entry in &block.entries {
                vote.votes.insert(entry.value.clone(), vote_count(entry));
            }
            vote.total = vote.votes.values().sum();
            vote
        })
        .collect()
}

/// Age / language-dependence poll: zero-vote entries count toward the total
/// but are dropped from the result list.
pub fn parse_vote_poll(poll: &PollElement) -> Poll {
    let mut parsed = Poll::default();

    if let Some(block) = poll.results.first() {
        for entry in &block.entries {
            let count = vote_count(entry);
            parsed.total_votes += count;
            if count > 0 {
                parsed.results.push(PollResult {
                    value: entry.value.clone(),
                    votes: count,
                });
            }
        }
    }

    parsed
}

fn vote_count(entry: &crate::providers::xml::PollEntry) -> u32 {
    entry
        .numvotes
        .as_deref()
        .and_then(|raw| raw.parse().ok())
        .unwrap_or(0)
}

fn attr_u32(attr: &Option<ValueAttr>) -> u32 {
    attr.as_ref()
        .and_then(|value_attr| value_attr.value.parse().ok())
        .unwrap_or(0)
}

fn attr_f64(attr: &Option<ValueAttr>) -> f64 {
    attr.as_ref()
        .and_then(|value_attr| value_attr.value.parse().ok())
        .unwrap_or(0.0)
}

fn non_empty(attr: &Option<ValueAttr>) -> Option<String> {
    attr.as_ref()
        .map(|value_attr| value_attr.value.clone())
        .filter(|value| !value.is_empty())
}
