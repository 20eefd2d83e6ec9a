pub mod game_details;
pub mod poll;
pub mod search_result;

pub use game_details::{GameDetails, SuggestedPlayerCount};
pub use poll::{PlayerCountVote, Poll, PollResult};
pub use search_result::SearchResult;
