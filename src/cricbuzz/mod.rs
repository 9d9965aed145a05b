//! Cricbuzz API access: the HTTP client and views over its payloads.

pub mod http;
pub mod types;

pub use http::{CricbuzzClient, FetchedScorecard};
pub use types::{
    build_match_options, InningsDetail, MatchOption, PlayerProfile, PlayerSearchHit, StatsTable,
};
