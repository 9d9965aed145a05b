//! Sync adapter between the Cricbuzz API and the local database.
//!
//! - `mapping`: pure field resolution from provider payloads to rows
//! - `bulk`: single-record saves and bulk import/sync batches

pub mod bulk;
pub mod mapping;

pub use bulk::{
    import_players, import_team_players, persist_matches, persist_scorecards, save_match_info,
    save_player_profile, save_scorecard, sync_matches, ScorecardFailure, SyncReport,
};
pub use mapping::PlayerDefaults;
