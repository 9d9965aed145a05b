//! Cricket Stats CLI Library
//!
//! Fetches live match and player data from the Cricbuzz API (via RapidAPI),
//! keeps a denormalized copy in a local SQLite file and runs a catalog of
//! analytical queries over it.
//!
//! ## Features
//!
//! - **Live Matches**: List live matches, show scorecards, sync them locally
//! - **Player Data**: Search players, view profiles and career statistics
//! - **Roster Import**: Bulk import a team's players
//! - **Analytics**: 25 pre-built SQL queries plus ad hoc SQL, with CSV export
//! - **Player CRUD**: Create, read, update and delete local player rows
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use cricket_stats::{storage::{find_query, run_catalog_query, CricketDatabase}, PlayerId};
//!
//! # fn example() -> cricket_stats::Result<()> {
//! let db = CricketDatabase::open(std::path::Path::new("cricbuzz.db"))?;
//! let top_scorers = run_catalog_query(&db, find_query("q3")?)?;
//! println!("{} rows in {:?}", top_scorers.result.len(), top_scorers.elapsed);
//!
//! let player = db.get_player(PlayerId::new(1413))?;
//! # let _ = player;
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! ```bash
//! export CRICBUZZ_API_KEY=your-rapidapi-key
//! export CRICBUZZ_API_HOST=cricbuzz-cricket.p.rapidapi.com   # optional
//! export CRICKET_STATS_DB=/path/to/cricbuzz.db               # optional
//! ```

pub mod cli;
pub mod commands;
pub mod core;
pub mod cricbuzz;
pub mod error;
pub mod storage;
pub mod sync;

// Re-export commonly used types
pub use cli::types::{MatchId, PlayerId, TeamId};
pub use error::{CricketError, Result};
