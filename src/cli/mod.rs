//! CLI argument definitions and parsing.

pub mod types;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use types::{MatchId, PlayerId, TeamId};

#[derive(Debug, Parser)]
#[clap(
    name = "cricket-stats",
    version,
    about = "Cricket stats from the Cricbuzz API, stored in a local SQLite file"
)]
pub struct CricketStats {
    /// Database file (or set `CRICKET_STATS_DB` env var).
    #[clap(long, global = true)]
    pub db: Option<PathBuf>,

    /// Log SQL and HTTP detail to stderr.
    #[clap(long, short, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Show row counts of every table
    Overview,

    /// Create or wipe the local database
    Db {
        #[clap(subcommand)]
        cmd: DbCmd,
    },

    /// Live matches and scorecards
    Live {
        #[clap(subcommand)]
        cmd: LiveCmd,
    },

    /// Player search, profiles, career stats and roster import
    Players {
        #[clap(subcommand)]
        cmd: PlayersCmd,
    },

    /// Pre-built analytical queries and ad hoc SQL
    Analytics {
        #[clap(subcommand)]
        cmd: AnalyticsCmd,
    },

    /// Create, read, update and delete player rows
    Crud {
        #[clap(subcommand)]
        cmd: CrudCmd,
    },
}

#[derive(Debug, Subcommand)]
pub enum DbCmd {
    /// Create the tables if they do not exist
    Init,

    /// Delete every row from every table
    Wipe {
        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum LiveCmd {
    /// List the matches currently in the live feed
    List,

    /// Show one live match and save it with its scorecard.
    Show {
        match_id: MatchId,

        /// Also print batsmen, bowlers and extras of every innings.
        #[clap(long)]
        full: bool,
    },

    /// Save every live match and its scorecard
    Sync,
}

#[derive(Debug, Subcommand)]
pub enum PlayersCmd {
    /// Search players by name (at least 3 characters)
    Search { query: String },

    /// Show a player profile and save the player locally
    Profile { player_id: PlayerId },

    /// Career batting statistics by format
    Batting { player_id: PlayerId },

    /// Career bowling statistics by format
    Bowling { player_id: PlayerId },

    /// Import a team roster into the players table
    Import {
        /// Cricbuzz team id (2 is India).
        #[clap(long, default_value_t = TeamId::default())]
        team_id: TeamId,

        /// Country stored for players whose payload has none.
        #[clap(long, default_value = "India")]
        country: String,
    },

    /// Delete every player row
    Clear {
        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },
}

#[derive(Debug, Subcommand)]
pub enum AnalyticsCmd {
    /// List the available queries
    List,

    /// Run a query by key (`q3`), number (`3`) or title.
    ///
    /// With `--sql` the given statement is run instead and NAME is ignored.
    Run {
        #[clap(required_unless_present = "sql")]
        name: Option<String>,

        /// Run this SQL as-is instead of a named query.
        #[clap(long)]
        sql: Option<String>,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,

        /// Also write the results to a CSV file.
        #[clap(long)]
        csv: Option<PathBuf>,
    },
}

/// Optional player fields shared by `crud create` and `crud update`
#[derive(Debug, Default, Args)]
pub struct PlayerFields {
    #[clap(long)]
    pub country: Option<String>,

    #[clap(long)]
    pub role: Option<String>,

    #[clap(long)]
    pub batting_style: Option<String>,

    #[clap(long)]
    pub bowling_style: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CrudCmd {
    /// Print the id the next created player would get
    NextId,

    /// List players, optionally filtered by name, country or role
    List {
        /// Case-insensitive substring filter.
        #[clap(long, short)]
        filter: Option<String>,

        /// Output results as JSON instead of a table.
        #[clap(long)]
        json: bool,
    },

    /// Show one player
    Read { player_id: PlayerId },

    /// Add a player
    Create {
        /// Player id. Defaults to the next free id.
        #[clap(long)]
        id: Option<PlayerId>,

        #[clap(long)]
        name: String,

        #[clap(flatten)]
        fields: PlayerFields,
    },

    /// Change a player. Fields not given keep their current values.
    Update {
        player_id: PlayerId,

        #[clap(long)]
        name: Option<String>,

        #[clap(flatten)]
        fields: PlayerFields,
    },

    /// Delete a player
    Delete {
        player_id: PlayerId,

        /// Skip the confirmation prompt.
        #[clap(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let app = CricketStats::parse_from(["cricket-stats", "overview", "--db", "x.db", "-v"]);
        assert_eq!(app.db, Some(PathBuf::from("x.db")));
        assert!(app.verbose);
        assert!(matches!(app.command, Commands::Overview));
    }

    #[test]
    fn test_parse_players_import_defaults() {
        let app = CricketStats::parse_from(["cricket-stats", "players", "import"]);
        match app.command {
            Commands::Players {
                cmd: PlayersCmd::Import { team_id, country },
            } => {
                assert_eq!(team_id, TeamId::new(2));
                assert_eq!(country, "India");
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_parse_crud_update_fields() {
        let app = CricketStats::parse_from([
            "cricket-stats",
            "crud",
            "update",
            "7",
            "--name",
            "B",
            "--batting-style",
            "Left-hand bat",
        ]);
        match app.command {
            Commands::Crud {
                cmd:
                    CrudCmd::Update {
                        player_id,
                        name,
                        fields,
                    },
            } => {
                assert_eq!(player_id, PlayerId::new(7));
                assert_eq!(name.as_deref(), Some("B"));
                assert_eq!(fields.batting_style.as_deref(), Some("Left-hand bat"));
                assert_eq!(fields.country, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_analytics_run_requires_name_or_sql() {
        assert!(CricketStats::try_parse_from(["cricket-stats", "analytics", "run"]).is_err());
        let app = CricketStats::try_parse_from([
            "cricket-stats",
            "analytics",
            "run",
            "--sql",
            "SELECT 1",
        ])
        .unwrap();
        match app.command {
            Commands::Analytics {
                cmd: AnalyticsCmd::Run { name, sql, .. },
            } => {
                assert_eq!(name, None);
                assert_eq!(sql.as_deref(), Some("SELECT 1"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_invalid_match_id_rejected() {
        assert!(CricketStats::try_parse_from(["cricket-stats", "live", "show", "abc"]).is_err());
    }
}
