//! Database schema and connection management

use crate::Result;
use rusqlite::Connection;
use std::path::Path;

/// Handle to the local cricket database.
///
/// A handle is opened by the command being run, passed by reference to
/// whatever needs it and closed when dropped at the end of that command.
pub struct CricketDatabase {
    pub(crate) conn: Connection,
}

impl CricketDatabase {
    /// Open (or create) the database file at `path` and ensure tables exist
    pub fn open(path: &Path) -> Result<Self> {
        // Ensure the data directory exists
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        log::debug!("opening database at {}", path.display());
        Self::from_connection(Connection::open(path)?)
    }

    /// Create an in-memory database with the full schema
    pub fn new_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    // The scorecards -> matches key is declared only. Bundled SQLite turns
    // enforcement on by default, so switch it off for every connection.
    fn from_connection(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "foreign_keys", false)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// Create the three tables if they are missing. Safe to call repeatedly.
    pub fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS players (
                player_id INTEGER PRIMARY KEY,
                name TEXT,
                country TEXT,
                role TEXT,
                batting_style TEXT,
                bowling_style TEXT
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS matches (
                match_id INTEGER PRIMARY KEY,
                series_name TEXT,
                match_desc TEXT,
                match_format TEXT,
                team1 TEXT,
                team2 TEXT,
                venue_ground TEXT,
                venue_city TEXT,
                status TEXT,
                start_date INTEGER
            )",
            [],
        )?;

        // match_id is a declared but unenforced reference
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS scorecards (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                match_id INTEGER,
                innings_id INTEGER,
                bat_team TEXT,
                runs INTEGER,
                wickets INTEGER,
                overs REAL,
                runrate REAL,
                FOREIGN KEY (match_id) REFERENCES matches(match_id)
            )",
            [],
        )?;

        Ok(())
    }

    /// Delete every row, children first: scorecards, matches, then players
    pub fn wipe_all(&mut self) -> Result<()> {
        let tx = self.conn.transaction()?;
        tx.execute("DELETE FROM scorecards", [])?;
        tx.execute("DELETE FROM matches", [])?;
        tx.execute("DELETE FROM players", [])?;
        tx.commit()?;
        log::info!("cleared all data from database");
        Ok(())
    }
}
