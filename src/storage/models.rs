//! Data models for the storage layer

use crate::cli::types::{MatchId, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Player information stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: PlayerId,
    pub name: String,
    pub country: Option<String>,
    pub role: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
}

impl Player {
    /// A player with only the required fields set.
    pub fn new(player_id: PlayerId, name: impl Into<String>) -> Self {
        Self {
            player_id,
            name: name.into(),
            country: None,
            role: None,
            batting_style: None,
            bowling_style: None,
        }
    }
}

/// Denormalized match row. `match_id` is optional because it is mapped from
/// loosely-shaped feed payloads; rows without one are never written.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub match_id: Option<MatchId>,
    pub series_name: Option<String>,
    pub match_desc: Option<String>,
    pub match_format: Option<String>,
    pub team1: Option<String>,
    pub team2: Option<String>,
    pub venue_ground: Option<String>,
    pub venue_city: Option<String>,
    pub status: Option<String>,
    /// Epoch milliseconds, as supplied by the feed
    pub start_date: Option<i64>,
}

/// One innings as read from a scorecard payload, before it is numbered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InningsRecord {
    pub bat_team: Option<String>,
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub overs: Option<f64>,
    pub runrate: Option<f64>,
}

/// A persisted scorecard row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScorecardRow {
    pub id: i64,
    pub match_id: MatchId,
    pub innings_id: i64,
    pub bat_team: Option<String>,
    pub runs: Option<i64>,
    pub wickets: Option<i64>,
    pub overs: Option<f64>,
    pub runrate: Option<f64>,
}

/// Row counts of every table, for the overview screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableCounts {
    pub players: u64,
    pub matches: u64,
    pub scorecards: u64,
}

/// A single value in a tabular result
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl From<rusqlite::types::Value> for Cell {
    fn from(value: rusqlite::types::Value) -> Self {
        use rusqlite::types::Value;
        match value {
            Value::Null => Cell::Null,
            Value::Integer(i) => Cell::Integer(i),
            Value::Real(f) => Cell::Real(f),
            Value::Text(s) => Cell::Text(s),
            Value::Blob(b) => Cell::Blob(b),
        }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Null => Ok(()),
            Cell::Integer(i) => write!(f, "{}", i),
            // Keeps a trailing `.0` so whole reals still read as reals
            Cell::Real(r) => write!(f, "{:?}", r),
            Cell::Text(s) => write!(f, "{}", s),
            Cell::Blob(b) => write!(f, "<{} bytes>", b.len()),
        }
    }
}

/// Column names plus rows of an arbitrary SELECT
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Cell>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of a column by name
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    /// Rows as JSON objects keyed by column name
    pub fn to_records(&self) -> Vec<serde_json::Map<String, serde_json::Value>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .cloned()
                    .zip(row.iter().map(|cell| {
                        serde_json::to_value(cell).unwrap_or(serde_json::Value::Null)
                    }))
                    .collect()
            })
            .collect()
    }
}
