//! Basic database query operations

use super::{models::*, schema::CricketDatabase};
use crate::sync::mapping::{player_from_payload, PlayerDefaults};
use crate::{MatchId, PlayerId, Result};
use rusqlite::{params, types::Value as SqlValue, Connection, Params, Row};
use serde_json::Value;

const PLAYER_COLUMNS: &str = "player_id, name, country, role, batting_style, bowling_style";

const MATCH_COLUMNS: &str = "match_id, series_name, match_desc, match_format, team1, team2,
     venue_ground, venue_city, status, start_date";

impl CricketDatabase {
    /// List players ordered by name, optionally filtered by a case-insensitive
    /// substring of name, country or role. A blank filter matches everything.
    ///
    /// Matching happens on Unicode-lowercased text, so `%` and `_` are plain
    /// characters and non-ASCII names fold case too.
    pub fn list_players(&self, filter: Option<&str>) -> Result<Vec<Player>> {
        let needle = filter
            .map(|f| f.trim().to_lowercase())
            .filter(|f| !f.is_empty());

        let mut stmt = self
            .conn
            .prepare(&format!("SELECT {} FROM players ORDER BY name", PLAYER_COLUMNS))?;
        let players = stmt
            .query_map([], row_to_player)?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok(match needle {
            Some(needle) => players
                .into_iter()
                .filter(|p| player_matches(p, &needle))
                .collect(),
            None => players,
        })
    }

    /// Get a single player by id
    pub fn get_player(&self, player_id: PlayerId) -> Result<Option<Player>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM players WHERE player_id = ?", PLAYER_COLUMNS),
            params![player_id.as_i64()],
            row_to_player,
        );

        match result {
            Ok(player) => Ok(Some(player)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// `max(player_id) + 1`, or 1 when there are no players.
    ///
    /// Two callers racing on this can compute the same id; the second
    /// `create_player` then fails on the primary key.
    pub fn next_player_id(&self) -> Result<PlayerId> {
        let next: i64 = self.conn.query_row(
            "SELECT COALESCE(MAX(player_id), 0) + 1 FROM players",
            [],
            |row| row.get(0),
        )?;
        Ok(PlayerId::new(next))
    }

    /// Insert a new player. Fails if the id is already taken.
    pub fn create_player(&mut self, player: &Player) -> Result<()> {
        self.conn.execute(
            &format!(
                "INSERT INTO players ({}) VALUES (?, ?, ?, ?, ?, ?)",
                PLAYER_COLUMNS
            ),
            params![
                player.player_id.as_i64(),
                player.name,
                player.country,
                player.role,
                player.batting_style,
                player.bowling_style
            ],
        )?;
        Ok(())
    }

    /// Overwrite every field of the player with this id.
    /// Returns the number of rows changed, 0 when the id is unknown.
    pub fn update_player(&mut self, player: &Player) -> Result<usize> {
        let changed = self.conn.execute(
            "UPDATE players
             SET name = ?, country = ?, role = ?, batting_style = ?, bowling_style = ?
             WHERE player_id = ?",
            params![
                player.name,
                player.country,
                player.role,
                player.batting_style,
                player.bowling_style,
                player.player_id.as_i64()
            ],
        )?;
        Ok(changed)
    }

    /// Delete a player by id. Unknown ids are not an error.
    pub fn delete_player(&mut self, player_id: PlayerId) -> Result<usize> {
        let deleted = self.conn.execute(
            "DELETE FROM players WHERE player_id = ?",
            params![player_id.as_i64()],
        )?;
        Ok(deleted)
    }

    /// Insert or replace a player's full row
    pub fn upsert_player(&mut self, player: &Player) -> Result<()> {
        upsert_player_with(&self.conn, player)
    }

    /// Insert or replace many players in one transaction
    pub fn upsert_players(&mut self, players: &[Player]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        for player in players {
            upsert_player_with(&tx, player)?;
        }
        tx.commit()?;
        Ok(players.len())
    }

    /// Normalize an external player payload and upsert it.
    ///
    /// Returns `false` without touching the table when the payload has no
    /// usable id.
    pub fn upsert_player_from_external(&mut self, payload: &Value) -> Result<bool> {
        match player_from_payload(payload, &PlayerDefaults::default()) {
            Some(player) => {
                self.upsert_player(&player)?;
                Ok(true)
            }
            None => {
                log::debug!("player payload has no id, skipping");
                Ok(false)
            }
        }
    }

    /// Delete every player and return how many there were
    pub fn clear_all_players(&mut self) -> Result<u64> {
        let deleted = self.conn.execute("DELETE FROM players", [])?;
        Ok(deleted as u64)
    }

    /// Insert or replace a match keyed by `match_id`.
    /// A record without a match id is skipped and `false` is returned.
    pub fn upsert_match(&mut self, record: &MatchRecord) -> Result<bool> {
        upsert_match_with(&self.conn, record)
    }

    /// Insert or replace many matches in one transaction, returning how many
    /// had an id and were written
    pub fn upsert_matches(&mut self, records: &[MatchRecord]) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let mut written = 0;
        for record in records {
            if upsert_match_with(&tx, record)? {
                written += 1;
            }
        }
        tx.commit()?;
        Ok(written)
    }

    /// Get a single match by id
    pub fn get_match(&self, match_id: MatchId) -> Result<Option<MatchRecord>> {
        let result = self.conn.query_row(
            &format!("SELECT {} FROM matches WHERE match_id = ?", MATCH_COLUMNS),
            params![match_id.as_i64()],
            row_to_match,
        );

        match result {
            Ok(record) => Ok(Some(record)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// All stored matches, newest start date first
    pub fn list_matches(&self) -> Result<Vec<MatchRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {} FROM matches ORDER BY start_date DESC, match_id DESC",
            MATCH_COLUMNS
        ))?;
        let rows = stmt
            .query_map([], row_to_match)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Replace the scorecard slice of one match.
    ///
    /// Existing rows for the match are deleted and `innings` are inserted as
    /// innings 1..N in order, in a single transaction. An empty list leaves
    /// the match with no scorecard rows. Returns the number of rows inserted.
    pub fn replace_scorecard(
        &mut self,
        match_id: MatchId,
        innings: &[InningsRecord],
    ) -> Result<usize> {
        let tx = self.conn.transaction()?;
        let inserted = replace_scorecard_with(&tx, match_id, innings)?;
        tx.commit()?;
        Ok(inserted)
    }

    /// Scorecard rows of one match in innings order
    pub fn scorecard_for_match(&self, match_id: MatchId) -> Result<Vec<ScorecardRow>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, match_id, innings_id, bat_team, runs, wickets, overs, runrate
             FROM scorecards
             WHERE match_id = ?
             ORDER BY innings_id",
        )?;
        let rows = stmt
            .query_map(params![match_id.as_i64()], |row| {
                Ok(ScorecardRow {
                    id: row.get(0)?,
                    match_id: MatchId::new(row.get(1)?),
                    innings_id: row.get(2)?,
                    bat_team: row.get(3)?,
                    runs: row.get(4)?,
                    wickets: row.get(5)?,
                    overs: row.get(6)?,
                    runrate: row.get(7)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    /// Row counts of the three tables
    pub fn count_all(&self) -> Result<TableCounts> {
        let count = |table: &str| -> Result<u64> {
            let n: i64 =
                self.conn
                    .query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| {
                        row.get(0)
                    })?;
            Ok(n as u64)
        };

        Ok(TableCounts {
            players: count("players")?,
            matches: count("matches")?,
            scorecards: count("scorecards")?,
        })
    }

    /// Run any statement that returns rows and collect the result as a table
    pub fn run_query(&self, sql: &str) -> Result<QueryResult> {
        log::debug!("running query: {}", sql);
        let mut stmt = self.conn.prepare(sql)?;
        let columns: Vec<String> = stmt.column_names().iter().map(|c| c.to_string()).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for i in 0..width {
                cells.push(Cell::from(row.get::<_, SqlValue>(i)?));
            }
            rows.push(cells);
        }

        Ok(QueryResult { columns, rows })
    }

    /// Run one mutating statement inside a transaction.
    ///
    /// Commits on success; on failure the transaction is rolled back before the
    /// error is returned. Returns the number of affected rows.
    pub fn execute<P: Params>(&mut self, sql: &str, params: P) -> Result<usize> {
        let tx = self.conn.transaction()?;
        match tx.execute(sql, params) {
            Ok(affected) => {
                tx.commit()?;
                Ok(affected)
            }
            Err(e) => {
                if let Err(rollback) = tx.rollback() {
                    log::warn!("rollback after failed statement also failed: {}", rollback);
                }
                Err(e.into())
            }
        }
    }
}

pub(crate) fn upsert_player_with(conn: &Connection, player: &Player) -> Result<()> {
    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO players ({}) VALUES (?, ?, ?, ?, ?, ?)",
            PLAYER_COLUMNS
        ),
        params![
            player.player_id.as_i64(),
            player.name,
            player.country,
            player.role,
            player.batting_style,
            player.bowling_style
        ],
    )?;
    Ok(())
}

pub(crate) fn upsert_match_with(conn: &Connection, record: &MatchRecord) -> Result<bool> {
    let Some(match_id) = record.match_id else {
        return Ok(false);
    };

    conn.execute(
        &format!(
            "INSERT OR REPLACE INTO matches ({})
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            MATCH_COLUMNS
        ),
        params![
            match_id.as_i64(),
            record.series_name,
            record.match_desc,
            record.match_format,
            record.team1,
            record.team2,
            record.venue_ground,
            record.venue_city,
            record.status,
            record.start_date
        ],
    )?;
    Ok(true)
}

pub(crate) fn replace_scorecard_with(
    conn: &Connection,
    match_id: MatchId,
    innings: &[InningsRecord],
) -> Result<usize> {
    conn.execute(
        "DELETE FROM scorecards WHERE match_id = ?",
        params![match_id.as_i64()],
    )?;

    let mut stmt = conn.prepare(
        "INSERT INTO scorecards
         (match_id, innings_id, bat_team, runs, wickets, overs, runrate)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )?;
    for (idx, inn) in innings.iter().enumerate() {
        stmt.execute(params![
            match_id.as_i64(),
            (idx + 1) as i64,
            inn.bat_team,
            inn.runs,
            inn.wickets,
            inn.overs,
            inn.runrate
        ])?;
    }
    Ok(innings.len())
}

fn player_matches(player: &Player, needle: &str) -> bool {
    let hit = |field: Option<&str>| field.is_some_and(|v| v.to_lowercase().contains(needle));
    hit(Some(&player.name)) || hit(player.country.as_deref()) || hit(player.role.as_deref())
}

fn row_to_player(row: &Row) -> rusqlite::Result<Player> {
    Ok(Player {
        player_id: PlayerId::new(row.get(0)?),
        name: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
        country: row.get(2)?,
        role: row.get(3)?,
        batting_style: row.get(4)?,
        bowling_style: row.get(5)?,
    })
}

fn row_to_match(row: &Row) -> rusqlite::Result<MatchRecord> {
    Ok(MatchRecord {
        match_id: Some(MatchId::new(row.get(0)?)),
        series_name: row.get(1)?,
        match_desc: row.get(2)?,
        match_format: row.get(3)?,
        team1: row.get(4)?,
        team2: row.get(5)?,
        venue_ground: row.get(6)?,
        venue_city: row.get(7)?,
        status: row.get(8)?,
        start_date: row.get(9)?,
    })
}
