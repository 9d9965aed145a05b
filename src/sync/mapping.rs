//! Field mapping from Cricbuzz payloads to the local schema.
//!
//! Different API providers name the same concept differently (`id` vs
//! `playerId`, `intlTeam` vs `country`). Every canonical field is resolved
//! from an ordered list of candidate keys: the first one that is present and
//! non-empty wins. Nothing here touches the database.

use serde_json::Value;

use crate::{
    storage::{InningsRecord, MatchRecord, Player},
    MatchId, PlayerId,
};

pub const PLAYER_ID_KEYS: &[&str] = &["id", "playerId"];
pub const PLAYER_NAME_KEYS: &[&str] = &["name", "fullName"];
pub const PLAYER_COUNTRY_KEYS: &[&str] = &["intlTeam", "country"];
/// Roster entries carry the team's own `country` ahead of `intlTeam`
pub const ROSTER_COUNTRY_KEYS: &[&str] = &["country", "intlTeam"];
pub const PLAYER_ROLE_KEYS: &[&str] = &["role", "playingRole"];
pub const PLAYER_BATTING_KEYS: &[&str] = &["bat", "batting_style", "battingStyle"];
pub const PLAYER_BOWLING_KEYS: &[&str] = &["bowl", "bowling_style", "bowlingStyle"];

/// Keys a player list may be wrapped under in roster and search responses
pub const PLAYER_LIST_KEYS: &[&str] = &["player", "players", "data"];

const TEAM_NAME_KEYS: &[&str] = &["teamName", "teamSName"];
const GROUND_KEYS: &[&str] = &["ground", "name"];
const SCORECARD_KEYS: &[&str] = &["scorecard", "scoreCard"];
const BAT_TEAM_KEYS: &[&str] = &["batteamname", "batTeamName"];
const RUNS_KEYS: &[&str] = &["score", "runs"];
const RUNRATE_KEYS: &[&str] = &["runrate", "runRate"];

/// Whether a JSON value carries information. Null, blank strings, `false`,
/// zero and empty containers do not.
pub fn is_present(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map(|f| f != 0.0).unwrap_or(true),
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

/// First present, non-empty value among `keys`, in order
pub fn first_present<'a>(payload: &'a Value, keys: &[&str]) -> Option<&'a Value> {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .find(|v| is_present(v))
}

/// Like [`first_present`] but rendered as text. Numbers are stringified.
pub fn first_text(payload: &Value, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .find_map(value_as_text)
}

/// Like [`first_present`] but as an integer. Numeric strings are accepted
/// because providers send ids both ways.
pub fn first_i64(payload: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .filter(|v| is_present(v))
        .find_map(value_as_i64)
}

fn value_as_text(value: &Value) -> Option<String> {
    if !is_present(value) {
        return None;
    }
    match value {
        Value::String(s) => Some(s.trim().to_string()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn value_as_f64(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// How a player payload is resolved: the country key order, and the
/// fallbacks applied when country or role is missing
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerDefaults {
    pub country: Option<String>,
    pub role: Option<String>,
    pub country_keys: &'static [&'static str],
}

impl Default for PlayerDefaults {
    fn default() -> Self {
        Self {
            country: None,
            role: None,
            country_keys: PLAYER_COUNTRY_KEYS,
        }
    }
}

impl PlayerDefaults {
    /// Defaults used for a team roster import: `country` before `intlTeam`,
    /// then the team's country and a generic `Player` role.
    pub fn for_roster(country: impl Into<String>) -> Self {
        Self {
            country: Some(country.into()),
            role: Some("Player".to_string()),
            country_keys: ROSTER_COUNTRY_KEYS,
        }
    }
}

/// Map a player payload (profile, search hit or roster entry) to a row.
/// Returns `None` when no id can be resolved.
pub fn player_from_payload(payload: &Value, defaults: &PlayerDefaults) -> Option<Player> {
    let player_id = first_i64(payload, PLAYER_ID_KEYS)?;

    Some(Player {
        player_id: PlayerId::new(player_id),
        name: first_text(payload, PLAYER_NAME_KEYS).unwrap_or_default(),
        country: first_text(payload, defaults.country_keys).or_else(|| defaults.country.clone()),
        role: first_text(payload, PLAYER_ROLE_KEYS).or_else(|| defaults.role.clone()),
        batting_style: first_text(payload, PLAYER_BATTING_KEYS),
        bowling_style: first_text(payload, PLAYER_BOWLING_KEYS),
    })
}

/// Pull the player list out of a roster or search response.
///
/// Accepts an object wrapping the list under one of `wrapper_keys`, or a
/// bare list. Anything else yields an empty list.
pub fn extract_player_list<'a>(payload: &'a Value, wrapper_keys: &[&str]) -> &'a [Value] {
    match payload {
        Value::Array(items) => items.as_slice(),
        Value::Object(_) => first_present(payload, wrapper_keys)
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or(&[]),
        _ => &[],
    }
}

/// Map a `matchInfo` object from the live feed to a match row.
/// The match id stays `None` when the payload has none.
pub fn match_from_info(info: &Value) -> MatchRecord {
    let team_name = |key: &str| info.get(key).and_then(|t| first_text(t, TEAM_NAME_KEYS));
    let venue = info.get("venueInfo");

    MatchRecord {
        match_id: first_i64(info, &["matchId"]).map(MatchId::new),
        series_name: first_text(info, &["seriesName"]),
        match_desc: first_text(info, &["matchDesc"]),
        match_format: first_text(info, &["matchFormat"]),
        team1: team_name("team1"),
        team2: team_name("team2"),
        venue_ground: venue.and_then(|v| first_text(v, GROUND_KEYS)),
        venue_city: venue.and_then(|v| first_text(v, &["city"])),
        status: first_text(info, &["status"]),
        start_date: first_i64(info, &["startDate"]),
    }
}

/// Map one scorecard entry to an innings record
pub fn innings_from_entry(entry: &Value) -> InningsRecord {
    InningsRecord {
        bat_team: first_text(entry, BAT_TEAM_KEYS),
        runs: int_field(entry, RUNS_KEYS),
        wickets: int_field(entry, &["wickets"]),
        overs: float_field(entry, &["overs"]),
        runrate: float_field(entry, RUNRATE_KEYS),
    }
}

/// Map a scorecard response to its innings, in feed order
pub fn innings_from_scorecard(scorecard: &Value) -> Vec<InningsRecord> {
    first_present(scorecard, SCORECARD_KEYS)
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(innings_from_entry).collect())
        .unwrap_or_default()
}

// Zero is a real score, so numeric stats keep it instead of falling through
// to the next candidate key.
fn int_field(payload: &Value, keys: &[&str]) -> Option<i64> {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .find_map(value_as_i64)
}

fn float_field(payload: &Value, keys: &[&str]) -> Option<f64> {
    keys.iter()
        .filter_map(|key| payload.get(key))
        .find_map(value_as_f64)
}
