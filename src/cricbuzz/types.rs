//! Views over Cricbuzz response payloads.
//!
//! Only the stable outer shapes are deserialized with serde; per-record
//! objects stay as [`serde_json::Value`] and go through
//! [`crate::sync::mapping`] where field names vary.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    sync::mapping::{extract_player_list, first_i64, first_text, PLAYER_ID_KEYS},
    MatchId, PlayerId, Result,
};


/// Keys a player search response may wrap its hits under
pub const SEARCH_LIST_KEYS: &[&str] = &["player", "players", "data", "result"];

/// Root of `/matches/v1/live`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveFeed {
    #[serde(default)]
    pub type_matches: Vec<TypeMatches>,
}

/// One match category (International, League, Domestic, Women)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeMatches {
    #[serde(default)]
    pub match_type: Option<String>,
    #[serde(default)]
    pub series_matches: Vec<SeriesMatches>,
}

/// A series entry. Ad slots in the feed carry no wrapper.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesMatches {
    #[serde(default)]
    pub series_ad_wrapper: Option<SeriesAdWrapper>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesAdWrapper {
    #[serde(default)]
    pub series_name: Option<String>,
    #[serde(default)]
    pub matches: Vec<LiveMatch>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiveMatch {
    #[serde(default)]
    pub match_info: Value,
}

/// A selectable live match
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchOption {
    pub label: String,
    pub match_id: MatchId,
    /// Raw `matchInfo` object, mapped to a row by the sync layer
    pub info: Value,
}

impl LiveFeed {
    pub fn from_value(feed: &Value) -> Result<Self> {
        Ok(LiveFeed::deserialize(feed)?)
    }

    /// Every match with an id, in feed order
    pub fn match_options(&self) -> Vec<MatchOption> {
        let mut options = Vec::new();
        for series in self.type_matches.iter().flat_map(|t| &t.series_matches) {
            let Some(wrapper) = &series.series_ad_wrapper else {
                continue;
            };
            for m in &wrapper.matches {
                let info = &m.match_info;
                let Some(match_id) = first_i64(info, &["matchId"]) else {
                    continue;
                };
                options.push(MatchOption {
                    label: match_label(info),
                    match_id: MatchId::new(match_id),
                    info: info.clone(),
                });
            }
        }
        options
    }
}

/// Parse the live feed and list its matches
pub fn build_match_options(feed: &Value) -> Result<Vec<MatchOption>> {
    Ok(LiveFeed::from_value(feed)?.match_options())
}

/// `"India vs Australia - 2nd Test (In Progress)"`
pub fn match_label(info: &Value) -> String {
    let team = |key: &str, fallback: &str| {
        info.get(key)
            .and_then(|t| first_text(t, &["teamName"]))
            .unwrap_or_else(|| fallback.to_string())
    };
    format!(
        "{} vs {} - {} ({})",
        team("team1", "Team 1"),
        team("team2", "Team 2"),
        first_text(info, &["matchDesc"]).unwrap_or_default(),
        first_text(info, &["state"]).unwrap_or_default(),
    )
}

/// A player search result
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerSearchHit {
    pub id: PlayerId,
    pub name: String,
    pub team: Option<String>,
}

impl PlayerSearchHit {
    pub fn label(&self) -> String {
        match &self.team {
            Some(team) => format!("{} - {}", self.name, team),
            None => self.name.clone(),
        }
    }
}

/// Hits of a player search response. Entries without an id are dropped.
pub fn player_search_hits(results: &Value) -> Vec<PlayerSearchHit> {
    extract_player_list(results, SEARCH_LIST_KEYS)
        .iter()
        .filter(|p| p.is_object())
        .filter_map(|p| {
            let id = first_i64(p, PLAYER_ID_KEYS)?;
            Some(PlayerSearchHit {
                id: PlayerId::new(id),
                name: first_text(p, &["name", "fullName", "playerName"])
                    .unwrap_or_else(|| "Unknown".to_string()),
                team: first_text(p, &["teamName", "country"]),
            })
        })
        .collect()
}

/// Display view of `/stats/v1/player/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PlayerProfile {
    pub name: String,
    pub nickname: Option<String>,
    pub role: Option<String>,
    pub batting_style: Option<String>,
    pub bowling_style: Option<String>,
    pub intl_team: Option<String>,
    pub date_of_birth: Option<String>,
    pub birth_place: Option<String>,
    pub height: Option<String>,
    pub teams: Vec<String>,
    pub profile_url: Option<String>,
}

impl PlayerProfile {
    pub fn from_payload(info: &Value) -> Self {
        Self {
            name: first_text(info, &["name"]).unwrap_or_else(|| "Unknown".to_string()),
            nickname: first_text(info, &["nickName"]),
            role: first_text(info, &["role", "playingRole"]),
            batting_style: first_text(info, &["bat"]),
            bowling_style: first_text(info, &["bowl"]),
            intl_team: first_text(info, &["intlTeam"]),
            date_of_birth: first_text(info, &["DoB", "dob"]),
            birth_place: first_text(info, &["birthPlace", "country"]),
            height: first_text(info, &["height"]),
            teams: profile_teams(info),
            profile_url: info
                .get("appIndex")
                .and_then(|a| first_text(a, &["webURL"]))
                .or_else(|| first_text(info, &["webURL"])),
        }
    }
}

// `teams` is a comma separated string in most responses, a list in others
fn profile_teams(info: &Value) -> Vec<String> {
    let teams = ["teams", "teamsList"]
        .iter()
        .filter_map(|k| info.get(k))
        .find(|v| !v.is_null());

    match teams {
        Some(Value::String(s)) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(String::from)
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Object(_) => first_text(item, &["name", "teamName"]),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

#[derive(Debug, Default, Deserialize)]
struct StatsPayload {
    #[serde(default)]
    headers: Vec<Value>,
    #[serde(default)]
    values: Vec<StatsRowPayload>,
}

#[derive(Debug, Default, Deserialize)]
struct StatsRowPayload {
    #[serde(default)]
    values: Vec<Value>,
}

/// Career batting or bowling table: one row per statistic, one column per
/// format (Test, ODI, T20, IPL).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StatsTable {
    pub formats: Vec<String>,
    pub rows: Vec<StatsRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsRow {
    pub stat: String,
    pub values: Vec<String>,
}

impl StatsTable {
    /// Parse the `{headers, values: [{values}]}` shape. The first header is
    /// the row-header placeholder and is dropped.
    pub fn from_payload(payload: &Value) -> Result<Self> {
        let raw = StatsPayload::deserialize(payload)?;

        let formats = raw.headers.iter().skip(1).map(cell_text).collect();
        let rows = raw
            .values
            .iter()
            .filter_map(|row| {
                let (stat, rest) = row.values.split_first()?;
                Some(StatsRow {
                    stat: cell_text(stat),
                    values: rest.iter().map(cell_text).collect(),
                })
            })
            .collect();

        Ok(Self { formats, rows })
    }

    pub fn is_empty(&self) -> bool {
        self.formats.is_empty() || self.rows.is_empty()
    }

    /// Value of `stat` for the format at `format_idx`
    pub fn value(&self, stat: &str, format_idx: usize) -> Option<&str> {
        self.rows
            .iter()
            .find(|r| r.stat == stat)
            .and_then(|r| r.values.get(format_idx))
            .map(String::as_str)
    }
}

fn cell_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Display view of one innings of a scorecard response
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InningsDetail {
    pub bat_team: String,
    pub score: String,
    pub wickets: String,
    pub overs: String,
    pub run_rate: String,
    pub extras: Extras,
    pub batsmen: Vec<BatsmanLine>,
    pub bowlers: Vec<BowlerLine>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Extras {
    pub byes: String,
    pub leg_byes: String,
    pub wides: String,
    pub no_balls: String,
    pub penalty: String,
    pub total: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BatsmanLine {
    pub name: String,
    pub runs: String,
    pub balls: String,
    pub fours: String,
    pub sixes: String,
    pub strike_rate: String,
    pub dismissal: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BowlerLine {
    pub name: String,
    pub overs: String,
    pub maidens: String,
    pub runs: String,
    pub wickets: String,
    pub economy: String,
}

impl InningsDetail {
    /// Innings of a scorecard payload, in order. Missing counts show as
    /// empty text, missing extras as `0`.
    pub fn list_from_scorecard(scorecard: &Value) -> Vec<Self> {
        ["scorecard", "scoreCard"]
            .iter()
            .find_map(|k| scorecard.get(k).and_then(Value::as_array))
            .map(|entries| entries.iter().map(Self::from_entry).collect())
            .unwrap_or_default()
    }

    pub fn from_entry(entry: &Value) -> Self {
        let extras = entry.get("extras").unwrap_or(&Value::Null);
        let extra = |key: &str| match extras.get(key) {
            Some(v) if !v.is_null() => cell_text(v),
            _ => "0".to_string(),
        };

        Self {
            bat_team: first_text(entry, &["batteamname", "batTeamName"])
                .unwrap_or_else(|| "Team".to_string()),
            score: field_text(entry, &["score", "runs"]),
            wickets: field_text(entry, &["wickets"]),
            overs: field_text(entry, &["overs"]),
            run_rate: field_text(entry, &["runrate", "runRate"]),
            extras: Extras {
                byes: extra("byes"),
                leg_byes: extra("legbyes"),
                wides: extra("wides"),
                no_balls: extra("noballs"),
                penalty: extra("penalty"),
                total: extra("total"),
            },
            batsmen: object_list(entry, "batsman")
                .map(|b| BatsmanLine {
                    name: field_text(b, &["name"]),
                    runs: field_text(b, &["runs"]),
                    balls: field_text(b, &["balls"]),
                    fours: field_text(b, &["fours"]),
                    sixes: field_text(b, &["sixes"]),
                    strike_rate: field_text(b, &["strkrate", "strikeRate"]),
                    dismissal: field_text(b, &["outdec"]),
                })
                .collect(),
            bowlers: object_list(entry, "bowler")
                .map(|b| BowlerLine {
                    name: field_text(b, &["name"]),
                    overs: field_text(b, &["overs"]),
                    maidens: field_text(b, &["maidens"]),
                    runs: field_text(b, &["runs"]),
                    wickets: field_text(b, &["wickets"]),
                    economy: field_text(b, &["economy"]),
                })
                .collect(),
        }
    }
}

// Unlike `first_text`, zero counts are kept
fn field_text(payload: &Value, keys: &[&str]) -> String {
    keys.iter()
        .filter_map(|k| payload.get(k))
        .find(|v| !v.is_null())
        .map(cell_text)
        .unwrap_or_default()
}

fn object_list<'a>(entry: &'a Value, key: &str) -> impl Iterator<Item = &'a Value> {
    entry
        .get(key)
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter(|v| v.is_object())
}
