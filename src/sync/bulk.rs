//! Persisting Cricbuzz payloads: single saves and bulk batches.

use serde::Serialize;
use serde_json::Value;

use super::mapping::{
    extract_player_list, innings_from_scorecard, is_present, match_from_info,
    player_from_payload, PlayerDefaults, PLAYER_LIST_KEYS,
};
use crate::{
    cricbuzz::{CricbuzzClient, MatchOption},
    error::CricketError,
    storage::{CricketDatabase, MatchRecord},
    MatchId, PlayerId, Result, TeamId,
};

/// Result of a bulk match sync
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SyncReport {
    pub matches: usize,
    pub innings: usize,
    pub failures: Vec<ScorecardFailure>,
}

/// A scorecard that could not be fetched during a bulk sync
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScorecardFailure {
    pub match_id: MatchId,
    pub error: String,
}

/// Save the `matchInfo` of a single match.
/// Fails with [`CricketError::Unmappable`] when it has no `matchId`.
pub fn save_match_info(db: &mut CricketDatabase, info: &Value) -> Result<MatchId> {
    let record = match_from_info(info);
    let match_id = record.match_id.ok_or_else(|| CricketError::Unmappable {
        entity: "match".to_string(),
    })?;
    db.upsert_match(&record)?;
    Ok(match_id)
}

/// Replace a match's scorecard rows with the innings in `scorecard`
pub fn save_scorecard(
    db: &mut CricketDatabase,
    match_id: MatchId,
    scorecard: &Value,
) -> Result<usize> {
    let innings = innings_from_scorecard(scorecard);
    db.replace_scorecard(match_id, &innings)
}

/// Save a player profile payload.
/// Fails with [`CricketError::Unmappable`] when it has no id.
pub fn save_player_profile(db: &mut CricketDatabase, info: &Value) -> Result<PlayerId> {
    let player = player_from_payload(info, &PlayerDefaults::default()).ok_or_else(|| {
        CricketError::Unmappable {
            entity: "player".to_string(),
        }
    })?;
    db.upsert_player(&player)?;
    Ok(player.player_id)
}

/// Upsert every match of the live feed selection. Returns rows written.
pub fn persist_matches(db: &mut CricketDatabase, options: &[MatchOption]) -> Result<usize> {
    let records: Vec<MatchRecord> = options.iter().map(|o| match_from_info(&o.info)).collect();
    db.upsert_matches(&records)
}

/// Replace the scorecard of each match. Empty payloads are skipped and leave
/// the stored scorecard alone. Returns innings rows written.
pub fn persist_scorecards(
    db: &mut CricketDatabase,
    scorecards: &[(MatchId, Value)],
) -> Result<usize> {
    let mut innings = 0;
    for (match_id, data) in scorecards {
        if !is_present(data) {
            continue;
        }
        innings += save_scorecard(db, *match_id, data)?;
    }
    Ok(innings)
}

/// Upsert all matches, then fetch and store each match's scorecard.
///
/// A scorecard that cannot be fetched is recorded in the report and the batch
/// moves on; that match contributes no innings.
pub async fn sync_matches(
    client: &CricbuzzClient,
    db: &mut CricketDatabase,
    options: &[MatchOption],
) -> Result<SyncReport> {
    let matches = persist_matches(db, options)?;

    let mut scorecards = Vec::with_capacity(options.len());
    let mut failures = Vec::new();
    for option in options {
        match client.scorecard(option.match_id).await {
            Ok(fetched) => scorecards.push((option.match_id, fetched.data)),
            Err(e) => {
                log::warn!("scorecard for match {} unavailable: {}", option.match_id, e);
                failures.push(ScorecardFailure {
                    match_id: option.match_id,
                    error: e.to_string(),
                });
            }
        }
    }

    let innings = persist_scorecards(db, &scorecards)?;
    log::info!(
        "synced {} matches and {} innings ({} scorecards failed)",
        matches,
        innings,
        failures.len()
    );

    Ok(SyncReport {
        matches,
        innings,
        failures,
    })
}

/// Store the players of a roster payload.
///
/// The list may be wrapped under `player`, `players` or `data`, or be a bare
/// list; an empty list is an error. Entries without an id or a name (such as
/// the `BATSMEN` / `BOWLER` section headers of Cricbuzz rosters) are skipped.
/// Returns the number of players written.
pub fn import_players(
    db: &mut CricketDatabase,
    payload: &Value,
    defaults: &PlayerDefaults,
) -> Result<usize> {
    let entries = extract_player_list(payload, PLAYER_LIST_KEYS);
    if entries.is_empty() {
        return Err(CricketError::NoPlayers);
    }

    let players: Vec<_> = entries
        .iter()
        .filter_map(|entry| match player_from_payload(entry, defaults) {
            Some(player) if !player.name.is_empty() => Some(player),
            _ => {
                log::debug!("skipping roster entry without id or name: {}", entry);
                None
            }
        })
        .collect();

    let written = db.upsert_players(&players)?;
    log::info!("imported {} of {} roster entries", written, entries.len());
    Ok(written)
}

/// Fetch a team roster and store its players.
/// A non-200 response propagates as [`CricketError::Api`].
pub async fn import_team_players(
    client: &CricbuzzClient,
    db: &mut CricketDatabase,
    team_id: TeamId,
    defaults: &PlayerDefaults,
) -> Result<usize> {
    let payload = client.team_players(team_id).await?;
    import_players(db, &payload, defaults)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn option(match_id: i64, info: Value) -> MatchOption {
        MatchOption {
            label: String::new(),
            match_id: MatchId::new(match_id),
            info,
        }
    }

    #[test]
    fn test_save_match_info_requires_id() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let result = save_match_info(&mut db, &json!({"seriesName": "No id"}));
        assert!(matches!(result, Err(CricketError::Unmappable { .. })));
        assert_eq!(db.count_all().unwrap().matches, 0);
    }

    #[test]
    fn test_save_player_profile_requires_id() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let result = save_player_profile(&mut db, &json!({"name": "Ghost"}));
        assert!(matches!(result, Err(CricketError::Unmappable { .. })));
    }

    #[test]
    fn test_save_player_profile() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let id = save_player_profile(
            &mut db,
            &json!({"id": "1413", "name": "Virat Kohli", "intlTeam": "India", "bat": "Right Handed Bat"}),
        )
        .unwrap();

        assert_eq!(id, PlayerId::new(1413));
        let stored = db.get_player(id).unwrap().unwrap();
        assert_eq!(stored.country.as_deref(), Some("India"));
        assert_eq!(stored.batting_style.as_deref(), Some("Right Handed Bat"));
    }

    #[test]
    fn test_persist_matches_skips_missing_ids() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let options = vec![
            option(1, json!({"matchId": 1, "seriesName": "A"})),
            option(2, json!({"seriesName": "B"})),
        ];

        assert_eq!(persist_matches(&mut db, &options).unwrap(), 1);
        assert_eq!(db.count_all().unwrap().matches, 1);
    }

    #[test]
    fn test_persist_scorecards_skips_empty_payloads() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let first = vec![(
            MatchId::new(1),
            json!({"scorecard": [{"batteamname": "India", "score": 150}]}),
        )];
        assert_eq!(persist_scorecards(&mut db, &first).unwrap(), 1);

        // An empty payload must not wipe what is already stored
        let second = vec![(MatchId::new(1), json!({}))];
        assert_eq!(persist_scorecards(&mut db, &second).unwrap(), 0);
        assert_eq!(db.scorecard_for_match(MatchId::new(1)).unwrap().len(), 1);
    }

    #[test]
    fn test_import_players_empty_list_is_error() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let result = import_players(&mut db, &json!({"player": []}), &PlayerDefaults::default());
        assert!(matches!(result, Err(CricketError::NoPlayers)));
    }

    #[test]
    fn test_import_players_skips_headers_and_nameless() {
        let mut db = CricketDatabase::new_in_memory().unwrap();
        let payload = json!({
            "player": [
                {"name": "BATSMEN", "imageId": 174146},
                {"id": "1413", "name": "Virat Kohli", "battingStyle": "Right-hand bat"},
                {"id": "576"},
                {"playerId": 9311, "fullName": "Jasprit Bumrah", "intlTeam": "India", "playingRole": "Bowler"}
            ]
        });

        let count = import_players(&mut db, &payload, &PlayerDefaults::for_roster("India")).unwrap();
        assert_eq!(count, 2);

        let bumrah = db.get_player(PlayerId::new(9311)).unwrap().unwrap();
        assert_eq!(bumrah.name, "Jasprit Bumrah");
        assert_eq!(bumrah.role.as_deref(), Some("Bowler"));

        let kohli = db.get_player(PlayerId::new(1413)).unwrap().unwrap();
        assert_eq!(kohli.role.as_deref(), Some("Player"));
        assert_eq!(kohli.batting_style.as_deref(), Some("Right-hand bat"));

        assert!(db.get_player(PlayerId::new(576)).unwrap().is_none());
    }
}
