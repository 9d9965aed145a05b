//! Integration tests for the sync layer against a mock Cricbuzz server

use cricket_stats::{
    core::config::{ApiConfig, DEFAULT_API_HOST},
    cricbuzz::{build_match_options, CricbuzzClient},
    storage::CricketDatabase,
    sync::{
        bulk::{import_team_players, sync_matches},
        PlayerDefaults,
    },
    CricketError, MatchId, PlayerId, TeamId,
};
use serde_json::json;
use wiremock::{
    matchers::{header, method, path},
    Mock, MockServer, ResponseTemplate,
};

fn client_for(server: &MockServer) -> CricbuzzClient {
    let config = ApiConfig::new("test-key", DEFAULT_API_HOST).with_base_url(server.uri());
    CricbuzzClient::new(&config).unwrap()
}

fn live_feed() -> serde_json::Value {
    json!({
        "typeMatches": [{
            "matchType": "International",
            "seriesMatches": [
                {"seriesAdWrapper": {
                    "seriesName": "India tour of Australia",
                    "matches": [
                        {"matchInfo": {"matchId": 1, "seriesName": "India tour of Australia",
                                       "team1": {"teamName": "India"}, "team2": {"teamName": "Australia"},
                                       "matchDesc": "1st Test", "state": "Complete"}},
                        {"matchInfo": {"matchId": 2, "seriesName": "India tour of Australia",
                                       "team1": {"teamName": "India"}, "team2": {"teamName": "Australia"},
                                       "matchDesc": "2nd Test", "state": "Preview"}}
                    ]
                }},
                {"adDetail": {"name": "banner"}}
            ]
        }]
    })
}

#[tokio::test]
async fn test_import_team_players_counts_and_skips() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/v1/2/players"))
        .and(header("x-rapidapi-key", "test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "player": [
                {"name": "BATSMEN", "imageId": 1},
                {"id": "1413", "name": "Virat Kohli", "battingStyle": "Right-hand bat"},
                {"id": "9311", "name": "Jasprit Bumrah", "bowlingStyle": "Right-arm fast"},
                {"name": "BOWLER"},
                {"id": "576"}
            ]
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut db = CricketDatabase::new_in_memory().unwrap();

    let count = import_team_players(
        &client,
        &mut db,
        TeamId::default(),
        &PlayerDefaults::for_roster("India"),
    )
    .await
    .unwrap();

    assert_eq!(count, 2);
    let bumrah = db.get_player(PlayerId::new(9311)).unwrap().unwrap();
    assert_eq!(bumrah.country.as_deref(), Some("India"));
    assert_eq!(bumrah.role.as_deref(), Some("Player"));
    assert_eq!(bumrah.bowling_style.as_deref(), Some("Right-arm fast"));
}

#[tokio::test]
async fn test_import_team_players_api_error_writes_nothing() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/v1/2/players"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Too many requests"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut db = CricketDatabase::new_in_memory().unwrap();

    let result = import_team_players(
        &client,
        &mut db,
        TeamId::default(),
        &PlayerDefaults::for_roster("India"),
    )
    .await;

    match result {
        Err(CricketError::Api { status, .. }) => assert_eq!(status, 429),
        other => panic!("Expected Api error, got {:?}", other),
    }
    assert_eq!(db.count_all().unwrap().players, 0);
}

#[tokio::test]
async fn test_import_team_players_empty_roster() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/teams/v1/5/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"players": []})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut db = CricketDatabase::new_in_memory().unwrap();
    let result = import_team_players(
        &client,
        &mut db,
        TeamId::new(5),
        &PlayerDefaults::for_roster("England"),
    )
    .await;

    assert!(matches!(result, Err(CricketError::NoPlayers)));
}

#[tokio::test]
async fn test_sync_matches_collects_scorecard_failures() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mcenter/v1/1/hscard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scorecard": [
                {"batteamname": "India", "score": 150, "wickets": 10, "overs": 49.4, "runrate": 3.02},
                {"batteamname": "Australia", "score": 104, "wickets": 10, "overs": 51.2, "runrate": 2.03}
            ]
        })))
        .mount(&mock_server)
        .await;

    // Match 2 has no scorecard on either endpoint
    Mock::given(method("GET"))
        .and(path("/mcenter/v1/2/hscard"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mcenter/v1/2/scard"))
        .respond_with(ResponseTemplate::new(404).set_body_string("not found"))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut db = CricketDatabase::new_in_memory().unwrap();
    let options = build_match_options(&live_feed()).unwrap();
    assert_eq!(options.len(), 2);

    let report = sync_matches(&client, &mut db, &options).await.unwrap();

    assert_eq!(report.matches, 2);
    assert_eq!(report.innings, 2);
    assert_eq!(report.failures.len(), 1);
    assert_eq!(report.failures[0].match_id, MatchId::new(2));

    let counts = db.count_all().unwrap();
    assert_eq!(counts.matches, 2);
    assert_eq!(counts.scorecards, 2);

    let rows = db.scorecard_for_match(MatchId::new(1)).unwrap();
    assert_eq!(rows[1].bat_team.as_deref(), Some("Australia"));
    assert_eq!(rows[1].innings_id, 2);

    let stored = db.get_match(MatchId::new(2)).unwrap().unwrap();
    assert_eq!(stored.match_desc.as_deref(), Some("2nd Test"));
}

#[tokio::test]
async fn test_resync_replaces_scorecard() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/mcenter/v1/1/hscard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scorecard": [{"batteamname": "India", "score": 20, "wickets": 1, "overs": 5, "runrate": 4.0}]
        })))
        .mount(&mock_server)
        .await;
    Mock::given(method("GET"))
        .and(path("/mcenter/v1/2/hscard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"scorecard": []})))
        .mount(&mock_server)
        .await;

    let client = client_for(&mock_server);
    let mut db = CricketDatabase::new_in_memory().unwrap();
    let options = build_match_options(&live_feed()).unwrap();

    sync_matches(&client, &mut db, &options).await.unwrap();
    let report = sync_matches(&client, &mut db, &options).await.unwrap();

    assert!(report.failures.is_empty());
    assert_eq!(db.count_all().unwrap().matches, 2);
    assert_eq!(db.scorecard_for_match(MatchId::new(1)).unwrap().len(), 1);
}
