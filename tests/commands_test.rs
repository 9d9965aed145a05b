//! Integration tests for command handlers against a file database and a
//! mock Cricbuzz server

use cricket_stats::{
    cli::PlayerFields,
    commands::{
        analytics::{handle_analytics_run, QuerySource},
        crud::{create_player, handle_crud_update},
        live::{handle_live_show, handle_live_sync},
        players::{handle_players_import, handle_players_profile},
    },
    core::config::{ApiConfig, AppConfig, DEFAULT_API_HOST},
    CricketError, MatchId, PlayerId, TeamId,
};
use serde_json::json;
use tempfile::TempDir;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

fn config_for(dir: &TempDir, server: Option<&MockServer>) -> AppConfig {
    let api = server.map(|s| ApiConfig::new("test-key", DEFAULT_API_HOST).with_base_url(s.uri()));
    AppConfig::new(dir.path().join("cricbuzz.db"), api)
}

async fn mount_live_feed(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/matches/v1/live"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "typeMatches": [{
                "seriesMatches": [{
                    "seriesAdWrapper": {
                        "matches": [{"matchInfo": {
                            "matchId": 4242,
                            "seriesName": "IPL 2025",
                            "matchFormat": "T20",
                            "team1": {"teamName": "Chennai Super Kings"},
                            "team2": {"teamName": "Mumbai Indians"},
                            "venueInfo": {"ground": "Wankhede Stadium", "city": "Mumbai"}
                        }}]
                    }
                }]
            }]
        })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_players_import_writes_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/teams/v1/2/players"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            {"id": 1, "name": "Rohit Sharma"},
            {"id": 2, "name": "Shubman Gill", "intlTeam": "India A"}
        ])))
        .mount(&server)
        .await;

    let config = config_for(&dir, Some(&server));
    handle_players_import(&config, TeamId::default(), "India")
        .await
        .unwrap();

    let db = config.open_database().unwrap();
    let players = db.list_players(None).unwrap();
    assert_eq!(players.len(), 2);
    assert_eq!(players[0].name, "Rohit Sharma");
    assert_eq!(players[0].country.as_deref(), Some("India"));
    assert_eq!(players[1].country.as_deref(), Some("India A"));
}

#[tokio::test]
async fn test_players_profile_auto_saves_player() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/stats/v1/player/1413"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1413",
            "name": "Virat Kohli",
            "role": "Batsman",
            "bat": "Right Handed Bat",
            "intlTeam": "India"
        })))
        .mount(&server)
        .await;

    let config = config_for(&dir, Some(&server));
    handle_players_profile(&config, PlayerId::new(1413))
        .await
        .unwrap();

    let db = config.open_database().unwrap();
    let saved = db.get_player(PlayerId::new(1413)).unwrap().unwrap();
    assert_eq!(saved.role.as_deref(), Some("Batsman"));
}

#[tokio::test]
async fn test_live_show_saves_match_without_scorecard() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    mount_live_feed(&server).await;
    // Every scorecard endpoint is unmatched and answers 404

    let config = config_for(&dir, Some(&server));
    handle_live_show(&config, MatchId::new(4242), false)
        .await
        .unwrap();

    let db = config.open_database().unwrap();
    let stored = db.get_match(MatchId::new(4242)).unwrap().unwrap();
    assert_eq!(stored.venue_ground.as_deref(), Some("Wankhede Stadium"));
    assert_eq!(db.count_all().unwrap().scorecards, 0);

    // With --full a missing scorecard is an error
    let result = handle_live_show(&config, MatchId::new(4242), true).await;
    assert!(matches!(
        result,
        Err(CricketError::ScorecardUnavailable { .. })
    ));
}

#[tokio::test]
async fn test_live_show_unknown_match() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    mount_live_feed(&server).await;

    let config = config_for(&dir, Some(&server));
    let result = handle_live_show(&config, MatchId::new(1), false).await;
    assert!(matches!(result, Err(CricketError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_live_sync_then_analytics_csv() {
    let dir = tempfile::tempdir().unwrap();
    let server = MockServer::start().await;
    mount_live_feed(&server).await;
    Mock::given(method("GET"))
        .and(path("/mcenter/v1/4242/hscard"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "scorecard": [
                {"batteamname": "Mumbai Indians", "score": 201, "wickets": 4, "overs": 20, "runrate": 10.05},
                {"batteamname": "Chennai Super Kings", "score": 198, "wickets": 7, "overs": 20, "runrate": 9.9}
            ]
        })))
        .mount(&server)
        .await;

    let config = config_for(&dir, Some(&server));
    handle_live_sync(&config).await.unwrap();

    let csv_path = dir.path().join("exports").join("scorers.csv");
    handle_analytics_run(
        &config,
        QuerySource::Named("q3".to_string()),
        false,
        Some(&csv_path),
    )
    .unwrap();

    let text = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        text,
        "bat_team,total_runs,avg_runs\nMumbai Indians,201,201.0\nChennai Super Kings,198,198.0\n"
    );
}

#[test]
fn test_ad_hoc_sql_error_surfaces() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, None);
    let result = handle_analytics_run(
        &config,
        QuerySource::AdHoc("SELEC nonsense".to_string()),
        false,
        None,
    );
    assert!(matches!(result, Err(CricketError::Database(_))));
}

#[test]
fn test_crud_update_keeps_other_fields() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(&dir, None);
    {
        let mut db = config.open_database().unwrap();
        create_player(
            &mut db,
            None,
            "A",
            PlayerFields {
                country: Some("C".to_string()),
                role: Some("R".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
    }

    handle_crud_update(
        &config,
        PlayerId::new(1),
        Some("B".to_string()),
        PlayerFields::default(),
    )
    .unwrap();

    let db = config.open_database().unwrap();
    let player = db.get_player(PlayerId::new(1)).unwrap().unwrap();
    assert_eq!(player.name, "B");
    assert_eq!(player.country.as_deref(), Some("C"));
    assert_eq!(player.role.as_deref(), Some("R"));
}
