//! HTTP client for the Cricbuzz RapidAPI endpoints.

use std::time::Duration;

use reqwest::{header::HeaderMap, Client, StatusCode};
use serde_json::Value;

use crate::{
    core::{config::ApiConfig, http::rapidapi_header_map},
    error::CricketError,
    MatchId, PlayerId, Result, TeamId,
};


/// Wall-clock limit for every request
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(20);

/// Scorecard endpoints differ between providers; tried in this order.
pub const SCORECARD_PATH_TEMPLATES: &[&str] =
    &["/mcenter/v1/{match_id}/hscard", "/mcenter/v1/{match_id}/scard"];

const ERROR_BODY_LIMIT: usize = 400;

/// A scorecard together with the endpoint that served it
#[derive(Debug, Clone)]
pub struct FetchedScorecard {
    pub url: String,
    pub data: Value,
}

/// Client for the Cricbuzz API. Cheap to clone.
#[derive(Debug, Clone)]
pub struct CricbuzzClient {
    http: Client,
    base_url: String,
    headers: HeaderMap,
}

impl CricbuzzClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("cricket-stats/", env!("CARGO_PKG_VERSION")))
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            headers: rapidapi_header_map(config)?,
        })
    }

    /// GET `path` and parse the body as JSON.
    ///
    /// Any status other than 200 becomes [`CricketError::Api`] carrying the raw
    /// response text.
    pub async fn get_json(&self, path: &str, query: &[(&str, &str)]) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        log::debug!("GET {}", url);

        let resp = self
            .http
            .get(&url)
            .headers(self.headers.clone())
            .query(query)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if status != StatusCode::OK {
            log::debug!("GET {} returned {}", url, status);
            return Err(CricketError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// `/matches/v1/live`
    pub async fn live_matches(&self) -> Result<Value> {
        self.get_json("/matches/v1/live", &[]).await
    }

    /// Fetch a match scorecard, trying each of [`SCORECARD_PATH_TEMPLATES`]
    /// until one answers with 200.
    pub async fn scorecard(&self, match_id: MatchId) -> Result<FetchedScorecard> {
        let mut last_error = None;

        for path in scorecard_paths(match_id) {
            let url = format!("{}{}", self.base_url, path);
            match self.get_json(&path, &[]).await {
                Ok(data) => return Ok(FetchedScorecard { url, data }),
                Err(CricketError::Api { status, body }) => {
                    last_error = Some((url, status, truncate(&body, ERROR_BODY_LIMIT)));
                }
                Err(e) => {
                    log::debug!("scorecard request to {} failed: {}", url, e);
                    last_error = Some((url, 0, truncate(&e.to_string(), ERROR_BODY_LIMIT)));
                }
            }
        }

        let (url, status, body) = last_error.unwrap_or_default();
        Err(CricketError::ScorecardUnavailable { url, status, body })
    }

    /// `/stats/v1/player/search?plrN={query}`
    pub async fn search_players(&self, query: &str) -> Result<Value> {
        self.get_json("/stats/v1/player/search", &[("plrN", query)])
            .await
    }

    /// `/stats/v1/player/{id}`
    pub async fn player_info(&self, player_id: PlayerId) -> Result<Value> {
        self.get_json(&format!("/stats/v1/player/{}", player_id), &[])
            .await
    }

    /// `/stats/v1/player/{id}/batting`
    pub async fn player_batting(&self, player_id: PlayerId) -> Result<Value> {
        self.get_json(&format!("/stats/v1/player/{}/batting", player_id), &[])
            .await
    }

    /// `/stats/v1/player/{id}/bowling`
    pub async fn player_bowling(&self, player_id: PlayerId) -> Result<Value> {
        self.get_json(&format!("/stats/v1/player/{}/bowling", player_id), &[])
            .await
    }

    /// `/teams/v1/{teamId}/players`
    pub async fn team_players(&self, team_id: TeamId) -> Result<Value> {
        self.get_json(&format!("/teams/v1/{}/players", team_id), &[])
            .await
    }
}

/// Candidate scorecard paths for a match, in the order they are tried
pub fn scorecard_paths(match_id: MatchId) -> Vec<String> {
    SCORECARD_PATH_TEMPLATES
        .iter()
        .map(|t| t.replace("{match_id}", &match_id.to_string()))
        .collect()
}

fn truncate(text: &str, limit: usize) -> String {
    text.chars().take(limit).collect()
}
