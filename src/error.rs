//! Error types for the cricket stats CLI

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CricketError>;

#[derive(Error, Debug)]
pub enum CricketError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("CSV export failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid header value: {0}")]
    InvalidHeader(#[from] reqwest::header::InvalidHeaderValue),

    #[error("Failed to parse id: {0}")]
    InvalidId(#[from] std::num::ParseIntError),

    #[error("API returned status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Scorecard unavailable from every endpoint (last tried {url}, status {status}): {body}")]
    ScorecardUnavailable {
        url: String,
        status: u16,
        body: String,
    },

    #[error("API key not provided: set the {env_var} environment variable")]
    MissingApiKey { env_var: String },

    #[error("Could not determine a data directory for the database")]
    NoDataDir,

    #[error("Cannot save {entity}: payload has no usable id")]
    Unmappable { entity: String },

    #[error("No players found in API response")]
    NoPlayers,

    #[error("Unknown query: {name}")]
    UnknownQuery { name: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },
}

impl CricketError {
    /// Shorthand for [`CricketError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        CricketError::InvalidInput {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests;
