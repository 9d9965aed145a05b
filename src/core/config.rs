//! Runtime configuration resolved from flags and environment variables.

use std::path::{Path, PathBuf};

use crate::{error::CricketError, storage::CricketDatabase, Result};

pub const API_KEY_ENV_VAR: &str = "CRICBUZZ_API_KEY";
pub const API_HOST_ENV_VAR: &str = "CRICBUZZ_API_HOST";
pub const DB_PATH_ENV_VAR: &str = "CRICKET_STATS_DB";

pub const DEFAULT_API_HOST: &str = "cricbuzz-cricket.p.rapidapi.com";

/// Credentials and location of the Cricbuzz RapidAPI endpoint
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub api_key: String,
    pub api_host: String,
    pub base_url: String,
}

impl ApiConfig {
    /// Build a config for `host`, served over https
    pub fn new(api_key: impl Into<String>, api_host: impl Into<String>) -> Self {
        let api_host = api_host.into();
        Self {
            api_key: api_key.into(),
            base_url: format!("https://{}", api_host),
            api_host,
        }
    }

    /// Point requests at a different base URL (mock servers, proxies)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Read `CRICBUZZ_API_KEY` and optionally `CRICBUZZ_API_HOST`.
    ///
    /// Returns `None` when no key is set so that database-only commands
    /// keep working without credentials.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var(API_KEY_ENV_VAR)
            .ok()
            .filter(|k| !k.trim().is_empty())?;
        let host = std::env::var(API_HOST_ENV_VAR)
            .ok()
            .filter(|h| !h.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_HOST.to_string());
        Some(Self::new(key.trim(), host.trim()))
    }
}

/// Everything a command needs to reach the database and the API.
///
/// Built once in `main` and passed down; nothing reads global state after that.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_path: PathBuf,
    pub api: Option<ApiConfig>,
}

impl AppConfig {
    pub fn new(database_path: PathBuf, api: Option<ApiConfig>) -> Self {
        Self { database_path, api }
    }

    /// Resolve the database path and API credentials from the environment
    pub fn from_env(explicit_db: Option<PathBuf>) -> Result<Self> {
        Ok(Self::new(
            resolve_database_path(explicit_db)?,
            ApiConfig::from_env(),
        ))
    }

    /// API credentials, or an error naming the variable to set
    pub fn require_api(&self) -> Result<&ApiConfig> {
        self.api.as_ref().ok_or_else(|| CricketError::MissingApiKey {
            env_var: API_KEY_ENV_VAR.to_string(),
        })
    }

    /// Open the configured database, creating it if needed
    pub fn open_database(&self) -> Result<CricketDatabase> {
        CricketDatabase::open(&self.database_path)
    }
}

/// `--db` flag, else `CRICKET_STATS_DB`, else the per-user data directory
pub fn resolve_database_path(explicit: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(path) = explicit {
        return Ok(path);
    }
    if let Ok(path) = std::env::var(DB_PATH_ENV_VAR) {
        if !path.trim().is_empty() {
            return Ok(PathBuf::from(path.trim()));
        }
    }
    default_database_path()
}

/// `{data_dir}/cricket-stats/cricbuzz.db`
pub fn default_database_path() -> Result<PathBuf> {
    let data_dir = dirs::data_dir().ok_or(CricketError::NoDataDir)?;
    Ok(database_path_in(&data_dir))
}

fn database_path_in(dir: &Path) -> PathBuf {
    dir.join("cricket-stats").join("cricbuzz.db")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_config_new_builds_https_base_url() {
        let config = ApiConfig::new("key", "example.p.rapidapi.com");
        assert_eq!(config.base_url, "https://example.p.rapidapi.com");
        assert_eq!(config.api_host, "example.p.rapidapi.com");
    }

    #[test]
    fn test_api_config_with_base_url_trims_slash() {
        let config = ApiConfig::new("key", DEFAULT_API_HOST).with_base_url("http://127.0.0.1:9000/");
        assert_eq!(config.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.api_host, DEFAULT_API_HOST);
    }

    #[test]
    fn test_resolve_database_path_prefers_explicit() {
        let path = resolve_database_path(Some(PathBuf::from("/tmp/x.db"))).unwrap();
        assert_eq!(path, PathBuf::from("/tmp/x.db"));
    }

    #[test]
    fn test_database_path_in() {
        let path = database_path_in(Path::new("/data"));
        assert_eq!(path, PathBuf::from("/data/cricket-stats/cricbuzz.db"));
    }

    #[test]
    fn test_require_api_missing() {
        let config = AppConfig::new(PathBuf::from("x.db"), None);
        match config.require_api() {
            Err(CricketError::MissingApiKey { env_var }) => assert_eq!(env_var, API_KEY_ENV_VAR),
            other => panic!("Expected MissingApiKey error, got {:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn test_open_database_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("cricbuzz.db");
        let config = AppConfig::new(path.clone(), None);

        let db = config.open_database().unwrap();
        assert_eq!(db.count_all().unwrap().players, 0);
        assert!(path.exists());
    }
}
