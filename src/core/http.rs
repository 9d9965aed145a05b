//! HTTP utilities for Cricbuzz API communication

use crate::{core::config::ApiConfig, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT};

pub const API_KEY_HEADER: &str = "x-rapidapi-key";
pub const API_HOST_HEADER: &str = "x-rapidapi-host";

/// Build the two static RapidAPI headers (plus `Accept: application/json`).
pub fn rapidapi_header_map(config: &ApiConfig) -> Result<HeaderMap> {
    let mut h = HeaderMap::new();
    h.insert(ACCEPT, HeaderValue::from_static("application/json"));
    h.insert(
        HeaderName::from_static(API_KEY_HEADER),
        HeaderValue::from_str(&config.api_key)?,
    );
    h.insert(
        HeaderName::from_static(API_HOST_HEADER),
        HeaderValue::from_str(&config.api_host)?,
    );
    Ok(h)
}
