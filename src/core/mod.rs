//! Core utilities for the cricket stats CLI
//!
//! - `config`: database path and API credential resolution
//! - `http`: request headers for the Cricbuzz API

pub mod config;
pub mod http;

pub use config::{ApiConfig, AppConfig};
pub use http::rapidapi_header_map;
