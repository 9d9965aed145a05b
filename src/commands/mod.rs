//! Command implementations for the cricket stats CLI

pub mod analytics;
pub mod common;
pub mod crud;
pub mod db;
pub mod live;
pub mod overview;
pub mod players;
