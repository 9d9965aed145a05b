//! Storage layer for the cricket stats CLI
//!
//! A thin abstraction over the local SQLite file, organized into:
//! - `models`: Row types and tabular query results
//! - `schema`: Connection handle and schema management
//! - `queries`: Typed reads, writes and generic query helpers
//! - `catalog`: The named analytical queries

pub mod catalog;
pub mod models;
pub mod queries;
pub mod schema;


// Re-export the main types and database struct for easy access
pub use catalog::{
    find_query, run_ad_hoc, run_catalog_query, CatalogQuery, TimedResult, QUERY_CATALOG,
};
pub use models::*;
pub use schema::CricketDatabase;
