//! Type-safe wrappers for cricket identifiers.

pub mod ids;

pub use ids::{MatchId, PlayerId, TeamId};
