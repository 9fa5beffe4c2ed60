//! Party Matcher - teammate matching for co-op game players
//!
//! The core of this library is [`core::Matcher`], a pure scorer and ranker
//! over validated [`models::PlayerRecord`]s. The HTTP routes, the stores and
//! the CLI are thin drivers around it.

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{summarize_matches, Matcher};
pub use error::MatchError;
pub use models::{MatchResult, PlayerPayload, PlayerRecord, RankOptions, ScoreResult, ScoringWeights};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_library_exports() {
        let matcher = Matcher::default();
        assert_eq!(matcher.weights(), &ScoringWeights::default());
        assert_eq!(RankOptions::default().limit, Some(10));
    }
}
