// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{
    Factor, LevelRange, MatchResult, PlayerRecord, RankOptions, RankOutcome, ScoreBreakdown,
    ScoreResult, ScoringWeights, SkippedCandidate, VoiceChat, DEFAULT_LIMIT, DEFAULT_MIN_SCORE,
};
pub use requests::{FindMatchesQuery, PlayerPayload};
pub use responses::{ErrorResponse, FindMatchesResponse, HealthResponse, MatchResponse};
