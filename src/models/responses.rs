use serde::{Deserialize, Serialize};
use crate::models::domain::{MatchResult, PlayerRecord, ScoreBreakdown, SkippedCandidate};

/// One entry of the matches response
#[derive(Debug, Clone, Serialize)]
pub struct MatchResponse {
    pub player: PlayerRecord,
    pub score: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedTags")]
    pub shared_tags: Vec<String>,
}

impl From<MatchResult> for MatchResponse {
    fn from(result: MatchResult) -> Self {
        Self {
            player: result.candidate,
            score: result.total,
            breakdown: result.breakdown,
            shared_tags: result.shared_tags,
        }
    }
}

/// Response for the find matches endpoint
#[derive(Debug, Clone, Serialize)]
pub struct FindMatchesResponse {
    pub matches: Vec<MatchResponse>,
    pub skipped: Vec<SkippedCandidate>,
    #[serde(rename = "totalCandidates")]
    pub total_candidates: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
