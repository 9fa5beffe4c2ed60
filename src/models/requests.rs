use serde::{Deserialize, Serialize};
use validator::Validate;

/// Player preferences as they arrive over the wire or from storage
///
/// Nothing here is trusted yet; convert into a
/// [`PlayerRecord`](crate::models::PlayerRecord) before scoring.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlayerPayload {
    #[validate(length(min = 1))]
    #[serde(alias = "playerId")]
    pub player_id: String,
    #[validate(length(min = 1))]
    pub platform: String,
    #[validate(length(min = 1))]
    #[serde(alias = "gameMode")]
    pub game_mode: String,
    #[validate(length(min = 1))]
    #[serde(alias = "levelRange")]
    pub level_range: String,
    #[validate(length(min = 1))]
    #[serde(alias = "voiceChat")]
    pub voice_chat: String,
    #[validate(length(min = 1))]
    pub timezone: String,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
}

/// Query parameters for the matches endpoint
///
/// Left as raw numbers so that negative values reach
/// [`RankOptions::new`](crate::models::RankOptions::new) and get rejected there.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindMatchesQuery {
    #[serde(alias = "minScore")]
    pub min_score: Option<f64>,
    pub limit: Option<i64>,
}
