use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::error::MatchError;
use crate::models::requests::PlayerPayload;

/// Character level band a player wants to play in (inclusive on both ends)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LevelRange {
    min: u32,
    max: u32,
}

impl LevelRange {
    pub fn new(min: u32, max: u32) -> Result<Self, String> {
        if min > max {
            return Err(format!("level range minimum {} exceeds maximum {}", min, max));
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> u32 {
        self.min
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of levels covered by the band
    ///
    /// Widened to `u64` since `0-4294967295` covers one more level than
    /// `u32` can count.
    pub fn width(&self) -> u64 {
        u64::from(self.max) - u64::from(self.min) + 1
    }

    /// Levels both bands cover, if any
    pub fn intersection(&self, other: &LevelRange) -> Option<LevelRange> {
        let min = self.min.max(other.min);
        let max = self.max.min(other.max);
        (min <= max).then_some(LevelRange { min, max })
    }

    /// Smallest band containing both
    pub fn hull(&self, other: &LevelRange) -> LevelRange {
        LevelRange {
            min: self.min.min(other.min),
            max: self.max.max(other.max),
        }
    }
}

impl FromStr for LevelRange {
    type Err = String;

    /// Accepts `"3-8"`, `"3 - 8"` or a single level `"5"`
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let parse = |part: &str| {
            part.trim()
                .parse::<u32>()
                .map_err(|_| format!("invalid level range '{}'", s))
        };

        match s.split_once('-') {
            Some((min, max)) => Self::new(parse(min)?, parse(max)?),
            None => {
                let level = parse(s)?;
                Self::new(level, level)
            }
        }
    }
}

impl fmt::Display for LevelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.min, self.max)
    }
}

/// Voice chat stance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VoiceChat {
    Required,
    Optional,
    None,
}

impl VoiceChat {
    pub fn as_str(&self) -> &'static str {
        match self {
            VoiceChat::Required => "required",
            VoiceChat::Optional => "optional",
            VoiceChat::None => "none",
        }
    }
}

impl FromStr for VoiceChat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "required" => Ok(VoiceChat::Required),
            "optional" => Ok(VoiceChat::Optional),
            "none" => Ok(VoiceChat::None),
            other => Err(format!(
                "unknown voice chat stance '{}' (expected required, optional or none)",
                other
            )),
        }
    }
}

impl fmt::Display for VoiceChat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated matchmaking preferences of a single player
///
/// Built from a [`PlayerPayload`] through `TryFrom`, which is the only place
/// where field validation happens. Scoring code can rely on every invariant
/// holding: non-empty identifier, `min <= max` levels, a known voice stance and
/// normalized, de-duplicated tags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "PlayerPayload", into = "PlayerPayload")]
pub struct PlayerRecord {
    pub(crate) player_id: String,
    pub(crate) platform: String,
    pub(crate) game_mode: String,
    pub(crate) level_range: LevelRange,
    pub(crate) voice_chat: VoiceChat,
    pub(crate) timezone: String,
    pub(crate) tags: BTreeSet<String>,
    pub(crate) notes: Option<String>,
}

impl PlayerRecord {
    pub fn player_id(&self) -> &str {
        &self.player_id
    }

    pub fn platform(&self) -> &str {
        &self.platform
    }

    pub fn game_mode(&self) -> &str {
        &self.game_mode
    }

    pub fn level_range(&self) -> LevelRange {
        self.level_range
    }

    pub fn voice_chat(&self) -> VoiceChat {
        self.voice_chat
    }

    pub fn timezone(&self) -> &str {
        &self.timezone
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn notes(&self) -> Option<&str> {
        self.notes.as_deref()
    }
}

/// Normalize a tag for set membership: trimmed and lower-cased
pub fn normalize_tag(tag: &str) -> Option<String> {
    let tag = tag.trim();
    if tag.is_empty() {
        None
    } else {
        Some(tag.to_lowercase())
    }
}

impl TryFrom<PlayerPayload> for PlayerRecord {
    type Error = MatchError;

    fn try_from(payload: PlayerPayload) -> Result<Self, Self::Error> {
        let player_id = payload.player_id.trim().to_string();
        let invalid = |reason: String| MatchError::InvalidRecord {
            player_id: player_id.clone(),
            reason,
        };

        if player_id.is_empty() {
            return Err(invalid("player_id must not be empty".to_string()));
        }

        let required = |name: &str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(invalid(format!("{} must not be empty", name)))
            } else {
                Ok(value.to_string())
            }
        };

        let platform = required("platform", &payload.platform)?;
        let game_mode = required("game_mode", &payload.game_mode)?;
        let timezone = required("timezone", &payload.timezone)?;
        let level_range = payload.level_range.parse::<LevelRange>().map_err(invalid)?;
        let voice_chat = payload.voice_chat.parse::<VoiceChat>().map_err(invalid)?;

        let tags = payload
            .tags
            .iter()
            .filter_map(|tag| normalize_tag(tag))
            .collect();

        let notes = payload
            .notes
            .map(|notes| notes.trim().to_string())
            .filter(|notes| !notes.is_empty());

        Ok(Self {
            player_id,
            platform,
            game_mode,
            level_range,
            voice_chat,
            timezone,
            tags,
            notes,
        })
    }
}

impl From<PlayerRecord> for PlayerPayload {
    fn from(record: PlayerRecord) -> Self {
        PlayerPayload {
            player_id: record.player_id,
            platform: record.platform,
            game_mode: record.game_mode,
            level_range: record.level_range.to_string(),
            voice_chat: record.voice_chat.to_string(),
            timezone: record.timezone,
            notes: record.notes,
            tags: record.tags.into_iter().collect(),
        }
    }
}

/// Scoring factors, in the order they are reported
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    Platform,
    GameMode,
    LevelRange,
    VoiceChat,
    Timezone,
    Tags,
}

impl Factor {
    pub const ALL: [Factor; 6] = [
        Factor::Platform,
        Factor::GameMode,
        Factor::LevelRange,
        Factor::VoiceChat,
        Factor::Timezone,
        Factor::Tags,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Factor::Platform => "Platform",
            Factor::GameMode => "Game mode",
            Factor::LevelRange => "Level range",
            Factor::VoiceChat => "Voice chat",
            Factor::Timezone => "Timezone",
            Factor::Tags => "Shared tags",
        }
    }
}

/// Per-factor contributions explaining a score
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub platform: f64,
    pub game_mode: f64,
    pub level_range: f64,
    pub voice_chat: f64,
    pub timezone: f64,
    pub tags: f64,
}

impl ScoreBreakdown {
    pub fn get(&self, factor: Factor) -> f64 {
        match factor {
            Factor::Platform => self.platform,
            Factor::GameMode => self.game_mode,
            Factor::LevelRange => self.level_range,
            Factor::VoiceChat => self.voice_chat,
            Factor::Timezone => self.timezone,
            Factor::Tags => self.tags,
        }
    }

    pub fn total(&self) -> f64 {
        Factor::ALL.iter().map(|factor| self.get(*factor)).sum()
    }

    /// Factors that moved the score, in reporting order
    pub fn nonzero(&self) -> impl Iterator<Item = (Factor, f64)> + '_ {
        Factor::ALL
            .into_iter()
            .map(move |factor| (factor, self.get(factor)))
            .filter(|(_, value)| *value != 0.0)
    }
}

/// Outcome of scoring one subject/candidate pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreResult {
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedTags")]
    pub shared_tags: Vec<String>,
}

/// A ranked candidate
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchResult {
    pub candidate: PlayerRecord,
    pub total: f64,
    pub breakdown: ScoreBreakdown,
    #[serde(rename = "sharedTags")]
    pub shared_tags: Vec<String>,
}

impl MatchResult {
    pub fn candidate_id(&self) -> &str {
        self.candidate.player_id()
    }
}

/// A candidate left out of ranking because its record failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedCandidate {
    #[serde(rename = "playerId")]
    pub player_id: String,
    pub reason: String,
}

/// Result of ranking a pool of unvalidated payloads
#[derive(Debug, Clone)]
pub struct RankOutcome {
    pub matches: Vec<MatchResult>,
    pub skipped: Vec<SkippedCandidate>,
    pub total_candidates: usize,
}

/// Scoring weights
///
/// Defaults mirror the constants in [`crate::core::scoring`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringWeights {
    pub platform: f64,
    pub game_mode: f64,
    pub level_range: f64,
    pub voice_chat: f64,
    pub voice_chat_penalty: f64,
    pub timezone: f64,
    pub tag: f64,
    pub tag_cap: f64,
}

impl Default for ScoringWeights {
    fn default() -> Self {
        use crate::core::scoring::*;

        Self {
            platform: PLATFORM_WEIGHT,
            game_mode: GAME_MODE_WEIGHT,
            level_range: LEVEL_RANGE_WEIGHT,
            voice_chat: VOICE_CHAT_WEIGHT,
            voice_chat_penalty: VOICE_CHAT_PENALTY,
            timezone: TIMEZONE_WEIGHT,
            tag: TAG_WEIGHT,
            tag_cap: TAG_CAP,
        }
    }
}

/// Threshold and limit for one ranking call
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RankOptions {
    pub min_score: f64,
    /// `None` returns every qualifying candidate
    pub limit: Option<usize>,
}

/// Minimum score a candidate needs to be listed
pub const DEFAULT_MIN_SCORE: f64 = 4.0;

/// Maximum number of matches returned
pub const DEFAULT_LIMIT: usize = 10;

impl RankOptions {
    /// Validate raw caller input. A `limit` of 0 means "no limit".
    pub fn new(min_score: f64, limit: i64) -> Result<Self, MatchError> {
        if !min_score.is_finite() {
            return Err(MatchError::InvalidArgument(format!(
                "min_score must be a finite number, got {}",
                min_score
            )));
        }
        if min_score < 0.0 {
            return Err(MatchError::InvalidArgument(format!(
                "min_score must not be negative, got {}",
                min_score
            )));
        }
        if limit < 0 {
            return Err(MatchError::InvalidArgument(format!(
                "limit must not be negative, got {}",
                limit
            )));
        }

        let limit = usize::try_from(limit)
            .map_err(|_| MatchError::InvalidArgument(format!("limit {} is too large", limit)))?;

        Ok(Self {
            min_score,
            limit: (limit > 0).then_some(limit),
        })
    }

    pub fn unlimited(min_score: f64) -> Self {
        Self {
            min_score,
            limit: None,
        }
    }
}

impl Default for RankOptions {
    fn default() -> Self {
        Self {
            min_score: DEFAULT_MIN_SCORE,
            limit: Some(DEFAULT_LIMIT),
        }
    }
}
