use crate::core::{filters::shared_tags, timezone::timezone_closeness};
use crate::models::{LevelRange, PlayerRecord, ScoreBreakdown, ScoreResult, ScoringWeights, VoiceChat};

/// Credit for playing on the same platform
pub const PLATFORM_WEIGHT: f64 = 2.0;
/// Credit for wanting the same game mode
pub const GAME_MODE_WEIGHT: f64 = 2.0;
/// Credit for fully coinciding level ranges
pub const LEVEL_RANGE_WEIGHT: f64 = 2.0;
/// Credit for compatible voice chat stances
pub const VOICE_CHAT_WEIGHT: f64 = 1.0;
/// Contribution when one player requires voice chat and the other refuses it
pub const VOICE_CHAT_PENALTY: f64 = -1.0;
/// Credit for an identical timezone
pub const TIMEZONE_WEIGHT: f64 = 1.0;
/// Credit per shared tag
pub const TAG_WEIGHT: f64 = 0.5;
/// Ceiling on the shared tag contribution
pub const TAG_CAP: f64 = 2.0;

/// Calculate the compatibility score of `candidate` for `subject`
///
/// Scoring formula:
/// total = platform      # weight if equal
///       + game_mode     # weight if equal, ignoring case
///       + level_range   # weight * overlap / hull of both ranges
///       + voice_chat    # weight, neutral 0, or penalty
///       + timezone      # weight * (1 - offset distance / 12h)
///       + tags          # per-tag weight * shared count, capped
pub fn calculate_match_score(
    subject: &PlayerRecord,
    candidate: &PlayerRecord,
    weights: &ScoringWeights,
) -> ScoreResult {
    let shared = shared_tags(subject, candidate);

    let breakdown = ScoreBreakdown {
        platform: if subject.platform() == candidate.platform() {
            weights.platform
        } else {
            0.0
        },
        game_mode: if subject.game_mode().to_lowercase() == candidate.game_mode().to_lowercase() {
            weights.game_mode
        } else {
            0.0
        },
        level_range: level_overlap_ratio(subject.level_range(), candidate.level_range())
            * weights.level_range,
        voice_chat: voice_chat_score(subject.voice_chat(), candidate.voice_chat(), weights),
        timezone: timezone_closeness(subject.timezone(), candidate.timezone()) * weights.timezone,
        tags: (shared.len() as f64 * weights.tag).min(weights.tag_cap),
    };

    ScoreResult {
        total: breakdown.total(),
        breakdown,
        shared_tags: shared,
    }
}

/// Fraction (0-1) of the combined level span that both ranges cover
///
/// Ranges are inclusive, so `[1,5]` and `[3,8]` share 3 of 8 levels.
#[inline]
pub fn level_overlap_ratio(a: LevelRange, b: LevelRange) -> f64 {
    match a.intersection(&b) {
        Some(overlap) => overlap.width() as f64 / a.hull(&b).width() as f64,
        None => 0.0,
    }
}

/// Voice chat compatibility
///
/// | subject \ candidate | required | optional | none    |
/// |---------------------|----------|----------|---------|
/// | required            | full     | full     | penalty |
/// | optional            | full     | full     | full    |
/// | none                | penalty  | full     | 0       |
#[inline]
pub fn voice_chat_score(subject: VoiceChat, candidate: VoiceChat, weights: &ScoringWeights) -> f64 {
    match (subject, candidate) {
        (VoiceChat::Required, VoiceChat::None) | (VoiceChat::None, VoiceChat::Required) => {
            weights.voice_chat_penalty
        }
        (VoiceChat::None, VoiceChat::None) => 0.0,
        _ => weights.voice_chat,
    }
}
