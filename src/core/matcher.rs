use std::cmp::Ordering;

use crate::core::{
    filters::{is_same_player, meets_min_score},
    scoring::calculate_match_score,
};
use crate::error::MatchError;
use crate::models::{
    MatchResult, PlayerPayload, PlayerRecord, RankOptions, RankOutcome, ScoreResult,
    ScoringWeights, SkippedCandidate,
};

/// Main matching orchestrator
///
/// Holds nothing but its weights, so it can be cloned into every worker and
/// called concurrently without coordination.
///
/// # Pipeline Stages
/// 1. Self exclusion by player id
/// 2. Scoring
/// 3. Minimum score threshold
/// 4. Ranking (score descending, player id ascending) and truncation
#[derive(Debug, Clone)]
pub struct Matcher {
    weights: ScoringWeights,
}

impl Matcher {
    pub fn new(weights: ScoringWeights) -> Self {
        Self { weights }
    }

    pub fn with_default_weights() -> Self {
        Self {
            weights: ScoringWeights::default(),
        }
    }

    pub fn weights(&self) -> &ScoringWeights {
        &self.weights
    }

    /// Score a single subject/candidate pair
    pub fn score(&self, subject: &PlayerRecord, candidate: &PlayerRecord) -> ScoreResult {
        calculate_match_score(subject, candidate, &self.weights)
    }

    /// Rank a candidate pool for a subject
    ///
    /// # Arguments
    /// * `subject` - The player looking for teammates
    /// * `candidates` - The pool; an entry sharing the subject's id is ignored
    /// * `options` - Minimum score and result limit
    ///
    /// # Returns
    /// Matches ordered by score, highest first. Equal scores are ordered by
    /// player id so the output never depends on pool order.
    pub fn rank(
        &self,
        subject: &PlayerRecord,
        candidates: &[PlayerRecord],
        options: &RankOptions,
    ) -> Vec<MatchResult> {
        let mut matches: Vec<MatchResult> = candidates
            .iter()
            // Stage 1: self exclusion
            .filter(|candidate| !is_same_player(subject, candidate))
            // Stage 2 & 3: score and threshold
            .filter_map(|candidate| {
                let result = self.score(subject, candidate);

                if meets_min_score(result.total, options.min_score) {
                    Some(MatchResult {
                        candidate: candidate.clone(),
                        total: result.total,
                        breakdown: result.breakdown,
                        shared_tags: result.shared_tags,
                    })
                } else {
                    None
                }
            })
            .collect();

        // Stage 4: sort by score (descending) and then by id (ascending)
        matches.sort_by(compare_matches);

        if let Some(limit) = options.limit {
            matches.truncate(limit);
        }

        matches
    }

    /// Rank a pool of unvalidated payloads
    ///
    /// An invalid subject fails the whole call. Invalid candidates are left
    /// out and reported in [`RankOutcome::skipped`] so one bad record cannot
    /// hide every other match.
    pub fn rank_payloads(
        &self,
        subject: &PlayerPayload,
        candidates: Vec<PlayerPayload>,
        options: &RankOptions,
    ) -> Result<RankOutcome, MatchError> {
        let subject = PlayerRecord::try_from(subject.clone())?;

        let mut valid = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();

        for payload in candidates {
            if payload.player_id.trim() == subject.player_id() {
                continue;
            }

            let player_id = payload.player_id.clone();
            match PlayerRecord::try_from(payload) {
                Ok(record) => valid.push(record),
                Err(err) => skipped.push(SkippedCandidate {
                    player_id,
                    reason: skip_reason(err),
                }),
            }
        }

        let total_candidates = valid.len() + skipped.len();
        let matches = self.rank(&subject, &valid, options);

        Ok(RankOutcome {
            matches,
            skipped,
            total_candidates,
        })
    }
}

impl Default for Matcher {
    fn default() -> Self {
        Self::with_default_weights()
    }
}

fn compare_matches(a: &MatchResult, b: &MatchResult) -> Ordering {
    b.total
        .total_cmp(&a.total)
        .then_with(|| a.candidate_id().cmp(b.candidate_id()))
}

fn skip_reason(err: MatchError) -> String {
    match err {
        MatchError::InvalidRecord { reason, .. } => reason,
        other => other.to_string(),
    }
}
