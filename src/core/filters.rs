use crate::models::PlayerRecord;

/// Check whether a candidate is the subject itself
///
/// Pools usually come straight from the store, which includes the subject.
#[inline]
pub fn is_same_player(subject: &PlayerRecord, candidate: &PlayerRecord) -> bool {
    subject.player_id() == candidate.player_id()
}

/// Check whether a score clears the ranking threshold (inclusive)
#[inline]
pub fn meets_min_score(total: f64, min_score: f64) -> bool {
    total >= min_score
}

/// Tags both players carry, in sorted order
#[inline]
pub fn shared_tags(subject: &PlayerRecord, candidate: &PlayerRecord) -> Vec<String> {
    subject
        .tags()
        .intersection(candidate.tags())
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlayerPayload;

    fn create_test_player(id: &str, tags: &[&str]) -> PlayerRecord {
        PlayerRecord::try_from(PlayerPayload {
            player_id: id.to_string(),
            platform: "PC".to_string(),
            game_mode: "campaign".to_string(),
            level_range: "1-12".to_string(),
            voice_chat: "optional".to_string(),
            timezone: "UTC".to_string(),
            notes: None,
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_same_player() {
        let a = create_test_player("astarion", &[]);
        let b = create_test_player("karlach", &[]);

        assert!(is_same_player(&a, &a.clone()));
        assert!(!is_same_player(&a, &b));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        assert!(meets_min_score(4.0, 4.0));
        assert!(meets_min_score(4.5, 4.0));
        assert!(!meets_min_score(3.99, 4.0));
    }

    #[test]
    fn test_shared_tags_sorted() {
        let a = create_test_player("a", &["modded", "Roleplay", "honour"]);
        let b = create_test_player("b", &["roleplay", "honour", "casual"]);

        assert_eq!(shared_tags(&a, &b), vec!["honour", "roleplay"]);
        assert!(shared_tags(&a, &create_test_player("c", &[])).is_empty());
    }
}
