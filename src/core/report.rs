use crate::models::{MatchResult, PlayerRecord};

/// Render tags for display, `none` when empty
pub fn format_tags(player: &PlayerRecord) -> String {
    if player.tags().is_empty() {
        "none".to_string()
    } else {
        player.tags().iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Format a score to at most two decimals, without trailing zeros (`7.25`, `8`)
pub fn format_score(score: f64) -> String {
    format!("{}", round_hundredths(score))
}

/// Signed factor contribution (`+2`, `-1`, `+0.75`)
pub fn format_contribution(value: f64) -> String {
    format!("{:+}", round_hundredths(value))
}

#[inline]
fn round_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Human readable summary of ranked matches, one block per candidate
///
/// With `verbose` set each block also lists the factors that contributed to
/// the score.
pub fn summarize_matches(matches: &[MatchResult], verbose: bool) -> String {
    matches
        .iter()
        .map(|m| {
            let player = &m.candidate;
            let mut block = format!(
                "{} (score {})\n  Platform: {}\n  Mode: {}\n  Level range: {}\n  Voice chat: {}\n  Timezone: {}\n  Tags: {}\n  Notes: {}",
                player.player_id(),
                format_score(m.total),
                player.platform(),
                player.game_mode(),
                player.level_range(),
                player.voice_chat(),
                player.timezone(),
                format_tags(player),
                player.notes().unwrap_or("none"),
            );

            if verbose {
                block.push_str("\n  Breakdown:");
                for (factor, value) in m.breakdown.nonzero() {
                    block.push_str(&format!("\n    {}: {}", factor.label(), format_contribution(value)));
                }
            }

            block
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Matcher;
    use crate::models::{PlayerPayload, RankOptions};

    fn create_player(id: &str, level_range: &str, tags: &[&str], notes: Option<&str>) -> PlayerRecord {
        PlayerRecord::try_from(PlayerPayload {
            player_id: id.to_string(),
            platform: "PC".to_string(),
            game_mode: "story".to_string(),
            level_range: level_range.to_string(),
            voice_chat: "optional".to_string(),
            timezone: "UTC-5".to_string(),
            notes: notes.map(|n| n.to_string()),
            tags: tags.iter().map(|t| t.to_string()).collect(),
        })
        .unwrap()
    }

    #[test]
    fn test_format_score() {
        assert_eq!(format_score(7.25), "7.25");
        assert_eq!(format_score(8.0), "8");
        assert_eq!(format_score(0.5), "0.5");
        assert_eq!(format_score(2.0 / 3.0), "0.67");
    }

    #[test]
    fn test_format_contribution() {
        assert_eq!(format_contribution(2.0), "+2");
        assert_eq!(format_contribution(0.75), "+0.75");
        assert_eq!(format_contribution(-1.0), "-1");
    }

    #[test]
    fn test_summary_lists_player_fields() {
        let subject = create_player("me", "1-5", &["roleplay", "friendly"], None);
        let pool = vec![create_player("shadowheart", "3-8", &["roleplay"], Some("Evenings only"))];

        let matches = Matcher::default().rank(&subject, &pool, &RankOptions::default());
        let summary = summarize_matches(&matches, false);

        assert!(summary.starts_with("shadowheart (score 7.25)"));
        assert!(summary.contains("Level range: 3-8"));
        assert!(summary.contains("Tags: roleplay"));
        assert!(summary.contains("Notes: Evenings only"));
        assert!(!summary.contains("Breakdown"));
    }

    #[test]
    fn test_verbose_summary_lists_factors() {
        let subject = create_player("me", "1-5", &[], None);
        let pool = vec![create_player("gale", "10-12", &[], None)];

        let matches = Matcher::default().rank(&subject, &pool, &RankOptions::unlimited(0.0));
        let summary = summarize_matches(&matches, true);

        assert!(summary.contains("Notes: none"));
        assert!(summary.contains("Tags: none"));
        assert!(summary.contains("Platform: +2"));
        assert!(!summary.contains("Level range: +"));
    }
}
