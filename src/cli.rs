use clap::{Parser, Subcommand};
use std::path::PathBuf;
use thiserror::Error;

use crate::core::{report::format_tags, summarize_matches, Matcher};
use crate::error::MatchError;
use crate::models::{PlayerPayload, PlayerRecord, RankOptions, DEFAULT_LIMIT, DEFAULT_MIN_SCORE};
use crate::services::{JsonPlayerStore, StoreError};

#[derive(Debug, Parser)]
#[command(name = "party-matcher-cli")]
#[command(about = "Find co-op teammates from a local preference store", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the preferences store
    #[arg(long, default_value_os_t = default_store_path())]
    pub store: PathBuf,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add or update a player's preferences
    Add {
        /// Unique identifier or handle for the player
        player_id: String,
        /// Preferred platform, e.g. PC or PS5
        platform: String,
        /// Desired game mode, e.g. campaign or honour
        game_mode: String,
        /// Character level range, e.g. 1-5
        level_range: String,
        /// Voice chat preference: required, optional or none
        voice_chat: String,
        /// Timezone, e.g. UTC-5
        timezone: String,
        /// Descriptive tag such as 'roleplay' or 'modded' (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Free-form notes for potential teammates
        #[arg(long)]
        notes: Option<String>,
    },

    /// Remove a player from the store
    Remove {
        /// Identifier of the player to remove
        player_id: String,
    },

    /// List all stored players
    List {
        /// Show detailed preferences
        #[arg(short, long)]
        verbose: bool,
    },

    /// Find matches for a player
    Match {
        /// Identifier of the player seeking matches
        player_id: String,
        /// Minimum compatibility score to consider a match
        #[arg(long, default_value_t = DEFAULT_MIN_SCORE, allow_negative_numbers = true)]
        min_score: f64,
        /// Maximum number of matches to return (0 for no limit)
        #[arg(long, default_value_t = DEFAULT_LIMIT as i64, allow_negative_numbers = true)]
        limit: i64,
        /// Show how each score was built
        #[arg(short, long)]
        verbose: bool,
    },
}

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Match(#[from] MatchError),
}

/// `$HOME/.party-matcher/players.json`, or a relative path without a home
pub fn default_store_path() -> PathBuf {
    std::env::var_os("HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".party-matcher")
        .join("players.json")
}

/// Execute a parsed command and return the text to print
pub fn run(cli: Cli) -> Result<String, CliError> {
    let store = JsonPlayerStore::new(&cli.store);

    match cli.command {
        Commands::Add {
            player_id,
            platform,
            game_mode,
            level_range,
            voice_chat,
            timezone,
            tags,
            notes,
        } => {
            let player = PlayerRecord::try_from(PlayerPayload {
                player_id,
                platform,
                game_mode,
                level_range,
                voice_chat,
                timezone,
                notes,
                tags,
            })?;
            store.add_or_update(&player)?;
            tracing::debug!("Stored {} in {}", player.player_id(), store.path().display());
            Ok(format!("Stored preferences for {}.", player.player_id()))
        }

        Commands::Remove { player_id } => {
            if store.remove(&player_id)? {
                Ok(format!("Removed preferences for {}.", player_id))
            } else {
                Ok(format!("No preferences found for {}.", player_id))
            }
        }

        Commands::List { verbose } => {
            let players = valid_players(store.load_all()?);
            if players.is_empty() {
                return Ok("No players found in the store.".to_string());
            }
            Ok(format_players(&players, verbose))
        }

        Commands::Match {
            player_id,
            min_score,
            limit,
            verbose,
        } => {
            let options = RankOptions::new(min_score, limit)?;

            let subject = match store.find(&player_id)? {
                Some(subject) => subject,
                None => {
                    return Ok("Player not found. Add them first with the 'add' command \
                               or ensure the ID is correct."
                        .to_string())
                }
            };

            let outcome = Matcher::default().rank_payloads(&subject, store.load_all()?, &options)?;
            for skipped in &outcome.skipped {
                tracing::warn!("Skipped {}: {}", skipped.player_id, skipped.reason);
            }

            if outcome.matches.is_empty() {
                return Ok("No compatible players were found.".to_string());
            }
            Ok(summarize_matches(&outcome.matches, verbose))
        }
    }
}

fn valid_players(payloads: Vec<PlayerPayload>) -> Vec<PlayerRecord> {
    payloads
        .into_iter()
        .filter_map(|payload| match PlayerRecord::try_from(payload) {
            Ok(player) => Some(player),
            Err(e) => {
                tracing::warn!("Ignoring stored player: {}", e);
                None
            }
        })
        .collect()
}

fn format_players(players: &[PlayerRecord], verbose: bool) -> String {
    players
        .iter()
        .map(|player| {
            let base = format!(
                "{}: {}, {}, {}",
                player.player_id(),
                player.platform(),
                player.game_mode(),
                player.level_range()
            );
            if !verbose {
                return base;
            }
            format!(
                "{}\n  Voice chat: {}\n  Timezone: {}\n  Tags: {}\n  Notes: {}",
                base,
                player.voice_chat(),
                player.timezone(),
                format_tags(player),
                player.notes().unwrap_or("none")
            )
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_args(store: &std::path::Path, args: &[&str]) -> Result<String, CliError> {
        let store = store.to_string_lossy().to_string();
        let argv = ["party-matcher-cli", "--store", store.as_str()]
            .into_iter()
            .chain(args.iter().copied());
        run(Cli::try_parse_from(argv).unwrap())
    }

    #[test]
    fn test_add_list_remove() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("players.json");

        let out = run_args(&store, &["add", "tav", "PC", "story", "1-5", "optional", "UTC-5", "--tag", "roleplay"]).unwrap();
        assert_eq!(out, "Stored preferences for tav.");

        let out = run_args(&store, &["list"]).unwrap();
        assert_eq!(out, "tav: PC, story, 1-5");

        let out = run_args(&store, &["list", "--verbose"]).unwrap();
        assert!(out.contains("Tags: roleplay"));
        assert!(out.contains("Notes: none"));

        assert_eq!(run_args(&store, &["remove", "tav"]).unwrap(), "Removed preferences for tav.");
        assert_eq!(run_args(&store, &["remove", "tav"]).unwrap(), "No preferences found for tav.");
        assert_eq!(run_args(&store, &["list"]).unwrap(), "No players found in the store.");
    }

    #[test]
    fn test_add_rejects_invalid_record() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("players.json");

        let err = run_args(&store, &["add", "tav", "PC", "story", "9-1", "optional", "UTC"]).unwrap_err();
        assert!(matches!(err, CliError::Match(MatchError::InvalidRecord { .. })));
        assert!(!store.exists());
    }

    #[test]
    fn test_match_command() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("players.json");

        run_args(&store, &["add", "tav", "PC", "story", "1-5", "optional", "UTC-5", "--tag", "roleplay", "--tag", "friendly"]).unwrap();
        run_args(&store, &["add", "karlach", "PC", "story", "3-8", "required", "UTC-5", "--tag", "roleplay"]).unwrap();
        run_args(&store, &["add", "gortash", "Xbox", "honour", "20-30", "none", "UTC+9"]).unwrap();

        let out = run_args(&store, &["match", "tav", "--verbose"]).unwrap();
        assert!(out.starts_with("karlach (score 7.25)"));
        assert!(!out.contains("gortash"));
        assert!(out.contains("Shared tags: +0.5"));

        let out = run_args(&store, &["match", "nobody"]).unwrap();
        assert!(out.starts_with("Player not found."));

        let out = run_args(&store, &["match", "gortash"]).unwrap();
        assert_eq!(out, "No compatible players were found.");
    }

    #[test]
    fn test_match_rejects_negative_limit() {
        let dir = tempfile::tempdir().unwrap();
        let store = dir.path().join("players.json");

        let err = run_args(&store, &["match", "tav", "--limit", "-1"]).unwrap_err();
        assert!(matches!(err, CliError::Match(MatchError::InvalidArgument(_))));
    }
}
