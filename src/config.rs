use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::scoring::{
    GAME_MODE_WEIGHT, LEVEL_RANGE_WEIGHT, PLATFORM_WEIGHT, TAG_CAP, TAG_WEIGHT, TIMEZONE_WEIGHT,
    VOICE_CHAT_PENALTY, VOICE_CHAT_WEIGHT,
};
use crate::models::{ScoringWeights, DEFAULT_LIMIT, DEFAULT_MIN_SCORE};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub database: DatabaseSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    #[serde(default = "default_database_url")]
    pub url: String,
    pub max_connections: Option<u32>,
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: None,
        }
    }
}

fn default_database_url() -> String { "sqlite://party-matcher.db".to_string() }

/// Defaults applied when a match request leaves `min_score` or `limit` out
#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_min_score")]
    pub default_min_score: f64,
    #[serde(default = "default_limit")]
    pub default_limit: i64,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            default_min_score: default_min_score(),
            default_limit: default_limit(),
        }
    }
}

fn default_min_score() -> f64 { DEFAULT_MIN_SCORE }
fn default_limit() -> i64 { DEFAULT_LIMIT as i64 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub weights: WeightsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_platform_weight")]
    pub platform: f64,
    #[serde(default = "default_game_mode_weight")]
    pub game_mode: f64,
    #[serde(default = "default_level_range_weight")]
    pub level_range: f64,
    #[serde(default = "default_voice_chat_weight")]
    pub voice_chat: f64,
    #[serde(default = "default_voice_chat_penalty")]
    pub voice_chat_penalty: f64,
    #[serde(default = "default_timezone_weight")]
    pub timezone: f64,
    #[serde(default = "default_tag_weight")]
    pub tag: f64,
    #[serde(default = "default_tag_cap")]
    pub tag_cap: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            platform: default_platform_weight(),
            game_mode: default_game_mode_weight(),
            level_range: default_level_range_weight(),
            voice_chat: default_voice_chat_weight(),
            voice_chat_penalty: default_voice_chat_penalty(),
            timezone: default_timezone_weight(),
            tag: default_tag_weight(),
            tag_cap: default_tag_cap(),
        }
    }
}

impl From<&WeightsConfig> for ScoringWeights {
    fn from(config: &WeightsConfig) -> Self {
        Self {
            platform: config.platform,
            game_mode: config.game_mode,
            level_range: config.level_range,
            voice_chat: config.voice_chat,
            voice_chat_penalty: config.voice_chat_penalty,
            timezone: config.timezone,
            tag: config.tag,
            tag_cap: config.tag_cap,
        }
    }
}

fn default_platform_weight() -> f64 { PLATFORM_WEIGHT }
fn default_game_mode_weight() -> f64 { GAME_MODE_WEIGHT }
fn default_level_range_weight() -> f64 { LEVEL_RANGE_WEIGHT }
fn default_voice_chat_weight() -> f64 { VOICE_CHAT_WEIGHT }
fn default_voice_chat_penalty() -> f64 { VOICE_CHAT_PENALTY }
fn default_timezone_weight() -> f64 { TIMEZONE_WEIGHT }
fn default_tag_weight() -> f64 { TAG_WEIGHT }
fn default_tag_cap() -> f64 { TAG_CAP }

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with PARTY)
    /// 5. `DATABASE_URL`, if set
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., PARTY__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("PARTY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            );

        if let Ok(database_url) = std::env::var("DATABASE_URL") {
            builder = builder.set_override("database.url", database_url)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("PARTY")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.platform, 2.0);
        assert_eq!(weights.game_mode, 2.0);
        assert_eq!(weights.level_range, 2.0);
        assert_eq!(weights.voice_chat, 1.0);
        assert_eq!(weights.voice_chat_penalty, -1.0);
        assert_eq!(weights.timezone, 1.0);
        assert_eq!(weights.tag, 0.5);
        assert_eq!(weights.tag_cap, 2.0);
        assert_eq!(ScoringWeights::from(&weights), ScoringWeights::default());
    }

    #[test]
    fn test_default_matching() {
        let matching = MatchingSettings::default();
        assert_eq!(matching.default_min_score, 4.0);
        assert_eq!(matching.default_limit, 10);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "json");
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("party.toml");
        std::fs::write(
            &path,
            "[server]\nport = 9090\n\n[matching]\ndefault_limit = 0\n\n[scoring.weights]\ntag = 1.0\n",
        )
        .unwrap();

        let settings = Settings::load_from(&path).unwrap();
        assert_eq!(settings.server.port, 9090);
        assert_eq!(settings.server.host, "127.0.0.1");
        assert_eq!(settings.matching.default_limit, 0);
        assert_eq!(settings.scoring.weights.tag, 1.0);
        assert_eq!(settings.scoring.weights.platform, 2.0);
        assert_eq!(settings.logging.format, "json");
    }
}
