//! Application configuration structures.

use std::fs;
use std::ops::RangeInclusive;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, Result};

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Status page endpoints and HTTP behavior
    #[serde(default)]
    pub status: StatusConfig,

    /// Chat command behavior
    #[serde(default)]
    pub command: CommandConfig,

    /// Machine translation of issue text
    #[serde(default)]
    pub translation: TranslationConfig,

    /// Log output settings
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load configuration or return default if loading fails.
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        Self::load(&path).unwrap_or_else(|e| {
            log::warn!(
                "Config load failed from {:?}: {}. Using defaults.",
                path.as_ref(),
                e
            );
            Self::default()
        })
    }

    /// Validate configuration values for basic sanity.
    pub fn validate(&self) -> Result<()> {
        for (key, value) in [
            ("status.index_url", &self.status.index_url),
            ("status.meta_url", &self.status.meta_url),
            ("status.feed_url", &self.status.feed_url),
        ] {
            url::Url::parse(value)
                .map_err(|e| AppError::validation(format!("{key} is not a valid URL: {e}")))?;
        }
        if self.status.user_agent.trim().is_empty() {
            return Err(AppError::validation("status.user_agent is empty"));
        }
        if self.status.timeout_secs == Some(0) {
            return Err(AppError::validation("status.timeout_secs must be > 0"));
        }

        let command = &self.command;
        if command.prefix.is_empty() || command.name.trim().is_empty() {
            return Err(AppError::validation(
                "command.prefix and command.name must not be empty",
            ));
        }
        if command.frame_limit == 0 {
            return Err(AppError::validation("command.frame_limit must be > 0"));
        }
        if command.min_days == 0 {
            return Err(AppError::validation("command.min_days must be > 0"));
        }
        if command.min_days > command.max_days {
            return Err(AppError::validation(
                "command.min_days must not exceed command.max_days",
            ));
        }
        if !command.day_range().contains(&command.default_days) {
            return Err(AppError::validation(
                "command.default_days must be within min_days..=max_days",
            ));
        }
        if command.services.is_empty() {
            return Err(AppError::validation("No services defined"));
        }

        let translation = &self.translation;
        if translation.enabled {
            if translation.source.trim().is_empty() || translation.target.trim().is_empty() {
                return Err(AppError::validation(
                    "translation.source and translation.target must be set",
                ));
            }
            url::Url::parse(&translation.endpoint).map_err(|e| {
                AppError::validation(format!("translation.endpoint is not a valid URL: {e}"))
            })?;
        }
        Ok(())
    }
}

/// Status page endpoints and HTTP client settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusConfig {
    /// JSON summary with components and incidents
    #[serde(default = "defaults::index_url")]
    pub index_url: String,

    /// JSON page metadata carrying the declared timezone
    #[serde(default = "defaults::meta_url")]
    pub meta_url: String,

    /// RSS incident history feed
    #[serde(default = "defaults::feed_url")]
    pub feed_url: String,

    /// User-Agent header for HTTP requests
    #[serde(default = "defaults::user_agent")]
    pub user_agent: String,

    /// Request timeout in seconds; unset leaves the client default
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl Default for StatusConfig {
    fn default() -> Self {
        Self {
            index_url: defaults::index_url(),
            meta_url: defaults::meta_url(),
            feed_url: defaults::feed_url(),
            user_agent: defaults::user_agent(),
            timeout_secs: None,
        }
    }
}

/// Chat command settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommandConfig {
    /// Command name without prefix
    #[serde(default = "defaults::command_name")]
    pub name: String,

    /// Prefix that marks a chat message as a command
    #[serde(default = "defaults::prefix")]
    pub prefix: String,

    /// Lookback used when the caller gives no day count
    #[serde(default = "defaults::default_days")]
    pub default_days: i64,

    #[serde(default = "defaults::min_days")]
    pub min_days: i64,

    #[serde(default = "defaults::max_days")]
    pub max_days: i64,

    /// Largest message the chat platform accepts, in characters
    #[serde(default = "defaults::frame_limit")]
    pub frame_limit: usize,

    /// Service names accepted as the first positional
    #[serde(default = "defaults::services")]
    pub services: Vec<String>,
}

impl CommandConfig {
    /// Accepted day counts, inclusive on both ends.
    pub fn day_range(&self) -> RangeInclusive<i64> {
        self.min_days..=self.max_days
    }

    /// The full trigger, e.g. `!isgptup`.
    pub fn trigger(&self) -> String {
        format!("{}{}", self.prefix, self.name)
    }
}

impl Default for CommandConfig {
    fn default() -> Self {
        Self {
            name: defaults::command_name(),
            prefix: defaults::prefix(),
            default_days: defaults::default_days(),
            min_days: defaults::min_days(),
            max_days: defaults::max_days(),
            frame_limit: defaults::frame_limit(),
            services: defaults::services(),
        }
    }
}

/// Translation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranslationConfig {
    /// Append a translated block after the status report
    #[serde(default = "defaults::translation_enabled")]
    pub enabled: bool,

    #[serde(default = "defaults::translation_endpoint")]
    pub endpoint: String,

    /// Source language code
    #[serde(default = "defaults::source_lang")]
    pub source: String,

    /// Destination language code
    #[serde(default = "defaults::target_lang")]
    pub target: String,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: defaults::translation_enabled(),
            endpoint: defaults::translation_endpoint(),
            source: defaults::source_lang(),
            target: defaults::target_lang(),
        }
    }
}

/// Logging settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset
    #[serde(default = "defaults::log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: defaults::log_level(),
        }
    }
}

mod defaults {
    // Status page defaults
    pub fn index_url() -> String {
        "https://status.openai.com/index.json".into()
    }
    pub fn meta_url() -> String {
        "https://status.openai.com/api/v2/status.json".into()
    }
    pub fn feed_url() -> String {
        "https://status.openai.com/history.rss".into()
    }
    pub fn user_agent() -> String {
        "Mozilla/5.0 (compatible; isgptup/0.1)".into()
    }

    // Command defaults
    pub fn command_name() -> String {
        "isgptup".into()
    }
    pub fn prefix() -> String {
        "!".into()
    }
    pub fn default_days() -> i64 {
        1
    }
    pub fn min_days() -> i64 {
        1
    }
    pub fn max_days() -> i64 {
        90
    }
    pub fn frame_limit() -> usize {
        2000
    }
    pub fn services() -> Vec<String> {
        ["API", "ChatGPT", "Labs", "Playground"]
            .into_iter()
            .map(String::from)
            .collect()
    }

    // Translation defaults
    pub fn translation_enabled() -> bool {
        true
    }
    pub fn translation_endpoint() -> String {
        "https://translate.googleapis.com/translate_a/single".into()
    }
    pub fn source_lang() -> String {
        "en".into()
    }
    pub fn target_lang() -> String {
        "ko".into()
    }

    pub fn log_level() -> String {
        "info".into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_default_config_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.status.user_agent = "  ".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_zero_frame_limit() {
        let mut config = Config::default();
        config.command.frame_limit = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_inverted_day_range() {
        let mut config = Config::default();
        config.command.min_days = 10;
        config.command.max_days = 5;
        config.command.default_days = 7;
        assert!(config.validate().is_err());
    }

    #[test]
    fn timeout_is_unset_unless_configured() {
        assert_eq!(Config::default().status.timeout_secs, None);

        let mut config: Config = toml::from_str("[status]\ntimeout_secs = 15\n").unwrap();
        assert_eq!(config.status.timeout_secs, Some(15));
        assert!(config.validate().is_ok());

        config.status.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_url() {
        let mut config = Config::default();
        config.status.feed_url = "not a url".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_ignores_translation_when_disabled() {
        let mut config = Config::default();
        config.translation.enabled = false;
        config.translation.target = String::new();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_toml_fills_defaults() {
        let config: Config = toml::from_str(
            r#"
            [command]
            max_days = 30

            [translation]
            target = "ja"
            "#,
        )
        .unwrap();
        assert_eq!(config.command.max_days, 30);
        assert_eq!(config.command.frame_limit, 2000);
        assert_eq!(config.command.trigger(), "!isgptup");
        assert_eq!(config.translation.target, "ja");
        assert_eq!(config.translation.source, "en");
        assert_eq!(config.status.index_url, "https://status.openai.com/index.json");
    }

    #[test]
    fn load_or_default_falls_back_on_missing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config = Config::load_or_default(tmp.path().join("missing.toml"));
        assert_eq!(config.command.services.len(), 4);
    }

    #[test]
    fn load_reads_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[logging]\nlevel = \"debug\"\n").unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.logging.level, "debug");
    }
}
