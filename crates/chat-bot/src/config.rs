//! Application configuration loaded from environment variables.

use anyhow::{Context, Result};
use bot_commands::CommandsConfig;
use serde::Deserialize;
use std::time::Duration;

/// Application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Telegram configuration
    pub telegram: TelegramConfig,

    /// Bot configuration
    #[serde(default)]
    pub bot: BotConfig,

    /// Command configuration
    #[serde(default)]
    pub commands: CommandsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot API token
    pub bot_token: String,

    /// Bot API base URL
    #[serde(default = "default_api_url")]
    pub api_url: String,

    /// Long-poll timeout for getUpdates
    #[serde(default = "default_poll_timeout", with = "humantime_serde")]
    pub poll_timeout: Duration,

    /// Delay before polling again after an error
    #[serde(default = "default_retry_delay", with = "humantime_serde")]
    pub retry_delay: Duration,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Model reported by /show model
    #[serde(default = "default_model")]
    pub model: String,

    /// Comma-separated models reported by /list models
    #[serde(default)]
    pub models: String,
}

impl BotConfig {
    /// Configured models, falling back to the current model.
    pub fn model_list(&self) -> Vec<String> {
        let models: Vec<String> = self
            .models
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(String::from)
            .collect();

        if models.is_empty() {
            vec![self.model.clone()]
        } else {
            models
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            model: default_model(),
            models: String::new(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.telegram.org".into()
}

fn default_poll_timeout() -> Duration {
    Duration::from_secs(25)
}

fn default_retry_delay() -> Duration {
    Duration::from_secs(5)
}

fn default_log_level() -> String {
    "info".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

impl Config {
    /// Load configuration from environment variables.
    pub fn load() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .separator("__")
                    // Bot tokens look numeric up to the colon; keep strings as strings.
                    .try_parsing(false),
            )
            .build()
            .context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "telegram": {"bot_token": "123:abc"}
        }))
        .unwrap();

        assert_eq!(config.telegram.api_url, "https://api.telegram.org");
        assert_eq!(config.telegram.poll_timeout, Duration::from_secs(25));
        assert_eq!(config.bot.log_level, "info");
        assert!(config.commands.register_on_startup);
        assert!(config.commands.reply_unknown);
    }

    #[test]
    fn test_humantime_durations() {
        let config: Config = serde_json::from_value(serde_json::json!({
            "telegram": {"bot_token": "123:abc", "poll_timeout": "10s", "retry_delay": "500ms"}
        }))
        .unwrap();

        assert_eq!(config.telegram.poll_timeout, Duration::from_secs(10));
        assert_eq!(config.telegram.retry_delay, Duration::from_millis(500));
    }

    #[test]
    fn test_model_list() {
        let mut bot = BotConfig::default();
        assert_eq!(bot.model_list(), vec![bot.model.clone()]);

        bot.models = "gpt-4o, claude , ,llama".into();
        assert_eq!(bot.model_list(), ["gpt-4o", "claude", "llama"]);
    }
}
