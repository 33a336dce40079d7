// Centralized configuration for the bot

use std::path::PathBuf;

use thiserror::Error;

/// Prefix used when `BOT_PREFIX` is not set
pub const DEFAULT_PREFIX: &str = "!";

/// Directory holding persisted settings when `DATA_DIR` is not set
pub const DEFAULT_DATA_DIR: &str = "data";

/// Number of recent messages kept for delete/edit logging
pub const DEFAULT_MESSAGE_CACHE_SIZE: usize = 1000;

/// Discord rejects embed field values longer than this
pub const EMBED_FIELD_LIMIT: usize = 1024;

/// Accounts younger than this many days get flagged on join
pub const NEW_ACCOUNT_DAYS: i64 = 7;

/// How long the help menu keeps listening for interactions
pub const HELP_MENU_TIMEOUT_SECS: u64 = 180;

/// Discord embed colors
pub mod colors {
    pub const DEFAULT: u32 = 0x7289da;
    pub const SUCCESS: u32 = 0x2ecc71;
    pub const ERROR: u32 = 0xe74c3c;
    pub const WARNING: u32 = 0xf39c12;
    pub const INFO: u32 = 0x3498db;
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("DISCORD_TOKEN must be set")]
    MissingToken,
    #[error("{key} must be a positive number, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

/// Runtime configuration read from the environment
#[derive(Clone)]
pub struct BotConfig {
    pub token: String,
    pub prefix: String,
    pub data_dir: PathBuf,
    pub support_url: Option<String>,
    pub message_cache_size: usize,
}

impl std::fmt::Debug for BotConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BotConfig")
            .field("token", &"<redacted>")
            .field("prefix", &self.prefix)
            .field("data_dir", &self.data_dir)
            .field("support_url", &self.support_url)
            .field("message_cache_size", &self.message_cache_size)
            .finish()
    }
}

impl BotConfig {
    /// Read configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from any key lookup (environment, tests)
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let token = non_empty("DISCORD_TOKEN").ok_or(ConfigError::MissingToken)?;

        let message_cache_size = match non_empty("MESSAGE_CACHE_SIZE") {
            Some(raw) => match raw.trim().parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => {
                    return Err(ConfigError::InvalidNumber {
                        key: "MESSAGE_CACHE_SIZE",
                        value: raw,
                    })
                }
            },
            None => DEFAULT_MESSAGE_CACHE_SIZE,
        };

        Ok(Self {
            token,
            prefix: non_empty("BOT_PREFIX").unwrap_or_else(|| DEFAULT_PREFIX.to_string()),
            data_dir: non_empty("DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_DIR)),
            support_url: non_empty("SUPPORT_URL"),
            message_cache_size,
        })
    }

    /// Location of the persisted log channel settings
    pub fn log_settings_path(&self) -> PathBuf {
        self.data_dir.join("logging_settings.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> Result<BotConfig, ConfigError> {
        let env: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        BotConfig::from_lookup(|key| env.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[("DISCORD_TOKEN", "abc")]).unwrap();
        assert_eq!(config.prefix, "!");
        assert_eq!(config.data_dir, PathBuf::from("data"));
        assert_eq!(config.support_url, None);
        assert_eq!(config.message_cache_size, DEFAULT_MESSAGE_CACHE_SIZE);
        assert_eq!(
            config.log_settings_path(),
            PathBuf::from("data").join("logging_settings.json")
        );
    }

    #[test]
    fn test_missing_token() {
        assert_eq!(config_from(&[]).unwrap_err(), ConfigError::MissingToken);
        assert_eq!(
            config_from(&[("DISCORD_TOKEN", "  ")]).unwrap_err(),
            ConfigError::MissingToken
        );
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("DISCORD_TOKEN", "abc"),
            ("BOT_PREFIX", "?"),
            ("DATA_DIR", "/var/lib/bot"),
            ("SUPPORT_URL", "https://discord.gg/example"),
            ("MESSAGE_CACHE_SIZE", "250"),
        ])
        .unwrap();
        assert_eq!(config.prefix, "?");
        assert_eq!(config.data_dir, PathBuf::from("/var/lib/bot"));
        assert_eq!(config.support_url.as_deref(), Some("https://discord.gg/example"));
        assert_eq!(config.message_cache_size, 250);
    }

    #[test]
    fn test_invalid_cache_size() {
        let err = config_from(&[("DISCORD_TOKEN", "abc"), ("MESSAGE_CACHE_SIZE", "0")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { key: "MESSAGE_CACHE_SIZE", .. }));
    }
}
