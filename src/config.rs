//! Configuration types.

use std::path::Path;
use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Default Bot API endpoint.
pub const DEFAULT_TELEGRAM_API_URL: &str = "https://api.telegram.org";

/// Default long-poll timeout for `getUpdates`.
const DEFAULT_POLL_TIMEOUT_SECS: u64 = 30;

/// Bot process configuration.
///
/// `Debug` never shows the token: `SecretString` redacts itself.
#[derive(Debug)]
pub struct BotConfig {
    /// Bot API credential.
    pub telegram_token: SecretString,
    /// Chat that receives payment and support notifications.
    pub admin_chat_id: i64,
    /// Base URL of the Bot API (no trailing slash).
    pub telegram_api_url: String,
    /// Long-poll timeout passed to `getUpdates`.
    pub poll_timeout: Duration,
}

impl BotConfig {
    /// Load a `.env` file from the working directory (if any), then build the
    /// config from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        load_env_file(Path::new(".env"))?;
        Self::from_env()
    }

    /// Build config from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build config from an arbitrary key lookup. Used directly by tests so they
    /// don't have to mutate the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let token = read("TELEGRAM_TOKEN").ok_or_else(|| ConfigError::MissingEnvVar {
            key: "TELEGRAM_TOKEN".into(),
            example: "TELEGRAM_TOKEN=...".into(),
        })?;

        let admin_raw = read("ADMIN_CHAT_ID").ok_or_else(|| ConfigError::MissingEnvVar {
            key: "ADMIN_CHAT_ID".into(),
            example: "ADMIN_CHAT_ID=123456789".into(),
        })?;
        let admin_chat_id: i64 = admin_raw.parse().map_err(|_| ConfigError::InvalidValue {
            key: "ADMIN_CHAT_ID".into(),
            message: format!("must be an integer, got {admin_raw:?}"),
        })?;

        let telegram_api_url = read("TELEGRAM_API_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_TELEGRAM_API_URL.to_string());

        let poll_timeout_secs = match read("TELEGRAM_POLL_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| ConfigError::InvalidValue {
                key: "TELEGRAM_POLL_TIMEOUT_SECS".into(),
                message: format!("must be a whole number of seconds, got {raw:?}"),
            })?,
            None => DEFAULT_POLL_TIMEOUT_SECS,
        };

        Ok(Self {
            telegram_token: SecretString::from(token),
            admin_chat_id,
            telegram_api_url,
            poll_timeout: Duration::from_secs(poll_timeout_secs),
        })
    }
}

/// Load `KEY=value` pairs from a `.env` file into the process environment.
///
/// Variables already present in the environment are left untouched. A missing
/// file is fine; an unreadable or malformed one is an error.
pub fn load_env_file(path: &Path) -> Result<(), ConfigError> {
    match dotenvy::from_path(path) {
        Ok(()) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(ConfigError::EnvFile(e.to_string())),
    }
}
