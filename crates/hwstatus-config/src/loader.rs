//! Configuration loading from the process environment.

use crate::defaults::{DEFAULT_ENDPOINT, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_RETRY_PERIOD_SECS};
use crate::schema::{Config, Credentials, PollingConfig};
use hwstatus_common::{logging::LoggingConfig, ChatId, HomeworkError, Result};
use std::env;
use std::path::PathBuf;
use tracing::{debug, error};

/// Practicum API token.
pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
/// Telegram bot token.
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
/// Destination chat id.
pub const CHAT_ID_VAR: &str = "TELEGRAM_CHAT_ID";
/// Endpoint override.
pub const ENDPOINT_VAR: &str = "HOMEWORK_ENDPOINT";
/// Seconds between polls.
pub const RETRY_PERIOD_VAR: &str = "HOMEWORK_RETRY_PERIOD";
/// Request timeout in seconds.
pub const REQUEST_TIMEOUT_VAR: &str = "HOMEWORK_REQUEST_TIMEOUT";
/// Log level filter.
pub const LOG_LEVEL_VAR: &str = "HOMEWORK_LOG_LEVEL";
/// Log directory.
pub const LOG_DIR_VAR: &str = "HOMEWORK_LOG_DIR";

/// Configuration loader.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Loads `.env` from the working directory if there is one and
    /// returns its path. A missing file is not an error.
    ///
    /// Variables already present in the environment win.
    pub fn load_dotenv() -> std::result::Result<Option<PathBuf>, dotenvy::Error> {
        match dotenvy::dotenv() {
            Ok(path) => Ok(Some(path)),
            Err(e) if e.not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Loads the configuration from the process environment.
    pub fn from_env() -> Result<Config> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Loads the configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Config>
    where
        F: Fn(&str) -> Option<String>,
    {
        let config = Config {
            credentials: Self::credentials(&lookup)?,
            polling: Self::polling(&lookup)?,
            logging: Self::logging_settings(&lookup),
        };

        config.validate()?;
        debug!(credentials = ?config.credentials, polling = ?config.polling, "Configuration loaded");
        Ok(config)
    }

    /// Logging settings from the process environment.
    pub fn logging_from_env() -> LoggingConfig {
        Self::logging_settings(&|key: &str| env::var(key).ok())
    }

    /// Logging settings alone, so logging can start before the rest
    /// of the configuration is checked. Never fails.
    pub fn logging_settings<F>(lookup: &F) -> LoggingConfig
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut logging = LoggingConfig::default();
        if let Some(level) = non_empty(lookup, LOG_LEVEL_VAR) {
            logging.level = level;
        }
        if let Some(dir) = non_empty(lookup, LOG_DIR_VAR) {
            logging.directory = PathBuf::from(dir);
        }
        logging
    }

    /// Reads all three credentials, logging and collecting every one
    /// that is missing before failing.
    fn credentials<F>(lookup: &F) -> Result<Credentials>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut missing = Vec::new();
        let practicum_token = required(lookup, PRACTICUM_TOKEN_VAR, &mut missing);
        let telegram_token = required(lookup, TELEGRAM_TOKEN_VAR, &mut missing);
        let chat_id = required(lookup, CHAT_ID_VAR, &mut missing);

        if !missing.is_empty() {
            return Err(HomeworkError::missing_variables(missing));
        }

        Ok(Credentials {
            practicum_token,
            telegram_token,
            chat_id: ChatId(chat_id),
        })
    }

    fn polling<F>(lookup: &F) -> Result<PollingConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(PollingConfig {
            endpoint: non_empty(lookup, ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_ENDPOINT.to_string()),
            retry_period_secs: seconds(lookup, RETRY_PERIOD_VAR, DEFAULT_RETRY_PERIOD_SECS)?,
            request_timeout_secs: seconds(lookup, REQUEST_TIMEOUT_VAR, DEFAULT_REQUEST_TIMEOUT_SECS)?,
        })
    }
}

fn non_empty<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn required<F>(lookup: &F, key: &str, missing: &mut Vec<String>) -> String
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).unwrap_or_else(|| {
        error!(
            severity = "critical",
            variable = key,
            "Missing required environment variable {}; the bot cannot start",
            key
        );
        missing.push(key.to_string());
        String::new()
    })
}

fn seconds<F>(lookup: &F, key: &str, default: u64) -> Result<u64>
where
    F: Fn(&str) -> Option<String>,
{
    non_empty(lookup, key).map_or(Ok(default), |raw| {
        raw.parse::<u64>()
            .map_err(|e| HomeworkError::invalid_variable(key, format!("{raw:?}: {e}")))
    })
}
