//! Configuration schema definitions.

use hwstatus_common::{logging::LoggingConfig, ChatId, Result};
use std::fmt;
use std::time::Duration;

/// Main configuration structure.
#[derive(Debug, Clone)]
pub struct Config {
    /// Tokens and the destination chat.
    pub credentials: Credentials,
    /// Polling configuration.
    pub polling: PollingConfig,
    /// Logging configuration.
    pub logging: LoggingConfig,
}

/// The three required secrets and identifiers.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Practicum API OAuth token.
    pub practicum_token: String,
    /// Telegram bot token.
    pub telegram_token: String,
    /// Destination chat.
    pub chat_id: ChatId,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .finish()
    }
}

/// Polling configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PollingConfig {
    /// Homework statuses endpoint.
    pub endpoint: String,
    /// Seconds to sleep between iterations.
    pub retry_period_secs: u64,
    /// Upper bound for a single API request, in seconds.
    pub request_timeout_secs: u64,
}

impl PollingConfig {
    /// Sleep between iterations.
    pub const fn retry_period(&self) -> Duration {
        Duration::from_secs(self.retry_period_secs)
    }

    /// Timeout applied to every outbound request.
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

impl Config {
    /// Builds a configuration from credentials and default settings.
    pub fn with_credentials(credentials: Credentials) -> Self {
        Self {
            credentials,
            polling: PollingConfig::default(),
            logging: LoggingConfig::default(),
        }
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        crate::validator::ConfigValidator::validate(self)
    }
}
