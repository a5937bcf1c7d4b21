//! Runtime validation of a loaded configuration.

use crate::loader::{
    CHAT_ID_VAR, ENDPOINT_VAR, PRACTICUM_TOKEN_VAR, REQUEST_TIMEOUT_VAR, RETRY_PERIOD_VAR,
    TELEGRAM_TOKEN_VAR,
};
use crate::schema::Config;
use hwstatus_common::{HomeworkError, Result};
use url::Url;

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validates a configuration.
    ///
    /// Empty credentials are reported together; the first bad optional
    /// setting is reported on its own.
    pub fn validate(config: &Config) -> Result<()> {
        let credentials = &config.credentials;
        let missing: Vec<String> = [
            (PRACTICUM_TOKEN_VAR, credentials.practicum_token.as_str()),
            (TELEGRAM_TOKEN_VAR, credentials.telegram_token.as_str()),
            (CHAT_ID_VAR, credentials.chat_id.as_str()),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key.to_string())
        .collect();

        if !missing.is_empty() {
            return Err(HomeworkError::missing_variables(missing));
        }

        Self::validate_endpoint(&config.polling.endpoint)?;

        if config.polling.retry_period_secs == 0 {
            return Err(HomeworkError::invalid_variable(
                RETRY_PERIOD_VAR,
                "период опроса должен быть больше нуля",
            ));
        }

        if config.polling.request_timeout_secs == 0 {
            return Err(HomeworkError::invalid_variable(
                REQUEST_TIMEOUT_VAR,
                "таймаут запроса должен быть больше нуля",
            ));
        }

        Ok(())
    }

    fn validate_endpoint(endpoint: &str) -> Result<()> {
        let url = Url::parse(endpoint)
            .map_err(|e| HomeworkError::invalid_variable(ENDPOINT_VAR, e.to_string()))?;

        match url.scheme() {
            "http" | "https" => Ok(()),
            other => Err(HomeworkError::invalid_variable(
                ENDPOINT_VAR,
                format!("неподдерживаемая схема {other}"),
            )),
        }
    }
}
