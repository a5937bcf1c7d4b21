//! Default values.

use crate::schema::PollingConfig;

/// The homework statuses endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";

/// Ten minutes between polls.
pub const DEFAULT_RETRY_PERIOD_SECS: u64 = 600;

/// Request timeout for the API call.
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            retry_period_secs: DEFAULT_RETRY_PERIOD_SECS,
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
        }
    }
}
