//! Homework statuses API client.

use crate::traits::StatusSource;
use async_trait::async_trait;
use hwstatus_common::{format_watermark, truncate_string, HomeworkError, Result, Watermark};
use hwstatus_config::{Credentials, PollingConfig};
use reqwest::{header::AUTHORIZATION, Client};
use serde_json::Value;
use tracing::{debug, error, instrument};

/// Query parameter carrying the watermark.
pub const FROM_DATE_PARAM: &str = "from_date";

/// Longest response body excerpt written to the log.
const LOGGED_BODY_CHARS: usize = 500;

/// Client for the single homework statuses endpoint.
#[derive(Clone)]
pub struct PracticumClient {
    client: Client,
    endpoint: String,
    token: String,
}

impl std::fmt::Debug for PracticumClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PracticumClient")
            .field("endpoint", &self.endpoint)
            .field("token", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl PracticumClient {
    /// Creates a client with the configured request timeout.
    pub fn new(credentials: &Credentials, polling: &PollingConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(polling.request_timeout())
            .build()
            .map_err(|e| HomeworkError::Configuration {
                message: format!("не удалось создать HTTP-клиент: {e}"),
                keys: Vec::new(),
            })?;

        Ok(Self {
            client,
            endpoint: polling.endpoint.clone(),
            token: credentials.practicum_token.clone(),
        })
    }

    /// The endpoint requests go to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn authorization(&self) -> String {
        format!("OAuth {}", self.token)
    }
}

#[async_trait]
impl StatusSource for PracticumClient {
    #[instrument(skip(self), fields(endpoint = %self.endpoint))]
    async fn fetch_statuses(&self, watermark: Watermark) -> Result<Value> {
        debug!("Requesting statuses changed since {}", format_watermark(watermark));

        let response = self
            .client
            .get(&self.endpoint)
            .header(AUTHORIZATION, self.authorization())
            .query(&[(FROM_DATE_PARAM, watermark.as_secs())])
            .send()
            .await
            .map_err(|e| {
                error!("Request to the homework API failed: {}", e);
                HomeworkError::transport(watermark, e)
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            error!(
                status = status.as_u16(),
                body = %truncate_string(&body, LOGGED_BODY_CHARS),
                "Homework API returned a non-success status"
            );
            return Err(HomeworkError::UpstreamStatus {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| HomeworkError::transport(watermark, e))?;

        debug!("Response body: {}", truncate_string(&body, LOGGED_BODY_CHARS));

        serde_json::from_str(&body).map_err(|e| {
            error!("Homework API returned invalid JSON: {}", e);
            HomeworkError::transport(watermark, e)
        })
    }
}
