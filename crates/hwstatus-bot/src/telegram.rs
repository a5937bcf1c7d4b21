//! Telegram Bot API transport.

use crate::notifier::MessageSender;
use async_trait::async_trait;
use hwstatus_common::{truncate_string, ChatId, HomeworkError, Result};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;

/// Public Bot API host.
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";

/// Envelope every Bot API method answers with.
#[derive(Debug, Deserialize)]
struct TelegramResponse {
    ok: bool,
    description: Option<String>,
}

/// Sends plain-text messages through `sendMessage`.
#[derive(Clone)]
pub struct TelegramSender {
    client: Client,
    // Contains the bot token; never log it.
    send_url: String,
}

impl std::fmt::Debug for TelegramSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramSender")
            .field("send_url", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl TelegramSender {
    /// Creates a sender for the public Bot API.
    pub fn new(token: &str, timeout: Duration) -> Result<Self> {
        Self::with_base_url(TELEGRAM_API_BASE, token, timeout)
    }

    /// Creates a sender for a Bot API server at `base_url`.
    pub fn with_base_url(base_url: &str, token: &str, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| HomeworkError::Configuration {
                message: format!("не удалось создать HTTP-клиент Telegram: {e}"),
                keys: Vec::new(),
            })?;

        Ok(Self {
            client,
            send_url: format!("{}/bot{token}/sendMessage", base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl MessageSender for TelegramSender {
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()> {
        let response = self
            .client
            .post(&self.send_url)
            .json(&json!({ "chat_id": chat_id.as_str(), "text": text }))
            .send()
            .await
            .map_err(|e| HomeworkError::delivery_with_source("запрос к Bot API не выполнен", e.without_url()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| HomeworkError::delivery_with_source("ответ Bot API не прочитан", e.without_url()))?;

        match serde_json::from_str::<TelegramResponse>(&body) {
            Ok(reply) if status.is_success() && reply.ok => Ok(()),
            Ok(reply) => Err(HomeworkError::delivery(format!(
                "Bot API ответил {}: {}",
                status.as_u16(),
                reply.description.unwrap_or_default()
            ))),
            Err(_) => Err(HomeworkError::delivery(format!(
                "Bot API ответил {}: {}",
                status.as_u16(),
                truncate_string(&body, 200)
            ))),
        }
    }
}
