//! Chat delivery that never fails the caller.

use async_trait::async_trait;
use hwstatus_common::{format_error_chain, ChatId, Result};
use tracing::{debug, error, instrument};

/// Transport that can put a text message into a chat.
#[async_trait]
pub trait MessageSender: Send + Sync {
    /// Sends `text` to `chat_id`.
    async fn send_text(&self, chat_id: &ChatId, text: &str) -> Result<()>;
}

/// Delivers messages to the one configured chat.
///
/// Delivery failures are logged and reported as `false`; they are never
/// returned as errors.
#[derive(Debug)]
pub struct Notifier<M> {
    sender: M,
    chat_id: ChatId,
}

impl<M: MessageSender> Notifier<M> {
    /// Creates a notifier for `chat_id`.
    pub const fn new(sender: M, chat_id: ChatId) -> Self {
        Self { sender, chat_id }
    }

    /// The destination chat.
    pub const fn chat_id(&self) -> &ChatId {
        &self.chat_id
    }

    /// The underlying transport.
    pub const fn sender(&self) -> &M {
        &self.sender
    }

    /// Sends `message`; returns whether it was delivered.
    #[instrument(skip(self, message), fields(chat_id = %self.chat_id))]
    pub async fn notify(&self, message: &str) -> bool {
        debug!("Sending message to Telegram");
        match self.sender.send_text(&self.chat_id, message).await {
            Ok(()) => {
                debug!("Message delivered to Telegram");
                true
            }
            Err(e) => {
                error!(error = ?e, "Failed to deliver message: {}", format_error_chain(&e));
                false
            }
        }
    }
}
