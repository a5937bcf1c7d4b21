//! Wires the configuration into a running poll loop.

use crate::error::BotResult;
use crate::notifier::Notifier;
use crate::poll_loop::PollLoop;
use crate::telegram::TelegramSender;
use hwstatus_api::PracticumClient;
use hwstatus_config::{Config, ConfigLoader};
use std::sync::Arc;
use tracing::info;

/// Poll loop backed by the real API and Telegram.
pub type LivePollLoop = PollLoop<PracticumClient, TelegramSender>;

/// Main bot structure.
pub struct HomeworkBot {
    config: Arc<Config>,
}

impl HomeworkBot {
    /// Creates a new bot instance.
    pub fn new(config: Config) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Loads the configuration through `lookup` and creates the bot.
    ///
    /// Fails before any client exists when a credential is missing.
    pub fn from_lookup<F>(lookup: F) -> BotResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        Ok(Self::new(ConfigLoader::from_lookup(lookup)?))
    }

    /// The configuration the bot runs with.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Builds the API client, the Telegram sender and the loop around them.
    pub fn build_loop(&self) -> BotResult<LivePollLoop> {
        let config = &self.config;
        let source = PracticumClient::new(&config.credentials, &config.polling)?;
        let sender = TelegramSender::new(
            &config.credentials.telegram_token,
            config.polling.request_timeout(),
        )?;
        let notifier = Notifier::new(sender, config.credentials.chat_id.clone());

        Ok(PollLoop::new(source, notifier, config.polling.retry_period()))
    }

    /// Starts the bot. Only returns on a startup error.
    pub async fn start(&self) -> BotResult<()> {
        let poll_loop = self.build_loop()?;
        info!(
            endpoint = %self.config.polling.endpoint,
            chat_id = %self.config.credentials.chat_id,
            "Homework status bot started"
        );
        poll_loop.run().await;
        Ok(())
    }
}
