//! Main entry point for the homework status bot.

use hwstatus_bot::{BotError, BotResult, HomeworkBot};
use hwstatus_common::logging::init_logging;
use hwstatus_config::ConfigLoader;
use tracing::{debug, error, info, warn};

#[tokio::main]
async fn main() -> BotResult<()> {
    let dotenv = ConfigLoader::load_dotenv();

    // Logging comes up first so that missing credentials are recorded.
    let _guard = init_logging(&ConfigLoader::logging_from_env()).map_err(BotError::Logging)?;

    match dotenv {
        Ok(Some(path)) => debug!("Loaded environment from {}", path.display()),
        Ok(None) => debug!("No .env file found"),
        Err(e) => warn!("Failed to load .env file: {}", e),
    }

    info!("Starting homework status bot");

    let config = match ConfigLoader::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!(severity = "critical", "Bot stopped: {}", e);
            return Err(e.into());
        }
    };

    let bot = HomeworkBot::new(config);

    if let Err(e) = bot.start().await {
        error!(severity = "critical", "Bot failed to start: {}", e);
        return Err(e);
    }

    Ok(())
}
