//! Application-wide error types using thiserror.

use hwstatus_common::{BoxError, HomeworkError};

/// Main application error type.
#[derive(thiserror::Error, Debug)]
pub enum BotError {
    /// Startup failure from configuration or client construction.
    #[error("Startup error: {0}")]
    Homework(#[from] HomeworkError),

    /// The logging subscriber could not be installed.
    #[error("Logging setup failed: {0}")]
    Logging(#[source] BoxError),
}

/// Result type for the bot application.
pub type BotResult<T> = Result<T, BotError>;
