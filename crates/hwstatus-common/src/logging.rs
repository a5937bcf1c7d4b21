//! Structured logging infrastructure.
//!
//! Events go to stdout and to a rotating log file at the same time. The
//! file side uses a non-blocking writer; the returned [`WorkerGuard`] must
//! stay alive for as long as the process logs, or buffered lines are lost.

use crate::error::BoxError;
use std::path::PathBuf;
use tracing_appender::{
    non_blocking::WorkerGuard,
    rolling::{RollingFileAppender, Rotation},
};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Default log file prefix; rotated files get a date suffix.
pub const DEFAULT_LOG_FILE: &str = "main.log";

/// Configuration for the logging system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "hwstatus_bot=trace")
    pub level: String,
    /// Directory the log files are written to
    pub directory: PathBuf,
    /// File name prefix of the rotating log
    pub file_prefix: String,
    /// How many rotated files are kept
    pub max_files: usize,
    /// Whether events are mirrored to stdout
    pub console: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
            directory: PathBuf::from("."),
            file_prefix: DEFAULT_LOG_FILE.to_string(),
            max_files: 5,
            console: true,
        }
    }
}

/// Builds the rotating file appender described by `config`.
pub fn file_appender(config: &LoggingConfig) -> Result<RollingFileAppender, BoxError> {
    let appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix(&config.file_prefix)
        .max_log_files(config.max_files)
        .build(&config.directory)?;
    Ok(appender)
}

/// Initialize the global subscriber with console and file output.
///
/// `RUST_LOG` takes precedence over `config.level` when set.
pub fn init_logging(config: &LoggingConfig) -> Result<WorkerGuard, BoxError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => EnvFilter::try_new(&config.level)?,
    };

    let (file_writer, guard) = tracing_appender::non_blocking(file_appender(config)?);

    let file_layer = fmt::layer()
        .with_writer(file_writer)
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(true);

    let console_layer = config
        .console
        .then(|| fmt::layer().with_target(true).compact());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .with(console_layer)
        .try_init()?;

    Ok(guard)
}
