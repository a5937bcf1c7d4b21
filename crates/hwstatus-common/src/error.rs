//! Error types for the homework status bot.
//!
//! The `Display` texts are Russian: per-iteration failures are forwarded
//! verbatim to the chat, so they are written for the chat recipient.

use crate::types::Watermark;
use thiserror::Error;

/// Boxed source error.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, HomeworkError>;

/// Ways the API payload can fail shape validation.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeError {
    /// The payload is not a JSON object.
    #[error("ответ API не является словарём")]
    NotAMapping,

    /// The `homeworks` key is absent or `null`.
    #[error("в ответе API нет ключа \"homeworks\"")]
    MissingKey,

    /// The value under `homeworks` is not an array.
    #[error("значение по ключу \"homeworks\" не является списком")]
    NotAList,
}

/// Ways a single homework record can be malformed.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordDefect {
    /// The record is not a JSON object.
    #[error("запись не является словарём")]
    NotAMapping,

    /// The record has no `status` field.
    #[error("в записи нет ключа \"status\"")]
    MissingStatus,

    /// The record has no `homework_name` field.
    #[error("в записи нет ключа \"homework_name\"")]
    MissingName,
}

/// Main error type for the bot.
#[derive(Error, Debug)]
pub enum HomeworkError {
    /// Missing or malformed configuration. Fatal at startup.
    #[error("Ошибка конфигурации: {message}")]
    Configuration {
        message: String,
        /// Every environment variable at fault.
        keys: Vec<String>,
    },

    /// Network-level failure talking to the API, or an unparseable body.
    #[error("Сбой запроса к API (from_date={watermark}): {source}")]
    Transport {
        watermark: Watermark,
        #[source]
        source: BoxError,
    },

    /// The API answered with a non-success HTTP status.
    #[error("API вернул код ответа {status}")]
    UpstreamStatus { status: u16 },

    /// The payload does not have the documented shape.
    #[error("Некорректный ответ API: {0}")]
    Shape(#[from] ShapeError),

    /// The most recent homework record is malformed.
    #[error("Некорректная запись о домашней работе: {0}")]
    MalformedRecord(#[from] RecordDefect),

    /// The record carries a status outside the known verdicts.
    #[error("Неожиданный статус домашней работы: {status}")]
    UnknownStatus { status: String },

    /// A chat message could not be delivered.
    #[error("Не удалось отправить сообщение в Telegram: {message}")]
    Delivery {
        message: String,
        #[source]
        source: Option<BoxError>,
    },
}

impl HomeworkError {
    /// Configuration error for a set of missing environment variables.
    pub fn missing_variables(keys: Vec<String>) -> Self {
        Self::Configuration {
            message: format!(
                "отсутствуют обязательные переменные окружения: {}",
                keys.join(", ")
            ),
            keys,
        }
    }

    /// Configuration error for a variable that is present but unusable.
    pub fn invalid_variable(key: impl Into<String>, reason: impl Into<String>) -> Self {
        let key = key.into();
        Self::Configuration {
            message: format!("переменная окружения {key}: {}", reason.into()),
            keys: vec![key],
        }
    }

    /// Transport error for a request made with `watermark`.
    pub fn transport(
        watermark: Watermark,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Transport {
            watermark,
            source: Box::new(source),
        }
    }

    /// Delivery error without an underlying cause.
    pub fn delivery(msg: impl Into<String>) -> Self {
        Self::Delivery {
            message: msg.into(),
            source: None,
        }
    }

    /// Delivery error wrapping the transport failure.
    pub fn delivery_with_source(
        msg: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self::Delivery {
            message: msg.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Whether the process has to stop. Only configuration errors qualify.
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Configuration { .. })
    }
}
