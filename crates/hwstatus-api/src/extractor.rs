//! Turns the most recent homework record into a chat message.

use crate::verdict::Verdict;
use hwstatus_common::{HomeworkError, RecordDefect, Result};
use serde_json::Value;
use tracing::debug;

/// Key holding the review status.
pub const STATUS_KEY: &str = "status";

/// Key holding the homework name.
pub const HOMEWORK_NAME_KEY: &str = "homework_name";

/// Message for the first (most recent) record, or `None` when there
/// is nothing new.
pub fn extract(records: &[Value]) -> Result<Option<String>> {
    let Some(record) = records.first() else {
        debug!("No new homework statuses in the response");
        return Ok(None);
    };

    parse_status(record).map(Some)
}

/// Builds the status-change message for one record.
///
/// Checks run in a fixed order: the record is an object, `status` is
/// present, `status` is a known verdict, `homework_name` is present.
pub fn parse_status(record: &Value) -> Result<String> {
    let fields = record.as_object().ok_or(RecordDefect::NotAMapping)?;

    let status = fields.get(STATUS_KEY).ok_or(RecordDefect::MissingStatus)?;
    let verdict = status
        .as_str()
        .and_then(Verdict::from_status)
        .ok_or_else(|| HomeworkError::UnknownStatus {
            status: render(status),
        })?;

    let name = fields
        .get(HOMEWORK_NAME_KEY)
        .ok_or(RecordDefect::MissingName)?;

    Ok(status_message(&render(name), verdict))
}

/// `Изменился статус проверки работы "{name}". {verdict}`
pub fn status_message(homework_name: &str, verdict: Verdict) -> String {
    format!(
        "Изменился статус проверки работы \"{homework_name}\". {}",
        verdict.sentence()
    )
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
