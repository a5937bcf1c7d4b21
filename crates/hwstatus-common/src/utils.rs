//! Shared utility functions.

use crate::types::Watermark;
use chrono::{DateTime, Utc};

/// Formats a timestamp for display.
pub fn format_timestamp(timestamp: DateTime<Utc>) -> String {
    timestamp.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

/// Formats a watermark for log output, falling back to raw seconds.
pub fn format_watermark(watermark: Watermark) -> String {
    watermark
        .to_datetime()
        .map_or_else(|| format!("{watermark}s"), format_timestamp)
}

/// Truncates a string to a maximum number of characters with ellipsis.
pub fn truncate_string(input: &str, max_length: usize) -> String {
    if input.chars().count() <= max_length {
        input.to_string()
    } else {
        let kept: String = input.chars().take(max_length.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}

/// Renders an error followed by every `source()` beneath it.
pub fn format_error_chain(error: &(dyn std::error::Error + 'static)) -> String {
    let mut rendered = error.to_string();
    let mut current = error.source();
    while let Some(source) = current {
        rendered.push_str(": ");
        rendered.push_str(&source.to_string());
        current = source.source();
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_format_timestamp() {
        let timestamp = Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap();
        let formatted = format_timestamp(timestamp);
        assert_eq!(formatted, "2024-01-01 12:00:00 UTC");
    }

    #[test]
    fn test_format_watermark() {
        let watermark = Watermark::from(Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap());
        assert_eq!(format_watermark(watermark), "2024-01-01 12:00:00 UTC");
        assert_eq!(format_watermark(Watermark(i64::MAX)), format!("{}s", i64::MAX));
    }

    #[test]
    fn test_truncate_string() {
        let input = "This is a very long string that should be truncated";
        let truncated = truncate_string(input, 20);
        assert_eq!(truncated, "This is a very lo...");

        let short = "Short";
        let not_truncated = truncate_string(short, 20);
        assert_eq!(not_truncated, "Short");
    }

    #[test]
    fn test_truncate_string_multibyte() {
        let input = "Работа проверена: у ревьюера есть замечания.";
        let truncated = truncate_string(input, 10);
        assert_eq!(truncated, "Работа ...");
    }

    #[test]
    fn test_format_error_chain() {
        let root = std::io::Error::new(std::io::ErrorKind::TimedOut, "operation timed out");
        let error = crate::HomeworkError::delivery_with_source("request failed", root);
        assert_eq!(
            format_error_chain(&error),
            "Не удалось отправить сообщение в Telegram: request failed: operation timed out"
        );
    }
}
