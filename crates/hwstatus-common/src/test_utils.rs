//! Test utilities and shared fixtures.
//!
//! Available to other crates' tests through the `testing` feature.

use serde_json::{json, Value};
use std::sync::Once;
use tracing_subscriber::{fmt, EnvFilter};

/// Initialize test logging once per test run.
static INIT: Once = Once::new();

/// Initialize logging for tests with a sensible default configuration.
/// This function is safe to call multiple times and will only initialize once.
pub fn init_test_logging() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));

        let _ = fmt().with_test_writer().with_env_filter(filter).try_init();
    });
}

/// JSON payloads shaped like the homework status API.
pub mod payload_fixtures {
    use super::*;

    /// A single homework record.
    pub fn homework(status: &str, name: &str) -> Value {
        json!({
            "id": 124,
            "status": status,
            "homework_name": name,
            "reviewer_comment": "",
            "date_updated": "2024-01-01T12:00:00Z",
            "lesson_name": "Итоговый проект"
        })
    }

    /// A response carrying `homeworks` and a server timestamp.
    pub fn response(homeworks: Vec<Value>, current_date: i64) -> Value {
        json!({
            "homeworks": homeworks,
            "current_date": current_date
        })
    }

    /// A response with one record.
    pub fn single(status: &str, name: &str, current_date: i64) -> Value {
        response(vec![homework(status, name)], current_date)
    }

    /// A steady-state response with no new statuses.
    pub fn empty(current_date: i64) -> Value {
        response(Vec::new(), current_date)
    }
}
