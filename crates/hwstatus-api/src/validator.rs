//! Shape validation of the API payload.

use hwstatus_common::{ShapeError, Watermark};
use serde_json::Value;

/// Key holding the list of homework records.
pub const HOMEWORKS_KEY: &str = "homeworks";

/// Key holding the server time of the response.
pub const CURRENT_DATE_KEY: &str = "current_date";

/// Checks that `raw` is an object with a `homeworks` array and returns
/// that array untouched. An empty array is valid.
pub fn validate(raw: &Value) -> Result<&[Value], ShapeError> {
    let fields = raw.as_object().ok_or(ShapeError::NotAMapping)?;

    match fields.get(HOMEWORKS_KEY) {
        None | Some(Value::Null) => Err(ShapeError::MissingKey),
        Some(Value::Array(records)) => Ok(records.as_slice()),
        Some(_) => Err(ShapeError::NotAList),
    }
}

/// The server time reported by the response, if it is an integer.
pub fn current_date(raw: &Value) -> Option<Watermark> {
    raw.get(CURRENT_DATE_KEY)?.as_i64().map(Watermark)
}
