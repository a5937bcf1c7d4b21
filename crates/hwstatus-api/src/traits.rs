//! Source of raw homework status payloads.

use async_trait::async_trait;
use hwstatus_common::{Result, Watermark};
use serde_json::Value;

/// Anything that can answer "what changed since `watermark`".
#[async_trait]
pub trait StatusSource: Send + Sync {
    /// Fetches the raw JSON payload for statuses changed after `watermark`.
    ///
    /// The payload is returned unvalidated.
    async fn fetch_statuses(&self, watermark: Watermark) -> Result<Value>;
}
