use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Live push connection counts
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SseStatsDto {
    pub global_connections: usize,
    /// Only documents with at least one subscriber
    pub doc_connections: BTreeMap<String, usize>,
    pub timestamp: DateTime<Utc>,
}
