//! Result metadata for statements that return no rows

use serde::Serialize;
use serde_json::Value as JsonValue;

/// Command result as reported to clients of `POST /input`.
///
/// Mirrors a driver result object: the command tag, the affected row count,
/// and empty `rows`/`fields` since the statement returns nothing.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommandOutcome {
    pub command: &'static str,
    pub row_count: u64,
    pub oid: u32,
    pub rows: Vec<JsonValue>,
    pub fields: Vec<JsonValue>,
}

impl CommandOutcome {
    pub fn insert(row_count: u64) -> Self {
        Self {
            command: "INSERT",
            row_count,
            oid: 0,
            rows: Vec::new(),
            fields: Vec::new(),
        }
    }
}
