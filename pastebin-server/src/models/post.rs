//! Post record

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One row of the `pastebin` table, serialized with its column names.
#[derive(Debug, Clone, PartialEq, Eq, FromRow, Serialize, Deserialize)]
pub struct Post {
    pub post_id: i32,
    pub post_title: Option<String>,
    pub post_description: Option<String>,
}
