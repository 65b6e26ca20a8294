//! Untyped body fields bound to text columns
//!
//! Request bodies are not validated: whatever JSON arrives in a field is
//! handed to the database as text, or as NULL when absent.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// A body field destined for a text column.
///
/// - missing or `null` → SQL NULL
/// - string → the string itself
/// - array → a PostgreSQL array literal (`[1,"a"]` → `{"1","a"}`)
/// - anything else → its JSON text (`5`, `true`, `{"a":1}`)
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LooseText(Option<String>);

impl LooseText {
    pub fn from_json(value: Option<Value>) -> Self {
        match value {
            None | Some(Value::Null) => Self(None),
            Some(Value::String(s)) => Self(Some(s)),
            Some(Value::Array(items)) => Self(Some(array_literal(&items))),
            Some(other) => Self(Some(other.to_string())),
        }
    }

    pub fn as_deref(&self) -> Option<&str> {
        self.0.as_deref()
    }

    pub fn into_inner(self) -> Option<String> {
        self.0
    }
}

/// Elements are quoted, nulls stay bare, nested arrays nest.
fn array_literal(items: &[Value]) -> String {
    let elements: Vec<String> = items
        .iter()
        .map(|item| match item {
            Value::Null => "NULL".to_string(),
            Value::Array(inner) => array_literal(inner),
            Value::String(s) => quote_element(s),
            other => quote_element(&other.to_string()),
        })
        .collect();

    format!("{{{}}}", elements.join(","))
}

fn quote_element(s: &str) -> String {
    format!("\"{}\"", s.replace('\\', "\\\\").replace('"', "\\\""))
}

impl<'de> Deserialize<'de> for LooseText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<Value>::deserialize(deserializer).map(Self::from_json)
    }
}
