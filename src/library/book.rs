//! Book records as returned by the books API

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A book record.
///
/// The schema belongs to the remote API, so the record is kept as raw JSON
/// and passed back unchanged on save/update. The accessors below are for
/// display only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Book(Value);

impl Book {
    /// Build a minimal record from a title and optional author
    pub fn new(title: impl Into<String>, author: Option<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("title".to_string(), Value::String(title.into()));
        if let Some(author) = author {
            fields.insert("author".to_string(), Value::String(author));
        }
        Self(Value::Object(fields))
    }

    /// Wrap an arbitrary JSON value
    pub fn from_json(value: Value) -> Self {
        Self(value)
    }

    pub fn as_json(&self) -> &Value {
        &self.0
    }

    /// Record identifier, as used in `my-library/{id}` paths
    pub fn id(&self) -> Option<String> {
        ["id", "_id", "key"]
            .iter()
            .find_map(|k| match self.0.get(k)? {
                Value::String(s) => Some(s.clone()),
                Value::Number(n) => Some(n.to_string()),
                _ => None,
            })
    }

    pub fn title(&self) -> Option<&str> {
        self.0.get("title").and_then(Value::as_str)
    }

    /// Author, or a comma-joined author list
    pub fn author(&self) -> Option<String> {
        match self.0.get("author").or_else(|| self.0.get("authors"))? {
            Value::String(s) => Some(s.clone()),
            Value::Array(items) => {
                let names: Vec<&str> = items.iter().filter_map(Value::as_str).collect();
                (!names.is_empty()).then(|| names.join(", "))
            }
            _ => None,
        }
    }
}
