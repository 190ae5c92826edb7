//! Site records
//!
//! A `Record` is one manifest entry. It keeps every field the manifest
//! supplied, in source order, and is enriched in place with the derived
//! `path` and the discovered `connection`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Database identifiers discovered for a site
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Connection {
    /// Database name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_name: Option<String>,

    /// Table (or layout) name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
}

impl Connection {
    /// Both identifiers have been found
    pub fn is_complete(&self) -> bool {
        self.db_name.is_some() && self.table.is_some()
    }
}

/// One site entry from the manifest
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Manifest fields, untouched (including `link`)
    #[serde(flatten)]
    pub fields: Map<String, Value>,

    /// Local directory derived from `link`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Identifiers found under `path`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection: Option<Connection>,
}

impl Record {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a record carrying only a `link`
    pub fn with_link(link: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert("link".to_string(), Value::String(link.into()));
        Self {
            fields,
            ..Self::default()
        }
    }

    /// Raw `link` value, whatever its JSON type
    pub fn link_value(&self) -> Option<&Value> {
        self.fields.get("link")
    }

    /// `link` if it is present and a string
    pub fn link(&self) -> Option<&str> {
        self.link_value().and_then(Value::as_str)
    }

    /// True once the extractor found both identifiers
    pub fn has_connection(&self) -> bool {
        self.connection.as_ref().is_some_and(Connection::is_complete)
    }
}
