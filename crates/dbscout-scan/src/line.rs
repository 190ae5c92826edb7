//! `key="value"` line parsing
//!
//! Site folders hold PHP and JSON files written by hand over many years, with
//! no common naming. A line is accepted when it has exactly one `=` and a
//! double-quoted value without whitespace. Keys are then matched by substring
//! against two small vocabularies.
//!
//! The match is deliberately loose: any key containing `db` counts as a
//! database key. Database keys are checked before table keys, so a key that
//! matches both families is a database key.

use crate::error::LineParseError;

/// Substrings marking a database-name key, in match order
pub const DATABASE_KEYS: [&str; 4] = ["db_name", "database_name", "database", "db"];

/// Substrings marking a table-name key, in match order
pub const TABLE_KEYS: [&str; 4] = ["table", "layout", "table_name", "layout_name"];

/// Which connection identifier a key sets
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionField {
    DbName,
    Table,
}

/// A well-formed assignment line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Assignment {
    /// Trimmed, lowercased key
    pub key: String,

    /// Value with every `"` removed
    pub value: String,
}

impl Assignment {
    /// Connection identifier this assignment sets, if any
    pub fn field(&self) -> Option<ConnectionField> {
        classify_key(&self.key)
    }
}

/// Classify a normalized key; database family wins
pub fn classify_key(key: &str) -> Option<ConnectionField> {
    if DATABASE_KEYS.iter().any(|needle| key.contains(needle)) {
        Some(ConnectionField::DbName)
    } else if TABLE_KEYS.iter().any(|needle| key.contains(needle)) {
        Some(ConnectionField::Table)
    } else {
        None
    }
}

/// Parse one line
///
/// `Ok(None)` for an empty line; an error for any line that is not a usable
/// assignment. Lines are never partially parsed.
pub fn parse_line(line: &str) -> Result<Option<Assignment>, LineParseError> {
    if line.is_empty() {
        return Ok(None);
    }

    let separators = line.matches('=').count();
    let Some((key, value)) = line.split_once('=').filter(|_| separators == 1) else {
        return Err(LineParseError::SeparatorCount(separators));
    };

    let key = key.trim().to_lowercase();
    let value = value.trim();

    if !value.starts_with('"') {
        return Err(LineParseError::UnquotedValue);
    }
    if value.chars().any(char::is_whitespace) {
        return Err(LineParseError::WhitespaceInValue);
    }

    let value = value.replace('"', "");
    if value.is_empty() {
        return Err(LineParseError::EmptyValue);
    }

    Ok(Some(Assignment { key, value }))
}
