//! Inventory output (output.json)
//!
//! The inventory is a bare JSON array of records, pretty-printed with four
//! spaces of indentation. It carries no timestamp, so unchanged inputs give
//! byte-identical files.

use crate::record::Record;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Records that made it through the pipeline
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    pub records: Vec<Record>,
}

impl Inventory {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Serialize to JSON with 4-space indentation
    pub fn to_json(&self) -> Result<String, OutputError> {
        let mut buf = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
        self.records
            .serialize(&mut ser)
            .map_err(|e| OutputError::Serialize(e.to_string()))?;

        String::from_utf8(buf).map_err(|e| OutputError::Serialize(e.to_string()))
    }

    /// Write to `path`, replacing any existing file
    ///
    /// Returns the absolute path that was written.
    pub fn save_to_file(&self, path: &Path) -> Result<PathBuf, OutputError> {
        let json = self.to_json()?;

        let absolute = if path.is_absolute() {
            path.to_path_buf()
        } else {
            std::env::current_dir()
                .map_err(|e| OutputError::Io(path.display().to_string(), e.to_string()))?
                .join(path)
        };

        std::fs::write(&absolute, json)
            .map_err(|e| OutputError::Io(absolute.display().to_string(), e.to_string()))?;

        Ok(absolute)
    }
}

/// Output errors
#[derive(Debug, thiserror::Error)]
pub enum OutputError {
    #[error("Failed to serialize inventory: {0}")]
    Serialize(String),

    #[error("Failed to write inventory to {0}: {1}")]
    Io(String, String),
}
