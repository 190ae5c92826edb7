//! Scan error types
//!
//! None of these abort a run. Each one narrows the data of the record, file
//! or line it belongs to and is logged by the caller.

/// Per-record and per-file failures
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Failed to derive path from link {0:?}: {1}")]
    PathDerivation(String, String),

    #[error("Failed to list directory {0}: {1}")]
    DirectoryList(String, String),

    #[error("Failed to read file {0}: {1}")]
    FileRead(String, String),
}

/// Why a config line was not taken as an assignment
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LineParseError {
    #[error("expected exactly one '=', found {0}")]
    SeparatorCount(usize),

    #[error("value is not double-quoted")]
    UnquotedValue,

    #[error("value contains whitespace")]
    WhitespaceInValue,

    #[error("value is empty once quotes are removed")]
    EmptyValue,
}
