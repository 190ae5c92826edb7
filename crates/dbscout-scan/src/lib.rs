//! Site folder scanning
//!
//! This crate handles:
//! - Deriving each record's local folder from its `link`
//! - Listing that folder and reading recognised config files
//! - Mining `key="value"` lines for a database and a table name
//! - Dropping records where either identifier is missing

pub mod error;
pub mod resolver;
pub mod line;
pub mod fs;
pub mod extractor;
pub mod pipeline;

pub use error::{LineParseError, ScanError};
pub use extractor::{ConnectionExtractor, Extraction, ExtractionStats};
pub use fs::{LocalFs, SiteEntry, SiteFs};
pub use line::{classify_key, parse_line, Assignment, ConnectionField};
pub use pipeline::Pipeline;
pub use resolver::PathResolver;
