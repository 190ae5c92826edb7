//! Connection extraction
//!
//! For every record with a `path`, the folder is listed (non-recursively)
//! and each file with a recognised extension is read line by line. Lines
//! that parse as assignments set `connection.db_name` or `connection.table`;
//! later assignments overwrite earlier ones.
//!
//! Once both identifiers are set, no further files are opened for that
//! record. The check runs before each file, so the file that completed the
//! pair is still read to its end.
//!
//! Failures are scoped: a bad line skips the line, an unreadable file skips
//! the file, an unlistable folder leaves the record's connection empty.

use crate::error::{LineParseError, ScanError};
use crate::fs::{LocalFs, SiteFs};
use crate::line::{parse_line, ConnectionField};
use dbscout_core::{Connection, Record};
use std::path::Path;

/// Counters accumulated over one extraction pass
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExtractionStats {
    /// Records seen, before filtering
    pub records: usize,

    /// Records that had a path to scan
    pub records_scanned: usize,

    /// Database-name assignments applied
    pub db_names_found: usize,

    /// Table-name assignments applied
    pub tables_found: usize,

    /// Files opened and read
    pub files_read: usize,

    /// Folders that could not be listed
    pub directory_failures: usize,

    /// Files that could not be read
    pub file_failures: usize,
}

impl ExtractionStats {
    /// Database-name assignments per record (0.0 when there are no records)
    pub fn db_name_rate(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        self.db_names_found as f64 / self.records as f64
    }

    /// Table-name assignments per record (0.0 when there are no records)
    pub fn table_rate(&self) -> f64 {
        if self.records == 0 {
            return 0.0;
        }
        self.tables_found as f64 / self.records as f64
    }
}

/// Output of an extraction pass
#[derive(Debug, Clone)]
pub struct Extraction {
    /// Records with both identifiers, in manifest order
    pub records: Vec<Record>,

    pub stats: ExtractionStats,
}

/// Mines site folders for database identifiers
pub struct ConnectionExtractor<F: SiteFs = LocalFs> {
    fs: F,
    extensions: Vec<String>,
}

impl ConnectionExtractor<LocalFs> {
    /// Extractor over the local filesystem
    pub fn local(extensions: Vec<String>) -> Self {
        Self::new(LocalFs, extensions)
    }
}

impl<F: SiteFs> ConnectionExtractor<F> {
    pub fn new(fs: F, extensions: Vec<String>) -> Self {
        Self { fs, extensions }
    }

    /// File name ends with one of the recognised extensions
    pub fn is_candidate(&self, name: &str) -> bool {
        self.extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Scan every record and keep those with both identifiers
    pub fn extract(&self, mut records: Vec<Record>) -> Extraction {
        let mut stats = ExtractionStats {
            records: records.len(),
            ..ExtractionStats::default()
        };

        for (index, record) in records.iter_mut().enumerate() {
            let mut connection = Connection::default();

            if let Some(path) = record.path.as_deref() {
                stats.records_scanned += 1;

                if let Err(e) = self.scan_directory(Path::new(path), &mut connection, &mut stats) {
                    stats.directory_failures += 1;
                    tracing::warn!(index, "{}", e);
                }
            }

            record.connection = Some(connection);
        }

        let records = records.into_iter().filter(Record::has_connection).collect();

        Extraction { records, stats }
    }

    /// Scan the files directly inside `dir`
    pub fn scan_directory(
        &self,
        dir: &Path,
        connection: &mut Connection,
        stats: &mut ExtractionStats,
    ) -> Result<(), ScanError> {
        let entries = self
            .fs
            .list_dir(dir)
            .map_err(|e| ScanError::DirectoryList(dir.display().to_string(), e.to_string()))?;

        for entry in entries {
            if connection.is_complete() {
                break;
            }

            if entry.is_dir || !self.is_candidate(&entry.name) {
                continue;
            }

            if let Err(e) = self.scan_file(&entry.path, connection, stats) {
                stats.file_failures += 1;
                tracing::warn!("{}", e);
            }
        }

        Ok(())
    }

    /// Scan every line of one file
    pub fn scan_file(
        &self,
        path: &Path,
        connection: &mut Connection,
        stats: &mut ExtractionStats,
    ) -> Result<(), ScanError> {
        let content = self
            .fs
            .read_file(path)
            .map_err(|e| ScanError::FileRead(path.display().to_string(), e.to_string()))?;

        stats.files_read += 1;

        for (number, line) in content.split('\n').enumerate() {
            if let Err(e) = scan_line(line, connection, stats) {
                tracing::trace!(file = %path.display(), line = number + 1, "skipped: {}", e);
            }
        }

        Ok(())
    }
}

/// Apply one line to `connection`
///
/// Returns the field that was set, if any.
pub fn scan_line(
    line: &str,
    connection: &mut Connection,
    stats: &mut ExtractionStats,
) -> Result<Option<ConnectionField>, LineParseError> {
    let Some(assignment) = parse_line(line)? else {
        return Ok(None);
    };

    let field = assignment.field();
    match field {
        Some(ConnectionField::DbName) => {
            connection.db_name = Some(assignment.value);
            stats.db_names_found += 1;
        }
        Some(ConnectionField::Table) => {
            connection.table = Some(assignment.value);
            stats.tables_found += 1;
        }
        None => {}
    }

    Ok(field)
}
