//! Read-only view of the site share

use std::io;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// One entry of a site folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteEntry {
    /// File name (lossy UTF-8)
    pub name: String,

    /// Full path
    pub path: PathBuf,

    /// Entry is a directory (symlinks are not followed)
    pub is_dir: bool,
}

/// Filesystem operations the extractor needs
pub trait SiteFs {
    /// Entries directly inside `dir`, sorted by file name
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<SiteEntry>>;

    /// Whole file as text; invalid UTF-8 is replaced, not rejected
    fn read_file(&self, path: &Path) -> io::Result<String>;
}

impl<T: SiteFs + ?Sized> SiteFs for &T {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<SiteEntry>> {
        (**self).list_dir(dir)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        (**self).read_file(path)
    }
}

/// The real filesystem
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl SiteFs for LocalFs {
    fn list_dir(&self, dir: &Path) -> io::Result<Vec<SiteEntry>> {
        if !std::fs::metadata(dir)?.is_dir() {
            return Err(io::Error::new(io::ErrorKind::Other, "not a directory"));
        }

        let mut entries = Vec::new();

        for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
            match entry {
                Ok(entry) => entries.push(SiteEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    path: entry.path().to_path_buf(),
                    is_dir: entry.file_type().is_dir(),
                }),
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    tracing::warn!(dir = %dir.display(), "skipping unreadable entry: {}", e);
                }
            }
        }

        Ok(entries)
    }

    fn read_file(&self, path: &Path) -> io::Result<String> {
        let bytes = std::fs::read(path)?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }
}
