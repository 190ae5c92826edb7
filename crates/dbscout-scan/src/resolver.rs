//! Link to folder resolution
//!
//! `https://pricing.mardens.com/mard_db/ABC%20Co/index.php` resolves to
//! `<share_root>/ABC Co`: the prefix is removed, the first `/` segment is
//! kept and percent-decoded.

use crate::error::ScanError;
use dbscout_core::{Config, Record};
use percent_encoding::percent_decode_str;
use serde_json::Value;
use std::path::PathBuf;

/// Derives each record's local folder from its `link`
#[derive(Debug, Clone)]
pub struct PathResolver {
    link_prefix: String,
    share_root: PathBuf,
}

impl PathResolver {
    pub fn new(link_prefix: impl Into<String>, share_root: impl Into<PathBuf>) -> Self {
        Self {
            link_prefix: link_prefix.into(),
            share_root: share_root.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.link_prefix.clone(), config.share_root.clone())
    }

    /// Decoded folder segment of `link`, or `None` when it is empty
    ///
    /// Only the first occurrence of the prefix is removed, wherever it sits.
    /// A decoded folder containing a path separator, or equal to `.` or `..`,
    /// is an error: the result must stay a direct child of the share root.
    pub fn folder_name(&self, link: &str) -> Result<Option<String>, ScanError> {
        let remainder = link.replacen(&self.link_prefix, "", 1);
        let segment = remainder.split('/').next().unwrap_or_default();

        let folder = decode_component(segment)
            .map_err(|reason| ScanError::PathDerivation(link.to_string(), reason))?;

        if folder.contains(['/', '\\']) || folder == "." || folder == ".." {
            return Err(ScanError::PathDerivation(
                link.to_string(),
                format!("folder {:?} would leave the share root", folder),
            ));
        }

        Ok(if folder.is_empty() { None } else { Some(folder) })
    }

    /// Local folder for `record`, or `None` when it has no usable link
    pub fn derive(&self, record: &Record) -> Result<Option<PathBuf>, ScanError> {
        let link = match record.link_value() {
            None | Some(Value::Null) => return Ok(None),
            Some(Value::String(link)) => link,
            Some(other) => {
                return Err(ScanError::PathDerivation(
                    other.to_string(),
                    "link is not a string".to_string(),
                ))
            }
        };

        Ok(self.folder_name(link)?.map(|folder| self.share_root.join(folder)))
    }

    /// Annotate every record that has a derivable folder
    ///
    /// Records that fail are logged and left untouched; none are removed.
    /// Returns the number of records annotated.
    pub fn resolve(&self, records: &mut [Record]) -> usize {
        let mut annotated = 0;

        for (index, record) in records.iter_mut().enumerate() {
            match self.derive(record) {
                Ok(Some(path)) => {
                    record.path = Some(path.to_string_lossy().into_owned());
                    annotated += 1;
                }
                Ok(None) => {
                    tracing::debug!(index, "record has no folder to resolve");
                }
                Err(e) => {
                    tracing::warn!(index, "{}", e);
                }
            }
        }

        annotated
    }
}

/// Strict percent-decoding: malformed escapes and non-UTF-8 output are errors
fn decode_component(segment: &str) -> Result<String, String> {
    let bytes = segment.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes.len() > i + 2
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit();
            if !valid {
                return Err(format!("malformed percent escape at byte {}", i));
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    percent_decode_str(segment)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| format!("decoded segment is not UTF-8: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "https://pricing.mardens.com/mard_db/";

    fn resolver() -> PathResolver {
        PathResolver::new(PREFIX, "/srv/mard_db")
    }

    #[test]
    fn decodes_first_segment() {
        let folder = resolver()
            .folder_name("https://pricing.mardens.com/mard_db/ABC%20Co/x")
            .unwrap();
        assert_eq!(folder.as_deref(), Some("ABC Co"));
    }

    #[test]
    fn derives_path_under_share_root() {
        let record = Record::with_link("https://pricing.mardens.com/mard_db/ABC%20Co/x");
        let path = resolver().derive(&record).unwrap();
        assert_eq!(path, Some(PathBuf::from("/srv/mard_db/ABC Co")));
    }

    #[test]
    fn link_without_trailing_path() {
        let folder = resolver().folder_name("https://pricing.mardens.com/mard_db/Store12").unwrap();
        assert_eq!(folder.as_deref(), Some("Store12"));
    }

    #[test]
    fn empty_segment_is_not_a_folder() {
        assert_eq!(resolver().folder_name(PREFIX).unwrap(), None);
        assert_eq!(
            resolver().folder_name("https://pricing.mardens.com/mard_db//x").unwrap(),
            None
        );
    }

    #[test]
    fn foreign_link_keeps_its_own_first_segment() {
        let folder = resolver().folder_name("https://other.example.com/a/b").unwrap();
        assert_eq!(folder.as_deref(), Some("https:"));
    }

    #[test]
    fn multibyte_escapes() {
        let folder = resolver()
            .folder_name("https://pricing.mardens.com/mard_db/Caf%C3%A9/")
            .unwrap();
        assert_eq!(folder.as_deref(), Some("Café"));
    }

    #[test]
    fn malformed_escapes_are_errors() {
        for link in [
            "https://pricing.mardens.com/mard_db/100%/",
            "https://pricing.mardens.com/mard_db/%ZZ/",
            "https://pricing.mardens.com/mard_db/%C3/",
        ] {
            let err = resolver().folder_name(link).unwrap_err();
            assert!(matches!(err, ScanError::PathDerivation(_, _)), "{}", link);
        }
    }

    #[test]
    fn encoded_separators_cannot_leave_share_root() {
        for link in [
            "https://pricing.mardens.com/mard_db/%2Fetc/x",
            "https://pricing.mardens.com/mard_db/a%2Fb/",
            "https://pricing.mardens.com/mard_db/..%5Cwindows/",
            "https://pricing.mardens.com/mard_db/%2E%2E/",
            "https://pricing.mardens.com/mard_db/./",
        ] {
            let err = resolver().folder_name(link).unwrap_err();
            assert!(matches!(err, ScanError::PathDerivation(_, _)), "{}", link);
        }

        let record = Record::with_link("https://pricing.mardens.com/mard_db/%2Fetc/x");
        assert!(resolver().derive(&record).is_err());

        let mut records = vec![record.clone()];
        assert_eq!(resolver().resolve(&mut records), 0);
        assert_eq!(records[0], record);
    }

    #[test]
    fn missing_or_null_link() {
        assert_eq!(resolver().derive(&Record::new()).unwrap(), None);

        let record: Record = serde_json::from_str(r#"{"link":null}"#).unwrap();
        assert_eq!(resolver().derive(&record).unwrap(), None);
    }

    #[test]
    fn non_string_link_is_an_error() {
        let record: Record = serde_json::from_str(r#"{"link":["a"]}"#).unwrap();
        assert!(resolver().derive(&record).is_err());
    }

    #[test]
    fn resolve_preserves_order_and_length() {
        let mut records = vec![
            Record::with_link("https://pricing.mardens.com/mard_db/One/"),
            Record::new(),
            Record::with_link("https://pricing.mardens.com/mard_db/%G0/"),
            Record::with_link(PREFIX),
            Record::with_link("https://pricing.mardens.com/mard_db/Two/index.php"),
        ];
        let untouched = records[2].clone();

        let annotated = resolver().resolve(&mut records);

        assert_eq!(annotated, 2);
        assert_eq!(records.len(), 5);
        assert_eq!(records[0].path.as_deref(), Some("/srv/mard_db/One"));
        assert_eq!(records[1], Record::new());
        assert_eq!(records[2], untouched);
        assert!(records[3].path.is_none());
        assert_eq!(records[4].path.as_deref(), Some("/srv/mard_db/Two"));
    }
}
