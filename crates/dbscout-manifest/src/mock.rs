//! In-memory manifest source
//!
//! Serves a fixed envelope body without touching the network. Useful for
//! tests and for replaying a saved manifest.
//!
//! ```rust,ignore
//! let source = StaticManifestSource::new(r#"{"data":[{"link":"https://..."}]}"#);
//! let records = source.fetch().await?;
//!
//! // Simulate an outage
//! let source = StaticManifestSource::failing("connection reset");
//! assert!(source.fetch().await.is_err());
//! ```

use crate::source::{parse_envelope, FetchError, ManifestSource};
use dbscout_core::Record;
use std::path::Path;

/// Manifest held in memory
pub struct StaticManifestSource {
    body: Result<String, String>,
}

impl StaticManifestSource {
    /// Serve `body` as the manifest envelope
    pub fn new(body: impl Into<String>) -> Self {
        Self {
            body: Ok(body.into()),
        }
    }

    /// Serve a saved envelope from disk
    pub fn from_file(path: &Path) -> Result<Self, FetchError> {
        let body = std::fs::read_to_string(path)
            .map_err(|e| FetchError::Read(path.display().to_string(), e.to_string()))?;
        Ok(Self::new(body))
    }

    /// Every fetch fails with a network error carrying `message`
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            body: Err(message.into()),
        }
    }
}

#[async_trait::async_trait]
impl ManifestSource for StaticManifestSource {
    fn name(&self) -> &str {
        "static"
    }

    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        match &self.body {
            Ok(body) => parse_envelope(body),
            Err(message) => Err(FetchError::Network(message.clone())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn serves_records_in_order() {
        let source = StaticManifestSource::new(
            r#"{"data":[{"link":"https://a/1"},{"link":"https://a/2"},{"link":"https://a/3"}]}"#,
        );
        let records = source.fetch().await.unwrap();

        let links: Vec<_> = records.iter().filter_map(|r| r.link()).collect();
        assert_eq!(links, vec!["https://a/1", "https://a/2", "https://a/3"]);
    }

    #[tokio::test]
    async fn failing_source() {
        let source = StaticManifestSource::failing("connection reset");
        let err = source.fetch().await.unwrap_err();
        assert_eq!(err.to_string(), "Network error: connection reset");
    }

    #[tokio::test]
    async fn invalid_body_fails_whole_fetch() {
        let source = StaticManifestSource::new(r#"{"data":[{"link":"ok"}, "oops"]}"#);
        assert!(matches!(source.fetch().await, Err(FetchError::InvalidResponse(_))));
    }

    #[test]
    fn missing_file() {
        let result = StaticManifestSource::from_file(Path::new("no/such/manifest.json"));
        assert!(matches!(result, Err(FetchError::Read(_, _))));
    }
}
