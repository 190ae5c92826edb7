//! HTTP manifest source
//!
//! Issues a single GET against the manifest URL. No retries and no explicit
//! timeout; the client defaults apply.

use crate::source::{parse_envelope, FetchError, ManifestSource};
use dbscout_core::Record;

/// Manifest served over HTTP(S)
pub struct HttpManifestSource {
    url: String,
    client: reqwest::Client,
}

impl HttpManifestSource {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait::async_trait]
impl ManifestSource for HttpManifestSource {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self) -> Result<Vec<Record>, FetchError> {
        tracing::debug!(url = %self.url, "fetching manifest");

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16(), self.url.clone()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let records = parse_envelope(&body)?;
        tracing::debug!(count = records.len(), "manifest parsed");
        Ok(records)
    }
}
