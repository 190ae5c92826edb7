//! Manifest source trait and envelope parsing

use dbscout_core::Record;
use serde_json::Value;

/// Errors that can occur when fetching the manifest
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("Unexpected HTTP status {0} from {1}")]
    Status(u16, String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Failed to read manifest file {0}: {1}")]
    Read(String, String),
}

/// Anything that can produce the ordered list of site records
#[async_trait::async_trait]
pub trait ManifestSource: Send + Sync {
    /// Short name used in log lines
    fn name(&self) -> &str;

    /// Fetch every record, in manifest order
    ///
    /// Either the full list is returned or an error; never a partial list.
    async fn fetch(&self) -> Result<Vec<Record>, FetchError>;
}

/// Parse a manifest envelope into records
///
/// The `data` field may hold the array itself or a string that encodes it.
pub fn parse_envelope(body: &str) -> Result<Vec<Record>, FetchError> {
    let envelope: Value = serde_json::from_str(body)
        .map_err(|e| FetchError::InvalidResponse(format!("body is not JSON: {}", e)))?;

    let data = envelope
        .get("data")
        .ok_or_else(|| FetchError::InvalidResponse("missing `data` field".to_string()))?;

    let data = match data {
        Value::String(inner) => serde_json::from_str(inner)
            .map_err(|e| FetchError::InvalidResponse(format!("`data` string is not JSON: {}", e)))?,
        other => other.clone(),
    };

    if !data.is_array() {
        return Err(FetchError::InvalidResponse("`data` is not an array".to_string()));
    }

    serde_json::from_value(data)
        .map_err(|e| FetchError::InvalidResponse(format!("malformed record: {}", e)))
}
