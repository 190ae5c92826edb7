//! Configuration schema (dbscout.toml)
//!
//! Every key is optional. The defaults describe the production deployment,
//! so a run without a config file needs no setup at all.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Manifest endpoint listing every site
pub const DEFAULT_MANIFEST_URL: &str = "https://fm.mardens.com/fmDataFiles/db_list.txt";

/// Prefix stripped from each `link` before taking the folder segment
pub const DEFAULT_LINK_PREFIX: &str = "https://pricing.mardens.com/mard_db/";

/// Shared directory that holds one folder per site
pub const DEFAULT_SHARE_ROOT: &str = r"\\192.168.21.207\c$\inetpub\wwwroot\PricingWebSite\mard_db";

/// Output file name, relative to the working directory
pub const DEFAULT_OUTPUT: &str = "output.json";

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL of the site manifest
    pub manifest_url: String,

    /// URL prefix removed from `link` values
    pub link_prefix: String,

    /// Root directory the site folders live under
    pub share_root: PathBuf,

    /// File name suffixes that are scanned (case-sensitive)
    pub extensions: Vec<String>,

    /// Where the inventory is written
    pub output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            manifest_url: DEFAULT_MANIFEST_URL.to_string(),
            link_prefix: DEFAULT_LINK_PREFIX.to_string(),
            share_root: PathBuf::from(DEFAULT_SHARE_ROOT),
            extensions: vec![".php".to_string(), ".json".to_string()],
            output: PathBuf::from(DEFAULT_OUTPUT),
        }
    }
}

impl Config {
    /// Load config from TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::IoError(path.display().to_string(), e.to_string()))?;

        Self::from_toml(&contents)
    }

    /// Load config from TOML string
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        toml::from_str(toml)
            .map_err(|e| ConfigError::ParseError(e.to_string()))
    }
}

/// Config error types
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {0}: {1}")]
    IoError(String, String),

    #[error("Parse error: {0}")]
    ParseError(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert_eq!(config.manifest_url, DEFAULT_MANIFEST_URL);
        assert_eq!(config.link_prefix, DEFAULT_LINK_PREFIX);
        assert_eq!(config.extensions, vec![".php", ".json"]);
        assert_eq!(config.output, PathBuf::from("output.json"));
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = Config::from_toml(r#"share_root = "/mnt/mard_db""#).unwrap();
        assert_eq!(config.share_root, PathBuf::from("/mnt/mard_db"));
        assert_eq!(config.manifest_url, DEFAULT_MANIFEST_URL);
        assert_eq!(config.output, PathBuf::from(DEFAULT_OUTPUT));
    }

    #[test]
    fn full_toml() {
        let toml = r#"
            manifest_url = "http://localhost:8080/db_list.txt"
            link_prefix = "http://localhost/mard_db/"
            share_root = "/srv/sites"
            extensions = [".php"]
            output = "inventory.json"
        "#;

        let config = Config::from_toml(toml).unwrap();
        assert_eq!(config.manifest_url, "http://localhost:8080/db_list.txt");
        assert_eq!(config.link_prefix, "http://localhost/mard_db/");
        assert_eq!(config.extensions, vec![".php"]);
        assert_eq!(config.output, PathBuf::from("inventory.json"));
    }

    #[test]
    fn invalid_toml() {
        let err = Config::from_toml("extensions = 3").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn missing_file() {
        let err = Config::from_file(Path::new("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_, _)));
    }
}
