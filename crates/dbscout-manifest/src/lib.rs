//! Site manifest retrieval
//!
//! The manifest is a JSON envelope whose `data` field holds the list of
//! site records. Sources implement [`ManifestSource`]:
//! - [`HttpManifestSource`] fetches the envelope over HTTP(S)
//! - [`StaticManifestSource`] serves a fixed envelope from memory
//!
//! ## Example
//!
//! ```rust,ignore
//! use dbscout_manifest::{HttpManifestSource, ManifestSource};
//!
//! let source = HttpManifestSource::new("https://fm.mardens.com/fmDataFiles/db_list.txt");
//! let records = source.fetch().await?;
//! ```

pub mod source;
pub mod http;
pub mod mock;

pub use http::HttpManifestSource;
pub use mock::StaticManifestSource;
pub use source::{parse_envelope, FetchError, ManifestSource};
