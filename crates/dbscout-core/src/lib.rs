//! dbscout core
//!
//! Shared domain model for the site inventory pipeline: the `Record` that
//! flows through every stage, the run configuration, and the JSON sink the
//! final inventory is written to.

pub mod record;
pub mod config;
pub mod inventory;

pub use config::{Config, ConfigError};
pub use inventory::{Inventory, OutputError};
pub use record::{Connection, Record};
