//! Resolve-then-extract pipeline
//!
//! Runs path resolution over every record, then extraction over every
//! record. Stages do not overlap and records are processed one at a time.

use crate::extractor::{ConnectionExtractor, ExtractionStats};
use crate::fs::{LocalFs, SiteFs};
use crate::resolver::PathResolver;
use dbscout_core::{Config, Inventory, Record};

pub struct Pipeline<F: SiteFs = LocalFs> {
    resolver: PathResolver,
    extractor: ConnectionExtractor<F>,
}

impl Pipeline<LocalFs> {
    /// Pipeline over the local filesystem, configured from `config`
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            PathResolver::from_config(config),
            ConnectionExtractor::local(config.extensions.clone()),
        )
    }
}

impl<F: SiteFs> Pipeline<F> {
    pub fn new(resolver: PathResolver, extractor: ConnectionExtractor<F>) -> Self {
        Self { resolver, extractor }
    }

    /// Turn fetched records into the final inventory
    pub fn run(&self, mut records: Vec<Record>) -> (Inventory, ExtractionStats) {
        let annotated = self.resolver.resolve(&mut records);
        tracing::debug!(annotated, total = records.len(), "paths resolved");

        let extraction = self.extractor.extract(records);
        tracing::debug!(kept = extraction.records.len(), "connections extracted");

        (Inventory::new(extraction.records), extraction.stats)
    }
}
