//! The report engine. Owns the configuration and the loaded table.
//!
//! One engine serves one source table. Viewer sessions share the table
//! through the cache; each session keeps its own FilterParams and asks
//! the engine to recompute views when they change.

use std::path::Path;
use std::sync::Arc;

use crate::{
    cache::TableCache,
    config::ReportConfig,
    error::ReportResult,
    filter::{DateSelection, FilterParams},
    loader::NormalizedTable,
    views::{compute_views, DerivedViews},
};

pub struct ReportEngine {
    config: ReportConfig,
    table: Arc<NormalizedTable>,
}

impl ReportEngine {
    /// Load the source through the given cache and wire up an engine.
    pub fn open(
        config: ReportConfig,
        cache: &TableCache,
        source: &Path,
    ) -> ReportResult<Self> {
        let table = cache.load(source, &config)?;
        log::info!(
            "report engine ready: {} rows, {} products",
            table.len(),
            table.distinct_products().len()
        );
        Ok(Self { config, table })
    }

    /// Build an engine over an already-normalized table.
    pub fn from_table(config: ReportConfig, table: NormalizedTable) -> Self {
        Self {
            config,
            table: Arc::new(table),
        }
    }

    pub fn table(&self) -> &NormalizedTable {
        &self.table
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// Default controls: every product selected, full observed date range.
    pub fn default_filters(&self) -> FilterParams {
        let dates = match self.table.date_span() {
            Some((start, end)) => DateSelection::Range { start, end },
            None => DateSelection::All,
        };
        FilterParams {
            products: self.table.distinct_products(),
            dates,
        }
    }

    /// Recompute every derived view for the given parameters.
    pub fn compute_views(&self, params: &FilterParams) -> DerivedViews {
        compute_views(&self.table, params, &self.config)
    }
}
