//! The derived-view pipeline.
//!
//! RULE: compute_views is pure. The hosting UI recomputes on every filter
//! change and swaps whole views; nothing here mutates the table or keeps
//! state between calls.
//!
//! STAGE ORDER (fixed, documented, never reordered):
//!   1. filter
//!   2. summary metrics
//!   3. refunds-by-product aggregate
//!   4. issue distribution
//!   5. detail table

use serde::Serialize;

use crate::{
    aggregate::{issue_distribution, refunds_by_product, IssueShareRow, ProductRefundRow},
    config::ReportConfig,
    detail::{build_detail_table, DetailTable},
    filter::{apply_filters, FilterParams},
    loader::NormalizedTable,
    metrics::{compute_metrics, SummaryMetrics},
};

/// Everything the dashboard renders for one filter-parameter set.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedViews {
    pub metrics: SummaryMetrics,
    pub refunds_by_product: Vec<ProductRefundRow>,
    /// Empty when every filtered row is the no-complaint sentinel; the
    /// consumer renders its placeholder, never an empty chart.
    pub issue_distribution: Vec<IssueShareRow>,
    pub detail: DetailTable,
}

pub fn compute_views(
    table: &NormalizedTable,
    params: &FilterParams,
    config: &ReportConfig,
) -> DerivedViews {
    let filtered = apply_filters(table, params);
    log::debug!("filter kept {} of {} rows", filtered.len(), table.len());

    DerivedViews {
        metrics: compute_metrics(&filtered, config),
        refunds_by_product: refunds_by_product(&filtered),
        issue_distribution: issue_distribution(&filtered, &config.no_complaint_label),
        detail: build_detail_table(&filtered, config),
    }
}
