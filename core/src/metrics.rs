//! Summary metrics: the KPI row of the report.
//!
//! Every sum over an empty table is 0; an empty table is an ordinary
//! input here, never an error.

use serde::{Deserialize, Serialize};

use crate::{config::ReportConfig, filter::FilteredTable};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_revenue: f64,
    pub total_refunds: f64,
    /// Share of filtered rows with a positive refund, in [0, 100].
    pub return_rate_pct: f64,
    pub total_tickets: u64,
    /// Populated only when the config surfaces the fourth metric.
    pub net_revenue: Option<f64>,
}

pub fn compute_metrics(filtered: &FilteredTable, config: &ReportConfig) -> SummaryMetrics {
    let rows = filtered.rows();

    let total_revenue: f64 = rows.iter().map(|t| t.total_value).sum();
    let total_refunds: f64 = rows.iter().map(|t| t.refund_amount).sum();
    let total_tickets: u64 = rows.iter().map(|t| t.ticket_count).sum();

    let refunded_rows = rows.iter().filter(|t| t.refund_amount > 0.0).count();
    let return_rate_pct = if rows.is_empty() {
        0.0
    } else {
        refunded_rows as f64 / rows.len() as f64 * 100.0
    };

    // Rows without a source Net_Revenue column derive it.
    let net_revenue = config.show_net_revenue.then(|| {
        rows.iter()
            .map(|t| t.net_revenue.unwrap_or(t.total_value - t.refund_amount))
            .sum()
    });

    SummaryMetrics {
        total_revenue,
        total_refunds,
        return_rate_pct,
        total_tickets,
        net_revenue,
    }
}
