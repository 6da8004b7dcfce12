//! Detail table of problematic transactions.
//!
//! A transaction is problematic when it carries a refund or at least one
//! support ticket. The table is capped at a configured row limit; the cap
//! keeps the worst offenders because rows sort by refund first.

use chrono::NaiveDate;
use serde::Serialize;

use crate::config::ReportConfig;
use crate::filter::FilteredTable;
use crate::types::{ProductName, TransactionId};

/// One display row, projected onto the columns the table widget shows.
#[derive(Debug, Clone, Serialize)]
pub struct DetailRow {
    pub date: NaiveDate,
    pub transaction_id: TransactionId,
    pub product: ProductName,
    pub total_value: f64,
    pub refund_amount: f64,
    pub issue_category: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct DetailTable {
    /// Display labels, in column order.
    pub columns: Vec<String>,
    pub rows: Vec<DetailRow>,
}

pub fn build_detail_table(filtered: &FilteredTable, config: &ReportConfig) -> DetailTable {
    let mut rows: Vec<DetailRow> = filtered
        .rows()
        .iter()
        .filter(|t| t.refund_amount > 0.0 || t.ticket_count > 0)
        .map(|t| DetailRow {
            date: t.date,
            transaction_id: t.transaction_id.clone(),
            product: t.product.clone(),
            total_value: t.total_value,
            refund_amount: t.refund_amount,
            issue_category: t.issue_category.clone(),
        })
        .collect();

    // sort_by is stable: refund ties keep their pre-sort order.
    rows.sort_by(|a, b| b.refund_amount.total_cmp(&a.refund_amount));
    rows.truncate(config.detail_row_limit);

    DetailTable {
        columns: config.detail_labels.ordered(),
        rows,
    }
}
