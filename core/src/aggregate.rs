//! Chart-facing aggregate views.
//!
//! Both views are deterministic: descending by magnitude, ties keeping
//! the order in which the key first appears in the filtered table.

use std::collections::HashMap;

use serde::Serialize;

use crate::filter::FilteredTable;
use crate::types::ProductName;

/// One bar of the per-product refund chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductRefundRow {
    pub product: ProductName,
    pub refund_total: f64,
}

/// One slice of the issue-distribution chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IssueShareRow {
    pub category: String,
    pub count: u64,
    pub share_pct: f64,
}

/// Summed refunds per product, descending. Products with no refunds keep
/// a zero bar, so the view always covers every product in the subset.
pub fn refunds_by_product(filtered: &FilteredTable) -> Vec<ProductRefundRow> {
    let mut index: HashMap<ProductName, usize> = HashMap::new();
    let mut rows: Vec<ProductRefundRow> = Vec::new();

    for t in filtered.rows() {
        match index.get(&t.product) {
            Some(&i) => rows[i].refund_total += t.refund_amount,
            None => {
                index.insert(t.product.clone(), rows.len());
                rows.push(ProductRefundRow {
                    product: t.product.clone(),
                    refund_total: t.refund_amount,
                });
            }
        }
    }

    // sort_by is stable: equal sums keep first-appearance order.
    rows.sort_by(|a, b| b.refund_total.total_cmp(&a.refund_total));
    rows
}

/// Issue-category distribution, excluding the no-complaint sentinel.
///
/// An empty result means "nothing to chart": the consumer renders its
/// informational placeholder instead of an empty chart.
pub fn issue_distribution(
    filtered: &FilteredTable,
    no_complaint_label: &str,
) -> Vec<IssueShareRow> {
    let mut index: HashMap<String, usize> = HashMap::new();
    let mut rows: Vec<IssueShareRow> = Vec::new();

    for t in filtered.rows() {
        if t.issue_category == no_complaint_label {
            continue;
        }
        match index.get(&t.issue_category) {
            Some(&i) => rows[i].count += 1,
            None => {
                index.insert(t.issue_category.clone(), rows.len());
                rows.push(IssueShareRow {
                    category: t.issue_category.clone(),
                    count: 1,
                    share_pct: 0.0,
                });
            }
        }
    }

    let total: u64 = rows.iter().map(|r| r.count).sum();
    if total > 0 {
        for row in &mut rows {
            row.share_pct = row.count as f64 / total as f64 * 100.0;
        }
    }

    rows.sort_by(|a, b| b.count.cmp(&a.count));
    rows
}
