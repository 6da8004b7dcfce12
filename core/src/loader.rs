//! CSV transaction loader and normalizer.
//!
//! Expected CSV columns:
//!   Date, Transaction_ID, Product_Name, Total_Value, Refund_Amount,
//!   Ticket_Count, Issue_Category, and optionally Net_Revenue.
//!
//! Normalization: dates parsed to NaiveDate, empty Ticket_Count cells
//! become 0, issue categories mapped through the configured translation
//! table. Transaction ids must be unique within one source file.

use std::collections::HashSet;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::{
    config::ReportConfig,
    error::{ReportError, ReportResult},
    types::{ProductName, TransactionId},
};

/// One raw CSV record, field names as they appear in the source header.
#[derive(Debug, Clone, Deserialize)]
struct RawRecord {
    #[serde(rename = "Date")]
    date: String,
    #[serde(rename = "Transaction_ID")]
    transaction_id: String,
    #[serde(rename = "Product_Name")]
    product: String,
    #[serde(rename = "Total_Value")]
    total_value: f64,
    #[serde(rename = "Refund_Amount")]
    refund_amount: f64,
    #[serde(rename = "Ticket_Count")]
    ticket_count: Option<f64>,
    #[serde(rename = "Issue_Category")]
    issue_category: String,
    #[serde(rename = "Net_Revenue", default)]
    net_revenue: Option<f64>,
}

/// One normalized sales event.
#[derive(Debug, Clone, Serialize)]
pub struct Transaction {
    pub transaction_id: TransactionId,
    pub product: ProductName,
    pub date: NaiveDate,
    pub total_value: f64,
    pub refund_amount: f64,
    pub ticket_count: u64,
    /// Post-translation display label.
    pub issue_category: String,
    /// Present only when the source carries a Net_Revenue column.
    pub net_revenue: Option<f64>,
}

/// The transaction table after normalization. Immutable once built.
#[derive(Debug, Clone)]
pub struct NormalizedTable {
    rows: Vec<Transaction>,
}

impl NormalizedTable {
    pub fn from_rows(rows: Vec<Transaction>) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Distinct product names, sorted. This is what populates the
    /// product-selection control.
    pub fn distinct_products(&self) -> Vec<ProductName> {
        let mut products: Vec<ProductName> =
            self.rows.iter().map(|t| t.product.clone()).collect();
        products.sort();
        products.dedup();
        products
    }

    /// Observed (min, max) transaction dates. None for an empty table.
    pub fn date_span(&self) -> Option<(NaiveDate, NaiveDate)> {
        let min = self.rows.iter().map(|t| t.date).min()?;
        let max = self.rows.iter().map(|t| t.date).max()?;
        Some((min, max))
    }
}

/// Load and normalize transactions from any reader.
pub fn load_transactions<R: Read>(
    reader: R,
    config: &ReportConfig,
) -> ReportResult<NormalizedTable> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    let mut seen_ids: HashSet<TransactionId> = HashSet::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        // Line 1 is the header.
        let line = idx + 2;
        let raw: RawRecord = result?;

        let date = parse_date(&raw.date, line)?;
        if !seen_ids.insert(raw.transaction_id.clone()) {
            return Err(ReportError::DuplicateTransaction {
                id: raw.transaction_id,
                line,
            });
        }

        rows.push(Transaction {
            transaction_id: raw.transaction_id,
            product: raw.product,
            date,
            total_value: raw.total_value,
            refund_amount: raw.refund_amount,
            ticket_count: raw.ticket_count.unwrap_or(0.0).round() as u64,
            issue_category: config.translate_category(&raw.issue_category),
            net_revenue: raw.net_revenue,
        });
    }

    log::debug!("loaded {} transactions", rows.len());
    Ok(NormalizedTable::from_rows(rows))
}

/// Load and normalize transactions from a CSV file path.
pub fn load_transactions_file(
    path: &Path,
    config: &ReportConfig,
) -> ReportResult<NormalizedTable> {
    let file = std::fs::File::open(path).map_err(|source| ReportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_transactions(BufReader::new(file), config)
}

/// Parse a date cell. Plain dates first, then the timestamp form some
/// exports produce.
fn parse_date(value: &str, line: usize) -> ReportResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S") {
        return Ok(dt.date());
    }
    Err(ReportError::DateParse {
        value: value.to_string(),
        line,
    })
}
