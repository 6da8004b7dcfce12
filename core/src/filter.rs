//! Viewer filter parameters and the filter stage.
//!
//! Filtering keeps rows whose product is in the selected set AND, when a
//! full date range is given, whose date lies within it (inclusive at both
//! ends). A degenerate date selection applies the product predicate alone.

use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::loader::{NormalizedTable, Transaction};
use crate::types::ProductName;

/// The viewer's date selection.
///
/// A range control mid-edit yields a single endpoint; that shape is
/// `Partial` and constrains nothing. This is recovery, not an error, and
/// is never surfaced to the viewer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DateSelection {
    All,
    Partial { date: NaiveDate },
    Range { start: NaiveDate, end: NaiveDate },
}

impl DateSelection {
    /// The inclusive bounds to enforce, if the selection is a full range.
    pub fn bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        match self {
            DateSelection::Range { start, end } => Some((*start, *end)),
            DateSelection::Partial { .. } | DateSelection::All => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterParams {
    /// Selected product names. An empty selection is valid and matches
    /// nothing.
    pub products: Vec<ProductName>,
    pub dates: DateSelection,
}

/// The working subset produced by the filter stage.
/// Rows keep their source order.
#[derive(Debug, Clone)]
pub struct FilteredTable {
    rows: Vec<Transaction>,
}

impl FilteredTable {
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
}

/// Apply the viewer's filters. The input table is never mutated.
pub fn apply_filters(table: &NormalizedTable, params: &FilterParams) -> FilteredTable {
    let selected: HashSet<&str> = params.products.iter().map(String::as_str).collect();
    let bounds = params.dates.bounds();

    let rows = table
        .rows()
        .iter()
        .filter(|t| selected.contains(t.product.as_str()))
        .filter(|t| match bounds {
            Some((start, end)) => t.date >= start && t.date <= end,
            None => true,
        })
        .cloned()
        .collect();

    FilteredTable { rows }
}
