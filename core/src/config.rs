//! Report configuration: view limits, category translations, display labels.
//!
//! Loaded once from a JSON file at startup, or built from in-code defaults
//! when no file is given. In tests, use ReportConfig::default().

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Display labels for the six detail-table columns, in render order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailLabels {
    pub date: String,
    pub transaction: String,
    pub product: String,
    pub value: String,
    pub refunded: String,
    pub reason: String,
}

impl DetailLabels {
    /// The labels in the order the detail table renders its columns.
    pub fn ordered(&self) -> Vec<String> {
        vec![
            self.date.clone(),
            self.transaction.clone(),
            self.product.clone(),
            self.value.clone(),
            self.refunded.clone(),
            self.reason.clone(),
        ]
    }
}

impl Default for DetailLabels {
    fn default() -> Self {
        Self {
            date: "Date".into(),
            transaction: "Transaction".into(),
            product: "Product".into(),
            value: "Value".into(),
            refunded: "Refunded".into(),
            reason: "Reason".into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Row cap for the problematic-transaction detail table.
    #[serde(default = "default_detail_row_limit")]
    pub detail_row_limit: usize,

    /// Surface the derived net-revenue figure as a fourth metric.
    #[serde(default)]
    pub show_net_revenue: bool,

    /// Source category -> display label.
    /// Categories not listed here pass through unchanged.
    #[serde(default = "standard_translations")]
    pub translations: HashMap<String, String>,

    /// The category meaning "nothing went wrong". The issue-distribution
    /// view excludes rows carrying this label.
    #[serde(default = "default_no_complaint_label")]
    pub no_complaint_label: String,

    #[serde(default)]
    pub detail_labels: DetailLabels,

    /// Currency symbol used by text renderings of monetary metrics.
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_detail_row_limit() -> usize {
    10
}

fn default_no_complaint_label() -> String {
    "No complaint".into()
}

fn default_currency() -> String {
    "€".into()
}

fn standard_translations() -> HashMap<String, String> {
    HashMap::from([
        ("Product Defect".to_string(), "Product defect".to_string()),
        ("Shipping Issue".to_string(), "Shipping problem".to_string()),
        ("Refund Request".to_string(), "Refund request".to_string()),
        ("No complaint".to_string(), default_no_complaint_label()),
    ])
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            detail_row_limit: default_detail_row_limit(),
            show_net_revenue: false,
            translations: standard_translations(),
            no_complaint_label: default_no_complaint_label(),
            detail_labels: DetailLabels::default(),
            currency: default_currency(),
        }
    }
}

impl ReportConfig {
    /// Load from a JSON file. Keys missing from the file keep their defaults.
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Cannot read {path}: {e}"))?;
        let config: ReportConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Map a source category to its display label.
    /// Unknown categories pass through unchanged.
    pub fn translate_category(&self, source: &str) -> String {
        self.translations
            .get(source)
            .cloned()
            .unwrap_or_else(|| source.to_string())
    }
}
