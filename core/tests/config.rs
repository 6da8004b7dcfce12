use opsboard_core::config::ReportConfig;

// ── Tests ────────────────────────────────────────────────────────────────────

/// The in-code defaults match the standard report: top-10 detail table,
/// three metrics, the fixed category dictionary.
#[test]
fn defaults_describe_the_standard_report() {
    let config = ReportConfig::default();

    assert_eq!(config.detail_row_limit, 10);
    assert!(!config.show_net_revenue);
    assert_eq!(config.no_complaint_label, "No complaint");
    assert_eq!(config.translate_category("Product Defect"), "Product defect");
    assert_eq!(config.translate_category("Shipping Issue"), "Shipping problem");
    assert_eq!(config.translate_category("Refund Request"), "Refund request");
}

/// Categories outside the dictionary pass through unchanged.
#[test]
fn unknown_categories_pass_through() {
    let config = ReportConfig::default();
    assert_eq!(config.translate_category("Late Delivery"), "Late Delivery");
}

/// A partial config file keeps defaults for everything it omits.
#[test]
fn partial_config_files_keep_defaults() {
    let config: ReportConfig =
        serde_json::from_str(r#"{ "detail_row_limit": 20, "show_net_revenue": true }"#).unwrap();

    assert_eq!(config.detail_row_limit, 20);
    assert!(config.show_net_revenue);
    assert_eq!(config.no_complaint_label, "No complaint");
    assert_eq!(config.detail_labels.date, "Date");
    assert_eq!(config.currency, "€");
}

/// A config file can replace the translation dictionary wholesale.
#[test]
fn translations_are_replaceable_from_file() {
    let config: ReportConfig = serde_json::from_str(
        r#"{
            "translations": { "Product Defect": "Produkta defekts" },
            "no_complaint_label": "Nav sūdzību"
        }"#,
    )
    .unwrap();

    assert_eq!(config.translate_category("Product Defect"), "Produkta defekts");
    // Entries dropped from the dictionary now pass through.
    assert_eq!(config.translate_category("Shipping Issue"), "Shipping Issue");
    assert_eq!(config.no_complaint_label, "Nav sūdzību");
}

/// Loading a missing config file is an error that names the path.
#[test]
fn missing_config_file_names_the_path() {
    let err = ReportConfig::load("/no/such/report_config.json").unwrap_err();
    assert!(err.to_string().contains("/no/such/report_config.json"));
}
