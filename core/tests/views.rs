use chrono::NaiveDate;
use opsboard_core::config::ReportConfig;
use opsboard_core::engine::ReportEngine;
use opsboard_core::filter::{DateSelection, FilterParams};
use opsboard_core::loader::{NormalizedTable, Transaction};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

fn txn(id: &str, product: &str, day: &str, refund: f64, issue: &str) -> Transaction {
    Transaction {
        transaction_id: id.into(),
        product: product.into(),
        date: date(day),
        total_value: 100.0,
        refund_amount: refund,
        ticket_count: 0,
        issue_category: issue.into(),
        net_revenue: None,
    }
}

/// Reference table: product A refunds (10, 0, 5), product B refunds
/// (0, 0).
fn make_engine() -> ReportEngine {
    let table = NormalizedTable::from_rows(vec![
        txn("T-1", "A", "2024-01-10", 10.0, "Product defect"),
        txn("T-2", "A", "2024-01-12", 0.0, "No complaint"),
        txn("T-3", "A", "2024-02-01", 5.0, "Refund request"),
        txn("T-4", "B", "2024-02-10", 0.0, "No complaint"),
        txn("T-5", "B", "2024-03-01", 0.0, "No complaint"),
    ]);
    ReportEngine::from_table(ReportConfig::default(), table)
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Default filters select every product over the full observed range.
#[test]
fn default_filters_cover_the_whole_table() {
    let engine = make_engine();
    let params = engine.default_filters();

    assert_eq!(params.products, vec!["A", "B"]);
    assert_eq!(
        params.dates,
        DateSelection::Range {
            start: date("2024-01-10"),
            end: date("2024-03-01"),
        }
    );
}

/// The full reference scenario, end to end: metrics, aggregate ordering,
/// and detail rows all agree.
#[test]
fn reference_scenario_end_to_end() {
    let engine = make_engine();
    let views = engine.compute_views(&engine.default_filters());

    assert_eq!(views.metrics.total_refunds, 15.0);
    assert!((views.metrics.return_rate_pct - 40.0).abs() < 1e-9);

    let products: Vec<&str> = views
        .refunds_by_product
        .iter()
        .map(|r| r.product.as_str())
        .collect();
    assert_eq!(products, vec!["A", "B"]);
    assert_eq!(views.refunds_by_product[0].refund_total, 15.0);
    assert_eq!(views.refunds_by_product[1].refund_total, 0.0);

    let detail_refunds: Vec<f64> = views.detail.rows.iter().map(|r| r.refund_amount).collect();
    assert_eq!(detail_refunds, vec![10.0, 5.0]);
    assert!(views.detail.rows.iter().all(|r| r.product == "A"));
}

/// An empty product selection drives every view to its empty case: zero
/// metrics, empty detail, the distribution's placeholder path.
#[test]
fn empty_selection_drives_every_empty_case() {
    let engine = make_engine();
    let params = FilterParams {
        products: vec![],
        dates: DateSelection::All,
    };

    let views = engine.compute_views(&params);

    assert_eq!(views.metrics.total_revenue, 0.0);
    assert_eq!(views.metrics.total_refunds, 0.0);
    assert_eq!(views.metrics.return_rate_pct, 0.0);
    assert_eq!(views.metrics.total_tickets, 0);
    assert!(views.refunds_by_product.is_empty());
    assert!(views.issue_distribution.is_empty());
    assert!(views.detail.rows.is_empty());
}

/// A degenerate date selection produces exactly the views an unrestricted
/// range produces.
#[test]
fn partial_date_selection_equals_unrestricted_views() {
    let engine = make_engine();
    let products: Vec<String> = vec!["A".into(), "B".into()];

    let partial = engine.compute_views(&FilterParams {
        products: products.clone(),
        dates: DateSelection::Partial {
            date: date("2024-02-01"),
        },
    });
    let unrestricted = engine.compute_views(&FilterParams {
        products,
        dates: DateSelection::All,
    });

    assert_eq!(
        serde_json::to_value(&partial).unwrap(),
        serde_json::to_value(&unrestricted).unwrap()
    );
}

/// Recomputation is pure: the same parameters always produce the same
/// views, and the table itself never changes.
#[test]
fn recomputation_is_deterministic() {
    let engine = make_engine();
    let params = engine.default_filters();

    let first = serde_json::to_value(engine.compute_views(&params)).unwrap();
    let second = serde_json::to_value(engine.compute_views(&params)).unwrap();

    assert_eq!(first, second);
    assert_eq!(engine.table().len(), 5, "table must never be mutated");
}

/// The distribution only ever excludes the sentinel, nothing else.
#[test]
fn distribution_matches_non_sentinel_rows() {
    let engine = make_engine();
    let views = engine.compute_views(&engine.default_filters());

    let total_count: u64 = views.issue_distribution.iter().map(|r| r.count).sum();
    assert_eq!(total_count, 2, "two rows carry a real issue category");
}
