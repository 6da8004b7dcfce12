//! report-runner: headless driver for the retail operations report engine.
//!
//! Usage:
//!   report-runner --data data/transactions.csv --from 2024-01-01 --to 2024-06-30
//!   report-runner --data data/transactions.csv --products "Laptop Pro,Phone X" --top 20
//!   report-runner --data data/transactions.csv --ipc-mode

use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Result;
use chrono::NaiveDate;
use opsboard_core::{
    cache::TableCache,
    config::ReportConfig,
    engine::ReportEngine,
    filter::{DateSelection, FilterParams},
    views::DerivedViews,
};

/// Commands a hosting UI sends over stdin, one JSON object per line.
#[derive(serde::Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum IpcCommand {
    /// Describe the loaded source: products, date span, row count.
    Describe,
    /// Replace the session's filter parameters and return fresh views.
    SetFilters {
        products: Vec<String>,
        dates: DateSelection,
    },
    /// Recompute views for the current parameters.
    GetViews,
    Quit,
}

#[derive(serde::Serialize)]
struct SourceDescription {
    source: String,
    row_count: usize,
    products: Vec<String>,
    date_span: Option<(NaiveDate, NaiveDate)>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let data = arg_value(&args, "--data").unwrap_or_else(|| "data/transactions.csv".into());
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");

    let mut config = match arg_value(&args, "--config") {
        Some(path) => ReportConfig::load(&path)?,
        None => ReportConfig::default(),
    };
    if let Some(top) = arg_value(&args, "--top") {
        config.detail_row_limit = top
            .parse()
            .map_err(|e| anyhow::anyhow!("Invalid --top '{top}': {e}"))?;
    }

    let cache = TableCache::new();
    let engine = ReportEngine::open(config, &cache, Path::new(&data))?;

    if ipc_mode {
        run_ipc_loop(&engine, &data)?;
    } else {
        let params = one_shot_filters(&engine, &args)?;
        let views = engine.compute_views(&params);
        print_report(&engine, &params, &views);
    }

    Ok(())
}

/// Build filter parameters from the command line. With no flags this is
/// the default selection: every product, full observed date range.
fn one_shot_filters(engine: &ReportEngine, args: &[String]) -> Result<FilterParams> {
    let mut params = engine.default_filters();

    if let Some(products) = arg_value(args, "--products") {
        params.products = products
            .split(',')
            .map(|p| p.trim().to_string())
            .filter(|p| !p.is_empty())
            .collect();
    }

    let from = arg_value(args, "--from").map(|s| parse_cli_date(&s)).transpose()?;
    let to = arg_value(args, "--to").map(|s| parse_cli_date(&s)).transpose()?;
    match (from, to) {
        (Some(start), Some(end)) => params.dates = DateSelection::Range { start, end },
        // One endpoint is a degenerate selection: product filter only.
        (Some(date), None) | (None, Some(date)) => {
            params.dates = DateSelection::Partial { date };
        }
        (None, None) => {}
    }

    Ok(params)
}

fn parse_cli_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| anyhow::anyhow!("Invalid date '{value}': {e}"))
}

fn run_ipc_loop(engine: &ReportEngine, source: &str) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();
    let mut params = engine.default_filters();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }

        let cmd: IpcCommand = match serde_json::from_str(&buffer) {
            Ok(c) => c,
            Err(e) => {
                let err_json = serde_json::json!({ "error": e.to_string() });
                writeln!(stdout, "{}", err_json)?;
                stdout.flush()?;
                continue;
            }
        };

        match cmd {
            IpcCommand::Quit => break,
            IpcCommand::Describe => {
                let table = engine.table();
                let description = SourceDescription {
                    source: source.to_string(),
                    row_count: table.len(),
                    products: table.distinct_products(),
                    date_span: table.date_span(),
                };
                writeln!(stdout, "{}", serde_json::to_string(&description)?)?;
            }
            IpcCommand::SetFilters { products, dates } => {
                params = FilterParams { products, dates };
                log::debug!("filters updated: {} products selected", params.products.len());
                let views = engine.compute_views(&params);
                writeln!(stdout, "{}", serde_json::to_string(&views)?)?;
            }
            IpcCommand::GetViews => {
                let views = engine.compute_views(&params);
                writeln!(stdout, "{}", serde_json::to_string(&views)?)?;
            }
        }
        stdout.flush()?;
    }
    Ok(())
}

fn print_report(engine: &ReportEngine, params: &FilterParams, views: &DerivedViews) {
    let config = engine.config();
    let currency = &config.currency;
    let total_rows = engine.table().len();

    println!("=== SUMMARY ===");
    println!("  source rows:    {total_rows}");
    println!("  products:       {} selected", params.products.len());
    println!(
        "  total revenue:  {:.2} {currency}",
        views.metrics.total_revenue
    );
    println!(
        "  refunded:       {:.2} {currency}",
        views.metrics.total_refunds
    );
    println!("  return rate:    {:.1}%", views.metrics.return_rate_pct);
    println!("  tickets:        {}", views.metrics.total_tickets);
    if let Some(net) = views.metrics.net_revenue {
        println!("  net revenue:    {net:.2} {currency}");
    }

    println!();
    println!("=== REFUNDS BY PRODUCT ===");
    if views.refunds_by_product.is_empty() {
        println!("  (no rows in the selection)");
    }
    for row in &views.refunds_by_product {
        println!("  {:<28} {:>12.2} {currency}", row.product, row.refund_total);
    }

    println!();
    println!("=== COMPLAINT REASONS ===");
    if views.issue_distribution.is_empty() {
        println!("  (no complaints in the selection)");
    }
    for row in &views.issue_distribution {
        println!(
            "  {:<28} {:>6}  ({:.1}%)",
            row.category, row.count, row.share_pct
        );
    }

    println!();
    println!(
        "=== PROBLEMATIC TRANSACTIONS (top {}) ===",
        config.detail_row_limit
    );
    if views.detail.rows.is_empty() {
        println!("  (none in the selection)");
    } else {
        println!("  {}", views.detail.columns.join(" | "));
        for row in &views.detail.rows {
            println!(
                "  {} | {} | {} | {:.2} | {:.2} | {}",
                row.date,
                row.transaction_id,
                row.product,
                row.total_value,
                row.refund_amount,
                row.issue_category
            );
        }
    }
}

fn arg_value(args: &[String], flag: &str) -> Option<String> {
    args.windows(2).find(|w| w[0] == flag).map(|w| w[1].clone())
}
