//! Integration tests for the runner: config → provider → audit → export.

use chrono::NaiveDate;
use taoterm_core::{compute_indicators, SetupTag};
use taoterm_runner::{
    export_indicators_csv, export_report_json, load_series,
    load_watchlist_file, run_audit, AuditConfig, CsvPriceProvider, DataSource, RunError,
    SyntheticProvider, SCHEMA_VERSION,
};

fn end() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, 28).unwrap()
}

/// Write `n` weekday-agnostic daily rows ending at `end()` for `symbol`.
fn write_price_csv(dir: &std::path::Path, symbol: &str, n: i64) {
    let mut text = String::from("Date,Open,High,Low,Close,Volume\n");
    for i in 0..n {
        let date = end() - chrono::Duration::days(n - 1 - i);
        let close = 100.0 + i as f64 * 0.25;
        text.push_str(&format!(
            "{date},{:.2},{:.2},{:.2},{close:.2},1000\n",
            close - 0.1,
            close + 1.0,
            close - 1.0
        ));
    }
    std::fs::write(dir.join(format!("{symbol}.csv")), text).unwrap();
}

#[test]
fn csv_provider_audit_uptrend() {
    let dir = tempfile::tempdir().unwrap();
    write_price_csv(dir.path(), "UP", 400);
    let provider = CsvPriceProvider::new(dir.path());

    let report = run_audit("UP", &provider, &AuditConfig::default(), end()).unwrap();
    assert_eq!(report.source, DataSource::CsvImport);
    assert_eq!(report.as_of, end());
    assert!(report.signals.trend_up);
    assert!(report.signals.stack_bullish);
    let plan = report.plan.unwrap();
    assert!(plan.stop_loss < report.price);
    assert!(plan.take_profit_2 > plan.take_profit_1);
}

#[test]
fn lookback_window_limits_history() {
    let dir = tempfile::tempdir().unwrap();
    write_price_csv(dir.path(), "UP", 400);
    let provider = CsvPriceProvider::new(dir.path());

    let config = AuditConfig {
        lookback_days: 150,
        ..AuditConfig::default()
    };
    let err = run_audit("UP", &provider, &config, end()).unwrap_err();
    assert!(err.is_no_data());
    assert!(err.to_string().contains("insufficient data"));
}

#[test]
fn missing_csv_symbol_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let provider = CsvPriceProvider::new(dir.path());
    let err = run_audit("GONE", &provider, &AuditConfig::default(), end()).unwrap_err();
    assert!(matches!(err, RunError::SymbolNotFound { .. }));
}

#[test]
fn report_json_carries_schema_version_and_plan() {
    let report = run_audit("MSFT", &SyntheticProvider::new(), &AuditConfig::default(), end())
        .unwrap();
    let json = export_report_json(&report).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["schema_version"], SCHEMA_VERSION);
    assert_eq!(value["symbol"], "MSFT");
    assert_eq!(value["as_of"], report.as_of.to_string());
    assert_eq!(value["dataset_hash"], report.dataset_hash.as_str());
    assert_eq!(value["source"], "Synthetic");
    assert_eq!(
        value["signals"]["stack_bullish"],
        report.signals.stack_bullish
    );
    match &report.plan {
        Some(plan) => assert_eq!(value["plan"]["suggested_shares"], plan.suggested_shares),
        None => assert!(value["plan"].is_null()),
    }
}

#[test]
fn indicator_csv_has_one_row_per_bar_with_blank_warmup() {
    let provider = SyntheticProvider::new();
    let series = load_series("QQQ", &provider, &AuditConfig::default(), end()).unwrap();
    let csv = export_indicators_csv(&series, &compute_indicators(&series)).unwrap();
    let lines: Vec<&str> = csv.lines().collect();

    assert_eq!(lines.len(), series.len() + 1);
    assert!(lines[0].starts_with("date,open,high,low,close,ema8"));
    // first bar: sma200 and atr14 still warming up
    assert!(lines[1].ends_with(",,"));
    assert!(!lines[series.len()].ends_with(','));
}

#[test]
fn watchlist_file_classification() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("watchlist.csv");
    std::fs::write(
        &path,
        "Symbol,Price,Average Directional Index (14) 1 day,\"Stochastic (8,3,3) 1 day, %K\",Sector\n\
         AAA,10,25,35,Tech\n\
         BBB,20,15,35,Energy\n\
         CCC,30,25,45,Health\n\
         DDD,40,,10,Utilities\n",
    )
    .unwrap();

    let rows = load_watchlist_file(&path).unwrap();
    let results = AuditConfig::default().watchlist.classify_rows(&rows);
    let tags: Vec<Option<SetupTag>> = results
        .iter()
        .map(|r| r.as_ref().ok().map(|c| c.setup))
        .collect();
    assert_eq!(
        tags,
        vec![
            Some(SetupTag::Pullback),
            Some(SetupTag::Wait),
            Some(SetupTag::Wait),
            None
        ]
    );
}
