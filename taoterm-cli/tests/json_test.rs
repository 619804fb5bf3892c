//! `watchlist --json` output: every row reported, one document.

use chrono::NaiveDate;
use taoterm_cli::watchlist_json;
use taoterm_runner::{load_watchlist_file, run_audit, AuditConfig, SyntheticProvider};

fn write_watchlist(dir: &std::path::Path) -> std::path::PathBuf {
    let path = dir.join("watchlist.csv");
    std::fs::write(
        &path,
        "Symbol,Price,Average Directional Index (14) 1 day,\"Stochastic (8,3,3) 1 day, %K\",Sector\n\
         aapl,190.5,28,22,Technology\n\
         xom,110.25,,35,Energy\n",
    )
    .unwrap();
    path
}

#[test]
fn row_with_blank_oscillator_is_reported_with_its_error() {
    let dir = tempfile::tempdir().unwrap();
    let rows = load_watchlist_file(&write_watchlist(dir.path())).unwrap();
    let results = AuditConfig::default().watchlist.classify_rows(&rows);

    let json = watchlist_json(&rows, &results, None).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let entries = value["watchlist"].as_array().unwrap();

    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0]["symbol"], "AAPL");
    assert_eq!(entries[0]["setup"], "Pullback");
    assert!(entries[0].get("error").is_none());

    assert_eq!(entries[1]["symbol"], "XOM");
    assert!(entries[1]["setup"].is_null());
    assert_eq!(entries[1]["price"], 110.25);
    assert_eq!(entries[1]["sector"], "Energy");
    assert!(entries[1]["error"].as_str().unwrap().contains("ADX"));

    assert!(value.get("audit").is_none());
}

#[test]
fn watchlist_and_audit_form_a_single_document() {
    let dir = tempfile::tempdir().unwrap();
    let rows = load_watchlist_file(&write_watchlist(dir.path())).unwrap();
    let results = AuditConfig::default().watchlist.classify_rows(&rows);
    let end = NaiveDate::from_ymd_opt(2024, 6, 28).unwrap();
    let report = run_audit("AAPL", &SyntheticProvider::new(), &AuditConfig::default(), end)
        .unwrap();

    let json = watchlist_json(&rows, &results, Some(&report)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();

    assert_eq!(value["watchlist"].as_array().unwrap().len(), 2);
    assert_eq!(value["audit"]["symbol"], "AAPL");
    assert_eq!(value["audit"]["bar_count"], report.bar_count);
}
