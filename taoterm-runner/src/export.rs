//! Export: indicator series as CSV, audit reports as JSON.
//!
//! The CSV carries one row per bar so external charting tools can draw the
//! candles with the EMA stack and SMA 200 overlaid. Warmup cells are empty.
//! Report JSON includes a `schema_version` so consumers can detect format
//! changes.

use anyhow::{ensure, Context, Result};
use taoterm_core::{IndicatorSet, PriceSeries};

use crate::audit::AuditReport;

// ─── CSV export ─────────────────────────────────────────────────────

/// Export bars with their indicator values.
///
/// Columns: date, open, high, low, close, ema8, ema21, ema34, ema55, ema89,
/// sma200, atr14
pub fn export_indicators_csv(series: &PriceSeries, indicators: &[IndicatorSet]) -> Result<String> {
    ensure!(
        series.len() == indicators.len(),
        "indicator count {} does not match bar count {}",
        indicators.len(),
        series.len()
    );

    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "date", "open", "high", "low", "close", "ema8", "ema21", "ema34", "ema55", "ema89",
        "sma200", "atr14",
    ])?;

    let optional = |v: Option<f64>| v.map(|x| format!("{x:.4}")).unwrap_or_default();

    for (bar, set) in series.bars().iter().zip(indicators) {
        let mut record = vec![
            bar.date.to_string(),
            format!("{:.4}", bar.open),
            format!("{:.4}", bar.high),
            format!("{:.4}", bar.low),
            format!("{:.4}", bar.close),
        ];
        record.extend(set.ema_stack().iter().map(|v| format!("{v:.4}")));
        record.push(optional(set.sma200));
        record.push(optional(set.atr14));
        wtr.write_record(&record)?;
    }

    let bytes = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(bytes).context("CSV output is not UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

/// Serialize an `AuditReport` to pretty JSON.
pub fn export_report_json(report: &AuditReport) -> Result<String> {
    serde_json::to_string_pretty(report).context("failed to serialize AuditReport to JSON")
}
