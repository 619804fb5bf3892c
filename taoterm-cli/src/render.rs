//! Plain-text views of audit results.

use taoterm_core::indicators::EMA_SPANS;
use taoterm_core::{ClassifiedRow, WatchlistError, WatchlistRow};
use taoterm_runner::{AuditReport, DataSource};

/// Message shown when a symbol is unknown or has too little history.
pub fn render_no_data(symbol: &str) -> String {
    format!("{symbol}: Ticker not found or insufficient data (200+ days required).")
}

fn source_label(source: DataSource) -> &'static str {
    match source {
        DataSource::YahooFinance => "yahoo",
        DataSource::CsvImport => "csv",
        DataSource::Synthetic => "SYNTHETIC",
    }
}

fn money(value: Option<f64>) -> String {
    value
        .map(|v| format!("${v:.2}"))
        .unwrap_or_else(|| "n/a".to_string())
}

fn number(value: Option<f64>, precision: usize) -> String {
    value
        .map(|v| format!("{v:.precision$}"))
        .unwrap_or_else(|| "-".to_string())
}

/// Metrics header, mechanics check and tactical execution for one symbol.
pub fn render_audit(report: &AuditReport) -> String {
    let ind = &report.indicators;
    let sig = &report.signals;

    let mut lines = vec![
        format!(
            "{}  as of {}  ({} bars, {})",
            report.symbol,
            report.as_of,
            report.bar_count,
            source_label(report.source)
        ),
        String::new(),
        format!("  Current Price        {}", money(Some(report.price))),
        format!("  200 SMA (The Wind)   {}", money(ind.sma200)),
        format!("  ATR (Volatility)     {}", money(ind.atr14)),
        format!("  EMA 21 (Mean)        {}", money(Some(ind.ema21))),
        String::new(),
        "Mechanics Check".to_string(),
    ];

    lines.push(if sig.trend_up {
        "  [OK] SAILING WITH THE WIND".to_string()
    } else {
        "  [X]  STAGNANT WATER: Below 200 SMA".to_string()
    });
    lines.push(String::new());

    lines.push("EMA Stack Values".to_string());
    for (span, value) in EMA_SPANS.iter().zip(ind.ema_stack()) {
        lines.push(format!("  EMA {span:<3} ${value:.2}"));
    }
    lines.push(match sig.stack_inversion {
        None => "  [OK] BULLISH STACK CONFIRMED".to_string(),
        Some(inv) => format!(
            "  [!]  STACK DISORDERED (EMA {} not above EMA {})",
            inv.faster, inv.slower
        ),
    });
    lines.push(if sig.in_buy_zone {
        format!(
            "  [OK] IN THE BUY ZONE (Within 1 ATR, {:.2} from EMA 21)",
            sig.distance_to_ema21
        )
    } else {
        "  [!]  OVEREXTENDED: Wait for Pullback".to_string()
    });
    lines.push(String::new());

    lines.push("Tactical Execution".to_string());
    match (&report.plan, &report.plan_error) {
        (Some(plan), _) => {
            lines.push(format!("  Stop Loss:       {}", money(Some(plan.stop_loss))));
            lines.push(format!("  Take Profit 1:   {}", money(Some(plan.take_profit_1))));
            lines.push(format!("  Take Profit 2:   {}", money(Some(plan.take_profit_2))));
            lines.push(format!("  Portfolio Risk:  {}", money(Some(report.risk_budget))));
            lines.push(format!("  Suggested Size:  {} Shares", plan.suggested_shares));
        }
        (None, Some(err)) => lines.push(format!("  No trade plan: {err}")),
        (None, None) => lines.push("  No trade plan".to_string()),
    }

    lines.join("\n") + "\n"
}

/// Watchlist overview table.
///
/// `results` must be `classify_rows(rows)`, one entry per row in the same
/// order. Rows that could not be classified keep their imported values and
/// show the missing field in the Setup column.
pub fn render_watchlist(
    rows: &[WatchlistRow],
    results: &[Result<ClassifiedRow, WatchlistError>],
) -> String {
    let mut lines = vec![format!(
        "{:<8} {:>10} {:>7} {:>7} {:<12} Sector",
        "Symbol", "Price", "ADX", "Stoch", "Setup"
    )];

    for (row, result) in rows.iter().zip(results) {
        let setup = match result {
            Ok(classified) => classified.setup.as_str().to_string(),
            Err(WatchlistError::MissingField { field, .. }) => format!("no {field}"),
        };
        let line = format!(
            "{:<8} {:>10} {:>7} {:>7} {:<12} {}",
            row.symbol,
            number(row.price, 2),
            number(row.adx, 1),
            number(row.stochastic_k, 1),
            setup,
            row.sector.as_deref().unwrap_or("")
        );
        lines.push(line.trim_end().to_string());
    }

    lines.join("\n") + "\n"
}
