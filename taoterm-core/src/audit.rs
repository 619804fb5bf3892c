//! One-shot audit of a validated series: indicators, signals, trade plan.
//!
//! Everything the presentation layer shows is computed here first, as data.

use chrono::NaiveDate;

use crate::domain::PriceSeries;
use crate::indicators::{compute_indicators, IndicatorSet};
use crate::plan::{PlanError, TradePlan, TradePlanRules};
use crate::signals::{evaluate_signals, SignalReport};

/// Result of auditing the latest bar of a series.
///
/// The trade plan is kept as a `Result` so that a degenerate plan does not
/// hide the signals.
#[derive(Debug, Clone, PartialEq)]
pub struct Audit {
    pub as_of: NaiveDate,
    pub price: f64,
    pub indicators: IndicatorSet,
    pub signals: SignalReport,
    pub plan: Result<TradePlan, PlanError>,
}

/// Audit the last bar of `series`.
///
/// A validated series always has SMA 200 and ATR 14 defined on its last bar.
pub fn audit_series(series: &PriceSeries, risk_budget: f64, rules: &TradePlanRules) -> Audit {
    let sets = compute_indicators(series);
    let last_bar = series.last();
    let price = last_bar.close;
    // Validated series are non-empty, so one set exists per bar.
    let indicators = sets[sets.len() - 1];
    let signals = evaluate_signals(price, &indicators);
    let atr = indicators.atr14.unwrap_or(f64::NAN);

    Audit {
        as_of: last_bar.date,
        price,
        indicators,
        signals,
        plan: rules.build(price, atr, risk_budget),
    }
}
