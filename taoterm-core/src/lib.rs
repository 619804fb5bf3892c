//! TaoTerm Core: price series validation, indicators, signals, trade plans.
//!
//! This crate is the pure engine behind the audit view:
//! - Domain types (price bars, validated price series)
//! - Indicator calculator (EMA stack, SMA 200, ATR 14), causal by construction
//! - Signal evaluator (trend, EMA stack ordering, buy zone)
//! - Trade plan generator (ATR-based stop/targets and risk-budget sizing)
//! - Watchlist classifier (ADX / Stochastic %K pullback rule)
//!
//! Nothing here performs I/O or logs. Fetching data and rendering results
//! belong to `taoterm-runner` and `taoterm-cli`.

pub mod audit;
pub mod domain;
pub mod error;
pub mod indicators;
pub mod plan;
pub mod signals;
pub mod watchlist;

pub use audit::{audit_series, Audit};
pub use domain::{validate_series, PriceBar, PriceSeries, SeriesError, MIN_BARS};
pub use error::AuditError;
pub use indicators::{compute_indicators, IndicatorSet};
pub use plan::{build_trade_plan, PlanError, TradePlan, TradePlanRules};
pub use signals::{evaluate_signals, SignalReport};
pub use watchlist::{
    classify_watchlist_row, ClassifiedRow, SetupTag, WatchlistError, WatchlistRow, WatchlistRule,
};
