//! Audit pipeline: fetch → validate → indicators → signals → trade plan.
//!
//! Produces an `AuditReport`, a complete, serializable result that the
//! presentation layer renders without further computation.

use chrono::{Duration, NaiveDate};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use taoterm_core::{
    audit_series, validate_series, AuditError, IndicatorSet, PriceSeries, SignalReport, TradePlan,
};
use thiserror::Error;
use tracing::{debug, info};

use crate::config::AuditConfig;
use crate::data::{DataError, DataSource, PriceProvider};

/// Current `AuditReport` schema version.
pub const SCHEMA_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("data error for {symbol}: {source}")]
    Data {
        symbol: String,
        #[source]
        source: DataError,
    },

    #[error("{symbol}: {source}")]
    Audit {
        symbol: String,
        #[source]
        source: AuditError,
    },
}

impl RunError {
    /// Unknown symbol or not enough history: both mean "nothing to audit".
    pub fn is_no_data(&self) -> bool {
        match self {
            RunError::SymbolNotFound { .. } => true,
            RunError::Audit { source, .. } => source.is_insufficient_data(),
            RunError::Data { .. } => false,
        }
    }
}

/// Everything shown for one audited symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditReport {
    pub schema_version: u32,
    pub symbol: String,
    pub as_of: NaiveDate,
    pub bar_count: usize,
    pub price: f64,
    pub indicators: IndicatorSet,
    pub signals: SignalReport,
    /// `None` when sizing is undefined; see `plan_error`.
    pub plan: Option<TradePlan>,
    pub plan_error: Option<String>,
    pub risk_budget: f64,
    /// BLAKE3 over the validated bars.
    pub dataset_hash: String,
    pub source: DataSource,
}

/// Fetch `lookback_days` of history ending at `end` and validate it.
pub fn load_series(
    symbol: &str,
    provider: &dyn PriceProvider,
    config: &AuditConfig,
    end: NaiveDate,
) -> Result<PriceSeries, RunError> {
    let start = end - Duration::days(config.lookback_days);
    debug!(symbol, %start, %end, provider = provider.name(), "fetching bars");

    let bars = provider
        .fetch(symbol, start, end)
        .map_err(|source| RunError::Data {
            symbol: symbol.to_string(),
            source,
        })?
        .ok_or_else(|| RunError::SymbolNotFound {
            symbol: symbol.to_string(),
        })?;

    validate_series(bars).map_err(|e| RunError::Audit {
        symbol: symbol.to_string(),
        source: e.into(),
    })
}

/// Audit one symbol with data ending at `end`.
pub fn run_audit(
    symbol: &str,
    provider: &dyn PriceProvider,
    config: &AuditConfig,
    end: NaiveDate,
) -> Result<AuditReport, RunError> {
    let series = load_series(symbol, provider, config, end)?;
    let audit = audit_series(&series, config.risk_budget, &config.trade_plan);

    let (plan, plan_error) = match audit.plan {
        Ok(plan) => (Some(plan), None),
        Err(e) => (None, Some(e.to_string())),
    };

    info!(
        symbol,
        bars = series.len(),
        price = audit.price,
        trend_up = audit.signals.trend_up,
        stack_bullish = audit.signals.stack_bullish,
        in_buy_zone = audit.signals.in_buy_zone,
        "audit complete"
    );

    Ok(AuditReport {
        schema_version: SCHEMA_VERSION,
        symbol: symbol.to_string(),
        as_of: audit.as_of,
        bar_count: series.len(),
        price: audit.price,
        indicators: audit.indicators,
        signals: audit.signals,
        plan,
        plan_error,
        risk_budget: config.risk_budget,
        dataset_hash: dataset_hash(&series),
        source: provider.source(),
    })
}

/// Audit several symbols in parallel. Results keep the input order.
pub fn run_batch_audit(
    symbols: &[String],
    provider: &dyn PriceProvider,
    config: &AuditConfig,
    end: NaiveDate,
) -> Vec<(String, Result<AuditReport, RunError>)> {
    symbols
        .par_iter()
        .map(|symbol| (symbol.clone(), run_audit(symbol, provider, config, end)))
        .collect()
}

/// Deterministic BLAKE3 hash over dates and OHLC values.
pub fn dataset_hash(series: &PriceSeries) -> String {
    let mut hasher = blake3::Hasher::new();
    for bar in series.bars() {
        hasher.update(bar.date.to_string().as_bytes());
        hasher.update(&bar.open.to_le_bytes());
        hasher.update(&bar.high.to_le_bytes());
        hasher.update(&bar.low.to_le_bytes());
        hasher.update(&bar.close.to_le_bytes());
    }
    hasher.finalize().to_hex().to_string()
}
