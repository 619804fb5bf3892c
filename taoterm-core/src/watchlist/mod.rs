//! Watchlist classifier.
//!
//! Tags externally screened symbols as pullback candidates from two
//! pre-computed oscillators: ADX (trend strength) and Stochastic %K.
//! Rows are independent, so batches are classified on the rayon pool.

use std::fmt;

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Canonical column name for the ADX oscillator.
pub const ADX_FIELD: &str = "ADX";
/// Canonical column name for the Stochastic %K oscillator.
pub const STOCH_FIELD: &str = "Stoch";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum WatchlistError {
    #[error("watchlist row '{symbol}' is missing {field}")]
    MissingField { symbol: String, field: &'static str },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SetupTag {
    Pullback,
    Wait,
}

impl SetupTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            SetupTag::Pullback => "Pullback",
            SetupTag::Wait => "Wait",
        }
    }
}

impl fmt::Display for SetupTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One imported watchlist row. Oscillators stay `None` when the source
/// column was absent or blank.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchlistRow {
    pub symbol: String,
    pub price: Option<f64>,
    pub adx: Option<f64>,
    pub stochastic_k: Option<f64>,
    pub sector: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
    pub row: WatchlistRow,
    pub setup: SetupTag,
}

/// Pullback thresholds: trend strong enough, momentum washed out.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WatchlistRule {
    /// Minimum ADX, inclusive.
    pub adx_min: f64,
    /// Stochastic %K ceiling, exclusive.
    pub stochastic_max: f64,
}

impl Default for WatchlistRule {
    fn default() -> Self {
        Self {
            adx_min: 20.0,
            stochastic_max: 40.0,
        }
    }
}

impl WatchlistRule {
    pub fn classify(&self, adx: f64, stochastic_k: f64) -> SetupTag {
        if adx >= self.adx_min && stochastic_k < self.stochastic_max {
            SetupTag::Pullback
        } else {
            SetupTag::Wait
        }
    }

    pub fn classify_row(&self, row: &WatchlistRow) -> Result<ClassifiedRow, WatchlistError> {
        let adx = required(row, row.adx, ADX_FIELD)?;
        let stochastic_k = required(row, row.stochastic_k, STOCH_FIELD)?;
        Ok(ClassifiedRow {
            row: row.clone(),
            setup: self.classify(adx, stochastic_k),
        })
    }

    /// Classify every row, preserving input order. Failures are per row.
    pub fn classify_rows(
        &self,
        rows: &[WatchlistRow],
    ) -> Vec<Result<ClassifiedRow, WatchlistError>> {
        rows.par_iter().map(|row| self.classify_row(row)).collect()
    }
}

fn required(
    row: &WatchlistRow,
    value: Option<f64>,
    field: &'static str,
) -> Result<f64, WatchlistError> {
    match value {
        Some(v) if !v.is_nan() => Ok(v),
        _ => Err(WatchlistError::MissingField {
            symbol: row.symbol.clone(),
            field,
        }),
    }
}

/// Classify with the default ADX >= 20, %K < 40 rule.
pub fn classify_watchlist_row(adx: f64, stochastic_k: f64) -> SetupTag {
    WatchlistRule::default().classify(adx, stochastic_k)
}
