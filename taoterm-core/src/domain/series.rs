//! PriceSeries and the series validator.
//!
//! A `PriceSeries` can only be obtained through [`validate_series`], so any
//! function that takes one may assume: at least `MIN_BARS` bars, finite OHLC
//! values, strictly increasing dates.

use chrono::NaiveDate;
use serde::Serialize;
use thiserror::Error;

use super::bar::PriceBar;

/// Minimum history for a valid analysis: the SMA 200 window.
pub const MIN_BARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("insufficient data: {actual} bars, at least {required} required")]
    InsufficientData { required: usize, actual: usize },

    #[error("bar {index} ({date}) has a missing or non-finite {field}")]
    InvalidBar {
        index: usize,
        date: NaiveDate,
        field: &'static str,
    },

    #[error("bar {index} ({date}) is not after the previous bar")]
    OutOfOrder { index: usize, date: NaiveDate },
}

/// Validated, chronological daily price series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSeries {
    bars: Vec<PriceBar>,
}

impl PriceSeries {
    pub fn bars(&self) -> &[PriceBar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// Always false for a validated series; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// The most recent bar.
    pub fn last(&self) -> &PriceBar {
        // Validation guarantees at least one bar.
        &self.bars[self.bars.len() - 1]
    }
}

/// Validate a raw series with the default `MIN_BARS` requirement.
pub fn validate_series(bars: Vec<PriceBar>) -> Result<PriceSeries, SeriesError> {
    validate_series_with_min(bars, MIN_BARS)
}

/// Validate a raw series with an explicit minimum length.
///
/// A minimum of zero is treated as one: an empty series is never valid.
pub fn validate_series_with_min(
    bars: Vec<PriceBar>,
    min_bars: usize,
) -> Result<PriceSeries, SeriesError> {
    let required = min_bars.max(1);
    if bars.len() < required {
        return Err(SeriesError::InsufficientData {
            required,
            actual: bars.len(),
        });
    }

    for (index, bar) in bars.iter().enumerate() {
        if let Some(field) = bar.first_non_finite_field() {
            return Err(SeriesError::InvalidBar {
                index,
                date: bar.date,
                field,
            });
        }
        if index > 0 && bar.date <= bars[index - 1].date {
            return Err(SeriesError::OutOfOrder {
                index,
                date: bar.date,
            });
        }
    }

    Ok(PriceSeries { bars })
}
