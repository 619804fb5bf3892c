//! PriceBar: one daily OHLC session.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Daily OHLC bar for a single symbol.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceBar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl PriceBar {
    pub fn new(date: NaiveDate, open: f64, high: f64, low: f64, close: f64) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
        }
    }

    /// Name of the first OHLC field that is NaN or infinite, if any.
    pub fn first_non_finite_field(&self) -> Option<&'static str> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }

    /// High minus low.
    pub fn range(&self) -> f64 {
        self.high - self.low
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_bar() -> PriceBar {
        PriceBar::new(
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            100.0,
            105.0,
            98.0,
            103.0,
        )
    }

    #[test]
    fn finite_bar_has_no_bad_field() {
        assert_eq!(sample_bar().first_non_finite_field(), None);
        assert_eq!(sample_bar().range(), 7.0);
    }

    #[test]
    fn detects_nan_and_infinite_fields() {
        let mut bar = sample_bar();
        bar.low = f64::NAN;
        assert_eq!(bar.first_non_finite_field(), Some("low"));

        let mut bar = sample_bar();
        bar.open = f64::INFINITY;
        bar.close = f64::NAN;
        assert_eq!(bar.first_non_finite_field(), Some("open"));
    }

    #[test]
    fn bar_serialization_roundtrip() {
        let bar = sample_bar();
        let json = serde_json::to_string(&bar).unwrap();
        let deser: PriceBar = serde_json::from_str(&json).unwrap();
        assert_eq!(bar, deser);
    }
}
