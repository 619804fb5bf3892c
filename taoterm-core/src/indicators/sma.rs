//! Simple Moving Average (SMA).
//!
//! Rolling mean of close prices over a trailing window.
//! Lookback: period - 1 (first valid value at index period-1).

use super::Indicator;
use crate::domain::PriceBar;

#[derive(Debug, Clone)]
pub struct Sma {
    period: usize,
    name: String,
}

impl Sma {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "SMA period must be >= 1");
        Self {
            period,
            name: format!("sma_{period}"),
        }
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period.saturating_sub(1)
    }

    fn compute(&self, bars: &[PriceBar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        rolling_mean(&closes, self.period)
    }
}

/// Trailing arithmetic mean over `period` values.
///
/// Positions before `period - 1` are NaN, as is any window containing a NaN.
/// Each window is summed on its own, so no rounding error carries over from
/// earlier bars, and the mean is clamped to the window's min/max: a window of
/// identical values averages to exactly that value.
pub fn rolling_mean(values: &[f64], period: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if period == 0 || n < period {
        return result;
    }

    for (i, window) in values.windows(period).enumerate() {
        if window.iter().any(|v| v.is_nan()) {
            continue;
        }
        let (min, max) = window
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| {
                (lo.min(v), hi.max(v))
            });
        let mean = window.iter().sum::<f64>() / period as f64;
        result[i + period - 1] = mean.clamp(min, max);
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    #[test]
    fn sma_5_basic() {
        let bars = make_bars(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0, 16.0]);
        let result = Sma::new(5).compute(&bars);

        assert_eq!(result.len(), 7);
        for (i, v) in result.iter().enumerate().take(4) {
            assert!(v.is_nan(), "expected NaN at index {i}");
        }
        assert_approx(result[4], 12.0, DEFAULT_EPSILON);
        assert_approx(result[5], 13.0, DEFAULT_EPSILON);
        assert_approx(result[6], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_200_first_value_at_199() {
        let closes: Vec<f64> = (1..=250).map(|i| i as f64).collect();
        let result = Sma::new(200).compute(&make_bars(&closes));
        assert!(result[198].is_nan());
        // mean(1..=200) = 100.5
        assert_approx(result[199], 100.5, DEFAULT_EPSILON);
        // mean(51..=250) = 150.5
        assert_approx(result[249], 150.5, DEFAULT_EPSILON);
    }

    #[test]
    fn sma_nan_window() {
        let result = rolling_mean(&[10.0, 11.0, f64::NAN, 13.0, 14.0, 15.0], 3);
        assert!(result[2].is_nan());
        assert!(result[3].is_nan());
        assert!(result[4].is_nan());
        assert_approx(result[5], 14.0, DEFAULT_EPSILON);
    }

    #[test]
    fn flat_window_after_volatile_history_is_exact() {
        let mut values: Vec<f64> = (0..300)
            .map(|i| 50.0 + 37.3 * ((i as f64) * 0.731).sin() + (i % 7) as f64 * 0.013)
            .collect();
        values.extend(std::iter::repeat(73.1).take(200));

        let result = rolling_mean(&values, 200);
        assert_eq!(result[499], 73.1);

        let mut ranges: Vec<f64> = (0..300).map(|i| 0.1 + ((i * 37) % 11) as f64 * 0.37).collect();
        ranges.extend(std::iter::repeat(0.0).take(14));
        assert_eq!(rolling_mean(&ranges, 14)[313], 0.0);
    }

    #[test]
    fn sma_lookback() {
        assert_eq!(Sma::new(200).lookback(), 199);
        assert_eq!(Sma::new(1).lookback(), 0);
    }

    #[test]
    fn sma_too_few_bars() {
        let result = Sma::new(5).compute(&make_bars(&[10.0, 11.0]));
        assert!(result.iter().all(|v| v.is_nan()));
    }
}
