//! Per-bar indicator snapshot used by the signal evaluator.

use serde::{Deserialize, Serialize};

use super::{Atr, Ema, Indicator, Sma};
use crate::domain::{PriceBar, PriceSeries};

/// EMA spans of the momentum stack, fastest first.
pub const EMA_SPANS: [usize; 5] = [8, 21, 34, 55, 89];

/// Trend baseline window.
pub const SMA_PERIOD: usize = 200;

/// Volatility window.
pub const ATR_PERIOD: usize = 14;

/// Indicator values at a single bar.
///
/// EMAs are defined from the first bar. `sma200` is `None` before bar 199 and
/// `atr14` before bar 13.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndicatorSet {
    pub ema8: f64,
    pub ema21: f64,
    pub ema34: f64,
    pub ema55: f64,
    pub ema89: f64,
    pub sma200: Option<f64>,
    pub atr14: Option<f64>,
}

impl IndicatorSet {
    /// The five EMA values in span order (8, 21, 34, 55, 89).
    pub fn ema_stack(&self) -> [f64; 5] {
        [self.ema8, self.ema21, self.ema34, self.ema55, self.ema89]
    }

    /// The most recent set of a computed sequence.
    pub fn latest(sets: &[IndicatorSet]) -> Option<&IndicatorSet> {
        sets.last()
    }
}

/// Compute one `IndicatorSet` per bar of a validated series.
pub fn compute_indicators(series: &PriceSeries) -> Vec<IndicatorSet> {
    indicator_sets(series.bars())
}

/// Compute indicator sets for any bar slice, including ones shorter than the
/// validation minimum (used for prefix/causality checks).
pub fn indicator_sets(bars: &[PriceBar]) -> Vec<IndicatorSet> {
    let emas: Vec<Vec<f64>> = EMA_SPANS
        .iter()
        .map(|&span| Ema::new(span).compute(bars))
        .collect();
    let sma = Sma::new(SMA_PERIOD).compute(bars);
    let atr = Atr::new(ATR_PERIOD).compute(bars);

    (0..bars.len())
        .map(|i| IndicatorSet {
            ema8: emas[0][i],
            ema21: emas[1][i],
            ema34: emas[2][i],
            ema55: emas[3][i],
            ema89: emas[4][i],
            sma200: defined(sma[i]),
            atr14: defined(atr[i]),
        })
        .collect()
}

fn defined(value: f64) -> Option<f64> {
    (!value.is_nan()).then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::validate_series;
    use crate::indicators::{assert_approx, make_bars, DEFAULT_EPSILON};

    fn wave(n: usize) -> Vec<f64> {
        (0..n)
            .map(|i| 100.0 + (i as f64 * 0.17).sin() * 8.0 + i as f64 * 0.05)
            .collect()
    }

    #[test]
    fn one_set_per_bar_with_warmups() {
        let series = validate_series(make_bars(&wave(260))).unwrap();
        let sets = compute_indicators(&series);

        assert_eq!(sets.len(), 260);
        assert!(sets[12].atr14.is_none());
        assert!(sets[13].atr14.is_some());
        assert!(sets[198].sma200.is_none());
        assert!(sets[199].sma200.is_some());
        assert!(sets.iter().all(|s| s.ema89.is_finite()));
    }

    #[test]
    fn first_bar_emas_equal_first_close() {
        let closes = wave(200);
        let sets = indicator_sets(&make_bars(&closes));
        for v in sets[0].ema_stack() {
            assert_approx(v, closes[0], DEFAULT_EPSILON);
        }
    }

    #[test]
    fn constant_series_has_flat_indicators() {
        // make_bars gives high-low = 2 on a flat series
        let sets = indicator_sets(&make_bars(&vec![50.0; 220]));
        let last = IndicatorSet::latest(&sets).unwrap();
        for v in last.ema_stack() {
            assert_approx(v, 50.0, DEFAULT_EPSILON);
        }
        assert_approx(last.sma200.unwrap(), 50.0, DEFAULT_EPSILON);
        assert_approx(last.atr14.unwrap(), 2.0, DEFAULT_EPSILON);
    }

    #[test]
    fn empty_slice_yields_no_sets() {
        assert!(indicator_sets(&[]).is_empty());
        assert!(IndicatorSet::latest(&[]).is_none());
    }
}
