//! Signal evaluator: trend, EMA stack ordering, buy zone.
//!
//! Signals are a pure function of the latest price and its `IndicatorSet`.

use serde::{Deserialize, Serialize};

use crate::indicators::{IndicatorSet, EMA_SPANS};

/// Adjacent pair of stack EMAs that breaks the bullish ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StackInversion {
    /// Span of the faster EMA (e.g. 21).
    pub faster: usize,
    /// Span of the slower EMA that is at or above it (e.g. 34).
    pub slower: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SignalReport {
    /// Price above the 200-bar SMA.
    pub trend_up: bool,
    /// EMA8 > EMA21 > EMA34 > EMA55 > EMA89, all strict.
    pub stack_bullish: bool,
    /// Price within one ATR of EMA21, either side, inclusive.
    pub in_buy_zone: bool,
    /// |price - EMA21|
    pub distance_to_ema21: f64,
    /// First pair violating the stack order, if any.
    pub stack_inversion: Option<StackInversion>,
}

/// Evaluate all signals for `price` against `indicators`.
///
/// A signal whose indicator is still in warmup evaluates to `false`.
pub fn evaluate_signals(price: f64, indicators: &IndicatorSet) -> SignalReport {
    let stack_inversion = first_inversion(&indicators.ema_stack()).map(|i| StackInversion {
        faster: EMA_SPANS[i],
        slower: EMA_SPANS[i + 1],
    });
    let distance_to_ema21 = (price - indicators.ema21).abs();

    SignalReport {
        trend_up: indicators.sma200.is_some_and(|sma| price > sma),
        stack_bullish: stack_inversion.is_none(),
        in_buy_zone: indicators
            .atr14
            .is_some_and(|atr| distance_to_ema21 <= atr),
        distance_to_ema21,
        stack_inversion,
    }
}

/// Index `i` of the first pair where `values[i] > values[i + 1]` fails.
fn first_inversion(values: &[f64]) -> Option<usize> {
    // `!(a > b)` so that NaN counts as an inversion
    values.windows(2).position(|w| !(w[0] > w[1]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bullish_set() -> IndicatorSet {
        IndicatorSet {
            ema8: 110.0,
            ema21: 105.0,
            ema34: 100.0,
            ema55: 95.0,
            ema89: 90.0,
            sma200: Some(80.0),
            atr14: Some(4.0),
        }
    }

    #[test]
    fn trend_up_requires_price_above_sma() {
        let set = bullish_set();
        assert!(evaluate_signals(81.0, &set).trend_up);
        assert!(!evaluate_signals(80.0, &set).trend_up);
        assert!(!evaluate_signals(79.0, &set).trend_up);
    }

    #[test]
    fn strict_stack_is_bullish() {
        let report = evaluate_signals(106.0, &bullish_set());
        assert!(report.stack_bullish);
        assert_eq!(report.stack_inversion, None);
    }

    #[test]
    fn equal_fast_emas_break_the_stack() {
        let mut set = bullish_set();
        set.ema8 = 10.0;
        set.ema21 = 10.0;
        set.ema34 = 9.0;
        set.ema55 = 8.0;
        set.ema89 = 7.0;
        let report = evaluate_signals(10.0, &set);
        assert!(!report.stack_bullish);
        assert_eq!(
            report.stack_inversion,
            Some(StackInversion {
                faster: 8,
                slower: 21
            })
        );
    }

    #[test]
    fn single_deep_inversion_disqualifies() {
        let mut set = bullish_set();
        set.ema89 = 96.0; // above ema55
        let report = evaluate_signals(106.0, &set);
        assert!(!report.stack_bullish);
        assert_eq!(
            report.stack_inversion,
            Some(StackInversion {
                faster: 55,
                slower: 89
            })
        );
    }

    #[test]
    fn buy_zone_is_inclusive_and_unsigned() {
        let set = bullish_set(); // ema21 = 105, atr = 4
        assert!(evaluate_signals(109.0, &set).in_buy_zone);
        assert!(evaluate_signals(101.0, &set).in_buy_zone);
        assert!(evaluate_signals(105.0, &set).in_buy_zone);
        assert!(!evaluate_signals(109.5, &set).in_buy_zone);
        assert!(!evaluate_signals(100.5, &set).in_buy_zone);
        assert_eq!(evaluate_signals(101.0, &set).distance_to_ema21, 4.0);
    }

    #[test]
    fn warmup_indicators_yield_false() {
        let mut set = bullish_set();
        set.sma200 = None;
        set.atr14 = None;
        let report = evaluate_signals(105.0, &set);
        assert!(!report.trend_up);
        assert!(!report.in_buy_zone);
        assert!(report.stack_bullish);
    }

    #[test]
    fn nan_ema_is_not_bullish() {
        let mut set = bullish_set();
        set.ema34 = f64::NAN;
        assert!(!evaluate_signals(106.0, &set).stack_bullish);
    }
}
