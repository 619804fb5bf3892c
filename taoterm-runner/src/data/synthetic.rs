//! Deterministic synthetic prices for offline runs and tests.
//!
//! A seeded random walk from 100.0 over weekdays. The seed is derived from the
//! symbol, so the same symbol always yields the same series.

use chrono::{Datelike, NaiveDate, Weekday};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use taoterm_core::PriceBar;

use super::provider::{DataError, DataSource, PriceProvider};

#[derive(Debug, Clone, Default)]
pub struct SyntheticProvider {
    /// Mean daily return added to the walk; positive values trend up.
    pub drift: f64,
}

impl SyntheticProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generate(&self, symbol: &str, start: NaiveDate, end: NaiveDate) -> Vec<PriceBar> {
        let seed: [u8; 32] = *blake3::hash(symbol.as_bytes()).as_bytes();
        let mut rng = StdRng::from_seed(seed);

        let mut bars = Vec::new();
        let mut price = 100.0_f64;
        let mut current = start;

        while current <= end {
            if !matches!(current.weekday(), Weekday::Sat | Weekday::Sun) {
                let daily_return: f64 = self.drift + rng.gen_range(-0.03..0.03);
                let open = price;
                let close = (price * (1.0 + daily_return)).max(0.01);
                let high = open.max(close) * (1.0 + rng.gen_range(0.0..0.01));
                let low = open.min(close) * (1.0 - rng.gen_range(0.0..0.01));
                bars.push(PriceBar::new(current, open, high, low, close));
                price = close;
            }
            match current.succ_opt() {
                Some(next) => current = next,
                None => break,
            }
        }

        bars
    }
}

impl PriceProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn source(&self) -> DataSource {
        DataSource::Synthetic
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<PriceBar>>, DataError> {
        let bars = self.generate(symbol, start, end);
        Ok((!bars.is_empty()).then_some(bars))
    }
}
