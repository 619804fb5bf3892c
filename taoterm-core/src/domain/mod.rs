//! Domain types for TaoTerm

pub mod bar;
pub mod series;

pub use bar::PriceBar;
pub use series::{validate_series, validate_series_with_min, PriceSeries, SeriesError, MIN_BARS};
