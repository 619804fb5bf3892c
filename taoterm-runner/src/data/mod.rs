//! Price data providers.
//!
//! The engine only ever sees a `Vec<PriceBar>`; where it came from is decided
//! here.

pub mod circuit_breaker;
pub mod csv_import;
pub mod provider;
pub mod synthetic;
pub mod yahoo;

pub use circuit_breaker::CircuitBreaker;
pub use csv_import::CsvPriceProvider;
pub use provider::{DataError, DataSource, PriceProvider};
pub use synthetic::SyntheticProvider;
pub use yahoo::YahooProvider;
