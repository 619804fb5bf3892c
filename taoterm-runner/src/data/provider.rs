//! Price provider trait and structured error types.
//!
//! The `PriceProvider` trait abstracts over data sources (Yahoo Finance, CSV
//! import, synthetic) so the audit pipeline can swap them and tests can run
//! offline.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use taoterm_core::PriceBar;
use thiserror::Error;

/// Structured error types for data operations.
///
/// An unknown symbol is not an error: providers return `Ok(None)`.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("authentication required: {0}")]
    AuthenticationRequired(String),

    #[error("hard stop: data provider has blocked requests (circuit breaker tripped)")]
    CircuitBreakerTripped,

    #[error("CSV import error: {0}")]
    Csv(String),

    #[error("data error: {0}")]
    Other(String),
}

/// Where the data came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataSource {
    YahooFinance,
    CsvImport,
    Synthetic,
}

/// Trait for price providers.
pub trait PriceProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Tag recorded on reports built from this provider's data.
    fn source(&self) -> DataSource;

    /// Fetch daily bars for `symbol` between `start` and `end`, inclusive, in
    /// chronological order. `Ok(None)` means the symbol is unknown or has no
    /// data in the window.
    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<PriceBar>>, DataError>;
}
