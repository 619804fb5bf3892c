//! Top-level error for a full audit pass.
//!
//! Series validation and plan sizing each own an error enum; `AuditError` lets
//! callers that run the whole pipeline propagate either with `?`. Watchlist
//! failures are per row and stay `WatchlistError`.

use thiserror::Error;

use crate::domain::SeriesError;
use crate::plan::PlanError;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum AuditError {
    #[error(transparent)]
    Series(#[from] SeriesError),

    #[error(transparent)]
    Plan(#[from] PlanError),
}

impl AuditError {
    /// True when the failure means "not enough history", which callers render
    /// the same way as an unknown symbol.
    pub fn is_insufficient_data(&self) -> bool {
        matches!(self, AuditError::Series(SeriesError::InsufficientData { .. }))
    }
}
