//! TaoTerm Runner: everything between the engine and the terminal.
//!
//! This crate builds on `taoterm-core` to provide:
//! - TOML configuration with defaults for every field
//! - Price providers: Yahoo Finance, local CSV files, deterministic synthetic data
//! - Watchlist CSV import with TradingView header normalization
//! - The audit pipeline (fetch → validate → indicators → signals → plan)
//! - Batch audits across symbols on the rayon pool
//! - CSV and JSON export

pub mod audit;
pub mod config;
pub mod data;
pub mod export;
pub mod watchlist_import;

pub use audit::{load_series, run_audit, run_batch_audit, AuditReport, RunError, SCHEMA_VERSION};
pub use config::{AuditConfig, ConfigError, ProviderConfig};
pub use data::{
    CircuitBreaker, CsvPriceProvider, DataError, DataSource, PriceProvider, SyntheticProvider,
    YahooProvider,
};
pub use export::{export_indicators_csv, export_report_json};
pub use watchlist_import::{load_watchlist_csv, load_watchlist_file, WatchlistImportError};
