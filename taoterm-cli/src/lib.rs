//! TaoTerm CLI: text and JSON views of audit reports and watchlists.
//!
//! These functions only format finished `AuditReport`s and classified rows;
//! they never compute signals.

pub mod json;
pub mod render;

pub use json::{watchlist_json, WatchlistEntry, WatchlistOutput};
pub use render::{render_audit, render_no_data, render_watchlist};
