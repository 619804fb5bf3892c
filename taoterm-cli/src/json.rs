//! JSON output for the `watchlist` command.

use serde::Serialize;
use taoterm_core::{ClassifiedRow, SetupTag, WatchlistError, WatchlistRow};
use taoterm_runner::AuditReport;

/// One watchlist row as emitted in JSON. Unclassifiable rows keep their
/// imported fields, have a null `setup` and carry the reason in `error`.
#[derive(Debug, Serialize)]
pub struct WatchlistEntry<'a> {
    #[serde(flatten)]
    pub row: &'a WatchlistRow,
    pub setup: Option<SetupTag>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// The whole `watchlist --json` document.
#[derive(Debug, Serialize)]
pub struct WatchlistOutput<'a> {
    pub watchlist: Vec<WatchlistEntry<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audit: Option<&'a AuditReport>,
}

impl<'a> WatchlistOutput<'a> {
    /// Pair each row with its classification result (same order as `rows`).
    pub fn new(
        rows: &'a [WatchlistRow],
        results: &[Result<ClassifiedRow, WatchlistError>],
        audit: Option<&'a AuditReport>,
    ) -> Self {
        let watchlist = rows
            .iter()
            .zip(results)
            .map(|(row, result)| match result {
                Ok(classified) => WatchlistEntry {
                    row,
                    setup: Some(classified.setup),
                    error: None,
                },
                Err(err) => WatchlistEntry {
                    row,
                    setup: None,
                    error: Some(err.to_string()),
                },
            })
            .collect();
        Self { watchlist, audit }
    }
}

/// Render rows, their classifications and an optional audit as one JSON document.
pub fn watchlist_json(
    rows: &[WatchlistRow],
    results: &[Result<ClassifiedRow, WatchlistError>],
    audit: Option<&AuditReport>,
) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&WatchlistOutput::new(rows, results, audit))
}
