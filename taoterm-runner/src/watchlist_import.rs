//! Watchlist CSV import.
//!
//! TradingView screener exports name the oscillator columns after their
//! settings. They are mapped to the canonical `ADX` / `Stoch` names here, by
//! header text, never by position. A row whose oscillator cell is blank stays
//! `None`; the classifier reports it as a missing field.

use std::io::Read;
use std::path::Path;

use taoterm_core::watchlist::{ADX_FIELD, STOCH_FIELD};
use taoterm_core::WatchlistRow;
use thiserror::Error;

/// Export header → canonical column name.
pub const HEADER_ALIASES: &[(&str, &str)] = &[
    ("Average Directional Index (14) 1 day", ADX_FIELD),
    ("Stochastic (8,3,3) 1 day, %K", STOCH_FIELD),
];

const SYMBOL: &str = "Symbol";
const PRICE: &str = "Price";
const SECTOR: &str = "Sector";

#[derive(Debug, Error)]
pub enum WatchlistImportError {
    #[error("failed to open watchlist {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },

    #[error("malformed watchlist CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("watchlist has no '{0}' column")]
    MissingColumn(&'static str),
}

/// Canonical name for a raw header.
pub fn normalize_header(raw: &str) -> &str {
    let trimmed = raw.trim();
    HEADER_ALIASES
        .iter()
        .find(|(alias, _)| alias.eq_ignore_ascii_case(trimmed))
        .map(|(_, canonical)| *canonical)
        .unwrap_or(trimmed)
}

/// Read watchlist rows from any CSV reader.
pub fn load_watchlist_csv<R: Read>(reader: R) -> Result<Vec<WatchlistRow>, WatchlistImportError> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);
    let headers: Vec<String> = rdr
        .headers()?
        .iter()
        .map(|h| normalize_header(h).to_string())
        .collect();

    let find = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let symbol_col = find(SYMBOL).ok_or(WatchlistImportError::MissingColumn(SYMBOL))?;
    let price_col = find(PRICE);
    let sector_col = find(SECTOR);
    let adx_col = find(ADX_FIELD);
    let stoch_col = find(STOCH_FIELD);

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record?;
        let symbol = record.get(symbol_col).unwrap_or_default();
        if symbol.is_empty() {
            continue;
        }
        let cell = |col: Option<usize>| col.and_then(|c| record.get(c)).filter(|v| !v.is_empty());
        let number = |col: Option<usize>| cell(col).and_then(|v| v.parse::<f64>().ok());

        rows.push(WatchlistRow {
            symbol: symbol.to_uppercase(),
            price: number(price_col),
            adx: number(adx_col),
            stochastic_k: number(stoch_col),
            sector: cell(sector_col).map(str::to_string),
        });
    }

    Ok(rows)
}

pub fn load_watchlist_file(path: &Path) -> Result<Vec<WatchlistRow>, WatchlistImportError> {
    let file = std::fs::File::open(path).map_err(|source| WatchlistImportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_watchlist_csv(file)
}
