//! Local CSV price files.
//!
//! Accepts the common OHLC export layout (`Date,Open,High,Low,Close[,...]`,
//! header names matched case-insensitively, extra columns ignored). The path is
//! either a single file used for any symbol or a directory holding
//! `<SYMBOL>.csv` files.

use std::io::Read;
use std::path::PathBuf;

use chrono::NaiveDate;
use taoterm_core::PriceBar;
use tracing::debug;

use super::provider::{DataError, DataSource, PriceProvider};

#[derive(Debug, Clone)]
pub struct CsvPriceProvider {
    path: PathBuf,
}

impl CsvPriceProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn file_for(&self, symbol: &str) -> PathBuf {
        if self.path.is_dir() {
            self.path.join(format!("{symbol}.csv"))
        } else {
            self.path.clone()
        }
    }
}

impl PriceProvider for CsvPriceProvider {
    fn name(&self) -> &str {
        "csv_import"
    }

    fn source(&self) -> DataSource {
        DataSource::CsvImport
    }

    fn fetch(
        &self,
        symbol: &str,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Option<Vec<PriceBar>>, DataError> {
        let file = self.file_for(symbol);
        if !file.is_file() {
            debug!(symbol, path = %file.display(), "no CSV file for symbol");
            return Ok(None);
        }
        let reader = std::fs::File::open(&file)
            .map_err(|e| DataError::Csv(format!("{}: {e}", file.display())))?;
        let mut bars = read_price_csv(reader)?;
        bars.retain(|b| b.date >= start && b.date <= end);
        bars.sort_by_key(|b| b.date);
        Ok((!bars.is_empty()).then_some(bars))
    }
}

/// Parse OHLC rows from any reader. Rows with a blank or `null` price are
/// skipped; a malformed date or number is an error.
pub fn read_price_csv<R: Read>(reader: R) -> Result<Vec<PriceBar>, DataError> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| DataError::Csv(e.to_string()))?
        .clone();

    let column = |name: &str| {
        headers
            .iter()
            .position(|h| h.eq_ignore_ascii_case(name))
            .ok_or_else(|| DataError::Csv(format!("missing column '{name}'")))
    };
    let date_col = column("date")?;
    let cols = [column("open")?, column("high")?, column("low")?, column("close")?];

    let mut bars = Vec::new();
    for (line, record) in rdr.records().enumerate() {
        let record = record.map_err(|e| DataError::Csv(e.to_string()))?;
        let raw_date = record.get(date_col).unwrap_or_default();
        let date = parse_date(raw_date).ok_or_else(|| {
            DataError::Csv(format!("row {}: invalid date '{raw_date}'", line + 2))
        })?;

        let mut values = [0.0_f64; 4];
        let mut blank = false;
        for (slot, &col) in values.iter_mut().zip(&cols) {
            let raw = record.get(col).unwrap_or_default();
            if raw.is_empty() || raw.eq_ignore_ascii_case("null") {
                blank = true;
                break;
            }
            *slot = raw.parse().map_err(|_| {
                DataError::Csv(format!("row {}: invalid number '{raw}'", line + 2))
            })?;
        }
        if blank {
            continue;
        }

        let [open, high, low, close] = values;
        bars.push(PriceBar::new(date, open, high, low, close));
    }

    Ok(bars)
}

/// `YYYY-MM-DD`, optionally followed by a time component.
fn parse_date(raw: &str) -> Option<NaiveDate> {
    let day = raw.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}
