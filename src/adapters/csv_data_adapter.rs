//! CSV file data adapter.
//!
//! Reads one `{SYMBOL}.csv` file per symbol from a base directory. Expected
//! header is `timestamp,open,high,low,close,volume`; timestamps are either
//! epoch milliseconds or RFC 3339. Rows are sorted by timestamp before the
//! series is validated, so an unsorted file is accepted while a file with
//! duplicate timestamps is not.

use crate::domain::bar::{Bar, BarSeries};
use crate::domain::error::CandlebotError;
use crate::ports::data_port::DataPort;
use chrono::{DateTime, TimeZone, Utc};
use std::path::PathBuf;

pub struct CsvDataAdapter {
    base_path: PathBuf,
}

impl CsvDataAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol))
    }
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(millis) = raw.parse::<i64>() {
        return Utc.timestamp_millis_opt(millis).single();
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

fn parse_field(record: &csv::StringRecord, index: usize, name: &str) -> Result<f64, String> {
    record
        .get(index)
        .ok_or_else(|| format!("missing {} column", name))?
        .trim()
        .parse()
        .map_err(|e| format!("invalid {} value: {}", name, e))
}

impl DataPort for CsvDataAdapter {
    fn load_bars(&self, symbol: &str) -> Result<BarSeries, CandlebotError> {
        let path = self.csv_path(symbol);
        if !path.exists() {
            return Err(CandlebotError::NotFound {
                path: path.display().to_string(),
            });
        }
        let display = path.display().to_string();

        let parse_err = |reason: String| CandlebotError::Parse {
            path: display.clone(),
            reason,
        };

        let mut rdr = csv::Reader::from_path(&path)
            .map_err(|e| parse_err(format!("failed to open reader: {}", e)))?;

        let mut bars = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| parse_err(format!("row {}: {}", row + 1, e)))?;

            let raw_ts = record
                .get(0)
                .ok_or_else(|| parse_err(format!("row {}: missing timestamp column", row + 1)))?;
            let timestamp = parse_timestamp(raw_ts.trim()).ok_or_else(|| {
                parse_err(format!("row {}: unrecognised timestamp {:?}", row + 1, raw_ts))
            })?;

            let row_err = |reason: String| parse_err(format!("row {}: {}", row + 1, reason));
            bars.push(Bar {
                timestamp,
                open: parse_field(&record, 1, "open").map_err(row_err)?,
                high: parse_field(&record, 2, "high").map_err(row_err)?,
                low: parse_field(&record, 3, "low").map_err(row_err)?,
                close: parse_field(&record, 4, "close").map_err(row_err)?,
                volume: parse_field(&record, 5, "volume").map_err(row_err)?,
            });
        }

        bars.sort_by_key(|b| b.timestamp);
        BarSeries::new(symbol, bars)
    }
}
