//! Append-only CSV trade log adapter.
//!
//! Columns match the report reader: `action,symbol,quantity,price,balance,
//! timestamp`. The header is written once, when the file is created or
//! empty, so repeated runs against the same file keep appending rows.

use crate::domain::error::CandlebotError;
use crate::domain::portfolio::{TradeAction, TradeRecord};
use crate::ports::trade_log_port::TradeLogPort;
use chrono::{DateTime, Utc};
use std::fs::OpenOptions;
use std::path::PathBuf;

pub struct CsvTradeLog {
    path: PathBuf,
}

impl CsvTradeLog {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }

    /// Read every logged trade back, oldest first.
    pub fn read_all(&self) -> Result<Vec<TradeRecord>, CandlebotError> {
        if !self.path.exists() {
            return Err(CandlebotError::NotFound {
                path: self.path.display().to_string(),
            });
        }
        let display = self.path.display().to_string();
        let parse_err = |reason: String| CandlebotError::Parse {
            path: display.clone(),
            reason,
        };

        let mut rdr = csv::Reader::from_path(&self.path)
            .map_err(|e| parse_err(format!("failed to open reader: {}", e)))?;

        let mut records = Vec::new();
        for (row, result) in rdr.records().enumerate() {
            let record = result.map_err(|e| parse_err(format!("row {}: {}", row + 1, e)))?;

            let field = |index: usize, name: &str| -> Result<String, CandlebotError> {
                record
                    .get(index)
                    .map(|s| s.trim().to_string())
                    .ok_or_else(|| parse_err(format!("row {}: missing {} column", row + 1, name)))
            };

            let action = TradeAction::parse(&field(0, "action")?).ok_or_else(|| {
                parse_err(format!("row {}: unknown trade action", row + 1))
            })?;
            let quantity: f64 = field(2, "quantity")?
                .parse()
                .map_err(|e| parse_err(format!("row {}: invalid quantity: {}", row + 1, e)))?;
            let price: f64 = field(3, "price")?
                .parse()
                .map_err(|e| parse_err(format!("row {}: invalid price: {}", row + 1, e)))?;
            let balance: f64 = field(4, "balance")?
                .parse()
                .map_err(|e| parse_err(format!("row {}: invalid balance: {}", row + 1, e)))?;
            let timestamp = DateTime::parse_from_rfc3339(&field(5, "timestamp")?)
                .map(|dt| dt.with_timezone(&Utc))
                .map_err(|e| parse_err(format!("row {}: invalid timestamp: {}", row + 1, e)))?;

            records.push(TradeRecord {
                action,
                symbol: field(1, "symbol")?,
                quantity,
                price,
                balance,
                timestamp,
            });
        }
        Ok(records)
    }
}

impl TradeLogPort for CsvTradeLog {
    fn append(&self, record: &TradeRecord) -> Result<(), CandlebotError> {
        let needs_header = match std::fs::metadata(&self.path) {
            Ok(meta) => meta.len() == 0,
            Err(_) => true,
        };

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        let mut wtr = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        let io_err = |e: csv::Error| CandlebotError::External {
            reason: format!("trade log write failed: {}", e),
        };

        if needs_header {
            wtr.write_record(["action", "symbol", "quantity", "price", "balance", "timestamp"])
                .map_err(io_err)?;
        }
        wtr.write_record([
            record.action.to_string(),
            record.symbol.clone(),
            record.quantity.to_string(),
            record.price.to_string(),
            record.balance.to_string(),
            record.timestamp.to_rfc3339(),
        ])
        .map_err(io_err)?;
        wtr.flush()?;
        Ok(())
    }
}
