#![allow(dead_code)]

use candlebot::domain::bar::{Bar, BarSeries};
use candlebot::domain::error::CandlebotError;
use candlebot::domain::portfolio::TradeRecord;
use candlebot::domain::strategy::{StrategyConfig, StrategyParams};
use candlebot::ports::data_port::DataPort;
use candlebot::ports::trade_log_port::TradeLogPort;
use chrono::{DateTime, TimeZone, Utc};
use std::cell::RefCell;
use std::collections::HashMap;

pub fn ts(minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, minute / 60, minute % 60, 0).unwrap()
}

pub fn make_bar(minute: u32, close: f64) -> Bar {
    Bar {
        timestamp: ts(minute),
        open: close,
        high: close + 1.0,
        low: (close - 1.0).max(0.0),
        close,
        volume: 1000.0,
    }
}

pub fn make_series(symbol: &str, closes: &[f64]) -> BarSeries {
    let bars = closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(i as u32, close))
        .collect();
    BarSeries::new(symbol, bars).unwrap()
}

/// The crossover fixture: short SMA(3) rises above SMA(5) at index 4, then
/// the downtrend flips it back below.
pub fn crossover_closes() -> Vec<f64> {
    vec![100.0, 102.0, 101.0, 103.0, 104.0, 102.0, 100.0, 99.0, 98.0, 97.0]
}

pub fn sma_config() -> StrategyConfig {
    StrategyConfig::new(
        StrategyParams::Sma {
            short_window: 3,
            long_window: 5,
        },
        0.01,
        10_000.0,
    )
    .unwrap()
}

pub fn rsi_config() -> StrategyConfig {
    StrategyConfig::new(
        StrategyParams::Rsi {
            period: 14,
            oversold: 30.0,
            overbought: 70.0,
        },
        0.01,
        10_000.0,
    )
    .unwrap()
}

pub struct MockDataPort {
    pub data: HashMap<String, Vec<f64>>,
    pub errors: HashMap<String, String>,
}

impl MockDataPort {
    pub fn new() -> Self {
        Self {
            data: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    pub fn with_closes(mut self, symbol: &str, closes: &[f64]) -> Self {
        self.data.insert(symbol.to_string(), closes.to_vec());
        self
    }

    pub fn with_error(mut self, symbol: &str, reason: &str) -> Self {
        self.errors.insert(symbol.to_string(), reason.to_string());
        self
    }
}

impl DataPort for MockDataPort {
    fn load_bars(&self, symbol: &str) -> Result<BarSeries, CandlebotError> {
        if let Some(reason) = self.errors.get(symbol) {
            return Err(CandlebotError::External {
                reason: reason.clone(),
            });
        }
        match self.data.get(symbol) {
            Some(closes) => Ok(make_series(symbol, closes)),
            None => Err(CandlebotError::NotFound {
                path: format!("{}.csv", symbol),
            }),
        }
    }
}

/// In-memory trade log sink.
pub struct MockTradeLog {
    pub records: RefCell<Vec<TradeRecord>>,
}

impl MockTradeLog {
    pub fn new() -> Self {
        Self {
            records: RefCell::new(Vec::new()),
        }
    }
}

impl TradeLogPort for MockTradeLog {
    fn append(&self, record: &TradeRecord) -> Result<(), CandlebotError> {
        self.records.borrow_mut().push(record.clone());
        Ok(())
    }
}
