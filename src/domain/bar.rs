//! OHLCV bar representation and the validated, immutable bar series.

use chrono::{DateTime, Utc};

use crate::domain::error::CandlebotError;

/// One OHLCV observation for a fixed time interval.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Bar {
    fn check(&self) -> Result<(), String> {
        for (name, v) in [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
            ("volume", self.volume),
        ] {
            if !v.is_finite() {
                return Err(format!("{name} is not finite"));
            }
            if v < 0.0 {
                return Err(format!("{name} is negative ({v})"));
            }
        }
        Ok(())
    }
}

/// An ordered, immutable price history for one symbol.
///
/// Construction validates the whole series (strictly increasing timestamps,
/// non-negative finite fields); everything downstream assumes a valid series
/// and never re-checks.
#[derive(Debug, Clone, PartialEq)]
pub struct BarSeries {
    symbol: String,
    bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: &str, bars: Vec<Bar>) -> Result<Self, CandlebotError> {
        if bars.is_empty() {
            return Err(CandlebotError::Validation {
                reason: format!("empty bar series for {symbol}"),
            });
        }

        for (i, bar) in bars.iter().enumerate() {
            bar.check().map_err(|reason| CandlebotError::Validation {
                reason: format!("bar {i} of {symbol}: {reason}"),
            })?;

            if i > 0 && bar.timestamp <= bars[i - 1].timestamp {
                return Err(CandlebotError::Validation {
                    reason: format!(
                        "bar {i} of {symbol}: timestamp {} not after {}",
                        bar.timestamp,
                        bars[i - 1].timestamp
                    ),
                });
            }
        }

        Ok(Self {
            symbol: symbol.to_string(),
            bars,
        })
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn last(&self) -> &Bar {
        // non-empty by construction
        self.bars.last().expect("series is never empty")
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    /// Prefix of the series containing the first `n` bars.
    ///
    /// Returns `None` when `n` is zero or exceeds the length.
    pub fn truncated(&self, n: usize) -> Option<BarSeries> {
        if n == 0 || n > self.bars.len() {
            return None;
        }
        Some(BarSeries {
            symbol: self.symbol.clone(),
            bars: self.bars[..n].to_vec(),
        })
    }
}
