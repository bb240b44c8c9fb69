//! Technical indicator types and per-strategy computation.
//!
//! Every indicator is computed in a single linear pass over the series and
//! produces one [`IndicatorPoint`] per bar, aligned index-for-index with the
//! source [`BarSeries`]. A point with `valid == false` means the value is
//! undefined at that bar (insufficient lookback), never a computed zero.

pub mod ema;
pub mod macd;
pub mod rsi;
pub mod sma;

use std::fmt;

use crate::domain::bar::BarSeries;
use crate::domain::strategy::StrategyParams;

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorPoint {
    pub valid: bool,
    pub value: IndicatorValue,
}

impl IndicatorPoint {
    pub fn undefined() -> Self {
        Self {
            valid: false,
            value: IndicatorValue::Simple(0.0),
        }
    }

    pub fn simple(value: f64) -> Self {
        Self {
            valid: true,
            value: IndicatorValue::Simple(value),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IndicatorValue {
    Simple(f64),
    Macd { line: f64, signal: f64 },
    SmaPair { short: f64, long: f64 },
}

/// Indicator identity plus parameters, used for display and series tagging.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IndicatorKind {
    Sma(usize),
    Ema(usize),
    Rsi(usize),
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    SmaCross {
        short: usize,
        long: usize,
    },
}

impl fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IndicatorKind::Sma(window) => write!(f, "SMA({window})"),
            IndicatorKind::Ema(span) => write!(f, "EMA({span})"),
            IndicatorKind::Rsi(period) => write!(f, "RSI({period})"),
            IndicatorKind::Macd { fast, slow, signal } => {
                write!(f, "MACD({fast},{slow},{signal})")
            }
            IndicatorKind::SmaCross { short, long } => write!(f, "SMA_CROSS({short},{long})"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorSeries {
    pub kind: IndicatorKind,
    pub points: Vec<IndicatorPoint>,
}

impl IndicatorSeries {
    pub fn point(&self, index: usize) -> Option<&IndicatorPoint> {
        self.points.get(index)
    }
}

/// Compute the indicator series a strategy needs, once for the whole run.
pub fn compute_indicators(series: &BarSeries, params: &StrategyParams) -> IndicatorSeries {
    match *params {
        StrategyParams::Rsi { period, .. } => rsi::calculate_rsi(series, period),
        StrategyParams::Macd { fast, slow, signal } => {
            macd::calculate_macd(series, fast, slow, signal)
        }
        StrategyParams::Sma {
            short_window,
            long_window,
        } => sma::calculate_sma_cross(series, short_window, long_window),
    }
}
