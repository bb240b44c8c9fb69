//! Per-bar signal evaluation.
//!
//! The evaluator is position-agnostic: it maps indicator values and
//! configured thresholds to a decision and never looks at holdings.
//! Position-aware gating (ignoring a SELL while all-cash) belongs to the
//! portfolio simulator.

use std::fmt;

use crate::domain::indicator::{IndicatorPoint, IndicatorValue};
use crate::domain::strategy::StrategyParams;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Buy => write!(f, "BUY"),
            Decision::Sell => write!(f, "SELL"),
            Decision::Hold => write!(f, "HOLD"),
        }
    }
}

/// Evaluate one aligned indicator point.
///
/// Returns `None` while the indicator is still undefined at this bar, so the
/// caller can tell "not yet evaluable" apart from a genuine neutral
/// `Some(Hold)`.
pub fn evaluate(point: &IndicatorPoint, params: &StrategyParams) -> Option<Decision> {
    if !point.valid {
        return None;
    }

    match (*params, point.value) {
        (
            StrategyParams::Rsi {
                oversold,
                overbought,
                ..
            },
            IndicatorValue::Simple(rsi),
        ) => {
            if rsi < oversold {
                Some(Decision::Buy)
            } else if rsi > overbought {
                Some(Decision::Sell)
            } else {
                Some(Decision::Hold)
            }
        }
        (StrategyParams::Macd { .. }, IndicatorValue::Macd { line, signal }) => {
            if line > signal {
                Some(Decision::Buy)
            } else if line < signal {
                Some(Decision::Sell)
            } else {
                Some(Decision::Hold)
            }
        }
        (StrategyParams::Sma { .. }, IndicatorValue::SmaPair { short, long }) => {
            if short > long {
                Some(Decision::Buy)
            } else if short < long {
                Some(Decision::Sell)
            } else {
                Some(Decision::Hold)
            }
        }
        // indicator shape does not match the strategy; nothing to evaluate
        _ => None,
    }
}
