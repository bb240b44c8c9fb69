//! Strategy configuration: indicator parameters, thresholds, and sizing.

use std::fmt;

use crate::domain::error::CandlebotError;

/// Which of the three built-in strategies a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StrategyKind {
    Rsi,
    Macd,
    Sma,
}

impl StrategyKind {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "RSI" => Some(StrategyKind::Rsi),
            "MACD" => Some(StrategyKind::Macd),
            "SMA" => Some(StrategyKind::Sma),
            _ => None,
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StrategyKind::Rsi => write!(f, "RSI"),
            StrategyKind::Macd => write!(f, "MACD"),
            StrategyKind::Sma => write!(f, "SMA"),
        }
    }
}

/// Per-strategy indicator periods and thresholds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StrategyParams {
    Rsi {
        period: usize,
        oversold: f64,
        overbought: f64,
    },
    Macd {
        fast: usize,
        slow: usize,
        signal: usize,
    },
    Sma {
        short_window: usize,
        long_window: usize,
    },
}

impl StrategyParams {
    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyParams::Rsi { .. } => StrategyKind::Rsi,
            StrategyParams::Macd { .. } => StrategyKind::Macd,
            StrategyParams::Sma { .. } => StrategyKind::Sma,
        }
    }

    /// Bars needed before the last bar of a series can be evaluated.
    ///
    /// RSI needs one price change, MACD is defined from the first bar, and
    /// an SMA crossover needs the longer window filled.
    pub fn min_bars(&self) -> usize {
        match *self {
            StrategyParams::Rsi { .. } => 2,
            StrategyParams::Macd { .. } => 1,
            StrategyParams::Sma {
                short_window,
                long_window,
            } => short_window.max(long_window),
        }
    }

    pub fn validate(&self) -> Result<(), CandlebotError> {
        let invalid = |key: &str, reason: &str| CandlebotError::ConfigInvalid {
            section: self.kind().to_string().to_lowercase(),
            key: key.into(),
            reason: reason.into(),
        };

        match *self {
            StrategyParams::Rsi {
                period,
                oversold,
                overbought,
            } => {
                if period == 0 {
                    return Err(invalid("period", "must be at least 1"));
                }
                if !(0.0..=100.0).contains(&oversold) || !(0.0..=100.0).contains(&overbought) {
                    return Err(invalid("oversold", "thresholds must lie in [0, 100]"));
                }
                if oversold >= overbought {
                    return Err(invalid(
                        "oversold",
                        "oversold threshold must be below overbought",
                    ));
                }
            }
            StrategyParams::Macd { fast, slow, signal } => {
                if fast == 0 || slow == 0 || signal == 0 {
                    return Err(invalid("fast_period", "periods must be at least 1"));
                }
                if fast >= slow {
                    return Err(invalid("fast_period", "fast period must be below slow"));
                }
            }
            StrategyParams::Sma {
                short_window,
                long_window,
            } => {
                if short_window == 0 || long_window == 0 {
                    return Err(invalid("short_window", "windows must be at least 1"));
                }
                if short_window >= long_window {
                    return Err(invalid(
                        "short_window",
                        "short window must be below long window",
                    ));
                }
            }
        }
        Ok(())
    }
}

/// Immutable configuration for one run (backtest or live tick).
#[derive(Debug, Clone, PartialEq)]
pub struct StrategyConfig {
    pub params: StrategyParams,
    pub order_size: f64,
    pub initial_balance: f64,
}

impl StrategyConfig {
    pub fn new(
        params: StrategyParams,
        order_size: f64,
        initial_balance: f64,
    ) -> Result<Self, CandlebotError> {
        params.validate()?;

        if order_size <= 0.0 || !order_size.is_finite() {
            return Err(CandlebotError::ConfigInvalid {
                section: "strategy".into(),
                key: "order_size".into(),
                reason: "must be a positive number".into(),
            });
        }
        if initial_balance <= 0.0 || !initial_balance.is_finite() {
            return Err(CandlebotError::ConfigInvalid {
                section: "strategy".into(),
                key: "initial_balance".into(),
                reason: "must be a positive number".into(),
            });
        }

        Ok(Self {
            params,
            order_size,
            initial_balance,
        })
    }
}
