//! Portfolio state machine and trade records.
//!
//! Binary position model: the portfolio is either all cash or all holdings,
//! never both. A BUY while all-cash converts the entire balance into the
//! asset at the bar's close; a SELL while invested converts everything back.
//! All other decision/state combinations are no-ops.

use chrono::{DateTime, Utc};
use std::fmt;

use crate::domain::signal::Decision;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => write!(f, "BUY"),
            TradeAction::Sell => write!(f, "SELL"),
        }
    }
}

impl TradeAction {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "BUY" => Some(TradeAction::Buy),
            "SELL" => Some(TradeAction::Sell),
            _ => None,
        }
    }
}

/// One executed transition. Append-only; never mutated after creation.
///
/// `balance` is the portfolio's value at the fill: the position notional
/// after a buy, the cash proceeds after a sell.
#[derive(Debug, Clone, PartialEq)]
pub struct TradeRecord {
    pub action: TradeAction,
    pub symbol: String,
    pub quantity: f64,
    pub price: f64,
    pub balance: f64,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioState {
    symbol: String,
    cash: f64,
    holdings: f64,
}

impl PortfolioState {
    pub fn new(symbol: &str, initial_balance: f64) -> Self {
        Self {
            symbol: symbol.to_string(),
            cash: initial_balance,
            holdings: 0.0,
        }
    }

    pub fn cash(&self) -> f64 {
        self.cash
    }

    pub fn holdings(&self) -> f64 {
        self.holdings
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn is_all_cash(&self) -> bool {
        self.holdings == 0.0
    }

    /// Apply one decision at the given close price.
    ///
    /// Returns the trade record when a transition actually executes. An
    /// ungated SELL while all-cash (or BUY while invested) is ignored here
    /// rather than in the evaluator.
    pub fn apply(
        &mut self,
        decision: Decision,
        price: f64,
        timestamp: DateTime<Utc>,
    ) -> Option<TradeRecord> {
        match decision {
            Decision::Buy if self.is_all_cash() && self.cash > 0.0 => {
                let quantity = self.cash / price;
                self.holdings = quantity;
                self.cash = 0.0;
                Some(TradeRecord {
                    action: TradeAction::Buy,
                    symbol: self.symbol.clone(),
                    quantity,
                    price,
                    balance: quantity * price,
                    timestamp,
                })
            }
            Decision::Sell if self.holdings > 0.0 => {
                let quantity = self.holdings;
                self.cash = quantity * price;
                self.holdings = 0.0;
                Some(TradeRecord {
                    action: TradeAction::Sell,
                    symbol: self.symbol.clone(),
                    quantity,
                    price,
                    balance: self.cash,
                    timestamp,
                })
            }
            _ => None,
        }
    }

    /// Reporting-only mark-to-market value. Does not execute a trade or
    /// mutate state.
    pub fn liquidation_value(&self, last_close: f64) -> f64 {
        if self.holdings > 0.0 {
            self.holdings * last_close
        } else {
            self.cash
        }
    }
}
