//! In-memory paper trading exchange.
//!
//! Serves klines from a fixed bar series and fills every order at the
//! latest close, adjusting a per-asset balance map. Lets the live tick
//! path run end to end without touching a real venue.

use crate::domain::bar::{Bar, BarSeries};
use crate::domain::error::CandlebotError;
use crate::domain::portfolio::TradeAction;
use crate::ports::exchange_port::{ExchangePort, OrderResult};
use std::cell::RefCell;
use std::collections::HashMap;

#[derive(Debug, Clone, PartialEq)]
pub struct PaperOrder {
    pub order_id: u64,
    pub symbol: String,
    pub side: TradeAction,
    pub quantity: f64,
    pub price: f64,
}

pub struct PaperExchange {
    series: BarSeries,
    quote_asset: String,
    balances: RefCell<HashMap<String, f64>>,
    orders: RefCell<Vec<PaperOrder>>,
}

impl PaperExchange {
    pub fn new(series: BarSeries, quote_asset: &str, quote_balance: f64) -> Self {
        let mut balances = HashMap::new();
        balances.insert(quote_asset.to_string(), quote_balance);
        Self {
            series,
            quote_asset: quote_asset.to_string(),
            balances: RefCell::new(balances),
            orders: RefCell::new(Vec::new()),
        }
    }

    pub fn orders(&self) -> Vec<PaperOrder> {
        self.orders.borrow().clone()
    }
}

impl ExchangePort for PaperExchange {
    fn fetch_klines(
        &self,
        symbol: &str,
        _interval: &str,
        limit: usize,
    ) -> Result<Vec<Bar>, CandlebotError> {
        if symbol != self.series.symbol() {
            return Err(CandlebotError::External {
                reason: format!("unknown symbol {}", symbol),
            });
        }
        let bars = self.series.bars();
        let start = bars.len().saturating_sub(limit);
        Ok(bars[start..].to_vec())
    }

    fn place_order(
        &self,
        symbol: &str,
        side: TradeAction,
        quantity: f64,
    ) -> Result<OrderResult, CandlebotError> {
        if symbol != self.series.symbol() {
            return Err(CandlebotError::External {
                reason: format!("unknown symbol {}", symbol),
            });
        }
        if quantity <= 0.0 {
            return Err(CandlebotError::External {
                reason: format!("invalid order quantity {}", quantity),
            });
        }

        let price = self.series.last().close;
        let notional = quantity * price;
        {
            let mut balances = self.balances.borrow_mut();
            let quote = balances.entry(self.quote_asset.clone()).or_insert(0.0);
            match side {
                TradeAction::Buy => {
                    if *quote < notional {
                        return Err(CandlebotError::External {
                            reason: format!(
                                "insufficient {} balance: have {}, need {}",
                                self.quote_asset, quote, notional
                            ),
                        });
                    }
                    *quote -= notional;
                }
                TradeAction::Sell => *quote += notional,
            }
        }

        let mut orders = self.orders.borrow_mut();
        let order_id = orders.len() as u64 + 1;
        orders.push(PaperOrder {
            order_id,
            symbol: symbol.to_string(),
            side,
            quantity,
            price,
        });
        Ok(OrderResult {
            order_id,
            status: "FILLED".into(),
        })
    }

    fn fetch_balance(&self, asset: &str) -> Result<f64, CandlebotError> {
        Ok(self.balances.borrow().get(asset).copied().unwrap_or(0.0))
    }
}
