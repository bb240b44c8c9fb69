//! Exchange access port trait (live mode only).
//!
//! The core treats every method as a potentially failing remote call and
//! propagates failures unchanged; retry and backoff policy belongs to the
//! adapter or its caller, never to the decision logic.

use crate::domain::bar::Bar;
use crate::domain::error::CandlebotError;
use crate::domain::portfolio::TradeAction;

#[derive(Debug, Clone, PartialEq)]
pub struct OrderResult {
    pub order_id: u64,
    pub status: String,
}

pub trait ExchangePort {
    /// Most recent `limit` bars for the symbol at the given interval.
    fn fetch_klines(
        &self,
        symbol: &str,
        interval: &str,
        limit: usize,
    ) -> Result<Vec<Bar>, CandlebotError>;

    fn place_order(
        &self,
        symbol: &str,
        side: TradeAction,
        quantity: f64,
    ) -> Result<OrderResult, CandlebotError>;

    /// Free balance of one asset.
    fn fetch_balance(&self, asset: &str) -> Result<f64, CandlebotError>;
}
