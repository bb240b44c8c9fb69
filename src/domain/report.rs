//! Trade-log summary statistics.

use crate::domain::portfolio::{TradeAction, TradeRecord};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total_trades: usize,
    pub buys: usize,
    pub sells: usize,
    pub avg_buy_price: f64,
    pub avg_sell_price: f64,
    /// Balance recorded on the most recent trade, 0 for an empty log.
    pub final_balance: f64,
}

impl Summary {
    pub fn compute(trades: &[TradeRecord]) -> Self {
        let mut buys = 0usize;
        let mut sells = 0usize;
        let mut buy_price_sum = 0.0;
        let mut sell_price_sum = 0.0;

        for trade in trades {
            match trade.action {
                TradeAction::Buy => {
                    buys += 1;
                    buy_price_sum += trade.price;
                }
                TradeAction::Sell => {
                    sells += 1;
                    sell_price_sum += trade.price;
                }
            }
        }

        Summary {
            total_trades: trades.len(),
            buys,
            sells,
            avg_buy_price: if buys > 0 {
                buy_price_sum / buys as f64
            } else {
                0.0
            },
            avg_sell_price: if sells > 0 {
                sell_price_sum / sells as f64
            } else {
                0.0
            },
            final_balance: trades.last().map(|t| t.balance).unwrap_or(0.0),
        }
    }
}

impl std::fmt::Display for Summary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Total Trades:      {}", self.total_trades)?;
        writeln!(f, "Total Buys:        {}", self.buys)?;
        writeln!(f, "Total Sells:       {}", self.sells)?;
        writeln!(f, "Average Buy Price: {:.2}", self.avg_buy_price)?;
        writeln!(f, "Average Sell Price: {:.2}", self.avg_sell_price)?;
        write!(f, "Final Balance:     {:.2}", self.final_balance)
    }
}
