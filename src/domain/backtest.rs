//! Backtest runner: precompute indicators once, then fold bars in order.
//!
//! The fold is strictly sequential and causal: the decision at bar i depends
//! only on bars up to and including i. Indicator series are computed in one
//! linear pass before the fold instead of being re-derived per bar.

use crate::domain::bar::BarSeries;
use crate::domain::indicator::compute_indicators;
use crate::domain::portfolio::{PortfolioState, TradeRecord};
use crate::domain::signal::evaluate;
use crate::domain::strategy::StrategyConfig;

#[derive(Debug, Clone, PartialEq)]
pub struct BacktestResult {
    /// Final balance, marked to the last close when the run ends invested.
    pub final_balance: f64,
    pub trades: Vec<TradeRecord>,
    /// Bars where the indicator was defined and a decision was evaluated.
    pub bars_evaluated: usize,
    /// Warmup bars skipped because the indicator was not yet defined.
    pub bars_skipped: usize,
}

pub fn run_backtest(series: &BarSeries, config: &StrategyConfig) -> BacktestResult {
    let indicators = compute_indicators(series, &config.params);
    let mut portfolio = PortfolioState::new(series.symbol(), config.initial_balance);
    let mut trades = Vec::new();
    let mut bars_evaluated = 0;
    let mut bars_skipped = 0;

    for (bar, point) in series.bars().iter().zip(&indicators.points) {
        match evaluate(point, &config.params) {
            Some(decision) => {
                bars_evaluated += 1;
                if let Some(record) = portfolio.apply(decision, bar.close, bar.timestamp) {
                    trades.push(record);
                }
            }
            None => bars_skipped += 1,
        }
    }

    BacktestResult {
        final_balance: portfolio.liquidation_value(series.last().close),
        trades,
        bars_evaluated,
        bars_skipped,
    }
}
