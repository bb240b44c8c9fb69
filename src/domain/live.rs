//! Live execution: one evaluation tick against an exchange.
//!
//! Reuses the same indicator engine and evaluator as the backtester but
//! sends decisions to the exchange collaborator instead of the simulator.
//! Ports are injected explicitly; there is no shared client state.

use crate::domain::bar::BarSeries;
use crate::domain::error::CandlebotError;
use crate::domain::indicator::compute_indicators;
use crate::domain::portfolio::{TradeAction, TradeRecord};
use crate::domain::signal::{evaluate, Decision};
use crate::domain::strategy::StrategyConfig;
use crate::ports::exchange_port::ExchangePort;
use crate::ports::trade_log_port::TradeLogPort;

/// Market-data settings for live ticks, loaded once per run.
#[derive(Debug, Clone, PartialEq)]
pub struct LiveSettings {
    pub symbols: Vec<String>,
    pub interval: String,
    pub limit: usize,
    /// Asset whose free balance is recorded after a fill.
    pub quote_asset: String,
}

/// What a single tick did.
#[derive(Debug, Clone, PartialEq)]
pub struct TickOutcome {
    /// `None` when the latest bar was not yet evaluable.
    pub decision: Option<Decision>,
    /// Set only when an order was placed and logged.
    pub trade: Option<TradeRecord>,
}

/// Fetch the latest bars for one symbol, evaluate the newest bar, and place
/// a market order on a BUY or SELL decision.
///
/// Fails with `InsufficientData` when the exchange returns fewer bars than
/// the configured indicator needs; external failures propagate unchanged.
pub fn run_live_tick(
    exchange: &dyn ExchangePort,
    trade_log: &dyn TradeLogPort,
    symbol: &str,
    settings: &LiveSettings,
    config: &StrategyConfig,
) -> Result<TickOutcome, CandlebotError> {
    let bars = exchange.fetch_klines(symbol, &settings.interval, settings.limit)?;
    let series = BarSeries::new(symbol, bars)?;

    let minimum = config.params.min_bars();
    if series.len() < minimum {
        return Err(CandlebotError::InsufficientData {
            symbol: symbol.to_string(),
            bars: series.len(),
            minimum,
        });
    }

    let indicators = compute_indicators(&series, &config.params);
    let last_index = series.len() - 1;
    let decision = indicators
        .point(last_index)
        .and_then(|point| evaluate(point, &config.params));

    let side = match decision {
        Some(Decision::Buy) => TradeAction::Buy,
        Some(Decision::Sell) => TradeAction::Sell,
        Some(Decision::Hold) | None => {
            return Ok(TickOutcome {
                decision,
                trade: None,
            });
        }
    };

    exchange.place_order(symbol, side, config.order_size)?;
    let balance = exchange.fetch_balance(&settings.quote_asset)?;

    let last = series.last();
    let record = TradeRecord {
        action: side,
        symbol: symbol.to_string(),
        quantity: config.order_size,
        price: last.close,
        balance,
        timestamp: last.timestamp,
    };
    trade_log.append(&record)?;

    Ok(TickOutcome {
        decision,
        trade: Some(record),
    })
}
