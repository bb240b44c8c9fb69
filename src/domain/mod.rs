//! Core domain logic: bars, indicators, strategy evaluation, portfolio
//! simulation, backtesting, and live execution. Depends only on port traits,
//! never on concrete adapters.

pub mod backtest;
pub mod bar;
pub mod error;
pub mod indicator;
pub mod live;
pub mod portfolio;
pub mod report;
pub mod signal;
pub mod strategy;
