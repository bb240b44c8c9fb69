//! Concrete implementations of the port traits.

pub mod csv_data_adapter;
pub mod csv_trade_log;
pub mod ini_config_adapter;
pub mod paper_exchange;
