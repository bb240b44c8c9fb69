//! Collaborator traits the domain depends on.

pub mod config_port;
pub mod data_port;
pub mod exchange_port;
pub mod trade_log_port;
