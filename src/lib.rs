//! candlebot: indicator-driven trading strategy engine and backtester.
//!
//! Hexagonal architecture: decision logic in [`domain`], collaborator traits
//! in [`ports`], concrete implementations in [`adapters`].

pub mod domain;
pub mod ports;
pub mod adapters;
pub mod cli;
