//! Historical data access port trait.

use crate::domain::bar::BarSeries;
use crate::domain::error::CandlebotError;

pub trait DataPort {
    /// Load the full ordered history for a symbol.
    fn load_bars(&self, symbol: &str) -> Result<BarSeries, CandlebotError>;
}
