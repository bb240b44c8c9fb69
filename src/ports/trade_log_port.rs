//! Trade log sink port trait.

use crate::domain::error::CandlebotError;
use crate::domain::portfolio::TradeRecord;

/// Append-only persistence for executed trades. The core only produces the
/// records; storage format belongs to the adapter.
pub trait TradeLogPort {
    fn append(&self, record: &TradeRecord) -> Result<(), CandlebotError>;
}
