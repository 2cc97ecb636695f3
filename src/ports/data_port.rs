//! Data access port trait.

use crate::domain::error::SectorcapError;
use crate::domain::record::MarketData;

/// Source of the sector market-cap table. Loaded once per process.
pub trait DataPort {
    fn load(&self) -> Result<MarketData, SectorcapError>;

    /// Human-readable name of the source for log lines.
    fn describe(&self) -> String;
}
