//! Core domain types and logic.

pub mod record;
pub mod period;
pub mod range;
pub mod aggregate;
pub mod volatility;
pub mod timeseries;
pub mod view;
pub mod settings;
pub mod error;
