//! Sector market-cap records and the loaded dataset.

use chrono::NaiveDate;
use std::collections::BTreeSet;

/// One row of the source spreadsheet.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    /// `None` when the date code could not be parsed.
    pub date: Option<NaiveDate>,
    pub sector: String,
    pub market_cap: f64,
}

impl Record {
    pub fn new(date: Option<NaiveDate>, sector: impl Into<String>, market_cap: f64) -> Self {
        Self {
            date,
            sector: sector.into(),
            market_cap,
        }
    }
}

/// Parse a `YYYYMMDD` date code.
///
/// Numeric spreadsheet exports sometimes render the code as `20240102.0`; the
/// fractional zero is accepted. Anything else that does not parse is `None`.
pub fn parse_date_code(code: &str) -> Option<NaiveDate> {
    let trimmed = code.trim();
    let digits = trimmed.strip_suffix(".0").unwrap_or(trimmed);
    if digits.len() != 8 || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    NaiveDate::parse_from_str(digits, "%Y%m%d").ok()
}

/// The immutable in-memory table every view is computed from.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    records: Vec<Record>,
}

impl MarketData {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest non-null date, if any row has one.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        let mut dates = self.records.iter().filter_map(|r| r.date);
        let first = dates.next()?;
        Some(dates.fold((first, first), |(lo, hi), d| (lo.min(d), hi.max(d))))
    }

    pub fn null_date_count(&self) -> usize {
        self.records.iter().filter(|r| r.date.is_none()).count()
    }

    /// Distinct sector names in ascending order.
    pub fn sectors(&self) -> Vec<String> {
        self.records
            .iter()
            .map(|r| r.sector.as_str())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .map(String::from)
            .collect()
    }
}
