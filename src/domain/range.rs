//! Inclusive date-range selection.

use chrono::NaiveDate;

use super::record::{MarketData, Record};

/// Inclusive `[start, end]` interval. An inverted range selects nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Resolve a possibly partial user selection against the dataset bounds.
    ///
    /// Returns `None` only when a bound is missing and the dataset has no
    /// dated rows to default it from.
    pub fn resolve(
        data: &MarketData,
        start: Option<NaiveDate>,
        end: Option<NaiveDate>,
    ) -> Option<Self> {
        let bounds = data.date_bounds();
        let start = start.or(bounds.map(|b| b.0))?;
        let end = end.or(bounds.map(|b| b.1))?;
        Some(Self { start, end })
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn is_inverted(&self) -> bool {
        self.start > self.end
    }
}

/// Records whose date lies inside `range`. Null-dated rows never match.
pub fn filter_range<'a>(data: &'a MarketData, range: &DateRange) -> Vec<&'a Record> {
    data.records()
        .iter()
        .filter(|r| r.date.is_some_and(|d| range.contains(d)))
        .collect()
}
