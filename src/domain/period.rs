//! Period units, bucket keys and their text labels.

use chrono::{Datelike, Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

use super::error::SectorcapError;

/// Bucket granularity selected by the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PeriodUnit {
    Year,
    Month,
    Week,
    Day,
}

impl PeriodUnit {
    pub const ALL: [PeriodUnit; 4] = [
        PeriodUnit::Year,
        PeriodUnit::Month,
        PeriodUnit::Week,
        PeriodUnit::Day,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PeriodUnit::Year => "year",
            PeriodUnit::Month => "month",
            PeriodUnit::Week => "week",
            PeriodUnit::Day => "day",
        }
    }

    /// Key of the bucket containing `date`.
    pub fn key_for(self, date: NaiveDate) -> PeriodKey {
        let start = match self {
            PeriodUnit::Year => NaiveDate::from_ymd_opt(date.year(), 1, 1).unwrap_or(date),
            PeriodUnit::Month => date.with_day(1).unwrap_or(date),
            PeriodUnit::Week => {
                date - Duration::days(date.weekday().num_days_from_monday() as i64)
            }
            PeriodUnit::Day => date,
        };
        PeriodKey { unit: self, start }
    }
}

impl fmt::Display for PeriodUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PeriodUnit {
    type Err = SectorcapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "year" | "y" => Ok(PeriodUnit::Year),
            "month" | "m" => Ok(PeriodUnit::Month),
            "week" | "w" => Ok(PeriodUnit::Week),
            "day" | "d" => Ok(PeriodUnit::Day),
            other => Err(SectorcapError::selection(
                "period",
                format!("unknown unit '{other}' (expected year, month, week or day)"),
            )),
        }
    }
}

/// How a period is written out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelStyle {
    /// Tables and transition labels: weeks show their full span.
    Table,
    /// Chart x-axis: weeks show their first day only.
    ChartIndex,
}

/// A period bucket identified by its unit and first calendar day.
///
/// Keys of the same unit order chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PeriodKey {
    pub unit: PeriodUnit,
    pub start: NaiveDate,
}

impl PeriodKey {
    /// Last calendar day inside the bucket.
    pub fn end(&self) -> NaiveDate {
        match self.unit {
            PeriodUnit::Year => NaiveDate::from_ymd_opt(self.start.year(), 12, 31)
                .unwrap_or(self.start),
            PeriodUnit::Month => {
                let (y, m) = if self.start.month() == 12 {
                    (self.start.year() + 1, 1)
                } else {
                    (self.start.year(), self.start.month() + 1)
                };
                NaiveDate::from_ymd_opt(y, m, 1)
                    .and_then(|d| d.pred_opt())
                    .unwrap_or(self.start)
            }
            PeriodUnit::Week => self.start + Duration::days(6),
            PeriodUnit::Day => self.start,
        }
    }

    pub fn label(&self, style: LabelStyle) -> String {
        match (self.unit, style) {
            (PeriodUnit::Year, _) => format!("{}", self.start.year()),
            (PeriodUnit::Month, _) => self.start.format("%Y-%m").to_string(),
            (PeriodUnit::Week, LabelStyle::Table) => format!(
                "{}/{}",
                self.start.format("%Y-%m-%d"),
                self.end().format("%Y-%m-%d")
            ),
            (PeriodUnit::Week, LabelStyle::ChartIndex) | (PeriodUnit::Day, _) => {
                self.start.format("%Y-%m-%d").to_string()
            }
        }
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.label(LabelStyle::Table))
    }
}

/// Recover the first day of a period from any label produced by
/// [`PeriodKey::label`]. Returns `None` for text that is not a period.
pub fn parse_period_label(label: &str) -> Option<NaiveDate> {
    let label = label.trim();
    if let Some((left, _)) = label.split_once('/') {
        return parse_period_label(left);
    }
    if let Ok(d) = NaiveDate::parse_from_str(label, "%Y-%m-%d") {
        return Some(d);
    }
    if label.len() == 7 {
        if let Ok(d) = NaiveDate::parse_from_str(&format!("{label}-01"), "%Y-%m-%d") {
            return Some(d);
        }
    }
    if label.len() == 4 && label.bytes().all(|b| b.is_ascii_digit()) {
        let year: i32 = label.parse().ok()?;
        return NaiveDate::from_ymd_opt(year, 1, 1);
    }
    None
}
