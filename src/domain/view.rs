//! Page selection and the view models each page renders.
//!
//! Every view is recomputed from scratch from the loaded [`MarketData`] and
//! the current [`Selection`]; nothing is cached between renders.

use chrono::NaiveDate;
use std::fmt;
use std::str::FromStr;

use super::aggregate::{aggregate, AggregatedRow};
use super::error::SectorcapError;
use super::period::{LabelStyle, PeriodUnit};
use super::range::{filter_range, DateRange};
use super::record::{MarketData, Record};
use super::timeseries::{build_time_series, TimeSeries, DISPLAY_DIVISOR};
use super::volatility::{end_to_end, incremental, top_growth, IncrementalTable, SectorChange};

pub const NO_DATA_MESSAGE: &str = "No data in the selected period.";
pub const DEFAULT_TOP_N: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    RawData,
    Volatility,
    TopGrowth,
}

impl Page {
    pub const ALL: [Page; 3] = [Page::RawData, Page::Volatility, Page::TopGrowth];

    pub fn as_str(&self) -> &'static str {
        match self {
            Page::RawData => "raw",
            Page::Volatility => "volatility",
            Page::TopGrowth => "top",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Page::RawData => "Raw Data",
            Page::Volatility => "Volatility",
            Page::TopGrowth => "Top Growth Sectors",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = SectorcapError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "raw" | "raw-data" | "1" => Ok(Page::RawData),
            "volatility" | "vol" | "2" => Ok(Page::Volatility),
            "top" | "top-growth" | "3" => Ok(Page::TopGrowth),
            other => Err(SectorcapError::selection(
                "page",
                format!("unknown page '{other}' (expected raw, volatility or top)"),
            )),
        }
    }
}

/// Everything the user picked for one render.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub unit: PeriodUnit,
    pub range: DateRange,
    pub page: Page,
}

impl Selection {
    /// Build a selection from raw user input. Blank values fall back to
    /// defaults: yearly buckets, the raw-data page and the dataset's full
    /// date range.
    pub fn parse(
        data: &MarketData,
        unit: Option<&str>,
        start: Option<&str>,
        end: Option<&str>,
        page: Option<&str>,
    ) -> Result<Self, SectorcapError> {
        let unit = match non_blank(unit) {
            Some(s) => s.parse()?,
            None => PeriodUnit::Year,
        };
        let page = match non_blank(page) {
            Some(s) => s.parse()?,
            None => Page::RawData,
        };
        let start = non_blank(start).map(|s| parse_date("start", s)).transpose()?;
        let end = non_blank(end).map(|s| parse_date("end", s)).transpose()?;
        let range = DateRange::resolve(data, start, end).ok_or_else(|| {
            SectorcapError::selection("range", "dataset has no dated rows; give both start and end")
        })?;
        Ok(Self { unit, range, page })
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate, SectorcapError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| SectorcapError::selection(field, format!("'{value}' is not a YYYY-MM-DD date")))
}

/// Display settings that come from configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewOptions {
    pub divisor: f64,
    pub top_n: usize,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            divisor: DISPLAY_DIVISOR,
            top_n: DEFAULT_TOP_N,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    pub period: String,
    pub sector: String,
    /// Market cap in display units, rounded half to even.
    pub market_cap: i64,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawTable {
    pub rows: Vec<RawRow>,
}

impl RawTable {
    pub const HEADERS: [&'static str; 3] = ["Period", "Sector", "Market Cap (100M)"];
}

#[derive(Debug, Clone, PartialEq)]
pub struct VolatilityView {
    pub end_to_end: Vec<SectorChange>,
    pub incremental: IncrementalTable,
    pub chart: TimeSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TopGrowthView {
    pub top: Vec<SectorChange>,
    pub chart: TimeSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub enum View {
    RawData(RawTable),
    Volatility(VolatilityView),
    TopGrowth(TopGrowthView),
    /// Volatility or top-growth page over an empty selection.
    NoData(Page),
}

impl View {
    pub fn page(&self) -> Page {
        match self {
            View::RawData(_) => Page::RawData,
            View::Volatility(_) => Page::Volatility,
            View::TopGrowth(_) => Page::TopGrowth,
            View::NoData(page) => *page,
        }
    }
}

fn raw_table(rows: &[AggregatedRow], divisor: f64) -> RawTable {
    RawTable {
        rows: rows
            .iter()
            .map(|r| RawRow {
                period: r.period.label(LabelStyle::Table),
                sector: r.sector.clone(),
                market_cap: (r.market_cap / divisor).round_ties_even() as i64,
            })
            .collect(),
    }
}

/// Compute the view for `selection` over `data`.
pub fn build_view(data: &MarketData, selection: &Selection, options: &ViewOptions) -> View {
    let filtered: Vec<&Record> = filter_range(data, &selection.range);
    let rows = aggregate(&filtered, selection.unit);

    tracing::debug!(
        unit = %selection.unit,
        page = %selection.page,
        start = %selection.range.start,
        end = %selection.range.end,
        records = filtered.len(),
        groups = rows.len(),
        "building view"
    );

    match selection.page {
        Page::RawData => View::RawData(raw_table(&rows, options.divisor)),
        Page::Volatility if rows.is_empty() => View::NoData(Page::Volatility),
        Page::Volatility => View::Volatility(VolatilityView {
            end_to_end: end_to_end(&rows),
            incremental: incremental(&rows),
            chart: build_time_series(&filtered, selection.unit, options.divisor, None),
        }),
        Page::TopGrowth if rows.is_empty() => View::NoData(Page::TopGrowth),
        Page::TopGrowth => {
            let ranked = end_to_end(&rows);
            let top = top_growth(&ranked, options.top_n).to_vec();
            let names: Vec<String> = top.iter().map(|c| c.sector.clone()).collect();
            View::TopGrowth(TopGrowthView {
                chart: build_time_series(&filtered, selection.unit, options.divisor, Some(&names)),
                top,
            })
        }
    }
}
