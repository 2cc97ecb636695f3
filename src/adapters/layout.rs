//! Report-agnostic layout of a view: headed tables, charts and warnings.
//!
//! Both the text and the HTML renderers walk the same section list, so the
//! two outputs always agree on headings, column order and cell text.

use crate::domain::timeseries::TimeSeries;
use crate::domain::view::{RawTable, Selection, View, NO_DATA_MESSAGE};
use crate::domain::volatility::{IncrementalTable, SectorChange};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TableModel {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    /// Per column: right-align as a number.
    pub numeric: Vec<bool>,
}

impl TableModel {
    pub fn is_numeric(&self, col: usize) -> bool {
        self.numeric.get(col).copied().unwrap_or(false)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SectionBody {
    Table(TableModel),
    Chart(TimeSeries),
    Warning(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub heading: String,
    pub body: SectionBody,
}

impl Section {
    fn new(heading: impl Into<String>, body: SectionBody) -> Self {
        Self {
            heading: heading.into(),
            body,
        }
    }
}

/// One-line description of the selection, e.g. `month, 2024-01-01 to 2024-03-31`.
pub fn selection_summary(selection: &Selection) -> String {
    format!(
        "{}, {} to {}",
        selection.unit, selection.range.start, selection.range.end
    )
}

fn raw_table(table: &RawTable) -> TableModel {
    TableModel {
        headers: RawTable::HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: table
            .rows
            .iter()
            .map(|r| vec![r.period.clone(), r.sector.clone(), r.market_cap.to_string()])
            .collect(),
        numeric: vec![false, false, true],
    }
}

fn change_table(changes: &[SectorChange], ranked: bool) -> TableModel {
    let mut headers = Vec::with_capacity(3);
    let mut numeric = Vec::with_capacity(3);
    if ranked {
        headers.push("Rank".to_string());
        numeric.push(true);
    }
    headers.push("Sector".to_string());
    headers.push("End-to-End Change (%)".to_string());
    numeric.extend([false, true]);

    let rows = changes
        .iter()
        .enumerate()
        .map(|(i, c)| {
            let mut row = Vec::with_capacity(3);
            if ranked {
                row.push((i + 1).to_string());
            }
            row.push(c.sector.clone());
            row.push(c.change.to_string());
            row
        })
        .collect();

    TableModel {
        headers,
        rows,
        numeric,
    }
}

fn incremental_table(table: &IncrementalTable) -> TableModel {
    let mut headers = vec!["Sector".to_string()];
    headers.extend(table.columns.iter().cloned());

    let rows = table
        .rows
        .iter()
        .map(|r| {
            let mut row = vec![r.sector.clone()];
            row.extend(
                r.cells
                    .iter()
                    .map(|c| c.map(|c| c.to_string()).unwrap_or_default()),
            );
            row
        })
        .collect();

    let mut numeric = vec![false];
    numeric.resize(headers.len(), true);
    TableModel {
        headers,
        rows,
        numeric,
    }
}

pub fn sections(view: &View) -> Vec<Section> {
    match view {
        View::RawData(table) => vec![Section::new(
            "Market Cap by Period",
            SectionBody::Table(raw_table(table)),
        )],
        View::Volatility(v) => vec![
            Section::new(
                "End-to-End Change (%)",
                SectionBody::Table(change_table(&v.end_to_end, false)),
            ),
            Section::new(
                "Incremental Change (%)",
                SectionBody::Table(incremental_table(&v.incremental)),
            ),
            Section::new(
                "Market Cap by Sector (100M)",
                SectionBody::Chart(v.chart.clone()),
            ),
        ],
        View::TopGrowth(v) => vec![
            Section::new(
                format!("Top {} Growth Sectors", v.top.len()),
                SectionBody::Table(change_table(&v.top, true)),
            ),
            Section::new(
                "Top Sector Market Cap (100M)",
                SectionBody::Chart(v.chart.clone()),
            ),
        ],
        View::NoData(page) => vec![Section::new(
            page.title(),
            SectionBody::Warning(NO_DATA_MESSAGE.to_string()),
        )],
    }
}
