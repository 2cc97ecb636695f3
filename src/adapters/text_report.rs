//! Plain-text report for the terminal.
//!
//! Tables are column-aligned; charts are printed as their underlying
//! period × sector pivot.

use crate::adapters::layout::{sections, selection_summary, SectionBody, TableModel};
use crate::domain::error::SectorcapError;
use crate::domain::timeseries::TimeSeries;
use crate::domain::view::{Selection, View};
use crate::ports::report_port::ReportPort;
use tabled::builder::Builder;
use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Padding, Style};

pub struct TextReport;

impl TextReport {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TextReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Render `table` as space-separated columns, numbers right-aligned.
///
/// Widths are measured in terminal columns, so Hangul sector names line up.
pub fn format_table(table: &TableModel) -> String {
    let mut builder = Builder::default();
    builder.push_record(table.headers.iter().cloned());
    for row in &table.rows {
        builder.push_record(row.iter().cloned());
    }

    let mut rendered = builder.build();
    rendered.with(Style::empty()).with(Padding::new(0, 2, 0, 0));
    for (col, _) in table.numeric.iter().enumerate().filter(|(_, numeric)| **numeric) {
        rendered.modify(Columns::single(col), Alignment::right());
    }

    let mut out = String::new();
    for line in rendered.to_string().lines() {
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

fn chart_as_table(ts: &TimeSeries) -> TableModel {
    let mut headers = vec!["Period".to_string()];
    headers.extend(ts.series.iter().map(|s| s.sector.clone()));
    let rows = ts
        .index
        .iter()
        .enumerate()
        .map(|(i, label)| {
            let mut row = vec![label.clone()];
            row.extend(
                ts.series
                    .iter()
                    .map(|s| s.values[i].map(|v| format!("{:.1}", v)).unwrap_or_default()),
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

impl ReportPort for TextReport {
    fn render(&self, view: &View, selection: &Selection) -> Result<String, SectorcapError> {
        let mut out = String::new();
        let title = view.page().title();
        out.push_str(&format!("{}\n{}\n", title, "=".repeat(title.chars().count())));
        out.push_str(&format!("{}\n", selection_summary(selection)));

        for section in sections(view) {
            out.push('\n');
            out.push_str(&format!(
                "{}\n{}\n",
                section.heading,
                "-".repeat(section.heading.chars().count())
            ));
            match &section.body {
                SectionBody::Table(table) => out.push_str(&format_table(table)),
                SectionBody::Chart(ts) => out.push_str(&format_table(&chart_as_table(ts))),
                SectionBody::Warning(message) => out.push_str(&format!("warning: {message}\n")),
            }
        }
        Ok(out)
    }
}
