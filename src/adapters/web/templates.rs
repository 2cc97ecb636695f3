//! HTML templates using Askama.

use askama::Template;

use crate::adapters::html_report_adapter::{html_sections, HtmlSection};
use crate::adapters::layout::selection_summary;
use crate::domain::period::PeriodUnit;
use crate::domain::record::MarketData;
use crate::domain::view::{Page, Selection, View};

/// One `<option>` of a dashboard select box.
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

fn unit_label(unit: PeriodUnit) -> &'static str {
    match unit {
        PeriodUnit::Year => "Year",
        PeriodUnit::Month => "Month",
        PeriodUnit::Week => "Week",
        PeriodUnit::Day => "Day",
    }
}

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate<'a> {
    pub periods: Vec<ChoiceOption>,
    pub pages: Vec<ChoiceOption>,
    pub start: String,
    pub end: String,
    pub min_date: String,
    pub max_date: String,
    pub title: &'a str,
    pub summary: String,
    pub sections: Vec<HtmlSection>,
}

impl<'a> DashboardTemplate<'a> {
    pub fn new(data: &MarketData, view: &View, selection: &'a Selection) -> Self {
        let (min_date, max_date) = data
            .date_bounds()
            .map(|(lo, hi)| (lo.to_string(), hi.to_string()))
            .unwrap_or_default();
        Self {
            periods: PeriodUnit::ALL
                .iter()
                .map(|&unit| ChoiceOption {
                    value: unit.as_str(),
                    label: unit_label(unit),
                    selected: unit == selection.unit,
                })
                .collect(),
            pages: Page::ALL
                .iter()
                .map(|&page| ChoiceOption {
                    value: page.as_str(),
                    label: page.title(),
                    selected: page == selection.page,
                })
                .collect(),
            start: selection.range.start.to_string(),
            end: selection.range.end.to_string(),
            min_date,
            max_date,
            title: selection.page.title(),
            summary: selection_summary(selection),
            sections: html_sections(view),
        }
    }
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}

/// Error block swapped into the dashboard's content area.
#[derive(Template)]
#[template(path = "error_fragment.html")]
pub struct ErrorFragmentTemplate<'a> {
    pub message: &'a str,
    pub status: u16,
}
