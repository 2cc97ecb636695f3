//! HTML report adapter implementing ReportPort.
//!
//! Generates standalone HTML pages using Askama templates with inline SVG
//! charts. The same section markup is reused by the web dashboard.

use askama::Template;

use crate::adapters::chart_svg::generate_line_chart_svg;
use crate::adapters::layout::{sections, selection_summary, SectionBody, TableModel};
use crate::domain::error::SectorcapError;
use crate::domain::view::{Selection, View};
use crate::ports::report_port::ReportPort;

/// A layout section flattened for the templates: `kind` is one of
/// `table`, `chart` or `warning` and only the matching field is filled.
pub struct HtmlSection {
    pub heading: String,
    pub kind: &'static str,
    pub table: TableModel,
    pub svg: String,
    pub warning: String,
}

pub fn html_sections(view: &View) -> Vec<HtmlSection> {
    sections(view)
        .into_iter()
        .map(|section| {
            let mut html = HtmlSection {
                heading: section.heading,
                kind: "warning",
                table: TableModel::default(),
                svg: String::new(),
                warning: String::new(),
            };
            match section.body {
                SectionBody::Table(table) => {
                    html.kind = "table";
                    html.table = table;
                }
                SectionBody::Chart(ts) => {
                    let svg = generate_line_chart_svg(&ts);
                    if svg.is_empty() {
                        html.warning = "Nothing to plot.".to_string();
                    } else {
                        html.kind = "chart";
                        html.svg = svg;
                    }
                }
                SectionBody::Warning(message) => html.warning = message,
            }
            html
        })
        .collect()
}

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    title: &'a str,
    summary: String,
    sections: Vec<HtmlSection>,
}

#[derive(Template)]
#[template(path = "fragment.html")]
pub struct FragmentTemplate<'a> {
    pub title: &'a str,
    pub summary: String,
    pub sections: Vec<HtmlSection>,
}

impl<'a> FragmentTemplate<'a> {
    pub fn new(view: &View, selection: &'a Selection) -> Self {
        Self {
            title: selection.page.title(),
            summary: selection_summary(selection),
            sections: html_sections(view),
        }
    }
}

pub(crate) fn render_error(e: askama::Error) -> SectorcapError {
    SectorcapError::Render {
        reason: e.to_string(),
    }
}

/// Body of the dashboard's content area for one view.
pub fn render_fragment(view: &View, selection: &Selection) -> Result<String, SectorcapError> {
    FragmentTemplate::new(view, selection)
        .render()
        .map_err(render_error)
}

pub struct HtmlReportAdapter;

impl HtmlReportAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for HtmlReportAdapter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportPort for HtmlReportAdapter {
    fn render(&self, view: &View, selection: &Selection) -> Result<String, SectorcapError> {
        let template = ReportTemplate {
            title: view.page().title(),
            summary: selection_summary(selection),
            sections: html_sections(view),
        };
        template.render().map_err(render_error)
    }
}
