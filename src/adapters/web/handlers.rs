//! HTTP request handlers for web adapter.

use askama::Template;
use axum::{
    extract::{Query, State},
    http::HeaderMap,
    response::{Html, IntoResponse, Response},
};
use std::sync::Arc;

use crate::adapters::html_report_adapter::{render_error, render_fragment};
use crate::domain::error::SectorcapError;
use crate::domain::view::{build_view, Selection};

use super::templates::DashboardTemplate;
use super::{is_htmx_request, AppState, WebError};

/// Dashboard controls. Every field is optional; blanks take the defaults.
#[derive(Debug, Default, serde::Deserialize)]
pub struct DashboardQuery {
    pub period: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub page: Option<String>,
}

pub async fn dashboard(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(query): Query<DashboardQuery>,
) -> Result<Response, WebError> {
    let htmx = is_htmx_request(&headers);
    render_dashboard(&state, &query, htmx).map_err(|e| WebError::from(e).for_htmx(htmx))
}

fn render_dashboard(
    state: &AppState,
    query: &DashboardQuery,
    htmx: bool,
) -> Result<Response, SectorcapError> {
    let selection = Selection::parse(
        &state.data,
        query.period.as_deref(),
        query.start.as_deref(),
        query.end.as_deref(),
        query.page.as_deref(),
    )?;
    let view = build_view(&state.data, &selection, &state.options);
    tracing::debug!(
        unit = %selection.unit,
        page = %selection.page,
        start = %selection.range.start,
        end = %selection.range.end,
        "rendering dashboard"
    );

    if htmx {
        Ok(Html(render_fragment(&view, &selection)?).into_response())
    } else {
        let template = DashboardTemplate::new(&state.data, &view, &selection);
        let html = template.render().map_err(render_error)?;
        Ok(Html(html).into_response())
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn not_found() -> WebError {
    WebError::not_found("Page not found")
}
