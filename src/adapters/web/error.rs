//! HTTP error responses for web adapter.

use askama::Template;
use axum::{
    http::{HeaderName, StatusCode},
    response::{Html, IntoResponse, Response},
};

use super::templates::{ErrorFragmentTemplate, ErrorTemplate};
use crate::domain::error::SectorcapError;

/// Rendered as a full error page, or as a fragment retargeted at
/// `#content` when the request came from htmx.
#[derive(Debug)]
pub struct WebError {
    pub status: StatusCode,
    pub message: String,
    pub htmx: bool,
}

impl WebError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            htmx: false,
        }
    }

    pub fn for_htmx(mut self, htmx: bool) -> Self {
        self.htmx = htmx;
        self
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }
}

pub fn status_from_error(err: &SectorcapError) -> StatusCode {
    match err {
        SectorcapError::Selection { .. } => StatusCode::BAD_REQUEST,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl From<SectorcapError> for WebError {
    fn from(err: SectorcapError) -> Self {
        Self::new(status_from_error(&err), err.to_string())
    }
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = self.status.as_u16(), "{}", self.message);
        } else {
            tracing::debug!(status = self.status.as_u16(), "{}", self.message);
        }
        let status = self.status.as_u16();
        if self.htmx {
            let template = ErrorFragmentTemplate {
                message: &self.message,
                status,
            };
            let headers = [
                (HeaderName::from_static("hx-retarget"), "#content"),
                (HeaderName::from_static("hx-reswap"), "innerHTML"),
            ];
            return match template.render() {
                Ok(html) => (self.status, headers, Html(html)).into_response(),
                Err(_) => (self.status, headers, self.message).into_response(),
            };
        }

        let template = ErrorTemplate {
            message: &self.message,
            status,
        };
        match template.render() {
            Ok(html) => (self.status, Html(html)).into_response(),
            Err(_) => (self.status, self.message).into_response(),
        }
    }
}
