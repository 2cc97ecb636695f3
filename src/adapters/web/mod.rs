//! Web server adapter.
//!
//! Serves the sector dashboard: one page with period, date-range and page
//! controls. HTMX requests get only the content fragment back.

mod error;
mod handlers;
mod templates;

pub use error::WebError;
pub use handlers::*;
pub use templates::*;

use axum::{routing::get, Router};
use std::sync::Arc;

use crate::domain::record::MarketData;
use crate::domain::view::ViewOptions;

/// Shared, read-only server state. The dataset is loaded once at startup.
pub struct AppState {
    pub data: Arc<MarketData>,
    pub options: ViewOptions,
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::dashboard))
        .route("/health", get(handlers::health))
        .fallback(handlers::not_found)
        .with_state(Arc::new(state))
}

fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("HX-Request").is_some()
}
