//! Concrete adapter implementations for ports.

pub mod chart_svg;
pub mod csv_adapter;
pub mod file_config_adapter;
pub mod html_report_adapter;
pub mod layout;
pub mod text_report;
#[cfg(feature = "web")]
pub mod web;
