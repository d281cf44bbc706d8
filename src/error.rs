//! Error types for the dashboard.
//!
//! Only a handful of conditions are real errors. Everything the data itself
//! can get wrong (bad dates, missing URLs, no search hits, an empty
//! collection) is represented as a value in the view model instead.
//!
//! Within a single render only [`DashboardError::Store`],
//! [`DashboardError::Render`] and [`DashboardError::Chart`] can occur; they
//! surface as an HTTP 500 page.
//! The remaining variants belong to start-up.

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use plotters::drawing::DrawingAreaErrorKind;
use thiserror::Error;

/// Main error type for dashboard operations.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Connectivity or query faults from the document store.
    #[error("article store query failed: {0}")]
    Store(#[from] mongodb::error::Error),

    /// Formatting failed while writing the page or an SVG image.
    #[error("failed to render page: {0}")]
    Render(#[from] std::fmt::Error),

    /// A chart could not be drawn.
    #[error("failed to draw chart: {0}")]
    Chart(#[from] DrawingAreaErrorKind<std::io::Error>),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Configuration file could not be read.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration file is not valid YAML for [`crate::config::FileConfig`].
    #[error("invalid configuration file: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Render failed");
        let body = format!(
            "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Error</title></head>\
             <body><h1>500 Internal Server Error</h1><pre>{}</pre></body></html>",
            quick_xml::escape::escape(self.to_string().as_str())
        );
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}
