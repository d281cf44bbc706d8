//! HTTP boundary of the dashboard.
//!
//! Each request to `/` is one full, independent render:
//!
//! ```text
//! GET /?q=<search> → fetch_all → normalize → build → render_page
//! ```
//!
//! Nothing is cached between requests. The only interaction input is the
//! `q` query parameter of the search form. Store faults propagate out of the
//! handler and become a 500 page through [`DashboardError`]'s
//! `IntoResponse` implementation.

use crate::config::DashboardConfig;
use crate::dashboard::build;
use crate::error::DashboardError;
use crate::normalize::normalize_articles;
use crate::outputs::html::render_page;
use crate::store::ArticleSource;
use crate::utils::truncate_for_log;
use axum::Router;
use axum::extract::{Query, State};
use axum::response::Html;
use axum::routing::get;
use serde::Deserialize;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, instrument};

/// Shared, read-only handler state.
pub struct AppState<S> {
    pub source: S,
}

/// Query string of the dashboard page.
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    /// Free-text title search.
    pub q: Option<String>,
}

/// Build the router for a given article source.
pub fn router<S: ArticleSource>(source: S) -> Router {
    let state = Arc::new(AppState { source });
    Router::new()
        .route("/", get(dashboard::<S>))
        .route("/healthz", get(healthz))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Recompute and render the page for one interaction.
#[instrument(level = "info", skip_all, fields(query = ?query.map(|q| truncate_for_log(q, 80))))]
pub async fn render<S: ArticleSource>(source: &S, query: Option<&str>) -> Result<String, DashboardError> {
    let raw = source.fetch_all().await?;
    let articles = normalize_articles(raw);
    let view = build(&articles, query);
    let html = render_page(&view, query)?;
    info!(bytes = html.len(), "Rendered dashboard");
    Ok(html)
}

async fn dashboard<S: ArticleSource>(
    State(state): State<Arc<AppState<S>>>,
    Query(params): Query<DashboardParams>,
) -> Result<Html<String>, DashboardError> {
    let html = render(&state.source, params.q.as_deref()).await?;
    Ok(Html(html))
}

async fn healthz() -> &'static str {
    "ok"
}

/// Bind the configured address and serve until Ctrl-C.
pub async fn serve<S: ArticleSource>(config: &DashboardConfig, source: S) -> Result<(), DashboardError> {
    let listener = TcpListener::bind(config.bind).await?;
    info!(addr = %config.bind, "Dashboard listening on http://{}", config.bind);

    axum::serve(listener, router(source))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    info!("Dashboard stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!(error = %e, "Failed to listen for ctrl-c");
    }
    info!("Shutdown requested");
}
