use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::StatusCode;
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;

use crate::api;
use crate::dashboard::Dashboard;

/// Build the full application: the JSON API under `/api`
pub fn app(dashboard: Arc<Dashboard>, request_timeout: Duration) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .nest("/api", api::router(dashboard))
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(cors)
}

pub async fn run(port: u16, dashboard: Arc<Dashboard>) -> Result<()> {
    // a page load may wait on the main flow and the city batch
    let upstream = u64::from(dashboard.config().api.timeout_seconds);
    let app = app(dashboard, Duration::from_secs(upstream * 2 + 5));

    let addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    tracing::info!("Web server running at http://localhost:{}", port);
    axum::serve(listener, app).await.context("web server stopped")?;
    Ok(())
}
