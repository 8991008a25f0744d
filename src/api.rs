//! JSON API over a dashboard session

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
    routing::{delete, get, post},
};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::DashboardError;
use crate::appearance::ThemeMode;
use crate::dashboard::{Dashboard, PageView};
use crate::location_resolver::LocationQuery;
use crate::weather::codes::{self, CodeStyle};

type AppState = Arc<Dashboard>;

/// Deep-link parameters: `city`, or `lat` and `lon`
#[derive(Debug, Default, Deserialize)]
pub struct WeatherParams {
    pub city: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct CodeParams {
    #[serde(default)]
    pub style: CodeStyle,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PinResponse {
    pub added: bool,
    pub pinned: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UnpinResponse {
    pub removed: usize,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ThemeResponse {
    pub theme: ThemeMode,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CodeResponse {
    pub code: i32,
    pub description: String,
    pub icon: String,
}

pub fn router(dashboard: AppState) -> Router {
    Router::new()
        .route("/dashboard", get(get_dashboard))
        .route("/weather", get(get_weather))
        .route("/pins", post(pin_current))
        .route("/pins/{name}", delete(unpin))
        .route("/cities/refresh", post(refresh_cities))
        .route("/theme/toggle", post(toggle_theme))
        .route("/codes/{code}", get(describe_code))
        .with_state(dashboard)
}

async fn get_dashboard(State(dashboard): State<AppState>) -> Json<PageView> {
    Json(dashboard.page().await)
}

async fn get_weather(
    State(dashboard): State<AppState>,
    Query(params): Query<WeatherParams>,
) -> Json<PageView> {
    match LocationQuery::from_params(params.city.as_deref(), params.lat, params.lon) {
        Some(query) => dashboard.show(query).await,
        None => dashboard.start(None).await,
    };
    Json(dashboard.page().await)
}

async fn pin_current(State(dashboard): State<AppState>) -> Result<Json<PinResponse>, StatusCode> {
    let added = dashboard.pin_current().await.map_err(status_for)?;
    let pinned = dashboard.state().await.pinned.len();
    Ok(Json(PinResponse { added, pinned }))
}

async fn unpin(State(dashboard): State<AppState>, Path(name): Path<String>) -> Json<UnpinResponse> {
    let removed = dashboard.unpin(&name).await;
    Json(UnpinResponse { removed })
}

async fn refresh_cities(State(dashboard): State<AppState>) -> Json<PageView> {
    dashboard.refresh_other_cities().await;
    Json(dashboard.page().await)
}

async fn toggle_theme(State(dashboard): State<AppState>) -> Json<ThemeResponse> {
    let theme = dashboard.toggle_theme().await;
    Json(ThemeResponse { theme })
}

async fn describe_code(Path(code): Path<i32>, Query(params): Query<CodeParams>) -> Json<CodeResponse> {
    Json(CodeResponse {
        code,
        description: codes::describe(code, params.style).to_string(),
        icon: codes::icon(code).to_string(),
    })
}

fn status_for(error: DashboardError) -> StatusCode {
    warn!("API request failed: {}", error);
    match error {
        DashboardError::Validation { .. } => StatusCode::CONFLICT,
        DashboardError::NotFound { .. } => StatusCode::NOT_FOUND,
        DashboardError::Fetch { .. }
        | DashboardError::Network { .. }
        | DashboardError::InvalidResponse { .. } => StatusCode::BAD_GATEWAY,
        DashboardError::Geolocation(_) | DashboardError::Config { .. } => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}
