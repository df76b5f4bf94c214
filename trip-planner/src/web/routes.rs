//! HTTP route handlers.

use std::sync::Arc;

use askama::Template;
use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode, header},
    response::{Html, IntoResponse, Response},
    routing::{get, post},
};
use tower_http::trace::TraceLayer;
use tracing::{debug, error, warn};

use crate::planner::{PlanError, PlanResult, PlannerConfig, TripPlanner, TripRequest};

use super::dto::*;
use super::state::AppState;
use super::templates::*;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", get(list_stations))
        .route("/trip/plan", post(plan_trip))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// List every station in the network.
async fn list_stations(State(state): State<AppState>) -> Json<StationsResponse> {
    let stations = state
        .graph
        .stations()
        .iter()
        .map(StationResult::from_station)
        .collect();

    Json(StationsResponse { stations })
}

/// Check if request accepts HTML.
fn accepts_html(headers: &HeaderMap) -> bool {
    headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|accept| accept.contains("text/html"))
}

/// Plan trips between two coordinates.
async fn plan_trip(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Response, AppError> {
    // Parse JSON manually so we can log the body on failure
    let req: PlanTripRequest = serde_json::from_slice(&body).map_err(|e| {
        debug!(body = %String::from_utf8_lossy(&body), "unparseable plan request");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let origin = req.origin.to_location().map_err(|e| AppError::BadRequest {
        message: format!("Invalid origin: {e}"),
    })?;
    let destination = req.destination.to_location().map_err(|e| AppError::BadRequest {
        message: format!("Invalid destination: {e}"),
    })?;
    let trip_request = TripRequest::new(origin, destination);

    let config = PlannerConfig {
        nearest_k: req.nearest_k.unwrap_or(state.config.nearest_k),
        ..(*state.config).clone()
    };
    // Requests that resolve to the same stations share a cache entry
    let candidates = TripPlanner::new(&state.graph, &config).candidates(&trip_request)?;

    // Try cache first
    let (plan, cached) = match state.cache.get(&candidates).await {
        Some(plan) => (plan, true),
        None => {
            let graph = state.graph.clone();
            let key = candidates.clone();
            // Planning is CPU-bound, so keep it off the async workers
            let result: Result<PlanResult, PlanError> = tokio::task::spawn_blocking(move || {
                TripPlanner::new(&graph, &config).plan_between(&key)
            })
            .await
            .map_err(|e| AppError::Internal {
                message: format!("Planner task failed: {e}"),
            })?;

            let plan = Arc::new(result?);
            state.cache.insert(candidates, plan.clone()).await;
            (plan, false)
        }
    };

    // Return HTML or JSON based on Accept header
    if accepts_html(&headers) {
        let template = TripResultsTemplate {
            trips: plan.trips.iter().map(TripView::from_trip).collect(),
        };
        let html = template.render().map_err(|e| AppError::Internal {
            message: format!("Template error: {}", e),
        })?;

        Ok(Html(html).into_response())
    } else {
        Ok(Json(PlanTripResponse::from_plan(&plan, cached)).into_response())
    }
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<PlanError> for AppError {
    fn from(e: PlanError) -> Self {
        match e {
            PlanError::InvalidRequest(msg) => AppError::BadRequest { message: msg },
            PlanError::NoRouteFound => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match &self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message.clone()),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message.clone()),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message.clone()),
        };

        if status.is_server_error() {
            error!(%status, %message, "request failed");
        } else {
            warn!(%status, %message, "request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
