//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::domain::{Coordinate, InvalidId, JourneyId, RouteId, StopId, Telemetry};
use crate::network::{NetworkError, NetworkModel};
use crate::planner::{EtaError, PathError};

use super::auth::{Role, require_role};
use super::dto::*;
use super::state::AppState;

/// Response header set to `true` when an ETA is computed from stale telemetry.
pub const STALE_HEADER: &str = "x-telemetry-stale";

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/path", get(find_path))
        .route("/api/journeys/:id/eta", get(journey_eta))
        .route("/api/journeys/:id/location", post(update_location))
        .route("/api/routes/:id", get(get_route))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        network_version: state.network.version().await,
    })
}

/// Fewest-rides path between two stops.
async fn find_path(
    State(state): State<AppState>,
    query: Result<Query<PathQuery>, QueryRejection>,
) -> Result<Json<Vec<PathSegmentResult>>, AppError> {
    let Query(req) = query.map_err(|e| AppError::BadRequest {
        message: e.body_text(),
    })?;
    let start: StopId = required("start", req.start)?.parse()?;
    let end: StopId = required("end", req.end)?.parse()?;

    let path = state.planner().find_path(start, end).await?;

    Ok(Json(
        path.iter().map(PathSegmentResult::from_planned).collect(),
    ))
}

fn required(name: &str, value: Option<String>) -> Result<String, AppError> {
    value.ok_or_else(|| AppError::BadRequest {
        message: format!("Missing query parameter: {name}"),
    })
}

/// Live ETAs for every stop on a journey's route.
async fn journey_eta(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let id: JourneyId = id.parse()?;

    let result = state.planner().journey_etas(id, Utc::now()).await?;
    let etas: Vec<StopEtaResult> = result.etas.iter().map(StopEtaResult::from_eta).collect();

    let mut response = Json(etas).into_response();
    if result.stale {
        info!(journey = %id, "Serving ETAs from stale telemetry");
        response.headers_mut().insert(
            HeaderName::from_static(STALE_HEADER),
            HeaderValue::from_static("true"),
        );
    }
    Ok(response)
}

/// A route with its ordered stops and buses.
async fn get_route(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<RouteResult>, AppError> {
    let id: RouteId = id.parse()?;
    let route = state.network.get_route(id).await?;
    Ok(Json(RouteResult::from_route(&route)))
}

/// Record a live position report from a bus.
async fn update_location(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let role = require_role(&headers, &[Role::Operator, Role::Admin])?;
    let id: JourneyId = id.parse()?;

    // Parse JSON manually so a malformed body gets our error format
    let req: LocationUpdateRequest = serde_json::from_slice(&body).map_err(|e| {
        warn!(body = %String::from_utf8_lossy(&body), "Invalid location update body");
        AppError::BadRequest {
            message: format!("Invalid JSON: {e}"),
        }
    })?;

    let position = Coordinate::new(req.latitude, req.longitude).map_err(|e| {
        AppError::BadRequest {
            message: e.to_string(),
        }
    })?;
    if let Some(speed) = req.speed.filter(|s| !s.is_finite() || *s < 0.0) {
        return Err(AppError::BadRequest {
            message: format!("Invalid speed: {speed}"),
        });
    }

    state
        .network
        .update_telemetry(id, Telemetry::new(position, req.speed, Utc::now()))
        .await?;

    info!(
        journey = %id,
        %role,
        latitude = req.latitude,
        longitude = req.longitude,
        speed = ?req.speed,
        "Telemetry updated"
    );
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Forbidden { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<InvalidId> for AppError {
    fn from(e: InvalidId) -> Self {
        AppError::BadRequest {
            message: e.to_string(),
        }
    }
}

impl From<PathError> for AppError {
    fn from(e: PathError) -> Self {
        match e {
            PathError::InvalidInput(_) => AppError::BadRequest {
                message: e.to_string(),
            },
            PathError::NotFound { .. } => AppError::NotFound {
                message: "no path".into(),
            },
            PathError::Network(e) => e.into(),
        }
    }
}

impl From<EtaError> for AppError {
    fn from(e: EtaError) -> Self {
        match e {
            EtaError::JourneyNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            EtaError::Network(e) => e.into(),
        }
    }
}

impl From<NetworkError> for AppError {
    fn from(e: NetworkError) -> Self {
        match e {
            NetworkError::StopNotFound(_)
            | NetworkError::RouteNotFound(_)
            | NetworkError::BusNotFound(_)
            | NetworkError::JourneyNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            _ => AppError::Internal {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Forbidden { message } => (StatusCode::FORBIDDEN, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
        };

        if status.is_server_error() {
            error!(%status, %message, "Request failed");
        } else {
            info!(%status, %message, "Request rejected");
        }

        let body = Json(ErrorResponse { error: message });
        (status, body).into_response()
    }
}
