//! REST API endpoints.
//!
//! Axum-based HTTP API serving raceday lists, leaderboards, review tables and
//! racecards for a competition.

pub mod routes;
pub mod state;

use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use thiserror::Error;
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::calculate::CalculateError;
use crate::models::{CompId, RaceDate, Raceday, RacedayId};
use crate::storage::{CompetitionSnapshot, StorageError};
use state::AppState;

/// API error types.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StorageError> for ApiError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::PathNotFound(path) => ApiError::NotFound(path.display().to_string()),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

impl From<CalculateError> for ApiError {
    fn from(err: CalculateError) -> Self {
        ApiError::Internal(err.to_string())
    }
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetail,
}

#[derive(Debug, Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            ApiError::NotFound(_) => (StatusCode::NOT_FOUND, "NOT_FOUND"),
            ApiError::BadRequest(_) => (StatusCode::BAD_REQUEST, "BAD_REQUEST"),
            ApiError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR"),
        };

        if status.is_server_error() {
            tracing::error!("{}", self);
        }

        let body = ErrorResponse {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

fn cors_layer(origin: &str) -> CorsLayer {
    let allow = if origin == "*" {
        AllowOrigin::any()
    } else {
        match origin.parse::<HeaderValue>() {
            Ok(value) => AllowOrigin::exact(value),
            Err(_) => {
                tracing::warn!("Invalid CORS origin '{}', allowing any", origin);
                AllowOrigin::any()
            }
        }
    };

    CorsLayer::new()
        .allow_origin(allow)
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Build the application router.
pub fn build_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.server.cors_origin);

    Router::new()
        .route("/api/health", get(routes::health::health))
        .route("/api/comps", get(routes::comps::list_competitions))
        .route(
            "/api/comps/:comp_id/racedays",
            get(routes::racedays::list_racedays),
        )
        .route(
            "/api/comps/:comp_id/racedays/:raceday_id/leaderboard",
            get(routes::leaderboard::get_leaderboard),
        )
        .route(
            "/api/comps/:comp_id/racedays/:raceday_id/review",
            get(routes::review::get_review),
        )
        .route(
            "/api/comps/:comp_id/racedays/:raceday_id/races",
            get(routes::races::get_races),
        )
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

/// Today's date for this request.
pub(crate) fn reference_date(state: &AppState) -> Result<RaceDate, ApiError> {
    state
        .config
        .resolve_reference_date()
        .map_err(|e| ApiError::Internal(e.to_string()))
}

/// Load a competition, mapping a missing directory to 404.
pub(crate) fn load_comp(state: &AppState, comp_id: i64) -> Result<CompetitionSnapshot, ApiError> {
    let comp_id = CompId::new(comp_id);
    CompetitionSnapshot::load(&state.storage, comp_id).map_err(|e| match e {
        StorageError::PathNotFound(_) => {
            ApiError::NotFound(format!("Competition {} not found", comp_id))
        }
        other => other.into(),
    })
}

/// Look up a raceday within a loaded competition.
pub(crate) fn find_raceday(
    comp: &CompetitionSnapshot,
    raceday_id: i64,
) -> Result<Raceday, ApiError> {
    let raceday_id = RacedayId::new(raceday_id);
    comp.raceday(raceday_id)
        .cloned()
        .ok_or_else(|| ApiError::NotFound(format!("Raceday {} not found", raceday_id)))
}
