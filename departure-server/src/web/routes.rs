//! HTTP route handlers.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::{Map, Value};
use tracing::{error, warn};

use crate::entur::UpstreamError;
use crate::resolver::{DepartureBoard, DepartureRequest, RawDepartureQuery, get_departures};
use crate::settings::{Defaults, SettingsError, get_defaults, keys, normalize_defaults};

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/departures", get(departures))
        .route("/api/defaults", get(defaults))
        .route("/api/settings", get(read_settings).put(update_settings))
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Departure board for the configured stop.
///
/// A missing stop is a normal 200 response carrying an `error` field;
/// only upstream failures are HTTP errors.
async fn departures(
    State(state): State<AppState>,
    Query(query): Query<RawDepartureQuery>,
) -> Result<Json<DepartureBoard>, AppError> {
    let request = DepartureRequest::from(query);
    let board = get_departures(state.settings.as_ref(), state.entur.as_ref(), &request).await?;
    Ok(Json(board))
}

/// Configured stop and line codes.
async fn defaults(State(state): State<AppState>) -> Json<Defaults> {
    Json(get_defaults(state.settings.as_ref()))
}

/// Every known settings key, as stored.
async fn read_settings(State(state): State<AppState>) -> Json<SettingsView> {
    Json(SettingsView::from_store(state.settings.as_ref()))
}

/// Overwrite some settings keys, then renormalize.
///
/// Unknown keys are rejected before anything is written.
async fn update_settings(
    State(state): State<AppState>,
    Json(update): Json<Map<String, Value>>,
) -> Result<Json<SettingsView>, AppError> {
    if let Some(unknown) = update.keys().find(|k| !keys::ALL.contains(&k.as_str())) {
        return Err(AppError::BadRequest {
            message: format!("Unknown setting: {unknown}"),
        });
    }

    let store = state.settings.as_ref();
    for (key, value) in update {
        store.set(&key, value)?;
    }
    normalize_defaults(store)?;

    Ok(Json(SettingsView::from_store(store)))
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    Upstream(UpstreamError),
    Internal { message: String },
}

impl From<UpstreamError> for AppError {
    fn from(e: UpstreamError) -> Self {
        AppError::Upstream(e)
    }
}

impl From<SettingsError> for AppError {
    fn from(e: SettingsError) -> Self {
        AppError::Internal {
            message: e.to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::Upstream(e) => {
                warn!(error = %e, "upstream departure lookup failed");
                (StatusCode::BAD_GATEWAY, e.to_string())
            }
            AppError::Internal { message } => {
                error!(%message, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, message)
            }
        };

        (status, Json(ErrorResponse { error: message })).into_response()
    }
}
