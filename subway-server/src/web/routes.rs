//! HTTP route handlers.

use axum::body::Bytes;
use axum::{
    Json, Router,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{delete, get, post},
};
use serde::de::DeserializeOwned;
use tower_http::trace::TraceLayer;
use tracing::{error, warn};

use crate::domain::{ChainError, Distance, LineId, StationId};
use crate::store::StoreError;

use super::dto::*;
use super::state::AppState;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/stations", post(create_station).get(list_stations))
        .route("/stations/:id", get(find_station).delete(delete_station))
        .route("/lines", post(create_line).get(list_lines))
        .route(
            "/lines/:id",
            get(find_line).put(update_line).delete(delete_line),
        )
        .route(
            "/lines/:id/sections",
            post(add_section).delete(remove_section),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Parse a JSON body, reporting failures as a bad request.
fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, AppError> {
    serde_json::from_slice(body).map_err(|e| AppError::BadRequest {
        message: format!("Invalid JSON: {e}"),
    })
}

/// Register a station.
async fn create_station(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: CreateStationRequest = parse_json(&body)?;
    let station = state.store.create_station(req.name).await;
    let location = format!("/stations/{}", station.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(StationResponse::from(station)),
    )
        .into_response())
}

/// List all stations.
async fn list_stations(State(state): State<AppState>) -> Json<Vec<StationResponse>> {
    let stations = state.store.list_stations().await;
    Json(stations.into_iter().map(StationResponse::from).collect())
}

/// Get one station.
async fn find_station(
    State(state): State<AppState>,
    Path(id): Path<StationId>,
) -> Result<Json<StationResponse>, AppError> {
    let station = state.store.find_station(id).await?;
    Ok(Json(StationResponse::from(station)))
}

/// Delete a station.
async fn delete_station(
    State(state): State<AppState>,
    Path(id): Path<StationId>,
) -> Result<StatusCode, AppError> {
    state.store.delete_station(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Create a line with its first section.
async fn create_line(State(state): State<AppState>, body: Bytes) -> Result<Response, AppError> {
    let req: CreateLineRequest = parse_json(&body)?;
    let distance = Distance::new(req.distance)?;

    let view = state
        .store
        .create_line(
            req.name,
            req.color,
            req.up_station_id,
            req.down_station_id,
            distance,
        )
        .await?;
    let location = format!("/lines/{}", view.id);

    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(LineResponse::from(view)),
    )
        .into_response())
}

/// List all lines with their stations.
async fn list_lines(State(state): State<AppState>) -> Result<Json<Vec<LineResponse>>, AppError> {
    let views = state.store.list_lines().await?;
    Ok(Json(views.into_iter().map(LineResponse::from).collect()))
}

/// Get one line with its stations in path order.
async fn find_line(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
) -> Result<Json<LineResponse>, AppError> {
    let view = state.store.find_line(id).await?;
    Ok(Json(LineResponse::from(view)))
}

/// Rename or recolor a line.
async fn update_line(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let req: UpdateLineRequest = parse_json(&body)?;
    state.store.update_line(id, req.name, req.color).await?;
    Ok(StatusCode::OK)
}

/// Delete a line and its sections.
async fn delete_line(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
) -> Result<StatusCode, AppError> {
    state.store.delete_line(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a section to a line.
async fn add_section(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let req: SectionRequest = parse_json(&body)?;
    let distance = Distance::new(req.distance)?;

    state
        .store
        .add_section(id, req.up_station_id, req.down_station_id, distance)
        .await?;
    Ok(StatusCode::CREATED)
}

/// Remove a station from a line.
async fn remove_section(
    State(state): State<AppState>,
    Path(id): Path<LineId>,
    Query(query): Query<RemoveSectionQuery>,
) -> Result<StatusCode, AppError> {
    state.store.remove_section(id, query.station_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    BadRequest { message: String },
    NotFound { message: String },
    Internal { message: String },
}

impl From<ChainError> for AppError {
    fn from(e: ChainError) -> Self {
        if e.is_client_error() {
            AppError::BadRequest {
                message: e.to_string(),
            }
        } else {
            AppError::Internal {
                message: e.to_string(),
            }
        }
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        match e {
            StoreError::Chain(chain) => AppError::from(chain),
            StoreError::StationNotFound(_) | StoreError::LineNotFound(_) => AppError::NotFound {
                message: e.to_string(),
            },
            StoreError::StationInUse { .. } => AppError::BadRequest {
                message: e.to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::BadRequest { message } => (StatusCode::BAD_REQUEST, message),
            AppError::NotFound { message } => (StatusCode::NOT_FOUND, message),
            AppError::Internal { message } => (StatusCode::INTERNAL_SERVER_ERROR, message),
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
