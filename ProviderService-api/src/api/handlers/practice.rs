use std::sync::Arc;

use axum::{
    extract::{Json, Path, State},
    http::StatusCode,
};
use tracing::{info, instrument};

use provider_service_domain::services::{PracticeServiceTrait, UpdateOutcome};

use crate::api::error::ApiError;
use crate::entities::{ErrorResponse, PracticeRequest, PracticeResponse};

/// Service type for dependency injection
pub type PracticeService = Arc<dyn PracticeServiceTrait + Send + Sync>;

/// List all practices
#[utoipa::path(
    get,
    path = "/api/practices",
    responses(
        (status = 200, description = "All practices", body = [PracticeResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "practices"
)]
#[instrument(skip(service))]
pub async fn list_practices(
    State(service): State<PracticeService>,
) -> Result<Json<Vec<PracticeResponse>>, ApiError> {
    let practices = service.list_practices().await?;
    Ok(Json(practices.into_iter().map(PracticeResponse::from).collect()))
}

/// Get a single practice by ID
#[utoipa::path(
    get,
    path = "/api/practices/{id}",
    params(
        ("id" = i64, Path, description = "Practice ID")
    ),
    responses(
        (status = 200, description = "Practice found", body = PracticeResponse),
        (status = 404, description = "Practice not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "practices"
)]
#[instrument(skip(service))]
pub async fn get_practice(
    State(service): State<PracticeService>,
    Path(id): Path<i64>,
) -> Result<Json<PracticeResponse>, ApiError> {
    match service.get_practice(id).await? {
        Some(practice) => Ok(Json(practice.into())),
        None => {
            info!("Practice not found: {}", id);
            Err(ApiError::NotFound)
        }
    }
}

/// Create a new practice
#[utoipa::path(
    post,
    path = "/api/practices",
    request_body = PracticeRequest,
    responses(
        (status = 200, description = "Practice created", body = PracticeResponse),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "practices"
)]
#[instrument(skip(service, request))]
pub async fn create_practice(
    State(service): State<PracticeService>,
    Json(request): Json<PracticeRequest>,
) -> Result<Json<PracticeResponse>, ApiError> {
    let practice = service.create_practice(request.into()).await?;
    info!("Practice created with ID: {}", practice.id);
    Ok(Json(practice.into()))
}

/// Replace the fields of an existing practice
#[utoipa::path(
    put,
    path = "/api/practices/{id}",
    params(
        ("id" = i64, Path, description = "Practice ID")
    ),
    request_body = PracticeRequest,
    responses(
        (status = 200, description = "Practice updated", body = PracticeResponse),
        (status = 404, description = "Practice not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "practices"
)]
#[instrument(skip(service, request))]
pub async fn update_practice(
    State(service): State<PracticeService>,
    Path(id): Path<i64>,
    Json(request): Json<PracticeRequest>,
) -> Result<Json<PracticeResponse>, ApiError> {
    match service.update_practice(id, request.into()).await? {
        UpdateOutcome::Updated(practice) => Ok(Json(practice.into())),
        UpdateOutcome::NotFound => Err(ApiError::NotFound),
    }
}

/// Delete a practice; providers referencing it are detached
#[utoipa::path(
    delete,
    path = "/api/practices/{id}",
    params(
        ("id" = i64, Path, description = "Practice ID")
    ),
    responses(
        (status = 204, description = "Practice deleted, or did not exist"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "practices"
)]
#[instrument(skip(service))]
pub async fn delete_practice(
    State(service): State<PracticeService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete_practice(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
