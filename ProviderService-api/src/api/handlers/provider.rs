use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;
use tracing::{info, instrument};
use utoipa::IntoParams;

use provider_service_domain::services::{ProviderServiceTrait, UpdateOutcome};

use crate::api::error::ApiError;
use crate::entities::{ErrorResponse, ProviderRequest, ProviderResponse};

/// Service type for dependency injection
pub type ProviderService = Arc<dyn ProviderServiceTrait + Send + Sync>;

/// Query parameters for the specialty search
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SpecialtySearchParams {
    /// Case-insensitive substring of the specialty; empty or absent matches all
    pub specialty: Option<String>,
}

fn to_responses(providers: Vec<provider_service_domain::entities::Provider>) -> Vec<ProviderResponse> {
    providers.into_iter().map(ProviderResponse::from).collect()
}

/// List all providers
#[utoipa::path(
    get,
    path = "/api/providers",
    responses(
        (status = 200, description = "All providers", body = [ProviderResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service))]
pub async fn list_providers(
    State(service): State<ProviderService>,
) -> Result<Json<Vec<ProviderResponse>>, ApiError> {
    let providers = service.list_providers().await?;
    Ok(Json(to_responses(providers)))
}

/// Search providers by specialty
#[utoipa::path(
    get,
    path = "/api/providers/search",
    params(SpecialtySearchParams),
    responses(
        (status = 200, description = "Matching providers, possibly none", body = [ProviderResponse]),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service))]
pub async fn search_providers(
    State(service): State<ProviderService>,
    Query(params): Query<SpecialtySearchParams>,
) -> Result<Json<Vec<ProviderResponse>>, ApiError> {
    let fragment = params.specialty.unwrap_or_default();
    let providers = service.search_by_specialty(&fragment).await?;
    info!("Specialty search {:?} returned {} providers", fragment, providers.len());
    Ok(Json(to_responses(providers)))
}

/// Get a single provider by ID
#[utoipa::path(
    get,
    path = "/api/providers/{id}",
    params(
        ("id" = i64, Path, description = "Provider ID")
    ),
    responses(
        (status = 200, description = "Provider found", body = ProviderResponse),
        (status = 404, description = "Provider not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service))]
pub async fn get_provider(
    State(service): State<ProviderService>,
    Path(id): Path<i64>,
) -> Result<Json<ProviderResponse>, ApiError> {
    service
        .get_provider(id)
        .await?
        .map(|provider| Json(provider.into()))
        .ok_or(ApiError::NotFound)
}

/// Create a new provider
#[utoipa::path(
    post,
    path = "/api/providers",
    request_body = ProviderRequest,
    responses(
        (status = 200, description = "Provider created", body = ProviderResponse),
        (status = 500, description = "Internal server error, including an unknown practice", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service, request))]
pub async fn create_provider(
    State(service): State<ProviderService>,
    Json(request): Json<ProviderRequest>,
) -> Result<Json<ProviderResponse>, ApiError> {
    let provider = service.create_provider(request.into()).await?;
    info!("Provider created with ID: {}", provider.id);
    Ok(Json(provider.into()))
}

/// Replace the fields of an existing provider, including its practice
#[utoipa::path(
    put,
    path = "/api/providers/{id}",
    params(
        ("id" = i64, Path, description = "Provider ID")
    ),
    request_body = ProviderRequest,
    responses(
        (status = 200, description = "Provider updated", body = ProviderResponse),
        (status = 404, description = "Provider not found"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service, request))]
pub async fn update_provider(
    State(service): State<ProviderService>,
    Path(id): Path<i64>,
    Json(request): Json<ProviderRequest>,
) -> Result<Json<ProviderResponse>, ApiError> {
    match service.update_provider(id, request.into()).await? {
        UpdateOutcome::Updated(provider) => Ok(Json(provider.into())),
        UpdateOutcome::NotFound => {
            info!("Provider not found for update: {}", id);
            Err(ApiError::NotFound)
        }
    }
}

/// Delete a provider
#[utoipa::path(
    delete,
    path = "/api/providers/{id}",
    params(
        ("id" = i64, Path, description = "Provider ID")
    ),
    responses(
        (status = 204, description = "Provider deleted, or did not exist"),
        (status = 500, description = "Internal server error", body = ErrorResponse),
    ),
    tag = "providers"
)]
#[instrument(skip(service))]
pub async fn delete_provider(
    State(service): State<ProviderService>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete_provider(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
