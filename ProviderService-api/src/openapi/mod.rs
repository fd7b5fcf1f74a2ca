use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs")
        .url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health endpoints
        crate::api::handlers::health::health_check,

        // Practice endpoints
        crate::api::handlers::practice::list_practices,
        crate::api::handlers::practice::get_practice,
        crate::api::handlers::practice::create_practice,
        crate::api::handlers::practice::update_practice,
        crate::api::handlers::practice::delete_practice,

        // Provider endpoints
        crate::api::handlers::provider::list_providers,
        crate::api::handlers::provider::search_providers,
        crate::api::handlers::provider::get_provider,
        crate::api::handlers::provider::create_provider,
        crate::api::handlers::provider::update_provider,
        crate::api::handlers::provider::delete_provider
    ),
    components(
        schemas(
            // Entities
            crate::entities::practice::PracticeResponse,
            crate::entities::practice::PracticeRequest,
            crate::entities::provider::ProviderResponse,
            crate::entities::provider::ProviderRequest,
            crate::entities::provider::PracticeReference,
            crate::entities::common::ErrorResponse,

            // Health handlers
            crate::api::handlers::health::HealthResponse,
            crate::api::handlers::health::ComponentStatus,
            crate::api::handlers::health::ComponentHealthStatus
        )
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "practices", description = "Practice management endpoints"),
        (name = "providers", description = "Provider management and specialty search endpoints")
    ),
    info(
        title = "Provider Service API",
        version = "0.1.0",
        description = "Directory of medical practices and the providers affiliated with them",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
pub struct ApiDoc;
