use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::{health, practice, provider};
use crate::api::state::AppState;
use crate::openapi::configure_swagger_routes;

/// Create the application router
pub fn create_app(state: AppState) -> Router {
    debug!("Creating application router");

    let practice_routes: Router<AppState> = Router::new()
        .route(
            "/api/practices",
            get(practice::list_practices).post(practice::create_practice),
        )
        .route(
            "/api/practices/:id",
            get(practice::get_practice)
                .put(practice::update_practice)
                .delete(practice::delete_practice),
        );

    debug!("Practice routes configured");

    let provider_routes: Router<AppState> = Router::new()
        // Define the search route before the parametrized route
        .route("/api/providers/search", get(provider::search_providers))
        .route(
            "/api/providers",
            get(provider::list_providers).post(provider::create_provider),
        )
        .route(
            "/api/providers/:id",
            get(provider::get_provider)
                .put(provider::update_provider)
                .delete(provider::delete_provider),
        );

    debug!("Provider routes configured");

    let app = Router::new()
        .route("/health", get(health::health_check))
        .merge(practice_routes)
        .merge(provider_routes)
        .merge(configure_swagger_routes())
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    debug!("Application router assembled");
    app
}
