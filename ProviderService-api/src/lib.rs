// ProviderService-api lib.rs
//
// HTTP surface of the provider service: routes, handlers, public entities
// and the OpenAPI document.

// Public modules
pub mod api;
pub mod config;
pub mod entities;
pub mod openapi;

pub use api::{create_app, AppState};
pub use config::AppConfig;
