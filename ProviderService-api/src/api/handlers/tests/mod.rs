// Handler tests drive the full router with tower's oneshot

mod practice_test;
mod provider_test;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use provider_service_data::database::DatabasePool;
use tower::ServiceExt;

use crate::api::{create_app, AppState};

/// Router over a fresh in-memory SQLite database
pub(super) fn sqlite_app() -> Router {
    let pool = DatabasePool::in_memory().expect("in-memory pool");
    create_app(AppState::with_pool(pool))
}

/// Send one request and return the status and raw body
pub(super) async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

/// Parse a response body as JSON
pub(super) fn json(body: &[u8]) -> serde_json::Value {
    serde_json::from_slice(body).unwrap_or_else(|e| {
        panic!("invalid JSON ({}): {}", e, String::from_utf8_lossy(body))
    })
}
