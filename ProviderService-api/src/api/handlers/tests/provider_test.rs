use std::sync::Arc;

use axum::http::{Method, StatusCode};
use provider_service_data::repository::RepositoryError;
use provider_service_domain::services::ProviderService;
use provider_service_domain::testing::{MockPracticeRepositoryTrait, MockProviderRepositoryTrait};
use serde_json::json;

use super::{json, send, sqlite_app};
use crate::api::{create_app, AppState};

async fn create_practice(app: &axum::Router) -> i64 {
    let (_, body) = send(
        app,
        Method::POST,
        "/api/practices",
        Some(json!({ "name": "Test Practice", "address": "123 Test St" })),
    )
    .await;
    json(&body)["id"].as_i64().unwrap()
}

async fn create_provider(app: &axum::Router, body: serde_json::Value) -> serde_json::Value {
    let (status, body) = send(app, Method::POST, "/api/providers", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    json(&body)
}

#[tokio::test]
async fn test_create_provider_nests_practice() {
    let app = sqlite_app();
    let practice_id = create_practice(&app).await;

    let created = create_provider(
        &app,
        json!({
            "name": "John Doe",
            "specialty": "Cardiology",
            "practice": { "id": practice_id }
        }),
    )
    .await;

    assert!(created["id"].is_i64());
    assert_eq!(created["name"], "John Doe");
    assert_eq!(created["practice"]["id"], practice_id);
    assert_eq!(created["practice"]["name"], "Test Practice");

    let (status, body) = send(&app, Method::GET, "/api/providers", None).await;
    assert_eq!(status, StatusCode::OK);
    let listed = json(&body);
    assert_eq!(listed.as_array().unwrap().len(), 1);
    assert_eq!(listed[0]["name"], "John Doe");
}

#[tokio::test]
async fn test_create_provider_without_practice() {
    let app = sqlite_app();

    let created = create_provider(&app, json!({ "name": "Solo", "specialty": "Oncology" })).await;

    assert_eq!(created["practice"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_unknown_practice_reference_is_500() {
    let app = sqlite_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/providers",
        Some(json!({ "name": "John Doe", "practice": { "id": 77 } })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["error"], "internal_error");
}

#[tokio::test]
async fn test_update_provider_specialty() {
    let app = sqlite_app();
    let practice_id = create_practice(&app).await;
    let created = create_provider(
        &app,
        json!({ "name": "John Doe", "specialty": "Cardiology", "practice": { "id": practice_id } }),
    )
    .await;
    let uri = format!("/api/providers/{}", created["id"]);

    let (status, body) = send(
        &app,
        Method::PUT,
        &uri,
        Some(json!({ "name": "John Doe", "specialty": "Dermatology", "practice": { "id": practice_id } })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["id"], created["id"]);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let fetched = json(&body);
    assert_eq!(fetched["specialty"], "Dermatology");
    assert_eq!(fetched["practice"]["id"], practice_id);
}

#[tokio::test]
async fn test_update_without_practice_clears_reference() {
    let app = sqlite_app();
    let practice_id = create_practice(&app).await;
    let created = create_provider(
        &app,
        json!({ "name": "John Doe", "practice": { "id": practice_id } }),
    )
    .await;
    let uri = format!("/api/providers/{}", created["id"]);

    let (status, body) = send(&app, Method::PUT, &uri, Some(json!({ "name": "John Doe", "practice": null }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["practice"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_update_missing_provider_is_404() {
    let app = sqlite_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/providers/5",
        Some(json!({ "name": "Nobody" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_delete_provider_then_get_is_404() {
    let app = sqlite_app();
    let created = create_provider(&app, json!({ "name": "John Doe" })).await;
    let uri = format!("/api/providers/{}", created["id"]);

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_delete_missing_provider_is_204() {
    let app = sqlite_app();

    let (status, _) = send(&app, Method::DELETE, "/api/providers/123", None).await;

    assert_eq!(status, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_deleting_practice_detaches_provider() {
    let app = sqlite_app();
    let practice_id = create_practice(&app).await;
    let created = create_provider(
        &app,
        json!({ "name": "John Doe", "practice": { "id": practice_id } }),
    )
    .await;

    let (status, _) = send(&app, Method::DELETE, &format!("/api/practices/{}", practice_id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, body) = send(&app, Method::GET, &format!("/api/providers/{}", created["id"]), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body)["practice"], serde_json::Value::Null);
}

#[tokio::test]
async fn test_search_by_specialty_is_case_insensitive() {
    let app = sqlite_app();
    create_provider(&app, json!({ "name": "John Doe", "specialty": "Cardiology" })).await;
    create_provider(&app, json!({ "name": "Jane Smith", "specialty": "Dermatology" })).await;
    create_provider(&app, json!({ "name": "Ann Lee", "specialty": "Pediatric Cardiology" })).await;

    let (status, body) = send(&app, Method::GET, "/api/providers/search?specialty=CARDIO", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<_> = json(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["John Doe", "Ann Lee"]);

    let (status, body) = send(&app, Method::GET, "/api/providers/search?specialty=neurology", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!([]));
}

#[tokio::test]
async fn test_search_without_fragment_matches_all() {
    let app = sqlite_app();
    create_provider(&app, json!({ "name": "John Doe", "specialty": "Cardiology" })).await;
    create_provider(&app, json!({ "name": "No Specialty" })).await;

    for uri in ["/api/providers/search", "/api/providers/search?specialty="] {
        let (status, body) = send(&app, Method::GET, uri, None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json(&body).as_array().unwrap().len(), 2, "uri {}", uri);
    }
}

#[tokio::test]
async fn test_storage_failure_is_500() {
    let mut providers = MockProviderRepositoryTrait::new();
    providers
        .expect_find_all()
        .returning(|| Err(RepositoryError::Lock("poisoned".to_string())));

    let state = AppState {
        providers: Arc::new(ProviderService::new(providers, MockPracticeRepositoryTrait::new())),
        ..AppState::in_memory()
    };
    let app = create_app(state);

    let (status, body) = send(&app, Method::GET, "/api/providers", None).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json(&body)["error"], "internal_error");
}
