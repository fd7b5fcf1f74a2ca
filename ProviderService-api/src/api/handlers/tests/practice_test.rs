use axum::http::{Method, StatusCode};
use serde_json::json;

use super::{json, send, sqlite_app};

#[tokio::test]
async fn test_create_practice_echoes_fields_with_id() {
    let app = sqlite_app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/practices",
        Some(json!({
            "name": "Test Practice",
            "address": "123 Test St",
            "phoneNumber": "123-456-7890"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let created = json(&body);
    assert!(created["id"].is_i64());
    assert_eq!(created["name"], "Test Practice");
    assert_eq!(created["address"], "123 Test St");
    assert_eq!(created["phoneNumber"], "123-456-7890");
    assert_eq!(created["website"], serde_json::Value::Null);

    let uri = format!("/api/practices/{}", created["id"]);
    let (status, body) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), created);
}

#[tokio::test]
async fn test_client_supplied_id_is_ignored() {
    let app = sqlite_app();

    let (_, body) = send(
        &app,
        Method::POST,
        "/api/practices",
        Some(json!({ "id": 500, "name": "First" })),
    )
    .await;

    assert_ne!(json(&body)["id"], 500);
}

#[tokio::test]
async fn test_list_practices() {
    let app = sqlite_app();

    let (status, body) = send(&app, Method::GET, "/api/practices", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json(&body), json!([]));

    for name in ["North Clinic", "South Clinic"] {
        send(&app, Method::POST, "/api/practices", Some(json!({ "name": name }))).await;
    }

    let (_, body) = send(&app, Method::GET, "/api/practices", None).await;
    let names: Vec<_> = json(&body)
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["North Clinic", "South Clinic"]);
}

#[tokio::test]
async fn test_get_missing_practice_is_404_with_empty_body() {
    let app = sqlite_app();

    let (status, body) = send(&app, Method::GET, "/api/practices/999", None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_update_practice_overwrites_fields() {
    let app = sqlite_app();
    let (_, body) = send(
        &app,
        Method::POST,
        "/api/practices",
        Some(json!({ "name": "Old Name", "website": "https://old.example" })),
    )
    .await;
    let id = json(&body)["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/practices/{}", id),
        Some(json!({ "name": "New Name", "address": "1 New Rd" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let updated = json(&body);
    assert_eq!(updated["id"], id);
    assert_eq!(updated["name"], "New Name");
    assert_eq!(updated["address"], "1 New Rd");
    assert_eq!(updated["website"], serde_json::Value::Null);

    let (_, body) = send(&app, Method::GET, &format!("/api/practices/{}", id), None).await;
    assert_eq!(json(&body), updated);
}

#[tokio::test]
async fn test_update_missing_practice_is_404_and_creates_nothing() {
    let app = sqlite_app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/practices/42",
        Some(json!({ "name": "Ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());

    let (_, body) = send(&app, Method::GET, "/api/practices", None).await;
    assert_eq!(json(&body), json!([]));
}

#[tokio::test]
async fn test_delete_practice_is_204_even_when_missing() {
    let app = sqlite_app();
    let (_, body) = send(&app, Method::POST, "/api/practices", Some(json!({ "name": "Gone" }))).await;
    let uri = format!("/api/practices/{}", json(&body)["id"]);

    let (status, body) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_empty());

    let (status, _) = send(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::GET, &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_non_numeric_id_is_client_error() {
    let app = sqlite_app();

    let (status, _) = send(&app, Method::GET, "/api/practices/abc", None).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}
