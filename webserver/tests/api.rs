//! Route-level tests exercising the full HTTP stack with oneshot requests

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use orchestrator::{Orchestrator, SqliteStore};
use webserver::WebServer;

fn test_router() -> Router {
    let store = SqliteStore::in_memory().expect("in-memory store");
    let server = WebServer::new(
        "127.0.0.1:0".parse().unwrap(),
        Orchestrator::new(store),
    );
    server.build_router()
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let request = match body {
        Some(value) => Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

async fn create_appeal(router: &Router) -> String {
    let (status, body) = send(
        router,
        Method::POST,
        "/appeals",
        Some(json!({ "theme": "t", "message": "m" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["appeal"]["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_check() {
    let router = test_router();
    let (status, body) = send(&router, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_create_appeal_success_and_validation() {
    let router = test_router();

    let (status, body) = send(
        &router,
        Method::POST,
        "/appeals",
        Some(json!({ "theme": "t", "message": "m" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["appeal"]["status"], "New");
    assert_eq!(body["appeal"]["theme"], "t");

    let (status, body) = send(
        &router,
        Method::POST,
        "/appeals",
        Some(json!({ "theme": "", "message": "m" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_get_appeal_not_found_and_bad_id() {
    let router = test_router();

    let (status, _) = send(
        &router,
        Method::GET,
        "/appeals/550e8400-e29b-41d4-a716-446655440001",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&router, Method::GET, "/appeals/not-a-uuid", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_lifecycle_over_http() {
    let router = test_router();
    let id = create_appeal(&router).await;

    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/appeals/{id}/start"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appeal"]["status"], "InProgress");

    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/appeals/{id}/complete"),
        Some(json!({ "solution": "fixed" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appeal"]["status"], "Completed");
    assert_eq!(body["appeal"]["solution"], "fixed");

    // Completing twice is an illegal transition
    let (status, _) = send(
        &router,
        Method::PATCH,
        &format!("/appeals/{id}/complete"),
        Some(json!({ "solution": "again" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_cancel_with_and_without_body() {
    let router = test_router();

    let id = create_appeal(&router).await;
    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/appeals/{id}/cancel"),
        Some(json!({ "reason": "duplicate ticket" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);

    let id = create_appeal(&router).await;
    let (status, _) = send(
        &router,
        Method::PATCH,
        &format!("/appeals/{id}/cancel"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// A cancel body that is present but not valid JSON is a client error, not a
/// silent cancel without a reason
#[tokio::test]
async fn test_cancel_rejects_malformed_body() {
    let router = test_router();
    let id = create_appeal(&router).await;

    let request = Request::builder()
        .method(Method::PATCH)
        .uri(format!("/appeals/{id}/cancel"))
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let response = router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    // The appeal was not touched; a well-formed cancel still succeeds
    let (status, body) = send(
        &router,
        Method::PATCH,
        &format!("/appeals/{id}/cancel"),
        Some(json!({ "reason": "duplicate ticket" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["id"], id);
}

#[tokio::test]
async fn test_started_and_all_listings() {
    let router = test_router();

    let active = create_appeal(&router).await;
    let cancelled = create_appeal(&router).await;
    send(
        &router,
        Method::PATCH,
        &format!("/appeals/{cancelled}/cancel"),
        None,
    )
    .await;

    let (status, body) = send(&router, Method::GET, "/appeals", None).await;
    assert_eq!(status, StatusCode::OK);
    let started = body["appeals"].as_array().unwrap();
    assert_eq!(started.len(), 1);
    assert_eq!(started[0]["id"], active);

    let (status, body) = send(&router, Method::GET, "/appeals/all", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appeals"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_by_dates_validation_and_query() {
    let router = test_router();
    create_appeal(&router).await;

    let (status, _) = send(&router, Method::GET, "/appeals/by-dates", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &router,
        Method::GET,
        "/appeals/by-dates?startDate=banana&endDate=2026-01-01",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let today = chrono::Utc::now().date_naive();
    let start = today - chrono::Duration::days(1);
    let end = today + chrono::Duration::days(1);
    let (status, body) = send(
        &router,
        Method::GET,
        &format!("/appeals/by-dates?startDate={start}&endDate={end}"),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["appeals"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_cancel_all_in_progress() {
    let router = test_router();

    create_appeal(&router).await;
    create_appeal(&router).await;

    let (status, body) = send(
        &router,
        Method::POST,
        "/appeals/cancel-all-in-progress",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cancelled"], 2);

    // Idempotent: nothing active remains
    let (status, body) = send(
        &router,
        Method::POST,
        "/appeals/cancel-all-in-progress",
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["cancelled"], 0);
}
