use apigateway::{handler::AppRouter, state::AppState};
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use serde_json::{Value, json};
use shared::config::{Hashing, PaymentPolicy};
use ticketing::repository::{Repositories, memory::MemoryStore};
use tower::ServiceExt;

fn app() -> Router {
    let state = AppState::with_repositories(
        Repositories::memory(MemoryStore::new()),
        Hashing::with_cost(4),
        "gateway-test-secret",
        PaymentPolicy::AssumeCompleted,
    )
    .unwrap();
    AppRouter::build(state)
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn sign_up(app: &Router, email: &str, organizer: bool) -> String {
    let (status, _) = call(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "first_name": "Test",
            "last_name": "User",
            "email": email,
            "password": "password123",
            "confirm_password": "password123",
            "request_organizer_access": organizer,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = call(
        app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({ "email": email, "password": "password123" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    body["data"]["access_token"].as_str().unwrap().to_string()
}

async fn published_event(app: &Router, token: &str, total: i32) -> i64 {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/events",
        Some(token),
        Some(json!({
            "title": "Launch Party",
            "description": "Release night",
            "starts_at": "2030-05-17T19:00:00",
            "location": "Bandung",
            "category": "music",
            "total_tickets": total,
            "price": 50,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    let id = body["data"]["id"].as_i64().unwrap();

    let (status, _) = call(
        app,
        Method::PUT,
        &format!("/api/events/{id}/publish"),
        Some(token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    id
}

#[tokio::test]
async fn health_check_is_public() {
    let (status, body) = call(&app(), Method::GET, "/api/healthchecker", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
}

#[tokio::test]
async fn booking_over_http() {
    let app = app();
    let organizer = sign_up(&app, "org@example.com", true).await;
    let buyer = sign_up(&app, "buyer@example.com", false).await;
    let event_id = published_event(&app, &organizer, 5).await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tickets/book",
        Some(&buyer),
        Some(json!({ "event_id": event_id, "quantity": 2 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");
    assert_eq!(body["data"]["total_amount"], 100);
    assert_eq!(body["data"]["payment_status"], "completed");
    let ticket_id = body["data"]["ticket_ids"][0].as_i64().unwrap();

    let (status, body) = call(
        &app,
        Method::GET,
        &format!("/api/events/{event_id}"),
        None,
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["available_tickets"], 3);

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tickets/book",
        Some(&buyer),
        Some(json!({ "event_id": event_id, "quantity": 11 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "quantity_out_of_range");

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/tickets/{ticket_id}/check-in"),
        Some(&buyer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["kind"], "access_denied");

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/tickets/{ticket_id}/check-in"),
        Some(&organizer),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["status"], "used");
}

#[tokio::test]
async fn protected_routes_need_a_token() {
    let app = app();

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/tickets/book",
        None,
        Some(json!({ "event_id": 1, "quantity": 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["kind"], "unauthenticated");

    let (status, _) = call(&app, Method::GET, "/api/auth/me", Some("garbage"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn invalid_bodies_are_rejected_before_the_core() {
    let app = app();
    let (status, body) = call(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "first_name": "A",
            "last_name": "B",
            "email": "not-an-email",
            "password": "password123",
            "confirm_password": "password123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["kind"], "validation_failed");
    assert!(body["details"]["email"].is_array());
}

#[tokio::test]
async fn metrics_are_exposed() {
    let app = app();
    sign_up(&app, "someone@example.com", false).await;

    let request = Request::builder()
        .uri("/metrics")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("identity_service_request_counter"));
}
