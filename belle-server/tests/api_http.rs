//! HTTP surface: admin gate, booking endpoint and dashboard filters,
//! driven through the router with tower's oneshot.

mod common;

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode, header::CONTENT_TYPE};
use serde_json::{Value, json};
use tower::ServiceExt;

use belle_server::services::notification::EmailStatus;
use belle_server::{Config, ServerState, build_router};

const ADMIN_PASSWORD: &str = "maison-secret";
const TOKEN_HEADER: &str = "x-admin-token";

struct TestApp {
    app: Router,
    notifier: Arc<common::RecordingNotifier>,
}

async fn test_app() -> TestApp {
    let db = common::memory_db().await;
    common::seed_table_type(&db, "Table for 2", 3).await;

    let mut config = Config::with_overrides("/tmp/belle-test", 0);
    config.admin_password = ADMIN_PASSWORD.to_string();

    let notifier = common::recording_notifier();
    let state = ServerState::new(config, db, notifier.clone());
    TestApp {
        app: build_router(state),
        notifier,
    }
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(token) = token {
        builder = builder.header(TOKEN_HEADER, token);
    }
    builder.body(Body::empty()).unwrap()
}

async fn login(app: &Router) -> String {
    let (status, body) = send(app, post_json("/api/auth/login", json!({ "password": ADMIN_PASSWORD }))).await;
    assert_eq!(status, StatusCode::OK);
    body["token"].as_str().unwrap().to_string()
}

fn booking_body() -> Value {
    json!({
        "date": "2024-03-20T18:00:00.000Z",
        "table_type": "Table for 2",
        "name": "John Doe",
        "email": "john@example.com"
    })
}

#[tokio::test]
async fn health_is_public() {
    let harness = test_app().await;
    let (status, body) = send(&harness.app, get("/health", None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let harness = test_app().await;
    let (status, _) = send(
        &harness.app,
        post_json("/api/auth/login", json!({ "password": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn dashboard_requires_a_session_token() {
    let harness = test_app().await;

    let (status, _) = send(&harness.app, get("/api/reservations", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&harness.app, get("/api/reservations", Some("bogus"))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&harness.app).await;
    let (status, body) = send(&harness.app, get("/api/reservations", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn booking_is_public_and_validated() {
    let harness = test_app().await;

    let (status, body) = send(&harness.app, post_json("/api/reservations", booking_body())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "pending");
    assert_eq!(body["table_type"], "Table for 2");
    assert_eq!(body["date"], "2024-03-20T18:00:00.000Z");

    // Double-booking the same slot conflicts
    let (status, body) = send(&harness.app, post_json("/api/reservations", booking_body())).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["message"].as_str().unwrap().contains("already reserved"));

    // Malformed email never reaches the store
    let mut bad = booking_body();
    bad["email"] = json!("not-an-email");
    bad["date"] = json!("2024-03-21T18:00:00.000Z");
    let (status, _) = send(&harness.app, post_json("/api/reservations", bad)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn availability_drops_as_bookings_arrive() {
    let harness = test_app().await;

    let (_, before) = send(&harness.app, get("/api/tables", None)).await;
    assert_eq!(before[0]["quantity"], 3);

    send(&harness.app, post_json("/api/reservations", booking_body())).await;

    let (_, after) = send(&harness.app, get("/api/tables", None)).await;
    assert_eq!(after[0]["size"], "Table for 2");
    assert_eq!(after[0]["quantity"], 2);
}

#[tokio::test]
async fn status_update_flows_through_to_the_dashboard_tabs() {
    let harness = test_app().await;
    let token = login(&harness.app).await;

    let (_, created) = send(&harness.app, post_json("/api/reservations", booking_body())).await;
    let id = created["id"].as_str().unwrap().to_string();

    // Accept it
    let request = Request::builder()
        .method("PUT")
        .uri(format!("/api/reservations/{id}/status"))
        .header(CONTENT_TYPE, "application/json")
        .header(TOKEN_HEADER, &token)
        .body(Body::from(json!({ "status": "accepted" }).to_string()))
        .unwrap();
    let (status, body) = send(&harness.app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "accepted");

    // Customer got exactly one confirmation mail
    assert_eq!(harness.notifier.sent_count(), 1);
    assert_eq!(harness.notifier.last().unwrap().status, EmailStatus::Accepted);

    // Tab filters partition the same full list
    let (_, pending) = send(
        &harness.app,
        get("/api/reservations?status=pending", Some(&token)),
    )
    .await;
    assert_eq!(pending.as_array().unwrap().len(), 0);

    let (_, accepted) = send(
        &harness.app,
        get("/api/reservations?status=accepted", Some(&token)),
    )
    .await;
    assert_eq!(accepted.as_array().unwrap().len(), 1);
    assert_eq!(accepted[0]["id"], id.as_str());
}

#[tokio::test]
async fn capacity_administration_is_gated() {
    let harness = test_app().await;

    let (status, _) = send(&harness.app, get("/api/tables/types", None)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = login(&harness.app).await;
    let (status, body) = send(&harness.app, get("/api/tables/types", Some(&token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);
}
