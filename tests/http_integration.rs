//! Integration tests for the HTTP API.
//!
//! Drives the complete router in-process: a session is created, populated
//! and queried through JSON requests only.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use delphi_estimator::adapters::http::{app_router, SessionAppState};
use delphi_estimator::adapters::{InMemorySessionStore, OsRandomSource};
use delphi_estimator::application::SessionRepository;
use delphi_estimator::config::ServerConfig;

// =============================================================================
// Test Infrastructure
// =============================================================================

async fn app() -> Router {
    let repository = SessionRepository::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(OsRandomSource),
    )
    .await
    .unwrap();
    app_router(
        SessionAppState::new(Arc::new(repository)),
        &ServerConfig::default(),
    )
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => request
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => request.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

async fn create_session(app: &Router) -> String {
    let (status, body) = send(app, "POST", "/api/sessions", None).await;
    assert_eq!(status, StatusCode::CREATED);
    body["token"].as_str().unwrap().to_string()
}

async fn seed(app: &Router, token: &str) {
    for name in ["Tigger", "Rabbit"] {
        let (status, _) = send(
            app,
            "POST",
            &format!("/api/sessions/{}/users", token),
            Some(json!({ "name": name })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
    for id in ["TEST01", "TEST02"] {
        let (status, _) = send(
            app,
            "POST",
            &format!("/api/sessions/{}/workpackages", token),
            Some(json!({ "id": id })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }
}

async fn estimate(app: &Router, token: &str, user: &str, b: f64, m: f64, w: f64) -> StatusCode {
    let (status, _) = send(
        app,
        "POST",
        &format!("/api/sessions/{}/estimates", token),
        Some(json!({
            "work_package_id": "TEST01",
            "user_name": user,
            "best_case": b,
            "most_likely_case": m,
            "worst_case": w,
        })),
    )
    .await;
    status
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn create_session_returns_token() {
    let app = app().await;
    let token = create_session(&app).await;
    assert_eq!(token.len(), 32);

    let (status, body) = send(&app, "GET", &format!("/api/sessions/{}/users", token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "ok");
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn duplicate_user_is_a_conflict() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;

    let (status, body) = send(
        &app,
        "POST",
        &format!("/api/sessions/{}/users", token),
        Some(json!({ "name": "Tigger" })),
    )
    .await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["message"], "error");
    assert_eq!(body["code"], "CONFLICT");
}

#[tokio::test]
async fn unknown_session_is_not_found() {
    let app = app().await;
    let uri = format!("/api/sessions/{}/workpackages", "f".repeat(32));

    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["reason"], "Specified session does not exist");
}

#[tokio::test]
async fn invalid_triple_is_rejected() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;

    assert_eq!(
        estimate(&app, &token, "Tigger", 3.0, 2.0, 4.0).await,
        StatusCode::BAD_REQUEST
    );
}

#[tokio::test]
async fn average_warns_about_missing_users() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;
    assert_eq!(estimate(&app, &token, "Tigger", 1.0, 2.0, 3.0).await, StatusCode::OK);

    let uri = format!("/api/sessions/{}/estimates/TEST01", token);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "warning");
    assert_eq!(body["hint"], "not all users did provide estimates");
    assert_eq!(body["users"], json!(["Rabbit"]));
    assert_eq!(body["estimate"]["effort"], json!(2.0));

    assert_eq!(estimate(&app, &token, "Rabbit", 1.0, 2.0, 3.0).await, StatusCode::OK);
    let (_, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(body["message"], "ok");
    assert_eq!(body["users"], json!([]));
}

#[tokio::test]
async fn average_without_estimates_is_unprocessable() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;

    let uri = format!("/api/sessions/{}/estimates/TEST01", token);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "INSUFFICIENT_DATA");
}

#[tokio::test]
async fn distance_ranks_highest_effort_first() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;
    estimate(&app, &token, "Tigger", 0.5, 1.0, 2.0).await;
    estimate(&app, &token, "Rabbit", 2.0, 4.0, 8.0).await;

    let uri = format!("/api/sessions/{}/estimates/TEST01/users/distance", token);
    let (status, body) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["users"], json!(["Rabbit", "Tigger"]));
}

#[tokio::test]
async fn work_package_estimate_can_be_set_and_cleared() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;

    let uri = format!("/api/sessions/{}/workpackages/TEST02", token);
    let (status, _) = send(
        &app,
        "PUT",
        &uri,
        Some(json!({ "effort": 3.5, "standard_deviation": 0.75 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let list = format!("/api/sessions/{}/workpackages", token);
    let (_, body) = send(&app, "GET", &list, None).await;
    assert_eq!(body["work_packages"][1]["effort"], json!(3.5));

    let (status, _) = send(&app, "DELETE", &format!("{}/estimate", uri), None).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, "GET", &list, None).await;
    assert_eq!(body["work_packages"][1]["effort"], json!(0.0));
    assert_eq!(body["work_packages"][1]["standard_deviation"], json!(0.0));
}

#[tokio::test]
async fn estimate_removal_and_session_removal() {
    let app = app().await;
    let token = create_session(&app).await;
    seed(&app, &token).await;
    estimate(&app, &token, "Tigger", 0.5, 1.0, 2.0).await;

    let uri = format!("/api/sessions/{}/estimates/TEST01/users/Tigger", token);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "DELETE", &format!("/api/sessions/{}", token), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, "GET", &format!("/api/sessions/{}/users", token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
