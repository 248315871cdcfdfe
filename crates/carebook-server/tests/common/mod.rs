#![allow(dead_code)]

use anyhow::Result;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use carebook_server::app;
use carebook_server::config::ServerConfig;
use carebook_server::state::AppState;
use carebook_storage::RecordStore;
use serde_json::{json, Value};
use std::sync::Arc;
use tempfile::TempDir;
use tower::util::ServiceExt;

pub struct TestContext {
    pub temp_dir: TempDir,
    pub state: AppState,
    pub app: axum::Router,
}

pub async fn build_test_context() -> Result<TestContext> {
    let temp_dir = tempfile::tempdir()?;
    let mut config = ServerConfig::default();
    config.database.data_dir = temp_dir.path().to_string_lossy().to_string();
    // Minimum bcrypt cost keeps the suite fast.
    config.auth.bcrypt_cost = 4;

    let store = Arc::new(
        RecordStore::new(&config.database.connection_url(), temp_dir.path()).await?,
    );
    let state = AppState::new(store, config);
    let app = app::build_http_app(state.clone());

    Ok(TestContext {
        temp_dir,
        state,
        app,
    })
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let trace_id = resp
        .headers()
        .get("x-trace-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    (status, json, trace_id)
}

pub async fn request_json(
    app: &axum::Router,
    method: &str,
    uri: &str,
    body: Value,
) -> (StatusCode, Value, Option<String>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    send(app, req).await
}

pub async fn request_no_body(
    app: &axum::Router,
    method: &str,
    uri: &str,
) -> (StatusCode, Value, Option<String>) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, req).await
}

pub fn assert_status(json: &Value, expected: &str) {
    assert_eq!(json["status"], expected, "unexpected body: {json}");
}

pub async fn register_user(app: &axum::Router, username: &str, email: &str, password: &str) {
    let (status, body, _) = request_json(
        app,
        "POST",
        "/api/register",
        json!({
            "full_name": format!("{username} Tester"),
            "email": email,
            "username": username,
            "password": password,
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_status(&body, "Registration successful!");
}

pub async fn create_appointment(
    app: &axum::Router,
    patient: &str,
    date: &str,
    reason: Option<&str>,
) {
    let mut payload = json!({
        "patientName": patient,
        "doctorName": "Dr. Grey",
        "appointmentDate": date,
    });
    if let Some(reason) = reason {
        payload["reason"] = json!(reason);
    }
    let (status, body, _) = request_json(app, "POST", "/api/appointments/new", payload).await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Appointment Scheduled Successfully");
}

pub async fn list_appointments(app: &axum::Router) -> Vec<Value> {
    let (status, body, _) = request_no_body(app, "GET", "/api/appointments").await;
    assert_eq!(status, StatusCode::OK);
    body.as_array().expect("appointments should be an array").clone()
}
