mod common;

use axum::http::StatusCode;
use common::{build_test_context, request_no_body};

#[tokio::test]
async fn health_reports_ok_with_trace_header() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, body, trace) = request_no_body(&ctx.app, "GET", "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].is_string());
    assert_eq!(trace.map(|t| t.len()), Some(16));
}

#[tokio::test]
async fn openapi_json_lists_every_endpoint() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, body, _) = request_no_body(&ctx.app, "GET", "/api/openapi.json").await;
    assert_eq!(status, StatusCode::OK);
    let paths = body["paths"].as_object().expect("paths should be an object");
    for path in [
        "/api/health",
        "/api/viewAll",
        "/api/addNew",
        "/api/deleteUser",
        "/api/appointments",
        "/api/appointments/new",
        "/api/appointments/update",
        "/api/deleteAppointment",
        "/api/register",
        "/api/login",
    ] {
        assert!(paths.contains_key(path), "missing path {path}");
    }
}

#[tokio::test]
async fn openapi_yaml_is_served() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, body, _) = request_no_body(&ctx.app, "GET", "/api/openapi.yaml").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.as_str().unwrap_or_default().contains("/api/viewAll"));
}

#[tokio::test]
async fn swagger_ui_responses_carry_trace_header() {
    let ctx = build_test_context().await.expect("test context should build");

    let (_, _, trace) = request_no_body(&ctx.app, "GET", "/docs/").await;
    assert_eq!(trace.map(|t| t.len()), Some(16));
}
