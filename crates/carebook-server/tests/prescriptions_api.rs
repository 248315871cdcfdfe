mod common;

use axum::http::StatusCode;
use common::{assert_status, build_test_context, request_json, request_no_body};
use serde_json::json;

#[tokio::test]
async fn created_prescription_appears_in_next_list() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, body, trace) = request_json(
        &ctx.app,
        "POST",
        "/api/addNew",
        json!({"patientName":"Ada","drugName":"Ibuprofen","dosage":"200mg"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Prescription Saved Successfully");
    assert!(trace.is_some());

    let (status, body, _) = request_no_body(&ctx.app, "GET", "/api/viewAll").await;
    assert_eq!(status, StatusCode::OK);
    let items = body.as_array().expect("list should be an array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["patientName"], "Ada");
    assert_eq!(items[0]["drugName"], "Ibuprofen");
    assert_eq!(items[0]["dosage"], "200mg");
    assert!(items[0]["_id"].is_string());
}

#[tokio::test]
async fn missing_field_surfaces_store_message_with_200() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, body, _) = request_json(
        &ctx.app,
        "POST",
        "/api/addNew",
        json!({"patientName":"Ada","drugName":"Ibuprofen"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Prescription validation failed: dosage required");

    let (_, body, _) = request_no_body(&ctx.app, "GET", "/api/viewAll").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn delete_reports_same_status_for_unknown_id() {
    let ctx = build_test_context().await.expect("test context should build");

    request_json(
        &ctx.app,
        "POST",
        "/api/addNew",
        json!({"patientName":"Ada","drugName":"Ibuprofen","dosage":"200mg"}),
    )
    .await;
    let (_, body, _) = request_no_body(&ctx.app, "GET", "/api/viewAll").await;
    let id = body[0]["_id"].as_str().expect("id should exist").to_string();

    let (status, unknown, _) =
        request_json(&ctx.app, "POST", "/api/deleteUser", json!({"id":"no-such-id"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&unknown, "Prescription deleted successfully");

    let (status, real, _) =
        request_json(&ctx.app, "POST", "/api/deleteUser", json!({"id": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(real, unknown);

    let (_, body, _) = request_no_body(&ctx.app, "GET", "/api/viewAll").await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn body_larger_than_log_buffer_still_reaches_handler() {
    let ctx = build_test_context().await.expect("test context should build");

    let dosage = "x".repeat(1_200_000);
    let (status, body, trace) = request_json(
        &ctx.app,
        "POST",
        "/api/addNew",
        json!({"patientName":"Ada","drugName":"Ibuprofen","dosage": dosage}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Prescription Saved Successfully");
    assert!(trace.is_some());

    let (_, body, _) = request_no_body(&ctx.app, "GET", "/api/viewAll").await;
    assert_eq!(body[0]["dosage"].as_str().map(str::len), Some(1_200_000));
}

#[tokio::test]
async fn body_over_extractor_limit_is_413() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, _, trace) = request_json(
        &ctx.app,
        "POST",
        "/api/addNew",
        json!({"patientName":"Ada","drugName":"Ibuprofen","dosage": "x".repeat(3_000_000)}),
    )
    .await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(trace.is_some());

    let (_, body, _) = request_no_body(&ctx.app, "GET", "/api/viewAll").await;
    assert_eq!(body, json!([]));
}
