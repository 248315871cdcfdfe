mod common;

use axum::http::StatusCode;
use common::{
    assert_status, build_test_context, create_appointment, list_appointments, request_json,
};
use serde_json::json;

#[tokio::test]
async fn list_is_sorted_by_date_for_any_insertion_order() {
    let ctx = build_test_context().await.expect("test context should build");

    create_appointment(&ctx.app, "third", "2025-05-03T09:00", None).await;
    create_appointment(&ctx.app, "first", "2025-05-01T09:00:00Z", Some("intake")).await;
    create_appointment(&ctx.app, "second", "2025-05-02", None).await;

    let names: Vec<String> = list_appointments(&ctx.app)
        .await
        .iter()
        .map(|a| a["patientName"].as_str().unwrap_or_default().to_string())
        .collect();
    assert_eq!(names, vec!["first", "second", "third"]);
}

#[tokio::test]
async fn invalid_date_reports_message_with_200() {
    let ctx = build_test_context().await.expect("test context should build");

    let (status, body, _) = request_json(
        &ctx.app,
        "POST",
        "/api/appointments/new",
        json!({"patientName":"Ada","doctorName":"Dr. Grey","appointmentDate":"tomorrow"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["status"]
        .as_str()
        .unwrap_or_default()
        .contains("appointmentDate"));
    assert!(list_appointments(&ctx.app).await.is_empty());
}

#[tokio::test]
async fn update_replaces_all_fields_and_clears_missing_reason() {
    let ctx = build_test_context().await.expect("test context should build");

    create_appointment(&ctx.app, "Ada", "2025-05-01T09:00", Some("flu shot")).await;
    let before = list_appointments(&ctx.app).await;
    let id = before[0]["_id"].as_str().expect("id should exist").to_string();
    assert_eq!(before[0]["reason"], "flu shot");

    let (status, body, _) = request_json(
        &ctx.app,
        "POST",
        "/api/appointments/update",
        json!({
            "id": id,
            "patientName": "Ada Lovelace",
            "doctorName": "Dr. House",
            "appointmentDate": "2025-06-10T15:30",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Appointment Updated Successfully");

    let after = list_appointments(&ctx.app).await;
    assert_eq!(after.len(), 1);
    assert_eq!(after[0]["_id"], id.as_str());
    assert_eq!(after[0]["patientName"], "Ada Lovelace");
    assert_eq!(after[0]["doctorName"], "Dr. House");
    assert_eq!(after[0]["appointmentDate"], "2025-06-10T15:30:00Z");
    assert!(after[0].get("reason").is_none());
}

#[tokio::test]
async fn update_with_invalid_payload_returns_500() {
    let ctx = build_test_context().await.expect("test context should build");

    create_appointment(&ctx.app, "Ada", "2025-05-01T09:00", None).await;
    let id = list_appointments(&ctx.app).await[0]["_id"]
        .as_str()
        .expect("id should exist")
        .to_string();

    let (status, body, _) = request_json(
        &ctx.app,
        "POST",
        "/api/appointments/update",
        json!({"id": id, "patientName": "Ada", "doctorName": "Dr. Grey"}),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_status(&body, "Error updating appointment");
    assert!(body["error"].is_string());

    let stored = list_appointments(&ctx.app).await;
    assert_eq!(stored[0]["appointmentDate"], "2025-05-01T09:00:00Z");
}

#[tokio::test]
async fn delete_returns_fixed_status_even_for_unknown_id() {
    let ctx = build_test_context().await.expect("test context should build");

    create_appointment(&ctx.app, "Ada", "2025-05-01T09:00", None).await;
    let id = list_appointments(&ctx.app).await[0]["_id"]
        .as_str()
        .expect("id should exist")
        .to_string();

    let (status, body, _) =
        request_json(&ctx.app, "POST", "/api/deleteAppointment", json!({"id": "nope"})).await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Appointment Canceled Successfully");
    assert_eq!(list_appointments(&ctx.app).await.len(), 1);

    let (status, body, _) =
        request_json(&ctx.app, "POST", "/api/deleteAppointment", json!({"id": id})).await;
    assert_eq!(status, StatusCode::OK);
    assert_status(&body, "Appointment Canceled Successfully");
    assert!(list_appointments(&ctx.app).await.is_empty());
}
