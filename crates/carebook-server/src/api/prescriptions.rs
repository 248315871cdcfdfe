use crate::api::{status_error_response, status_response, StatusResponse};
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use carebook_common::types::{CreatePrescriptionRequest, DeleteRecordRequest, Prescription};
use utoipa_axum::{router::OpenApiRouter, routes};

/// List every prescription. No filtering, sorting options or pagination.
#[utoipa::path(
    get,
    path = "/api/viewAll",
    tag = "Prescriptions",
    responses(
        (status = 200, description = "All prescriptions", body = Vec<Prescription>),
        (status = 500, description = "Store failure", body = StatusResponse)
    )
)]
async fn list_prescriptions(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.store.list_prescriptions().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "Failed to list prescriptions");
            status_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching prescriptions",
                &e.to_string(),
            )
        }
    }
}

/// Create a prescription.
///
/// Failures, including missing fields, come back as 200 with the store's
/// error message in `status`.
#[utoipa::path(
    post,
    path = "/api/addNew",
    tag = "Prescriptions",
    request_body = CreatePrescriptionRequest,
    responses(
        (status = 200, description = "Saved, or the failure message", body = StatusResponse)
    )
)]
async fn add_prescription(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<CreatePrescriptionRequest>,
) -> impl IntoResponse {
    match state.store.insert_prescription(&req).await {
        Ok(p) => {
            tracing::info!(trace_id = %trace_id, id = %p.id, "Prescription created");
            status_response(StatusCode::OK, "Prescription Saved Successfully")
        }
        Err(e) => {
            tracing::warn!(trace_id = %trace_id, error = %e, "Failed to create prescription");
            status_response(StatusCode::OK, &e.to_string())
        }
    }
}

/// Delete a prescription by id. Reports success whether or not the id
/// matched a record.
#[utoipa::path(
    post,
    path = "/api/deleteUser",
    tag = "Prescriptions",
    request_body = DeleteRecordRequest,
    responses(
        (status = 200, description = "Deletion outcome", body = StatusResponse)
    )
)]
async fn delete_prescription(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<DeleteRecordRequest>,
) -> impl IntoResponse {
    match state.store.delete_prescription(&req.id).await {
        Ok(matched) => {
            tracing::info!(trace_id = %trace_id, id = %req.id, matched, "Prescription delete");
            status_response(StatusCode::OK, "Prescription deleted successfully")
        }
        Err(e) => {
            tracing::error!(trace_id = %trace_id, id = %req.id, error = %e, "Failed to delete prescription");
            status_response(StatusCode::OK, "Error deleting prescription")
        }
    }
}

pub fn prescription_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_prescriptions))
        .routes(routes!(add_prescription))
        .routes(routes!(delete_prescription))
}
