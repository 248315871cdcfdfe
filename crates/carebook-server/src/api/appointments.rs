use crate::api::{status_error_response, status_response, StatusResponse};
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use carebook_common::types::{
    Appointment, CreateAppointmentRequest, DeleteRecordRequest, UpdateAppointmentRequest,
};
use utoipa_axum::{router::OpenApiRouter, routes};

/// List every appointment, earliest first.
#[utoipa::path(
    get,
    path = "/api/appointments",
    tag = "Appointments",
    responses(
        (status = 200, description = "Appointments sorted by appointmentDate ascending", body = Vec<Appointment>),
        (status = 500, description = "Store failure", body = StatusResponse)
    )
)]
async fn list_appointments(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    match state.store.list_appointments().await {
        Ok(items) => Json(items).into_response(),
        Err(e) => {
            tracing::error!(trace_id = %trace_id, error = %e, "Failed to list appointments");
            status_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error fetching appointments",
                &e.to_string(),
            )
        }
    }
}

/// Schedule an appointment. Failures come back as 200 with the error
/// message in `status`.
#[utoipa::path(
    post,
    path = "/api/appointments/new",
    tag = "Appointments",
    request_body = CreateAppointmentRequest,
    responses(
        (status = 200, description = "Scheduled, or the failure message", body = StatusResponse)
    )
)]
async fn create_appointment(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<CreateAppointmentRequest>,
) -> impl IntoResponse {
    match state.store.insert_appointment(&req).await {
        Ok(a) => {
            tracing::info!(trace_id = %trace_id, id = %a.id, "Appointment created");
            status_response(StatusCode::OK, "Appointment Scheduled Successfully")
        }
        Err(e) => {
            tracing::warn!(trace_id = %trace_id, error = %e, "Failed to create appointment");
            status_response(StatusCode::OK, &e.to_string())
        }
    }
}

/// Replace all fields of an appointment. A missing `reason` clears it.
/// No concurrency check: the last update wins.
#[utoipa::path(
    post,
    path = "/api/appointments/update",
    tag = "Appointments",
    request_body = UpdateAppointmentRequest,
    responses(
        (status = 200, description = "Updated", body = StatusResponse),
        (status = 500, description = "Invalid payload or store failure", body = StatusResponse)
    )
)]
async fn update_appointment(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<UpdateAppointmentRequest>,
) -> impl IntoResponse {
    match state.store.replace_appointment(&req).await {
        Ok(Some(_)) => {
            tracing::info!(trace_id = %trace_id, id = %req.id, "Appointment updated");
            status_response(StatusCode::OK, "Appointment Updated Successfully")
        }
        Ok(None) => {
            tracing::warn!(trace_id = %trace_id, id = %req.id, "Update matched no appointment");
            status_response(StatusCode::OK, "Appointment Updated Successfully")
        }
        Err(e) => {
            tracing::error!(trace_id = %trace_id, id = %req.id, error = %e, "Failed to update appointment");
            status_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error updating appointment",
                &e.to_string(),
            )
        }
    }
}

/// Cancel (delete) an appointment by id.
#[utoipa::path(
    post,
    path = "/api/deleteAppointment",
    tag = "Appointments",
    request_body = DeleteRecordRequest,
    responses(
        (status = 200, description = "Cancelled, whether or not the id matched", body = StatusResponse),
        (status = 500, description = "Store failure", body = StatusResponse)
    )
)]
async fn delete_appointment(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<DeleteRecordRequest>,
) -> impl IntoResponse {
    match state.store.delete_appointment(&req.id).await {
        Ok(matched) => {
            tracing::info!(trace_id = %trace_id, id = %req.id, matched, "Appointment delete");
            status_response(StatusCode::OK, "Appointment Canceled Successfully")
        }
        Err(e) => {
            tracing::error!(trace_id = %trace_id, id = %req.id, error = %e, "Failed to delete appointment");
            status_error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Error canceling appointment",
                &e.to_string(),
            )
        }
    }
}

pub fn appointment_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(list_appointments))
        .routes(routes!(create_appointment))
        .routes(routes!(update_appointment))
        .routes(routes!(delete_appointment))
}
