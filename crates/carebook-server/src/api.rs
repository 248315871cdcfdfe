pub mod appointments;
pub mod prescriptions;
pub mod users;

use crate::state::AppState;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;
use utoipa_axum::{router::OpenApiRouter, routes};

/// Status body returned by every mutating endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct StatusResponse {
    /// Human-readable outcome
    pub status: String,
    /// Underlying error message, on 5xx responses only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

pub fn status_response(status: StatusCode, msg: &str) -> Response {
    (
        status,
        Json(StatusResponse {
            status: msg.to_string(),
            error: None,
        }),
    )
        .into_response()
}

pub fn status_error_response(status: StatusCode, msg: &str, error: &str) -> Response {
    (
        status,
        Json(StatusResponse {
            status: msg.to_string(),
            error: Some(error.to_string()),
        }),
    )
        .into_response()
}

#[derive(Serialize, ToSchema)]
struct HealthResponse {
    status: String,
    version: String,
    uptime_secs: i64,
}

/// Liveness probe.
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "Health",
    responses(
        (status = 200, description = "Service is up", body = HealthResponse)
    )
)]
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: (Utc::now() - state.start_time).num_seconds(),
    })
}

pub fn api_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health))
        .merge(prescriptions::prescription_routes())
        .merge(appointments::appointment_routes())
        .merge(users::user_routes())
}
