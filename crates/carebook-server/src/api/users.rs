use crate::api::{status_error_response, status_response, StatusResponse};
use crate::logging::TraceId;
use crate::state::AppState;
use axum::extract::{Extension, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use carebook_common::types::{LoginRequest, LoginResponse, RegisterRequest};
use carebook_storage::auth::{hash_password, verify_password};
use carebook_storage::StorageError;
use utoipa_axum::{router::OpenApiRouter, routes};

const USER_EXISTS: &str = "User already exists. Check username or email.";
const REGISTER_FAILED: &str = "Server error during registration.";
const LOGIN_FAILED: &str = "Server error during login.";

fn server_error(trace_id: &TraceId, msg: &str, error: &str) -> Response {
    tracing::error!(trace_id = %trace_id, error = %error, "{msg}");
    status_error_response(StatusCode::INTERNAL_SERVER_ERROR, msg, error)
}

/// bcrypt is CPU-bound; keep it off the async workers.
async fn blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(f).await??)
}

/// Register a new account.
///
/// Rejected with 400 when any field is blank or the email or username is
/// already in use.
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "Users",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Registered", body = StatusResponse),
        (status = 400, description = "Missing fields or duplicate user", body = StatusResponse),
        (status = 500, description = "Server error", body = StatusResponse)
    )
)]
async fn register(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Response {
    let blank = [&req.full_name, &req.email, &req.username, &req.password]
        .iter()
        .any(|v| v.trim().is_empty());
    if blank {
        return status_response(StatusCode::BAD_REQUEST, "All fields are required.");
    }

    match state
        .store
        .find_user_by_email_or_username(&req.email, &req.username)
        .await
    {
        Ok(Some(_)) => return status_response(StatusCode::BAD_REQUEST, USER_EXISTS),
        Ok(None) => {}
        Err(e) => return server_error(&trace_id, REGISTER_FAILED, &e.to_string()),
    }

    let password = req.password.clone();
    let cost = state.config.auth.bcrypt_cost;
    let password_hash = match blocking(move || hash_password(&password, cost)).await {
        Ok(h) => h,
        Err(e) => return server_error(&trace_id, REGISTER_FAILED, &e.to_string()),
    };

    match state.store.create_user(&req, &password_hash).await {
        Ok(user) => {
            tracing::info!(trace_id = %trace_id, id = %user.id, username = %user.username, "User registered");
            status_response(StatusCode::CREATED, "Registration successful!")
        }
        // Lost a race with a concurrent registration; the unique index caught it.
        Err(StorageError::Duplicate { .. }) => {
            status_response(StatusCode::BAD_REQUEST, USER_EXISTS)
        }
        Err(e) => server_error(&trace_id, REGISTER_FAILED, &e.to_string()),
    }
}

/// Log in with a username or email and a password.
///
/// Returns the user's public profile. No token or cookie is issued.
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "Users",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Unknown user or wrong password", body = StatusResponse),
        (status = 500, description = "Server error", body = StatusResponse)
    )
)]
async fn login(
    Extension(trace_id): Extension<TraceId>,
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Response {
    let user = match state.store.find_user_by_identifier(&req.identifier).await {
        Ok(Some(u)) => u,
        Ok(None) => {
            return status_response(
                StatusCode::UNAUTHORIZED,
                "Invalid Credentials: User not found.",
            );
        }
        Err(e) => return server_error(&trace_id, LOGIN_FAILED, &e.to_string()),
    };

    let password = req.password;
    let hash = user.password_hash.clone();
    match blocking(move || verify_password(&password, &hash)).await {
        Ok(true) => {}
        Ok(false) => {
            return status_response(
                StatusCode::UNAUTHORIZED,
                "Invalid Credentials: Password incorrect.",
            );
        }
        Err(e) => return server_error(&trace_id, LOGIN_FAILED, &e.to_string()),
    }

    tracing::info!(trace_id = %trace_id, username = %user.username, "User logged in");
    (
        StatusCode::OK,
        Json(LoginResponse {
            status: "Login successful!".to_string(),
            user: user.profile(),
        }),
    )
        .into_response()
}

pub fn user_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(register))
        .routes(routes!(login))
}
