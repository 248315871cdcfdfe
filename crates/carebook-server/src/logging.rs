use crate::api::status_response;
use axum::{
    body::{Body, Bytes, HttpBody},
    extract::Request,
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    middleware::Next,
    response::Response,
};
use rand::RngCore;
use std::time::Instant;

pub const TRACE_HEADER: &str = "x-trace-id";

/// Per-request trace ID, stored in request extensions and echoed back in
/// the `X-Trace-Id` response header.
#[derive(Clone, Debug)]
pub struct TraceId(pub String);

impl TraceId {
    /// 8 random bytes rendered as 16 lowercase hex chars.
    fn generate() -> Self {
        let mut bytes = [0u8; 8];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(bytes.iter().map(|b| format!("{b:02x}")).collect())
    }
}

impl std::ops::Deref for TraceId {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TraceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

const BODY_SNIPPET_BYTES: usize = 200;

/// Request bodies up to this size are buffered for logging. Larger or
/// unsized bodies pass through untouched and meet the extractor's own limit.
const MAX_LOGGED_REQUEST: u64 = 1024 * 1024;

/// Credentials travel through these; their bodies are never logged.
const CREDENTIAL_PATHS: [&str; 2] = ["/api/login", "/api/register"];

fn snippet(bytes: &[u8]) -> String {
    let Ok(text) = std::str::from_utf8(bytes) else {
        return "<non-utf8 body>".to_string();
    };
    if text.len() <= BODY_SNIPPET_BYTES {
        return text.to_string();
    }
    let cut = (0..=BODY_SNIPPET_BYTES)
        .rev()
        .find(|&i| text.is_char_boundary(i))
        .unwrap_or(0);
    format!("{}...", &text[..cut])
}

fn human_elapsed(started: Instant) -> String {
    let micros = started.elapsed().as_micros();
    match micros {
        0..=999 => format!("{micros}µs"),
        1_000..=999_999 => format!("{}ms", micros / 1_000),
        _ => format!("{:.1}s", micros as f64 / 1_000_000.0),
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|ct| ct.contains("application/json"))
}

fn carries_body(method: &Method) -> bool {
    matches!(*method, Method::POST | Method::PUT | Method::PATCH)
}

fn fits_log_buffer(body: &Body) -> bool {
    body.size_hint()
        .upper()
        .is_some_and(|n| n <= MAX_LOGGED_REQUEST)
}

fn with_trace_header(mut response: Response, trace_id: &TraceId) -> Response {
    if let Ok(value) = HeaderValue::from_str(trace_id) {
        response.headers_mut().insert(TRACE_HEADER, value);
    }
    response
}

macro_rules! response_event {
    ($level:ident, $trace:expr, $status:expr, $elapsed:expr, $body:expr) => {
        tracing::$level!(
            trace_id = %$trace,
            status = $status.as_u16(),
            elapsed = %$elapsed,
            body = %$body,
            "<-- response"
        )
    };
}

fn log_response(trace_id: &TraceId, status: StatusCode, elapsed: &str, body: &str) {
    if status.is_server_error() {
        response_event!(error, trace_id, status, elapsed, body);
    } else if status.is_client_error() {
        response_event!(warn, trace_id, status, elapsed, body);
    } else {
        response_event!(info, trace_id, status, elapsed, body);
    }
}

/// Request/response logging middleware.
///
/// Assigns the [`TraceId`], logs one line on the way in and one on the way
/// out (with JSON bodies truncated), and sets the `X-Trace-Id` header.
pub async fn request_logging(mut req: Request, next: Next) -> Response {
    let trace_id = TraceId::generate();
    req.extensions_mut().insert(trace_id.clone());

    let path = req.uri().path().to_owned();
    if path.starts_with("/docs") {
        return with_trace_header(next.run(req).await, &trace_id);
    }
    let method = req.method().clone();
    let quiet = CREDENTIAL_PATHS.contains(&path.as_str());

    let req = if !quiet && carries_body(&method) && fits_log_buffer(req.body()) {
        let (parts, body) = req.into_parts();
        let bytes = match axum::body::to_bytes(body, MAX_LOGGED_REQUEST as usize).await {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::warn!(trace_id = %trace_id, path = %path, error = %e, "Failed to read request body");
                let response =
                    status_response(StatusCode::BAD_REQUEST, "Failed to read request body");
                return with_trace_header(response, &trace_id);
            }
        };
        tracing::info!(
            trace_id = %trace_id,
            method = %method,
            path = %path,
            body = %snippet(&bytes),
            "--> request"
        );
        Request::from_parts(parts, Body::from(bytes))
    } else {
        tracing::info!(trace_id = %trace_id, method = %method, path = %path, "--> request");
        req
    };

    let started = Instant::now();
    let (parts, body) = next.run(req).await.into_parts();
    let elapsed = human_elapsed(started);

    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .unwrap_or_else(|_| Bytes::new());
    let logged_body = if !quiet && is_json(&parts.headers) {
        snippet(&bytes)
    } else {
        String::new()
    };
    log_response(&trace_id, parts.status, &elapsed, &logged_body);

    with_trace_header(Response::from_parts(parts, Body::from(bytes)), &trace_id)
}
