use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::Router;
use std::sync::Arc;
use utoipa::openapi::OpenApi;

/// Serve the merged OpenAPI document as YAML at `/api/openapi.yaml`.
///
/// The document is rendered once when the router is built.
pub fn yaml_route(doc: &OpenApi) -> Router {
    let rendered: Arc<Result<String, String>> = Arc::new(doc.to_yaml().map_err(|e| {
        tracing::error!(error = %e, "Failed to render OpenAPI YAML");
        e.to_string()
    }));
    Router::new().route(
        "/api/openapi.yaml",
        get(move || {
            let rendered = rendered.clone();
            async move { yaml_response(&rendered) }
        }),
    )
}

fn yaml_response(rendered: &Result<String, String>) -> Response {
    match rendered {
        Ok(yaml) => ([(header::CONTENT_TYPE, "application/yaml")], yaml.clone()).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("OpenAPI document unavailable: {e}"),
        )
            .into_response(),
    }
}
