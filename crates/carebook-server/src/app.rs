use crate::state::AppState;
use crate::{api, logging, openapi};
use axum::http::HeaderValue;
use axum::middleware;
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "carebook API",
        description = "Prescription, appointment and user account REST API",
    ),
    tags(
        (name = "Health", description = "Service health"),
        (name = "Prescriptions", description = "Prescription records"),
        (name = "Appointments", description = "Appointment scheduling"),
        (name = "Users", description = "Registration and login")
    )
)]
struct ApiDoc;

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods(Any).allow_headers(Any);
    if allowed_origins.is_empty() {
        return layer.allow_origin(Any);
    }
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|o| match HeaderValue::from_str(o) {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();
    layer.allow_origin(AllowOrigin::list(origins))
}

pub fn build_http_app(state: AppState) -> Router {
    let (api_router, api_spec) = api::api_routes().split_for_parts();

    let mut doc = ApiDoc::openapi();
    doc.merge(api_spec);

    let cors = cors_layer(&state.config.cors_allowed_origins);

    api_router
        .with_state(state)
        .merge(openapi::yaml_route(&doc))
        .merge(SwaggerUi::new("/docs").url("/api/openapi.json", doc))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
