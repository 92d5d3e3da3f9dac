//! HTTP API route definitions.

use std::time::Duration;

use axum::body::Body;
use axum::http::{Request, Response};
use axum::{
    middleware,
    routing::{get, put},
    Router,
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};
use utoipa_swagger_ui::SwaggerUi;

use super::agents;
use super::docs::{ApiDoc, OPENAPI_JSON_PATH};
use super::handlers::{health, metrics, root, AppState};
use crate::metrics::track_requests;

/// Prefix the versioned API is mounted under.
pub const API_PREFIX: &str = "/api/v1";

/// Create the versioned API router (mounted at [`API_PREFIX`]).
pub fn create_router() -> Router<AppState> {
    Router::new()
        .route(
            "/agents",
            get(agents::list_agents).post(agents::create_agent),
        )
        .route("/agents/search", get(agents::search_agents))
        .route("/agents/name/:name", get(agents::get_agent_by_name))
        .route("/agents/type/:agent_type", get(agents::list_by_type))
        .route("/agents/status/:status", get(agents::list_by_status))
        .route("/agents/count/type/:agent_type", get(agents::count_by_type))
        .route("/agents/count/status/:status", get(agents::count_by_status))
        .route(
            "/agents/:id",
            get(agents::get_agent)
                .put(agents::update_agent)
                .delete(agents::delete_agent),
        )
        .route("/agents/:id/activate", put(agents::activate_agent))
        .route("/agents/:id/deactivate", put(agents::deactivate_agent))
}

/// Permissive cross-origin policy with credentials.
///
/// Wildcards cannot be combined with credentials, so the request's origin,
/// method and headers are mirrored back instead.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}

/// Assemble the full application.
pub fn create_app(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|req: &Request<Body>| {
            tracing::info_span!(
                "request",
                method = %req.method(),
                uri = %req.uri(),
                version = ?req.version(),
            )
        })
        .on_response(|res: &Response<Body>, latency: Duration, _span: &tracing::Span| {
            info!(
                latency = %format!("{} ms", latency.as_millis()),
                status = %res.status().as_u16(),
                "finished processing request"
            );
        });

    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/metrics", get(metrics))
        .nest(API_PREFIX, create_router())
        .route_layer(middleware::from_fn(track_requests))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
        .merge(Redoc::with_url("/redoc", ApiDoc::openapi()))
        .layer(trace_layer)
        .layer(cors_layer())
        .with_state(state)
}
