//! Router assembly for the todo HTTP API.
//!
//! [`build_router`] wires the handlers to their routes with CORS and tracing
//! middleware layers.

use axum::http::{HeaderValue, Method};
use axum::routing::{get, put};
use axum::Router;
use tower_http::cors::{AllowHeaders, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Builds the complete axum router with all API routes.
///
/// Routes use axum 0.8 `/{param}` path syntax. CORS admits only
/// `cors_origin`, with credentials and whatever request headers the
/// preflight asks for. TraceLayer provides request-level logging via tracing.
pub fn build_router(state: AppState, cors_origin: HeaderValue) -> Router {
    Router::new()
        .route(
            "/todos",
            get(handlers::todos::list_todos).post(handlers::todos::create_todo),
        )
        .route(
            "/todos/{id}",
            put(handlers::todos::update_todo)
                .delete(handlers::todos::delete_todo)
                .patch(handlers::todos::toggle_todo),
        )
        .layer(cors_layer(cors_origin))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn cors_layer(origin: HeaderValue) -> CorsLayer {
    CorsLayer::new()
        // A list answers only a matching request origin; `exact` would echo
        // the configured origin to every caller.
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
        ])
        // A literal `*` is not allowed together with credentials.
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
