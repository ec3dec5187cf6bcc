//! HTTP adapters - REST API implementations.
//!
//! The session adapter exposes the repository and the estimation
//! aggregations; this module assembles it with the cross-cutting layers.

pub mod session;

pub use session::{session_router, SessionAppState};

use axum::http::HeaderValue;
use axum::routing::get;
use axum::Router;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing::warn;

use crate::config::ServerConfig;

/// Builds the complete application router.
///
/// Adds `GET /health`, request tracing, the configured request timeout and
/// CORS. Without configured origins CORS is permissive.
pub fn app_router(state: SessionAppState, server: &ServerConfig) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(session_router().with_state(state))
        .layer(cors_layer(server))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(TraceLayer::new_for_http())
}

async fn health() -> &'static str {
    "ok"
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .into_iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods(tower_http::cors::Any)
            .allow_headers(tower_http::cors::Any)
    }
}
