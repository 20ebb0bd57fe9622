//! HTTP API exposing Neo4j connectivity verification.
//!
//! Provides `GET /api/v1/verify-connectivity` and `GET /health`, with
//! structured logging (tracing), Prometheus metrics and `{"detail"}` error
//! envelopes for every failure path.

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;

use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use connectivity::GraphConnector;
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use routes::connectivity::AppState;

/// Prefix under which versioned API routes are mounted.
pub const API_V1_PREFIX: &str = "/api/v1";

/// Creates the Axum application router with all routes and shared state.
pub fn create_app<C: GraphConnector + 'static>(
    state: Arc<AppState<C>>,
    metrics_handle: PrometheusHandle,
) -> Router {
    let api_v1 = Router::new()
        .route(
            "/verify-connectivity",
            get(routes::connectivity::verify::<C>),
        )
        .with_state(state);

    let metrics_router = Router::new()
        .route("/metrics", get(routes::metrics::get))
        .with_state(metrics_handle);

    Router::new()
        .route("/health", get(routes::health::check))
        .nest(API_V1_PREFIX, api_v1)
        .merge(metrics_router)
        .fallback(routes::fallback::not_found)
        .method_not_allowed_fallback(routes::fallback::method_not_allowed)
        .layer(CatchPanicLayer::custom(middleware::handle_panic))
        .layer(axum::middleware::from_fn(middleware::log_requests))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
                .max_age(Duration::from_secs(3600)),
        )
        .layer(TraceLayer::new_for_http())
}
