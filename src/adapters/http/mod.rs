//! HTTP adapters - REST API implementations.
//!
//! Each area has its own HTTP adapter for endpoint exposure; `api_router`
//! merges them with the shared middleware stack.

pub mod error;
pub mod filling;
pub mod forms;

pub use error::{ApiError, ErrorResponse};
pub use filling::{filling_router, FillingAppState};
pub use forms::{forms_router, FormsAppState};

use axum::routing::get;
use axum::Router;
use http::HeaderValue;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;

/// GET /health
async fn health() -> &'static str {
    "ok"
}

/// Builds the complete API router with tracing, timeout and CORS layers.
pub fn api_router(
    filling: FillingAppState,
    forms: FormsAppState,
    server: &ServerConfig,
) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(filling_router().with_state(filling))
        .merge(forms_router().with_state(forms))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.cors_origins()))
        .layer(TraceLayer::new_for_http())
}

/// CORS for the configured origins. An empty list allows any origin.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allow_origin = if origins.is_empty() {
        AllowOrigin::from(Any)
    } else {
        AllowOrigin::list(
            origins
                .iter()
                .filter_map(|origin| HeaderValue::from_str(origin).ok()),
        )
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods(Any)
        .allow_headers(Any)
}
