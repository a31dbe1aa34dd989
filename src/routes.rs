//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /health`         - Health check (outside the API prefix)
//! - `{api_prefix}/*`       - REST API, `/api/v1` by default
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Configured browser origins only
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::health_handler;
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `api_prefix` - path the bookmark routes are nested under; empty or `/`
///   mounts them at the root
/// - `allowed_origins` - origins granted cross-origin access
pub fn app_router(
    state: AppState,
    api_prefix: &str,
    allowed_origins: &[String],
) -> NormalizePath<Router> {
    let prefix = api_prefix.trim_end_matches('/');
    let api_router = api::routes::bookmark_routes();

    let router = Router::new().route("/health", get(health_handler));
    let router = if prefix.is_empty() {
        router.merge(api_router)
    } else {
        router.nest(prefix, api_router)
    };

    let router = router
        .with_state(state)
        .layer(cors::layer(allowed_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
