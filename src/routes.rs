//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{short_code}` - Short link redirect
//! - `GET  /health`       - Storage health check
//! - `/api/v1/*`          - REST API
//!
//! # Middleware
//!
//! - **CORS** - Configured origin list, any method and header
//! - **Tracing** - Structured request/response logging

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{cors, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;

/// Constructs the application router with all routes and middleware.
///
/// `/health` is a static route, so it wins over `/{short_code}`; generated
/// codes never collide with it because reserved words are never issued.
pub fn app_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/{short_code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api/v1", api::routes::v1_routes())
        .with_state(state)
        .layer(cors::layer(cors_origins))
        .layer(tracing::layer())
}
