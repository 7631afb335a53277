//! API route configuration.

use crate::api::handlers::{
    create_url_handler, get_url_handler, list_urls_handler, redirect_handler, stats_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Routes mounted under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /urls/`              - Create (or return the existing) short link
/// - `GET  /urls/`              - List short links (`limit`, `offset`)
/// - `GET  /urls/{short_code}`  - Fetch one short link without counting a click
/// - `GET  /r/{short_code}`     - Redirect and count a click
/// - `GET  /stats`              - Aggregate counters
///
/// The collection is served both with and without the trailing slash.
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/", get(list_urls_handler).post(create_url_handler))
        .route("/urls/{short_code}", get(get_url_handler))
        .route("/r/{short_code}", get(redirect_handler))
        .route("/stats", get(stats_handler))
}
