//! Handlers for the short URL resource.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
};
use validator::Validate;

use crate::api::dto::url::{CreateUrlRequest, ListParams, UrlListResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link, or returns the existing one for the same URL.
///
/// # Endpoint
///
/// `POST /api/v1/urls/`
///
/// # Request Body
///
/// ```json
/// { "original_url": "https://example.com/x" }
/// ```
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "original_url": "https://example.com/x",
///   "short_code": "aZ3kQ9x",
///   "short_url": "http://localhost:8000/aZ3kQ9x",
///   "created_at": "2026-01-01T12:00:00Z",
///   "clicks": 0
/// }
/// ```
///
/// Repeating the request returns the same record with status 200.
///
/// # Errors
///
/// Returns 400 Bad Request for malformed bodies and invalid URLs.
/// Returns 500 Internal Server Error if no unique code could be allocated.
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<Json<UrlResponse>, AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let outcome = state
        .link_service
        .create_short_link(&payload.original_url)
        .await?;

    let short_url = state.link_service.short_url(&outcome.link.code);

    Ok(Json(UrlResponse::new(outcome.link, short_url)))
}

/// Lists short links, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/urls/?limit=50&offset=0`
///
/// # Errors
///
/// Returns 400 Bad Request if `limit` is outside `1..=1000` or `offset` is
/// negative.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<UrlListResponse>, AppError> {
    let Query(params) = params?;
    let (limit, offset) = params
        .validate_and_get_limit_offset()
        .map_err(|e| AppError::bad_request(e, serde_json::json!({})))?;

    let (links, total) = state.link_service.list_links(limit, offset).await?;

    let urls = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            UrlResponse::new(link, short_url)
        })
        .collect();

    Ok(Json(UrlListResponse { urls, total }))
}

/// Returns one short link without counting a click.
///
/// # Endpoint
///
/// `GET /api/v1/urls/{short_code}`
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown.
pub async fn get_url_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<UrlResponse>, AppError> {
    let link = state.link_service.get_link_by_code(&short_code).await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(UrlResponse::new(link, short_url)))
}
