//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoints
///
/// - `GET /api/v1/r/{short_code}`
/// - `GET /{short_code}`
///
/// The click is counted before the response is sent, whether or not the
/// client follows the `Location` header. The status is the configured
/// redirect status (302 unless set to 301).
///
/// # Errors
///
/// Returns 404 Not Found if the code is unknown; nothing is counted.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let original_url = state.link_service.resolve(&short_code).await?;

    let location = header::HeaderValue::from_str(&original_url).map_err(|_| {
        AppError::internal(
            "Stored URL is not a valid Location header",
            json!({ "short_code": short_code }),
        )
    })?;

    Ok((state.redirect_status, [(header::LOCATION, location)]).into_response())
}
