//! Handler for aggregate statistics.

use axum::{Json, extract::State};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns aggregate counters.
///
/// # Endpoint
///
/// `GET /api/v1/stats`
///
/// # Response
///
/// ```json
/// { "total_urls": 12, "urls_created_today": 3, "total_clicks": 410 }
/// ```
///
/// `urls_created_today` counts links created since 00:00 UTC.
pub async fn stats_handler(State(state): State<AppState>) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.link_service.stats().await?;
    Ok(Json(stats.into()))
}
