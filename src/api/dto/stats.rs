//! DTOs for aggregate statistics.

use serde::{Deserialize, Serialize};

use crate::application::services::LinkStats;

/// Aggregate counters over all short links.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_urls: i64,
    pub urls_created_today: i64,
    pub total_clicks: i64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            total_urls: stats.total_urls,
            urls_created_today: stats.urls_created_today,
            total_clicks: stats.total_clicks,
        }
    }
}
