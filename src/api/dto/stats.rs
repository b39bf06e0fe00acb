//! DTOs for the analytics endpoint.

use serde::Serialize;

use crate::domain::repositories::LinkStats;

/// Analytics for a single short link.
///
/// `click_count` is eventually consistent: clicks are applied
/// asynchronously by the analytics consumer, so a just-followed redirect
/// may not be reflected yet.
#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub original_url: String,
    pub click_count: i64,
}

impl From<LinkStats> for StatsResponse {
    fn from(stats: LinkStats) -> Self {
        Self {
            original_url: stats.original_url,
            click_count: stats.click_count,
        }
    }
}
