//! Handler for the analytics endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::stats::StatsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Returns the click analytics for a short code.
///
/// # Endpoint
///
/// `GET /analytics/{code}`
///
/// # Response
///
/// ```json
/// { "original_url": "https://example.com", "click_count": 3 }
/// ```
///
/// The count lags redirects by the pipeline's processing delay and may
/// over-count under broker redelivery; it never goes backwards.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn stats_handler(
    State(state): State<AppState>,
    Path(code): Path<String>,
) -> Result<Json<StatsResponse>, AppError> {
    let stats = state.stats_service.get_stats(&code).await?;

    Ok(Json(stats.into()))
}
