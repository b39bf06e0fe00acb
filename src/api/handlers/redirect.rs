//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::warn;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Request Flow
///
/// 1. Resolve the short code in the database
/// 2. Spawn a click-event publish (fire-and-forget)
/// 3. Return 302 Found with the `Location` header
///
/// # Click Tracking
///
/// The publish runs as a detached task: the response never waits for the
/// broker, and a publish failure is logged and discarded. A lost click is
/// an accepted failure mode; the redirect itself must always succeed once
/// the code resolves.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    let publisher = state.clicks.clone();
    tokio::spawn(async move {
        if let Err(e) = publisher.publish(&code).await {
            warn!(error = %e, code = %code, "failed to publish click event");
        }
    });

    Ok((
        StatusCode::FOUND,
        [(header::LOCATION, link.original_url)],
    ))
}
