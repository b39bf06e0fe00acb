//! Repository trait for short link data access.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Aggregated analytics for a single link: the original URL and the running
/// click counter.
#[derive(Debug, Clone)]
pub struct LinkStats {
    pub short_code: String,
    pub original_url: String,
    pub click_count: i64,
}

/// Repository interface for managing short links and their click counters.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates a new short link with a zero click count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the short code already exists.
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Finds a link by its short code.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(Link))` if found
    /// - `Ok(None)` if not found
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError>;

    /// Atomically increments the click counter for a short code.
    ///
    /// Executes a single `UPDATE … SET click_count = click_count + 1`
    /// statement. There is no read step, so concurrent callers can never
    /// lose an update and the counter can never go negative.
    ///
    /// # Returns
    ///
    /// - `Ok(true)` if a row was updated
    /// - `Ok(false)` if the short code does not exist
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError>;

    /// Fetches analytics (original URL + click count) for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn stats(&self, short_code: &str) -> Result<Option<LinkStats>, AppError>;

    /// Checks if the database backend is reachable.
    ///
    /// Used by the health check endpoint.
    async fn health_check(&self) -> bool;
}
