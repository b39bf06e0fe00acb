//! Shared application state injected into HTTP handlers.

use std::sync::Arc;

use crate::application::services::{LinkService, StatsService};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::queue::ClickPublisher;

/// Application state shared across all request handlers.
///
/// The click publisher is held behind a trait object so tests can swap in
/// a recording or failing implementation, and so the service runs with a
/// [`crate::infrastructure::queue::NullPublisher`] when no brokers are
/// configured.
#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<LinkService>,
    pub stats_service: Arc<StatsService>,
    pub clicks: Arc<dyn ClickPublisher>,
}

impl AppState {
    /// Builds the state from a repository, a click publisher, and the
    /// public base URL.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        clicks: Arc<dyn ClickPublisher>,
        base_url: String,
    ) -> Self {
        Self {
            link_service: Arc::new(LinkService::new(repository.clone(), base_url)),
            stats_service: Arc::new(StatsService::new(repository)),
            clicks,
        }
    }
}
