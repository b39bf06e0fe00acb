//! Consumer-side click processing.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::click_event::{ClickEvent, ClickHandler};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// Applies click events to the counter store.
///
/// The whole job is one atomic increment per event. Because the increment
/// is commutative and has no read step, the processor is correct under
/// redelivery (over-counts, never corrupts) and under concurrent
/// invocation (no lost updates).
pub struct ClickProcessor {
    repository: Arc<dyn LinkRepository>,
}

impl ClickProcessor {
    /// Creates a new processor over the counter store.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl ClickHandler for ClickProcessor {
    async fn handle(&self, event: ClickEvent) -> Result<(), AppError> {
        let updated = self.repository.increment_clicks(&event.short_code).await?;

        if updated {
            debug!(code = %event.short_code, "click count incremented");
        } else {
            // The link was deleted after the event was published. Redelivery
            // could never succeed, so this counts as processed.
            debug!(code = %event.short_code, "click for unknown short code, dropping");
        }

        Ok(())
    }
}
