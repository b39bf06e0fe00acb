//! No-op publisher for when the event channel is not configured.

use async_trait::async_trait;
use tracing::debug;

use super::publisher::{ClickPublisher, QueueError};

/// A publisher that drops every click event.
///
/// Used when `KAFKA_BROKERS` is unset or producer creation fails at
/// startup. Redirects keep working; clicks simply are not counted.
///
/// # Use Cases
///
/// - Development environments without a broker
/// - Testing scenarios where click tracking should be bypassed
/// - Fallback when producer creation fails at startup
pub struct NullPublisher;

impl NullPublisher {
    /// Creates a new NullPublisher instance.
    pub fn new() -> Self {
        debug!("Using NullPublisher (click publishing disabled)");
        Self
    }
}

impl Default for NullPublisher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ClickPublisher for NullPublisher {
    async fn publish(&self, short_code: &str) -> Result<(), QueueError> {
        debug!(code = %short_code, "click event dropped (publishing disabled)");
        Ok(())
    }

    fn in_flight(&self) -> usize {
        0
    }
}
