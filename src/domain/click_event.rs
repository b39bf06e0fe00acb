//! Click event model for asynchronous click tracking.

use crate::error::AppError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A click on a short link, carried through the event channel.
///
/// Serialized as UTF-8 JSON `{"shortCode": "<string>"}` — the sole message
/// payload. The event deliberately carries no sequence number or timestamp:
/// the counter increment is commutative, so the pipeline is correct under
/// reordering, and duplication only over-counts.
///
/// # Usage Flow
///
/// 1. Created in the redirect handler after the code resolves
/// 2. Published to the click topic (fire-and-forget)
/// 3. Consumed by the analytics process
/// 4. Applied as an atomic increment via
///    [`crate::domain::repositories::LinkRepository::increment_clicks`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClickEvent {
    pub short_code: String,
}

impl ClickEvent {
    /// Creates a click event for a short code.
    pub fn new(short_code: impl Into<String>) -> Self {
        Self {
            short_code: short_code.into(),
        }
    }
}

/// Contract for processing a delivered click event.
///
/// The consumer acknowledges the message only when `handle` returns `Ok`;
/// an `Err` negatively acknowledges it, and the channel redelivers. The
/// handler must therefore be safe to invoke again for the same event, and
/// safe to invoke concurrently for different deliveries.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickHandler: Send + Sync {
    /// Applies one click event to the counter store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] when the store update fails; the
    /// caller is expected to requeue the message.
    async fn handle(&self, event: ClickEvent) -> Result<(), AppError>;
}
