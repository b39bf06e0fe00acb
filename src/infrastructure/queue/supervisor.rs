//! Self-healing connection supervision for the click consumer.
//!
//! State machine: `DISCONNECTED → CONNECTING → SUBSCRIBED → (on drop)
//! DISCONNECTED`. The loop never reaches a terminal failure on its own;
//! hard restart policy belongs to the external process manager.

use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use super::consumer::ClickConsumer;
use crate::config::QueueConfig;
use crate::domain::click_event::ClickHandler;

/// Delay between reconnection attempts after a connection-level failure.
pub const RECONNECT_DELAY: Duration = Duration::from_secs(5);

/// Runs the click consumer, reconnecting forever on connection-level errors.
///
/// Each iteration performs the full connect-and-subscribe sequence and then
/// consumes until the connection drops. Failures are logged and retried
/// after [`RECONNECT_DELAY`]; messages that were delivered but not
/// acknowledged before a drop are redelivered on the next subscription.
pub async fn run_supervised(config: QueueConfig, handler: Arc<dyn ClickHandler>) {
    loop {
        match ClickConsumer::connect(&config) {
            Ok(consumer) => {
                info!(
                    topic = %config.topic,
                    group = %config.group_id,
                    "subscribed to click events"
                );

                if let Err(e) = consumer.run(handler.as_ref()).await {
                    error!(error = %e, "click consumer stopped");
                }
            }
            Err(e) => {
                error!(error = %e, "failed to connect to event channel");
            }
        }

        info!(
            delay_secs = RECONNECT_DELAY.as_secs(),
            "retrying connect-and-subscribe"
        );
        tokio::time::sleep(RECONNECT_DELAY).await;
    }
}
