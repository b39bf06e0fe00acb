//! Kafka consumer for click events with per-message acknowledgment.
//!
//! The channel is consumed with manual offset management so that a message
//! is removed only after the counter update commits:
//!
//! - **ack** — commit the record's offset after the handler succeeds
//! - **nack** — leave the offset uncommitted and seek the partition back to
//!   the failed record, so the next poll redelivers it
//!
//! Redelivery is the sole retry mechanism; the handler runs no local retry
//! loop. At-least-once delivery means a click may be applied more than once
//! under failure, which only over-counts and never corrupts the counter.

use rdkafka::Offset;
use rdkafka::config::ClientConfig;
use rdkafka::consumer::{CommitMode, Consumer, StreamConsumer};
use rdkafka::message::{BorrowedMessage, Message};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, warn};

use super::publisher::QueueError;
use crate::config::QueueConfig;
use crate::domain::click_event::{ClickEvent, ClickHandler};

/// How long a seek-back (nack) may take before the consumer gives up and
/// reconnects.
const SEEK_TIMEOUT: Duration = Duration::from_secs(5);

/// What to do with a delivered message after processing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Disposition {
    /// Commit the offset; the message is permanently removed.
    Ack,
    /// Do not commit; seek back so the broker redelivers the message.
    Requeue,
}

/// Decides the fate of one delivered payload.
///
/// Malformed payloads are dropped (acked): redelivery can never repair
/// them, and requeueing one forever would wedge the partition behind it.
/// Handler failures requeue, since store errors are transient.
pub(crate) async fn disposition(payload: Option<&[u8]>, handler: &dyn ClickHandler) -> Disposition {
    let Some(bytes) = payload else {
        warn!("click message with empty payload, dropping");
        return Disposition::Ack;
    };

    let event: ClickEvent = match serde_json::from_slice(bytes) {
        Ok(event) => event,
        Err(e) => {
            warn!(error = %e, "failed to decode click event, dropping");
            return Disposition::Ack;
        }
    };

    match handler.handle(event).await {
        Ok(()) => Disposition::Ack,
        Err(e) => {
            warn!(error = %e, "click handler failed, requeueing for redelivery");
            Disposition::Requeue
        }
    }
}

/// Subscribed Kafka consumer for the click topic.
///
/// One instance per analytics process; additional processes in the same
/// consumer group share partitions for horizontal scaling. The connection
/// is owned by the consumer and is not shared with the producer.
pub struct ClickConsumer {
    inner: StreamConsumer,
}

impl ClickConsumer {
    /// Connects to the brokers and subscribes to the click topic.
    ///
    /// Auto-commit is disabled; offsets are committed per message after
    /// the handler succeeds.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Creation`] or [`QueueError::Subscription`] on
    /// connection-level failures; the supervisor retries these.
    pub fn connect(config: &QueueConfig) -> Result<Self, QueueError> {
        let inner: StreamConsumer = ClientConfig::new()
            .set("group.id", &config.group_id)
            .set("bootstrap.servers", &config.brokers)
            .set("enable.auto.commit", "false")
            .set("auto.offset.reset", "earliest")
            .set("session.timeout.ms", "30000")
            .set("enable.partition.eof", "false")
            .create()
            .map_err(|e| QueueError::Creation(e.to_string()))?;

        inner
            .subscribe(&[&config.topic])
            .map_err(|e| QueueError::Subscription {
                topic: config.topic.clone(),
                message: e.to_string(),
            })?;

        Ok(Self { inner })
    }

    /// Consumes click events until a connection-level error occurs.
    ///
    /// Message-level failures never end the loop; they nack the individual
    /// message and continue. A returned error means the caller should tear
    /// down and reconnect — uncommitted messages are redelivered after the
    /// reconnect, which preserves at-least-once semantics.
    pub async fn run(&self, handler: &dyn ClickHandler) -> Result<(), QueueError> {
        loop {
            let msg = self
                .inner
                .recv()
                .await
                .map_err(|e| QueueError::Receive(e.to_string()))?;

            self.dispatch(&msg, handler).await?;
        }
    }

    async fn dispatch(
        &self,
        msg: &BorrowedMessage<'_>,
        handler: &dyn ClickHandler,
    ) -> Result<(), QueueError> {
        debug!(
            topic = msg.topic(),
            partition = msg.partition(),
            offset = msg.offset(),
            "received click message"
        );

        match disposition(msg.payload(), handler).await {
            Disposition::Ack => {
                if let Err(e) = self.inner.commit_message(msg, CommitMode::Async) {
                    // The store update already happened; losing the commit
                    // only risks a duplicate increment after restart.
                    warn!(error = %e, offset = msg.offset(), "failed to commit offset");
                }
                Ok(())
            }
            Disposition::Requeue => self
                .inner
                .seek(
                    msg.topic(),
                    msg.partition(),
                    Offset::Offset(msg.offset()),
                    Timeout::After(SEEK_TIMEOUT),
                )
                .map_err(|e| QueueError::Requeue {
                    offset: msg.offset(),
                    message: e.to_string(),
                }),
        }
    }
}
