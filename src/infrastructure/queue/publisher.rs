//! Click publisher trait and queue error types.

use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur while talking to the event channel.
#[derive(Debug, Error)]
pub enum QueueError {
    #[error("Failed to create queue client: {0}")]
    Creation(String),

    #[error("Failed to subscribe to topic {topic}: {message}")]
    Subscription { topic: String, message: String },

    #[error("Failed to publish to topic {topic}: {message}")]
    Publish { topic: String, message: String },

    #[error("Failed to serialize click event: {0}")]
    Serialization(String),

    #[error("Queue receive error: {0}")]
    Receive(String),

    #[error("Failed to requeue message at offset {offset}: {message}")]
    Requeue { offset: i64, message: String },
}

/// Trait for publishing click events to the durable event channel.
///
/// Publishing is best-effort from the caller's point of view: the redirect
/// handler spawns the publish and never awaits the durability guarantee
/// before responding. Implementations must be thread-safe.
///
/// # Implementations
///
/// - [`crate::infrastructure::queue::KafkaClickProducer`] - Kafka-backed producer
/// - [`crate::infrastructure::queue::NullPublisher`] - No-op when no brokers are configured
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ClickPublisher: Send + Sync {
    /// Publishes one click event for a short code.
    ///
    /// The event is marked for durable storage on the broker; the returned
    /// future resolves once the broker acknowledges the write (or the send
    /// times out).
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Publish`] when the broker rejects or times out
    /// the send. Callers on the redirect path log and discard the error.
    async fn publish(&self, short_code: &str) -> Result<(), QueueError>;

    /// Number of messages queued client-side and not yet acknowledged by
    /// the broker.
    ///
    /// Used by the health check endpoint.
    fn in_flight(&self) -> usize;
}
