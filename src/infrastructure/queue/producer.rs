//! Kafka producer for click events.

use async_trait::async_trait;
use rdkafka::config::ClientConfig;
use rdkafka::producer::{FutureProducer, FutureRecord, Producer};
use rdkafka::util::Timeout;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::publisher::{ClickPublisher, QueueError};
use crate::config::QueueConfig;
use crate::domain::click_event::ClickEvent;

/// How long a single send may wait for broker acknowledgment.
const SEND_TIMEOUT: Duration = Duration::from_secs(5);

/// How long to wait for queued messages when the producer shuts down.
const FLUSH_TIMEOUT: Duration = Duration::from_secs(5);

/// Kafka-backed click event producer.
///
/// Owns its own broker connection, distinct from the consumer's. Messages
/// are keyed by short code and written with `acks=all` so an acknowledged
/// event survives broker restart.
pub struct KafkaClickProducer {
    producer: FutureProducer,
    topic: String,
}

impl KafkaClickProducer {
    /// Creates a new producer from event channel settings.
    ///
    /// Creation does not contact the broker; the underlying client connects
    /// lazily and retries internally, so a broker outage at startup does not
    /// fail the HTTP service.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::Creation`] if the client configuration is
    /// rejected.
    pub fn new(config: &QueueConfig) -> Result<Self, QueueError> {
        let producer: FutureProducer = ClientConfig::new()
            .set("bootstrap.servers", &config.brokers)
            .set("message.timeout.ms", "5000")
            .set("acks", "all")
            .create()
            .map_err(|e| QueueError::Creation(e.to_string()))?;

        info!(
            brokers = %config.brokers,
            topic = %config.topic,
            "click event producer created"
        );

        Ok(Self {
            producer,
            topic: config.topic.clone(),
        })
    }
}

#[async_trait]
impl ClickPublisher for KafkaClickProducer {
    async fn publish(&self, short_code: &str) -> Result<(), QueueError> {
        let payload = serde_json::to_vec(&ClickEvent::new(short_code))
            .map_err(|e| QueueError::Serialization(e.to_string()))?;

        let record = FutureRecord::to(&self.topic)
            .key(short_code)
            .payload(&payload);

        let (partition, offset) = self
            .producer
            .send(record, Timeout::After(SEND_TIMEOUT))
            .await
            .map_err(|(e, _)| QueueError::Publish {
                topic: self.topic.clone(),
                message: e.to_string(),
            })?;

        debug!(
            code = %short_code,
            partition,
            offset,
            "click event published"
        );

        Ok(())
    }

    fn in_flight(&self) -> usize {
        self.producer.in_flight_count() as usize
    }
}

impl Drop for KafkaClickProducer {
    fn drop(&mut self) {
        if let Err(e) = self.producer.flush(Timeout::After(FLUSH_TIMEOUT)) {
            warn!(error = %e, "failed to flush click producer on shutdown");
        }
    }
}
