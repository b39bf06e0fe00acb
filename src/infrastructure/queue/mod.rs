//! Durable event channel integration for click tracking.
//!
//! The producer and consumer sides of the click pipeline. Each side owns
//! its own broker connection: the HTTP service holds a producer, the
//! analytics process holds a supervised consumer.

pub mod consumer;
pub mod null_publisher;
pub mod producer;
pub mod publisher;
pub mod supervisor;

pub use consumer::ClickConsumer;
pub use null_publisher::NullPublisher;
pub use producer::KafkaClickProducer;
pub use publisher::{ClickPublisher, QueueError};
pub use supervisor::run_supervised;
