//! End-to-end properties of the click-tracking pipeline, exercised at the
//! handler boundary: what the consumer acks, nacks, and counts.

mod common;

use async_trait::async_trait;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use common::InMemoryLinkRepository;
use shortlink::application::services::ClickProcessor;
use shortlink::domain::click_event::{ClickEvent, ClickHandler};
use shortlink::domain::entities::{Link, NewLink};
use shortlink::domain::repositories::{LinkRepository, LinkStats};
use shortlink::error::AppError;

/// Counter store that fails the first `failures` increments, then recovers.
///
/// Models the transient store errors that make the consumer nack and the
/// broker redeliver.
struct FlakyRepository {
    inner: InMemoryLinkRepository,
    failures: AtomicUsize,
}

impl FlakyRepository {
    fn new(inner: InMemoryLinkRepository, failures: usize) -> Self {
        Self {
            inner,
            failures: AtomicUsize::new(failures),
        }
    }
}

#[async_trait]
impl LinkRepository for FlakyRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.inner.create(new_link).await
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        self.inner.find_by_code(short_code).await
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError> {
        if self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
        {
            return Err(AppError::internal(
                "Database error",
                serde_json::json!({}),
            ));
        }

        self.inner.increment_clicks(short_code).await
    }

    async fn stats(&self, short_code: &str) -> Result<Option<LinkStats>, AppError> {
        self.inner.stats(short_code).await
    }

    async fn health_check(&self) -> bool {
        self.inner.health_check().await
    }
}

#[tokio::test]
async fn test_single_event_increments_once() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("abc1234", "https://example.com");

    let processor = ClickProcessor::new(repository.clone());

    processor.handle(ClickEvent::new("abc1234")).await.unwrap();

    assert_eq!(repository.click_count("abc1234"), Some(1));
}

#[tokio::test]
async fn test_redelivery_is_not_deduplicated() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("abc1234", "https://example.com");

    let processor = ClickProcessor::new(repository.clone());

    // Broker redelivery of the same event n times increments by n, not 1.
    for _ in 0..5 {
        processor.handle(ClickEvent::new("abc1234")).await.unwrap();
    }

    assert_eq!(repository.click_count("abc1234"), Some(5));
}

#[tokio::test]
async fn test_failed_update_changes_nothing_until_redelivery() {
    let inner = InMemoryLinkRepository::new();
    inner.seed("abc1234", "https://example.com");
    let repository = Arc::new(FlakyRepository::new(inner, 2));

    let processor = ClickProcessor::new(repository.clone());

    // Two failed deliveries: the handler errors (the consumer nacks) and
    // the stored count must not move.
    for _ in 0..2 {
        let result = processor.handle(ClickEvent::new("abc1234")).await;
        assert!(result.is_err());

        let stats = repository.stats("abc1234").await.unwrap().unwrap();
        assert_eq!(stats.click_count, 0);
    }

    // The broker redelivers the same message; the store has recovered.
    processor.handle(ClickEvent::new("abc1234")).await.unwrap();

    let stats = repository.stats("abc1234").await.unwrap().unwrap();
    assert_eq!(stats.click_count, 1);
}

#[tokio::test]
async fn test_concurrent_deliveries_lose_no_updates() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("abc1234", "https://example.com");

    let processor = Arc::new(ClickProcessor::new(repository.clone()));

    const DELIVERIES: usize = 50;

    let mut tasks = Vec::with_capacity(DELIVERIES);
    for _ in 0..DELIVERIES {
        let processor = processor.clone();
        tasks.push(tokio::spawn(async move {
            processor.handle(ClickEvent::new("abc1234")).await
        }));
    }

    for task in tasks {
        task.await.unwrap().unwrap();
    }

    assert_eq!(repository.click_count("abc1234"), Some(DELIVERIES as i64));
}

#[tokio::test]
async fn test_click_for_deleted_link_is_processed() {
    let repository = Arc::new(InMemoryLinkRepository::new());

    let processor = ClickProcessor::new(repository.clone());

    // The row is gone; the event must be treated as processed (acked),
    // otherwise it would redeliver forever.
    let result = processor.handle(ClickEvent::new("gone9999")).await;

    assert!(result.is_ok());
    assert_eq!(repository.click_count("gone9999"), None);
}

#[tokio::test]
async fn test_counts_are_independent_per_code() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("first12", "https://example.com/a");
    repository.seed("second3", "https://example.com/b");

    let processor = ClickProcessor::new(repository.clone());

    processor.handle(ClickEvent::new("first12")).await.unwrap();
    processor.handle(ClickEvent::new("first12")).await.unwrap();
    processor.handle(ClickEvent::new("second3")).await.unwrap();

    assert_eq!(repository.click_count("first12"), Some(2));
    assert_eq!(repository.click_count("second3"), Some(1));
}
