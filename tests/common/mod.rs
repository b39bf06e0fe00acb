#![allow(dead_code)]

use async_trait::async_trait;
use axum::Router;
use axum::routing::{get, post};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use shortlink::api::handlers::{
    health_handler, redirect_handler, shorten_handler, stats_handler,
};
use shortlink::domain::entities::{Link, NewLink};
use shortlink::domain::repositories::{LinkRepository, LinkStats};
use shortlink::error::AppError;
use shortlink::infrastructure::queue::{ClickPublisher, QueueError};
use shortlink::state::AppState;

/// In-memory counter store used instead of a live Postgres instance.
///
/// The increment mirrors the production repository's contract: a single
/// indivisible update with no read step, returning whether a row matched.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<HashMap<String, Link>>,
}

impl InMemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a link directly, bypassing code generation.
    pub fn seed(&self, short_code: &str, original_url: &str) {
        let mut links = self.links.lock().unwrap();
        let id = links.len() as i64 + 1;
        links.insert(
            short_code.to_string(),
            Link::new(
                id,
                short_code.to_string(),
                original_url.to_string(),
                0,
                Utc::now(),
            ),
        );
    }

    pub fn click_count(&self, short_code: &str) -> Option<i64> {
        self.links
            .lock()
            .unwrap()
            .get(short_code)
            .map(|link| link.click_count)
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut links = self.links.lock().unwrap();

        if links.contains_key(&new_link.short_code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                serde_json::json!({ "code": new_link.short_code }),
            ));
        }

        let id = links.len() as i64 + 1;
        let link = Link::new(
            id,
            new_link.short_code.clone(),
            new_link.original_url,
            0,
            Utc::now(),
        );
        links.insert(new_link.short_code, link.clone());

        Ok(link)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<Link>, AppError> {
        Ok(self.links.lock().unwrap().get(short_code).cloned())
    }

    async fn increment_clicks(&self, short_code: &str) -> Result<bool, AppError> {
        let mut links = self.links.lock().unwrap();

        match links.get_mut(short_code) {
            Some(link) => {
                link.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn stats(&self, short_code: &str) -> Result<Option<LinkStats>, AppError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .get(short_code)
            .map(|link| LinkStats {
                short_code: link.short_code.clone(),
                original_url: link.original_url.clone(),
                click_count: link.click_count,
            }))
    }

    async fn health_check(&self) -> bool {
        true
    }
}

/// Publisher that records every published short code.
#[derive(Default)]
pub struct RecordingPublisher {
    events: Mutex<Vec<String>>,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn published(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }
}

#[async_trait]
impl ClickPublisher for RecordingPublisher {
    async fn publish(&self, short_code: &str) -> Result<(), QueueError> {
        self.events.lock().unwrap().push(short_code.to_string());
        Ok(())
    }

    fn in_flight(&self) -> usize {
        0
    }
}

/// Publisher that always fails, simulating an unreachable broker.
pub struct FailingPublisher;

#[async_trait]
impl ClickPublisher for FailingPublisher {
    async fn publish(&self, _short_code: &str) -> Result<(), QueueError> {
        Err(QueueError::Publish {
            topic: "url-clicks".to_string(),
            message: "broker unavailable".to_string(),
        })
    }

    fn in_flight(&self) -> usize {
        0
    }
}

/// Publisher whose publish future never completes.
///
/// Used to verify the redirect response does not wait on the broker.
pub struct PendingPublisher;

#[async_trait]
impl ClickPublisher for PendingPublisher {
    async fn publish(&self, _short_code: &str) -> Result<(), QueueError> {
        std::future::pending().await
    }

    fn in_flight(&self) -> usize {
        0
    }
}

pub fn create_test_state(
    repository: Arc<InMemoryLinkRepository>,
    clicks: Arc<dyn ClickPublisher>,
) -> AppState {
    AppState::new(repository, clicks, "http://localhost:3000".to_string())
}

pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/analytics/{code}", get(stats_handler))
        .route("/health", get(health_handler))
        .route("/{code}", get(redirect_handler))
        .with_state(state)
}
