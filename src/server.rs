//! HTTP server initialization and runtime setup.
//!
//! Handles database connections, click producer setup, and Axum server lifecycle.

use crate::config::Config;
use crate::infrastructure::persistence::PgLinkRepository;
use crate::infrastructure::queue::{ClickPublisher, KafkaClickProducer, NullPublisher};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - Click producer (or NullPublisher fallback)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let clicks: Arc<dyn ClickPublisher> = match config.queue_config() {
        Some(queue_config) => match KafkaClickProducer::new(&queue_config) {
            Ok(producer) => {
                tracing::info!("Click publishing enabled");
                Arc::new(producer)
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to create click producer: {}. Using NullPublisher.",
                    e
                );
                Arc::new(NullPublisher::new())
            }
        },
        None => {
            tracing::info!("Click publishing disabled (KAFKA_BROKERS not set)");
            Arc::new(NullPublisher::new())
        }
    };

    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let state = AppState::new(repository, clicks, config.base_url.clone());

    let app = app_router(state);

    let addr: SocketAddr = config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app)).await?;

    Ok(())
}
