//! Analytics consumer process.
//!
//! Long-lived companion to the `shortlink` HTTP service: consumes click
//! events from the durable topic and applies each one as an atomic counter
//! increment. Connection failures are retried forever by the supervisor;
//! stop the process with Ctrl+C or the process manager.

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use shortlink::application::services::ClickProcessor;
use shortlink::config::{self, Config};
use shortlink::domain::click_event::ClickHandler;
use shortlink::infrastructure::persistence::PgLinkRepository;
use shortlink::infrastructure::queue::run_supervised;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let config = config::load_from_env()?;
    init_tracing(&config);

    let queue_config = config
        .queue_config()
        .context("KAFKA_BROKERS must be set for the analytics consumer")?;

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(&config.database_url)
        .await?;
    tracing::info!("Connected to database");

    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let handler: Arc<dyn ClickHandler> = Arc::new(ClickProcessor::new(repository));

    tracing::info!("Analytics consumer starting");

    tokio::select! {
        _ = run_supervised(queue_config, handler) => {}
        _ = tokio::signal::ctrl_c() => {
            // Unacknowledged in-flight events are redelivered on the next
            // start; at-least-once semantics make this safe.
            tracing::info!("Shutting down analytics consumer");
        }
    }

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    if config.log_format == "json" {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}
