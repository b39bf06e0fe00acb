//! Link creation and retrieval service.

use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_norm::normalize_url;
use serde_json::json;

/// Service for creating and resolving shortened links.
///
/// Handles URL normalization and code generation with collision retry.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    base_url: String,
}

impl LinkService {
    /// Creates a new link service.
    ///
    /// `base_url` is the public address of this service, used when
    /// composing the full short URL in responses.
    pub fn new(repository: Arc<dyn LinkRepository>, base_url: String) -> Self {
        Self {
            repository,
            base_url,
        }
    }

    /// Creates a short link for a long URL.
    ///
    /// # Code Generation
    ///
    /// Generates a random 7-character code; on the (negligible-probability)
    /// unique-constraint collision, retries with a fresh code up to 10
    /// times before failing.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the URL is malformed or uses a
    /// scheme other than http/https.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn create_short_link(&self, long_url: String) -> Result<Link, AppError> {
        let normalized_url = normalize_url(&long_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        const MAX_ATTEMPTS: usize = 10;

        for attempt in 0..MAX_ATTEMPTS {
            let new_link = NewLink {
                short_code: generate_code(),
                original_url: normalized_url.clone(),
            };

            match self.repository.create(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::Conflict { .. }) if attempt + 1 < MAX_ATTEMPTS => {
                    tracing::debug!(attempt, "short code collision, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate a unique short code",
            json!({ "attempts": MAX_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link matches the code.
    pub async fn resolve(&self, short_code: &str) -> Result<Link, AppError> {
        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown code", json!({ "code": short_code })))
    }

    /// Constructs the full short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), short_code)
    }

    /// Checks if the underlying store is reachable.
    pub async fn health_check(&self) -> bool {
        self.repository.health_check().await
    }
}
