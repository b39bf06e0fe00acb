//! Click statistics service.

use std::sync::Arc;

use crate::domain::repositories::{LinkRepository, LinkStats};
use crate::error::AppError;
use serde_json::json;

/// Service for retrieving per-link click analytics.
///
/// The only analytics state is the running counter maintained by the
/// click pipeline; there are no per-click records to page through.
pub struct StatsService {
    repository: Arc<dyn LinkRepository>,
}

impl StatsService {
    /// Creates a new statistics service.
    pub fn new(repository: Arc<dyn LinkRepository>) -> Self {
        Self { repository }
    }

    /// Retrieves the original URL and click count for a short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the code does not exist.
    /// Returns [`AppError::Internal`] on database errors.
    pub async fn get_stats(&self, short_code: &str) -> Result<LinkStats, AppError> {
        self.repository
            .stats(short_code)
            .await?
            .ok_or_else(|| AppError::not_found("Unknown code", json!({ "code": short_code })))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockLinkRepository;

    #[tokio::test]
    async fn test_get_stats_returns_counter() {
        let mut repo = MockLinkRepository::new();
        repo.expect_stats()
            .withf(|code| code == "abc1234")
            .returning(|_| {
                Ok(Some(LinkStats {
                    short_code: "abc1234".to_string(),
                    original_url: "https://example.com".to_string(),
                    click_count: 3,
                }))
            });

        let stats = StatsService::new(Arc::new(repo))
            .get_stats("abc1234")
            .await
            .unwrap();

        assert_eq!(stats.click_count, 3);
        assert_eq!(stats.original_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_get_stats_unknown_code() {
        let mut repo = MockLinkRepository::new();
        repo.expect_stats().returning(|_| Ok(None));

        let result = StatsService::new(Arc::new(repo)).get_stats("missing1").await;

        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
