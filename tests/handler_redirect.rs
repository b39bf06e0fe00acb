mod common;

use axum_test::TestServer;
use std::sync::Arc;
use std::time::Duration;

use common::{FailingPublisher, InMemoryLinkRepository, PendingPublisher, RecordingPublisher};
use shortlink::infrastructure::queue::ClickPublisher;

fn server(
    repository: Arc<InMemoryLinkRepository>,
    clicks: Arc<dyn ClickPublisher>,
) -> TestServer {
    let state = common::create_test_state(repository, clicks);
    TestServer::new(common::test_router(state)).unwrap()
}

#[tokio::test]
async fn test_redirect_success() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("target1x", "https://example.com/target");

    let server = server(repository, Arc::new(RecordingPublisher::new()));

    let response = server.get("/target1x").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/target");
}

#[tokio::test]
async fn test_redirect_not_found() {
    let server = server(
        Arc::new(InMemoryLinkRepository::new()),
        Arc::new(RecordingPublisher::new()),
    );

    let response = server.get("/missing1").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_publishes_click_event() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("clickme1", "https://example.com");

    let clicks = Arc::new(RecordingPublisher::new());
    let server = server(repository, clicks.clone());

    let response = server.get("/clickme1").await;
    assert_eq!(response.status_code(), 302);

    // The publish is detached from the response; give it a moment.
    tokio::time::timeout(Duration::from_secs(1), async {
        while clicks.published().is_empty() {
            tokio::task::yield_now().await;
        }
    })
    .await
    .expect("click event was never published");

    assert_eq!(clicks.published(), vec!["clickme1".to_string()]);
}

#[tokio::test]
async fn test_redirect_survives_publish_failure() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("clicked2", "https://example.com/page");

    let server = server(repository, Arc::new(FailingPublisher));

    // An unreachable broker must never surface on the redirect path.
    let response = server.get("/clicked2").await;

    assert_eq!(response.status_code(), 302);
    assert_eq!(response.header("location"), "https://example.com/page");
}

#[tokio::test]
async fn test_redirect_does_not_wait_for_broker() {
    let repository = Arc::new(InMemoryLinkRepository::new());
    repository.seed("slowpub1", "https://example.com");

    let server = server(repository, Arc::new(PendingPublisher));

    // The publish future never resolves; the response must anyway.
    let response = tokio::time::timeout(Duration::from_secs(5), server.get("/slowpub1"))
        .await
        .expect("redirect blocked on click publishing");

    assert_eq!(response.status_code(), 302);
}

#[tokio::test]
async fn test_redirect_unknown_code_publishes_nothing() {
    let clicks = Arc::new(RecordingPublisher::new());
    let server = server(Arc::new(InMemoryLinkRepository::new()), clicks.clone());

    server.get("/missing1").await;

    assert!(clicks.published().is_empty());
}
