//! Test utilities for integration tests
use std::time::Duration;

use mockito::{Mock, ServerGuard};

use domainbot::ai::chat::{Chat, Domain, Model};

/// Starts a fake generation endpoint that answers every request with
/// `body`.
pub async fn fake_endpoint(body: &str) -> (ServerGuard, Mock) {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/api/generate")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(body)
        .expect_at_least(1)
        .create_async()
        .await;
    (server, mock)
}

/// Creates a chat that is already locked into `model` and `domain`.
pub fn test_chat(api_hostname: &str, model: Model, domain: Domain) -> Chat {
    let mut chat = Chat::builder(api_hostname)
        .model(model)
        .domain(domain)
        .timeout(Duration::from_secs(5))
        .build();
    chat.session.lock();
    chat
}
