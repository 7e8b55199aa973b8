//! Mock Slack API server for testing message delivery.
//!
//! Simulates the Web API endpoints the jobs call, capturing request bodies
//! so tests can verify what was posted where.

use serde_json::Value;
use std::sync::{Arc, Mutex};
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

/// Captured Slack API call
#[derive(Debug, Clone)]
pub struct SlackCall {
    pub endpoint: String,
    pub body: Value,
}

pub struct MockSlackServer {
    pub server: MockServer,
    captured: Arc<Mutex<Vec<SlackCall>>>,
}

impl MockSlackServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let captured = Arc::new(Mutex::new(Vec::new()));

        Self { server, captured }
    }

    /// Base URL to hand to `SlackClient::with_base_url`.
    pub fn base_url(&self) -> String {
        self.server.uri()
    }

    /// Accept `chat.postMessage` calls and capture their bodies.
    pub async fn mock_post_message_ok(&self) {
        self.mock_ok("chat.postMessage").await;
    }

    /// Accept `admin.conversations.delete` calls and capture their bodies.
    pub async fn mock_delete_channel_ok(&self) {
        self.mock_ok("admin.conversations.delete").await;
    }

    /// Fail `chat.postMessage` with an HTTP status.
    pub async fn mock_post_message_failure(&self, status_code: u16) {
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(ResponseTemplate::new(status_code))
            .mount(&self.server)
            .await;
    }

    /// Accept the HTTP request but report a Slack API error.
    pub async fn mock_post_message_api_error(&self, error: &str) {
        Mock::given(method("POST"))
            .and(path("/chat.postMessage"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(serde_json::json!({ "ok": false, "error": error })),
            )
            .mount(&self.server)
            .await;
    }

    async fn mock_ok(&self, endpoint: &str) {
        let captured = self.captured.clone();
        let endpoint_name = endpoint.to_string();

        Mock::given(method("POST"))
            .and(path(format!("/{}", endpoint)))
            .respond_with(move |req: &Request| {
                if let Ok(body) = req.body_json::<Value>() {
                    captured.lock().unwrap().push(SlackCall {
                        endpoint: endpoint_name.clone(),
                        body,
                    });
                }
                ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true }))
            })
            .mount(&self.server)
            .await;
    }

    pub fn captured_calls(&self) -> Vec<SlackCall> {
        self.captured.lock().unwrap().clone()
    }

    pub fn request_count(&self) -> usize {
        self.captured.lock().unwrap().len()
    }

    /// True when some captured message body field contains the given text.
    pub fn posted_with(&self, field: &str, contains: &str) -> bool {
        self.captured_calls().iter().any(|call| {
            call.body
                .get(field)
                .map(|value| value.to_string().contains(contains))
                .unwrap_or(false)
        })
    }
}
