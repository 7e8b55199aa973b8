//! Slack Web API client (the notification sink).
//!
//! No retry and no batching: a failed post is reported to the caller, which
//! logs it and moves on. The base URL is injectable so tests can point the
//! client at a mock server.

pub mod blocks;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::constants::{defaults, http};
use crate::errors::DeliveryError;
use blocks::Block;

#[derive(Debug, Deserialize)]
struct ApiResponse {
    ok: bool,
    error: Option<String>,
}

pub struct SlackClient {
    base_url: String,
    token: String,
    client: Client,
}

impl SlackClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, defaults::SLACK_API_BASE.to_string())
    }

    pub fn with_base_url(token: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(http::SLACK_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client for SlackClient");

        Self {
            base_url,
            token,
            client,
        }
    }

    /// Post a Block Kit message to a channel.
    pub async fn post_message(&self, channel: &str, blocks: &[Block]) -> Result<(), DeliveryError> {
        self.call(
            "chat.postMessage",
            &serde_json::json!({ "channel": channel, "blocks": blocks }),
        )
        .await
    }

    /// Post a plain text message to a channel.
    pub async fn post_text(&self, channel: &str, text: &str) -> Result<(), DeliveryError> {
        self.call(
            "chat.postMessage",
            &serde_json::json!({ "channel": channel, "text": text }),
        )
        .await
    }

    /// Delete a channel via the admin API.
    pub async fn delete_channel(&self, channel_id: &str) -> Result<(), DeliveryError> {
        self.call(
            "admin.conversations.delete",
            &serde_json::json!({ "channel": channel_id }),
        )
        .await
    }

    async fn call(&self, method: &str, payload: &serde_json::Value) -> Result<(), DeliveryError> {
        let url = format!("{}/{}", self.base_url, method);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(payload)
            .send()
            .await
            .map_err(|e| DeliveryError::RequestFailed {
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(DeliveryError::Status {
                status: response.status().as_u16(),
            });
        }

        let api: ApiResponse =
            response
                .json()
                .await
                .map_err(|e| DeliveryError::RequestFailed {
                    reason: format!("invalid response body: {}", e),
                })?;

        if !api.ok {
            return Err(DeliveryError::Api {
                error: api.error.unwrap_or_else(|| "unknown error".to_string()),
            });
        }

        debug!("Slack {} accepted", method);
        Ok(())
    }
}
