//! External fact sources.
//!
//! Each configured source is a GET endpoint (optionally authenticated with
//! a keyed header) whose JSON response carries the fact text in a declared
//! field. Responses may be a single object or a list; a list contributes
//! its first element.

pub mod extras;

use reqwest::Client;
use serde_json::Value;
use std::time::Duration;
use tokio::time::timeout;

use crate::config::SourceConfig;
use crate::constants::http;
use crate::errors::SourceFetchError;

/// A fact with its recorded origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fact {
    pub text: String,
    /// Identifier of the origin, the source URL
    pub source: String,
}

/// HTTP client for the external fact/quote/trend APIs.
pub struct SourceClient {
    client: Client,
    request_timeout: Duration,
}

impl Default for SourceClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SourceClient {
    pub fn new() -> Self {
        let client = Client::builder()
            .connect_timeout(http::CONNECT_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client for SourceClient");

        Self {
            client,
            request_timeout: http::REQUEST_TIMEOUT,
        }
    }

    /// Fetch one candidate fact from the given source.
    pub async fn fetch_fact(&self, source: &SourceConfig) -> Result<Fact, SourceFetchError> {
        let mut request = self.client.get(&source.url);
        if let Some(header) = &source.header {
            request = request.header(&header.name, &header.value);
        }

        let response = timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| SourceFetchError::Timeout {
                url: source.url.clone(),
            })?
            .map_err(|e| SourceFetchError::RequestFailed {
                url: source.url.clone(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SourceFetchError::Status {
                url: source.url.clone(),
                status: response.status().as_u16(),
            });
        }

        let payload: Value =
            response
                .json()
                .await
                .map_err(|e| SourceFetchError::MalformedResponse {
                    url: source.url.clone(),
                    reason: e.to_string(),
                })?;

        let text = extract_field(&payload, &source.field_name).ok_or_else(|| {
            SourceFetchError::MalformedResponse {
                url: source.url.clone(),
                reason: format!("field '{}' not found", source.field_name),
            }
        })?;

        Ok(Fact {
            text,
            source: source.url.clone(),
        })
    }

    pub(crate) async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        url: &str,
        bearer_token: Option<&str>,
    ) -> Result<T, SourceFetchError> {
        let mut request = self.client.get(url);
        if let Some(token) = bearer_token {
            request = request.bearer_auth(token);
        }

        let response = timeout(self.request_timeout, request.send())
            .await
            .map_err(|_| SourceFetchError::Timeout {
                url: url.to_string(),
            })?
            .map_err(|e| SourceFetchError::RequestFailed {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        if !response.status().is_success() {
            return Err(SourceFetchError::Status {
                url: url.to_string(),
                status: response.status().as_u16(),
            });
        }

        response
            .json()
            .await
            .map_err(|e| SourceFetchError::MalformedResponse {
                url: url.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Pull the fact text out of an object or list payload. Lists contribute
/// their first element.
fn extract_field(payload: &Value, field_name: &str) -> Option<String> {
    let object = match payload {
        Value::Array(items) => items.first()?,
        other => other,
    };
    object
        .get(field_name)?
        .as_str()
        .map(|text| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_extract_from_object() {
        let payload = json!({ "text": "Bees have 5 eyes", "language": "en" });
        assert_eq!(
            extract_field(&payload, "text"),
            Some("Bees have 5 eyes".to_string())
        );
    }

    #[test]
    fn test_extract_from_list_uses_first_element() {
        let payload = json!([{ "fact": "first" }, { "fact": "second" }]);
        assert_eq!(extract_field(&payload, "fact"), Some("first".to_string()));
    }

    #[test]
    fn test_extract_missing_field() {
        let payload = json!({ "text": "hi" });
        assert_eq!(extract_field(&payload, "fact"), None);
    }

    #[test]
    fn test_extract_empty_list() {
        let payload = json!([]);
        assert_eq!(extract_field(&payload, "fact"), None);
    }

    #[test]
    fn test_extract_non_string_field() {
        let payload = json!({ "fact": 42 });
        assert_eq!(extract_field(&payload, "fact"), None);
    }
}
