//! Claude messages API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use boardroom_core::error::{BoardroomError, Result};

const ANTHROPIC_VERSION: &str = "2023-06-01";

/// One conversation turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            content: content.into(),
        }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new("system", content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new("user", content)
    }
}

/// Body of a messages API request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompletionRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system: Option<String>,
}

/// Status and JSON body returned by the upstream, success or not.
#[derive(Debug, Clone, PartialEq)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// The external completion API.
#[async_trait]
pub trait CompletionUpstream: Send + Sync {
    /// Sends one request.
    ///
    /// Non-success statuses are returned as responses. Errors mean the call
    /// itself failed (transport, or a body that is not JSON).
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<UpstreamResponse>;
}

/// [`CompletionUpstream`] over HTTPS with reqwest.
#[derive(Clone)]
pub struct ClaudeHttpUpstream {
    client: Client,
    url: String,
}

impl ClaudeHttpUpstream {
    /// Creates a client for `url`. No timeout is applied when `timeout` is
    /// `None`.
    pub fn new(url: impl Into<String>, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| BoardroomError::config(format!("Failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl CompletionUpstream for ClaudeHttpUpstream {
    async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<UpstreamResponse> {
        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| BoardroomError::internal(format!("Claude API request failed: {err}")))?;

        let status = response.status().as_u16();
        let body: serde_json::Value = response.json().await.map_err(|err| {
            BoardroomError::internal(format!("Failed to parse Claude response: {err}"))
        })?;

        if !(200..300).contains(&status) {
            tracing::warn!("[ClaudeHttpUpstream] Claude API returned {}: {}", status, body);
        }

        Ok(UpstreamResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_omits_empty_system() {
        let request = CompletionRequest {
            model: "m".to_string(),
            max_tokens: 10,
            messages: vec![ChatMessage::user("hi")],
            system: None,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert!(value.get("system").is_none());
        assert_eq!(value["messages"][0]["role"], "user");
    }
}
