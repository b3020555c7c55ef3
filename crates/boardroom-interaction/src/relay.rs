//! Stateless chat relay.
//!
//! Forwards a conversation to the completion API on behalf of a client and
//! normalizes the outcome into an HTTP-style status and JSON body:
//!
//! | Situation                         | Status            | Body                                   |
//! |-----------------------------------|-------------------|----------------------------------------|
//! | No credential anywhere            | 400               | `{"error": "API key is not configured"}` |
//! | Upstream success                  | 200               | upstream body                          |
//! | Upstream failure                  | upstream status   | upstream body                          |
//! | Transport or parse failure        | 500               | `{"error": "Internal server error", "message": ...}` |

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::json;

use boardroom_core::config::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, RelayConfig};

use crate::upstream::{ChatMessage, CompletionRequest, CompletionUpstream};

/// Request accepted by the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub messages: Vec<ChatMessage>,
    /// Client-supplied key, used only when the server has none.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

/// Status and JSON body to return to the client.
#[derive(Debug, Clone, PartialEq)]
pub struct RelayResponse {
    pub status: u16,
    pub body: serde_json::Value,
}

impl RelayResponse {
    fn error(status: u16, body: serde_json::Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

pub struct ChatRelay {
    upstream: Arc<dyn CompletionUpstream>,
    model: String,
    max_tokens: u32,
    server_api_key: Option<String>,
}

impl ChatRelay {
    pub fn new(upstream: Arc<dyn CompletionUpstream>) -> Self {
        Self {
            upstream,
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            server_api_key: None,
        }
    }

    /// Applies model and token settings from the `[relay]` section.
    pub fn with_config(mut self, config: &RelayConfig) -> Self {
        self.model = config.model.clone();
        self.max_tokens = config.max_tokens;
        self
    }

    /// Sets the server-side key. It takes precedence over client keys.
    pub fn with_server_api_key(mut self, api_key: Option<String>) -> Self {
        self.server_api_key = api_key.filter(|key| !key.trim().is_empty());
        self
    }

    pub fn has_server_api_key(&self) -> bool {
        self.server_api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Splits a leading system message off into the `system` field.
    pub fn build_request(&self, mut messages: Vec<ChatMessage>) -> CompletionRequest {
        let system = match messages.first() {
            Some(first) if first.role == "system" => Some(messages.remove(0).content),
            _ => None,
        };

        CompletionRequest {
            model: self.model.clone(),
            max_tokens: self.max_tokens,
            messages,
            system: system.filter(|s| !s.is_empty()),
        }
    }

    /// Relays one conversation. Exactly one upstream call is made when a
    /// credential is available, none otherwise.
    pub async fn handle(&self, request: RelayRequest) -> RelayResponse {
        let client_key = request.api_key.filter(|key| !key.trim().is_empty());
        let Some(api_key) = self.server_api_key.clone().or(client_key) else {
            return RelayResponse::error(400, json!({ "error": "API key is not configured" }));
        };

        let completion = self.build_request(request.messages);
        match self.upstream.complete(&api_key, &completion).await {
            Ok(response) if response.is_success() => RelayResponse {
                status: 200,
                body: response.body,
            },
            Ok(response) => {
                tracing::error!("[ChatRelay] Anthropic API error {}: {}", response.status, response.body);
                RelayResponse {
                    status: response.status,
                    body: response.body,
                }
            }
            Err(e) => {
                tracing::error!("[ChatRelay] API error: {}", e);
                RelayResponse::error(
                    500,
                    json!({ "error": "Internal server error", "message": e.to_string() }),
                )
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::upstream::UpstreamResponse;
    use async_trait::async_trait;
    use boardroom_core::error::{BoardroomError, Result};
    use std::sync::Mutex;

    /// Records calls and answers with a fixed response.
    struct FakeUpstream {
        response: Result<UpstreamResponse>,
        calls: Mutex<Vec<(String, CompletionRequest)>>,
    }

    impl FakeUpstream {
        fn answering(status: u16, body: serde_json::Value) -> Arc<Self> {
            Arc::new(Self {
                response: Ok(UpstreamResponse { status, body }),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn failing(message: &str) -> Arc<Self> {
            Arc::new(Self {
                response: Err(BoardroomError::internal(message)),
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<(String, CompletionRequest)> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl CompletionUpstream for FakeUpstream {
        async fn complete(&self, api_key: &str, request: &CompletionRequest) -> Result<UpstreamResponse> {
            self.calls
                .lock()
                .unwrap()
                .push((api_key.to_string(), request.clone()));
            self.response.clone()
        }
    }

    fn conversation(api_key: Option<&str>) -> RelayRequest {
        RelayRequest {
            messages: vec![
                ChatMessage::system("You are a CFO."),
                ChatMessage::user("Should we raise?"),
            ],
            api_key: api_key.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_missing_credential_is_400_without_upstream_call() {
        let upstream = FakeUpstream::answering(200, json!({}));
        let relay = ChatRelay::new(upstream.clone());

        let response = relay.handle(conversation(None)).await;
        assert_eq!(response.status, 400);
        assert_eq!(response.body, json!({ "error": "API key is not configured" }));

        let response = relay.handle(conversation(Some(""))).await;
        assert_eq!(response.status, 400);
        assert!(upstream.calls().is_empty());
    }

    #[tokio::test]
    async fn test_system_message_is_split_off() {
        let upstream = FakeUpstream::answering(200, json!({ "content": [{ "text": "Yes." }] }));
        let relay = ChatRelay::new(upstream.clone());

        let response = relay.handle(conversation(Some("sk-client"))).await;
        assert_eq!(response.status, 200);
        assert_eq!(response.body["content"][0]["text"], "Yes.");

        let calls = upstream.calls();
        assert_eq!(calls.len(), 1);
        let (key, request) = &calls[0];
        assert_eq!(key, "sk-client");
        assert_eq!(request.system.as_deref(), Some("You are a CFO."));
        assert_eq!(request.messages, vec![ChatMessage::user("Should we raise?")]);
        assert_eq!(request.model, DEFAULT_MODEL);
        assert_eq!(request.max_tokens, 1000);
    }

    #[tokio::test]
    async fn test_server_key_wins() {
        let upstream = FakeUpstream::answering(200, json!({}));
        let relay = ChatRelay::new(upstream.clone()).with_server_api_key(Some("sk-server".into()));

        relay.handle(conversation(Some("sk-client"))).await;
        assert_eq!(upstream.calls()[0].0, "sk-server");
    }

    #[tokio::test]
    async fn test_upstream_failure_passes_through() {
        let body = json!({ "type": "error", "error": { "type": "overloaded_error", "message": "Overloaded" } });
        let upstream = FakeUpstream::answering(529, body.clone());
        let relay = ChatRelay::new(upstream);

        let response = relay.handle(conversation(Some("sk"))).await;
        assert_eq!(response.status, 529);
        assert_eq!(response.body, body);
    }

    #[tokio::test]
    async fn test_transport_failure_is_500() {
        let relay = ChatRelay::new(FakeUpstream::failing("connection reset"));

        let response = relay.handle(conversation(Some("sk"))).await;
        assert_eq!(response.status, 500);
        assert_eq!(response.body["error"], "Internal server error");
        assert!(response.body["message"].as_str().unwrap().contains("connection reset"));
    }

    #[test]
    fn test_no_system_message() {
        let relay = ChatRelay::new(FakeUpstream::answering(200, json!({})));
        let request = relay.build_request(vec![ChatMessage::user("hi")]);
        assert!(request.system.is_none());
        assert_eq!(request.messages.len(), 1);
    }

    #[test]
    fn test_config_overrides_model() {
        let config = RelayConfig {
            model: "claude-test".to_string(),
            max_tokens: 64,
            ..RelayConfig::default()
        };
        let relay = ChatRelay::new(FakeUpstream::answering(200, json!({}))).with_config(&config);
        assert_eq!(relay.model(), "claude-test");
        let request = relay.build_request(vec![ChatMessage::user("hi")]);
        assert_eq!(request.model, "claude-test");
        assert_eq!(request.max_tokens, 64);
    }
}
