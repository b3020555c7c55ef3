//! Advisor responders backed by the chat relay or by canned text.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use boardroom_core::advisor::Advisor;
use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::meeting::AdvisorResponder;

use crate::relay::{ChatRelay, RelayRequest};
use crate::upstream::ChatMessage;

/// Asks the completion API, through the relay, to answer as the advisor.
///
/// The advisor's custom prompt is sent as the system message.
pub struct RelayAdvisorResponder {
    relay: Arc<ChatRelay>,
    api_key: Option<String>,
}

impl RelayAdvisorResponder {
    pub fn new(relay: Arc<ChatRelay>) -> Self {
        Self {
            relay,
            api_key: None,
        }
    }

    /// Key sent as the client key; ignored when the relay has its own.
    pub fn with_api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }
}

/// Pulls a readable message out of an upstream error body.
fn error_message(body: &serde_json::Value) -> String {
    body.pointer("/error/message")
        .or_else(|| body.get("error"))
        .and_then(|v| v.as_str())
        .map(str::to_string)
        .unwrap_or_else(|| body.to_string())
}

#[async_trait]
impl AdvisorResponder for RelayAdvisorResponder {
    async fn respond(&self, advisor: &Advisor, message: &str) -> Result<String> {
        let request = RelayRequest {
            messages: vec![
                ChatMessage::system(advisor.custom_prompt.clone()),
                ChatMessage::user(message),
            ],
            api_key: self.api_key.clone(),
        };

        let response = self.relay.handle(request).await;
        if !response.is_success() {
            return Err(BoardroomError::upstream(
                response.status,
                error_message(&response.body),
            ));
        }

        response
            .body
            .pointer("/content/0/text")
            .and_then(|text| text.as_str())
            .map(str::to_string)
            .ok_or_else(|| BoardroomError::Serialization {
                format: "JSON".to_string(),
                message: "Claude response has no text content".to_string(),
            })
    }
}

/// Produces canned replies from the advisor's role and approach.
///
/// Used when no credential is configured.
#[derive(Debug, Clone, Default)]
pub struct SimulatedResponder {
    delay: Duration,
}

impl SimulatedResponder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits `delay` before each reply.
    pub fn with_delay(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn reply_for(advisor: &Advisor) -> String {
        format!(
            "As your {}, I believe the key consideration here is strategic alignment. {} suggests focusing on measurable outcomes.",
            advisor.role, advisor.personality.approach
        )
    }
}

#[async_trait]
impl AdvisorResponder for SimulatedResponder {
    async fn respond(&self, advisor: &Advisor, _message: &str) -> Result<String> {
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::reply_for(advisor))
    }
}
