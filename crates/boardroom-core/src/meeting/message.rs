//! Meeting message types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::advisor::Advisor;

/// Who produced a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// Message typed by the user.
    User,
    /// Reply from an advisor.
    Advisor,
    /// Status or error notice produced by the application.
    System,
}

/// Identifies the advisor behind an advisor message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdvisorAttribution {
    pub advisor_id: String,
    pub name: String,
    pub role: String,
    pub avatar: String,
}

impl From<&Advisor> for AdvisorAttribution {
    fn from(advisor: &Advisor) -> Self {
        Self {
            advisor_id: advisor.id.clone(),
            name: advisor.name.clone(),
            role: advisor.role.clone(),
            avatar: advisor.avatar.clone(),
        }
    }
}

/// A single message in a meeting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Present only on advisor messages.
    pub attribution: Option<AdvisorAttribution>,
}

impl Message {
    fn new(id: String, kind: MessageKind, content: String) -> Self {
        Self {
            id,
            kind,
            content,
            timestamp: Utc::now(),
            attribution: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        let id = format!("msg-{}-user", Utc::now().timestamp_millis());
        Self::new(id, MessageKind::User, content.into())
    }

    pub fn system(content: impl Into<String>) -> Self {
        let id = format!("msg-{}-system", Utc::now().timestamp_millis());
        Self::new(id, MessageKind::System, content.into())
    }

    /// Creates an advisor reply with id `msg-<millis>-<advisor id>`.
    pub fn advisor(advisor: &Advisor, content: impl Into<String>) -> Self {
        let id = format!("msg-{}-{}", Utc::now().timestamp_millis(), advisor.id);
        let mut message = Self::new(id, MessageKind::Advisor, content.into());
        message.attribution = Some(AdvisorAttribution::from(advisor));
        message
    }

    pub fn is_advisor(&self) -> bool {
        self.kind == MessageKind::Advisor
    }
}
