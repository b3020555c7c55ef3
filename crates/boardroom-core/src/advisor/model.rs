//! Advisor domain model.
//!
//! Represents the simulated board members a user converses with. Each advisor
//! carries the system prompt sent to the completion API on its behalf.

use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Id prefix of user-created advisors.
pub const CUSTOM_ADVISOR_PREFIX: &str = "custom-";

/// How an advisor behaves in conversation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Personality {
    pub traits: Vec<String>,
    pub approach: String,
    pub tone: String,
}

/// Append-only logs carried on each advisor record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorMemory {
    pub conversations: Vec<String>,
    pub key_insights: Vec<String>,
    pub action_items: Vec<String>,
}

/// A board member persona.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Advisor {
    /// Unique identifier
    pub id: String,
    /// Display name
    pub name: String,
    /// Role or title
    pub role: String,
    /// Avatar glyph
    pub avatar: String,
    /// Whether this advisor facilitates meetings
    pub is_host: bool,
    /// Experience summary
    pub experience: String,
    /// Areas of expertise
    pub expertise: Vec<String>,
    pub personality: Personality,
    /// System prompt sent to the completion API for this advisor
    pub custom_prompt: String,
    /// Ids of documents this advisor specializes in
    pub specialty_documents: Vec<String>,
    pub memory: AdvisorMemory,
}

impl Advisor {
    /// Returns true for advisors created by the user.
    pub fn is_custom(&self) -> bool {
        self.id.starts_with(CUSTOM_ADVISOR_PREFIX)
    }
}

/// Fields a user supplies when creating an advisor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdvisorDraft {
    pub name: String,
    pub role: String,
    #[serde(default = "default_avatar")]
    pub avatar: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub expertise: Vec<String>,
    #[serde(default)]
    pub personality: Personality,
    #[serde(default)]
    pub custom_prompt: String,
    #[serde(default)]
    pub specialty_documents: Vec<String>,
}

fn default_avatar() -> String {
    "🤖".to_string()
}

impl AdvisorDraft {
    /// Creates a draft with the required fields and defaults elsewhere.
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
            avatar: default_avatar(),
            experience: String::new(),
            expertise: Vec::new(),
            personality: Personality::default(),
            custom_prompt: String::new(),
            specialty_documents: Vec::new(),
        }
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.custom_prompt = prompt.into();
        self
    }

    /// Converts the draft into an advisor with a fresh `custom-<millis>` id.
    pub fn into_advisor(self) -> Advisor {
        Advisor {
            id: format!("{}{}", CUSTOM_ADVISOR_PREFIX, Utc::now().timestamp_millis()),
            name: self.name,
            role: self.role,
            avatar: self.avatar,
            is_host: false,
            experience: self.experience,
            expertise: self.expertise,
            personality: self.personality,
            custom_prompt: self.custom_prompt,
            specialty_documents: self.specialty_documents,
            memory: AdvisorMemory::default(),
        }
    }
}
