//! Meeting record domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::message::Message;
use crate::advisor::Advisor;
use crate::document::DocumentMetadata;

/// Number of finished meetings kept in state unless configured otherwise.
pub const DEFAULT_MAX_STORED_MEETINGS: usize = 50;

/// A finished meeting. Immutable once created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingRecord {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub messages: Vec<Message>,
    /// Advisors active when the meeting ended.
    pub advisors: Vec<Advisor>,
    /// Analyzed documents available during the meeting.
    pub documents: Vec<DocumentMetadata>,
}

impl MeetingRecord {
    /// Number of advisor replies in the meeting.
    pub fn advisor_reply_count(&self) -> usize {
        self.messages.iter().filter(|m| m.is_advisor()).count()
    }
}
