//! A running meeting.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use boardroom_core::advisor::{Advisor, default_active_advisors};
use boardroom_core::document::DocumentMetadata;
use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::meeting::{AdvisorResponder, MeetingRecord, Message};

use super::queue::AdvisorQueue;

/// Messages and active advisors of one meeting.
///
/// Advisors answer strictly one after another in activation order. The first
/// failing advisor ends the round: a system message carrying the error is
/// appended and the advisors still waiting are skipped.
#[derive(Debug, Clone)]
pub struct MeetingSession {
    id: String,
    start_time: DateTime<Utc>,
    active_advisors: Vec<Advisor>,
    messages: Vec<Message>,
}

impl MeetingSession {
    /// Starts a meeting with the host active, or the first advisor when the
    /// board has no host.
    pub fn start(selected_advisors: &[Advisor]) -> Self {
        Self::with_active(default_active_advisors(selected_advisors))
    }

    /// Starts a meeting with an explicit set of active advisors.
    pub fn with_active(active_advisors: Vec<Advisor>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            start_time: Utc::now(),
            active_advisors,
            messages: Vec::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn start_time(&self) -> DateTime<Utc> {
        self.start_time
    }

    pub fn active_advisors(&self) -> &[Advisor] {
        &self.active_advisors
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn is_active(&self, advisor_id: &str) -> bool {
        self.active_advisors.iter().any(|a| a.id == advisor_id)
    }

    /// Activates `advisor`, or deactivates it when already active.
    ///
    /// Returns whether the advisor is active afterwards.
    pub fn toggle_advisor(&mut self, advisor: &Advisor) -> bool {
        if self.is_active(&advisor.id) {
            self.active_advisors.retain(|a| a.id != advisor.id);
            false
        } else {
            self.active_advisors.push(advisor.clone());
            true
        }
    }

    /// Posts a user message and collects one reply per active advisor.
    ///
    /// Returns the messages appended by this call.
    ///
    /// # Errors
    ///
    /// Returns a validation error, with nothing appended, when `text` is
    /// blank or no advisor is active.
    pub async fn send(&mut self, responder: &dyn AdvisorResponder, text: &str) -> Result<Vec<Message>> {
        if text.trim().is_empty() {
            return Err(BoardroomError::validation("Message is empty"));
        }
        if self.active_advisors.is_empty() {
            return Err(BoardroomError::validation("No active advisors in this meeting"));
        }

        let first_new = self.messages.len();
        self.messages.push(Message::user(text));

        let mut queue = AdvisorQueue::new(self.active_advisors.clone());
        while let Some(advisor) = queue.next_advisor() {
            match responder.respond(&advisor, text).await {
                Ok(reply) => {
                    tracing::debug!("[MeetingSession] Reply from '{}'", advisor.name);
                    self.messages.push(Message::advisor(&advisor, reply));
                }
                Err(e) => {
                    let skipped = queue.abandon();
                    tracing::warn!(
                        "[MeetingSession] '{}' failed to respond, skipping {} advisors: {}",
                        advisor.name,
                        skipped,
                        e
                    );
                    self.messages
                        .push(Message::system(format!("{} could not respond: {}", advisor.name, e)));
                }
            }
        }

        Ok(self.messages[first_new..].to_vec())
    }

    /// Ends the meeting.
    ///
    /// `documents` should be the analyzed documents available to the board.
    pub fn finish(self, documents: Vec<DocumentMetadata>) -> MeetingRecord {
        MeetingRecord {
            id: self.id,
            start_time: self.start_time,
            end_time: Utc::now(),
            messages: self.messages,
            advisors: self.active_advisors,
            documents,
        }
    }
}
