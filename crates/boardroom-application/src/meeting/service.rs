use std::sync::Arc;

use boardroom_core::error::Result;
use boardroom_core::meeting::{AdvisorResponder, DEFAULT_MAX_STORED_MEETINGS, MeetingRecord, Message};

use super::session::MeetingSession;
use crate::state_manager::AppStateManager;

/// Starts meetings against the current board and stores finished ones.
pub struct MeetingService {
    state_manager: Arc<AppStateManager>,
    responder: Arc<dyn AdvisorResponder>,
    max_stored_meetings: usize,
}

impl MeetingService {
    pub fn new(state_manager: Arc<AppStateManager>, responder: Arc<dyn AdvisorResponder>) -> Self {
        Self {
            state_manager,
            responder,
            max_stored_meetings: DEFAULT_MAX_STORED_MEETINGS,
        }
    }

    pub fn with_max_stored_meetings(mut self, max_stored_meetings: usize) -> Self {
        self.max_stored_meetings = max_stored_meetings;
        self
    }

    /// Starts a meeting with the default active advisor of the current board.
    pub fn start(&self) -> MeetingSession {
        let state = self.state_manager.state();
        let session = MeetingSession::start(&state.selected_advisors);
        tracing::info!(
            "[MeetingService] Started meeting {} with {} active advisors",
            session.id(),
            session.active_advisors().len()
        );
        session
    }

    /// Sends `text` to every active advisor of `session`.
    pub async fn send(&self, session: &mut MeetingSession, text: &str) -> Result<Vec<Message>> {
        session.send(self.responder.as_ref(), text).await
    }

    /// Ends `session` and stores its record with the analyzed documents.
    pub fn finish(&self, session: MeetingSession) -> MeetingRecord {
        let documents = self.state_manager.state().analyzed_documents();
        let record = session.finish(documents);
        self.state_manager
            .record_meeting(record.clone(), self.max_stored_meetings);

        tracing::info!(
            "[MeetingService] Finished meeting {} ({} messages)",
            record.id,
            record.messages.len()
        );
        record
    }
}
