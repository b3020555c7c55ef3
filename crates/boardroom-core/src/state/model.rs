//! Application state aggregate.

use serde::{Deserialize, Serialize};

use crate::advisor::{Advisor, apply_advisor_defaults, get_default_advisors};
use crate::document::DocumentMetadata;
use crate::meeting::MeetingRecord;
use crate::user::UserProfile;

/// Everything the application remembers between sessions.
///
/// Document content is never part of this struct; it lives in the document
/// content store keyed by the same id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    /// Uploaded documents, newest last.
    pub documents: Vec<DocumentMetadata>,
    /// Advisors on the board. Always contains a host once normalized.
    pub selected_advisors: Vec<Advisor>,
    /// Finished meetings, oldest first.
    pub active_conversations: Vec<MeetingRecord>,
    pub user_profile: UserProfile,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            documents: Vec::new(),
            selected_advisors: get_default_advisors(),
            active_conversations: Vec::new(),
            user_profile: UserProfile::default(),
        }
    }
}

impl AppState {
    /// Applies the advisor defaulting rules in place.
    pub fn normalize(&mut self) {
        apply_advisor_defaults(&mut self.selected_advisors);
    }

    /// Returns a normalized copy.
    pub fn normalized(mut self) -> Self {
        self.normalize();
        self
    }

    /// Returns the reduced snapshot written when a full write is rejected:
    /// documents, advisors and profile, without meeting history.
    pub fn minimal(&self) -> Self {
        Self {
            documents: self.documents.clone(),
            selected_advisors: self.selected_advisors.clone(),
            active_conversations: Vec::new(),
            user_profile: self.user_profile.clone(),
        }
    }

    pub fn find_document(&self, id: &str) -> Option<&DocumentMetadata> {
        self.documents.iter().find(|doc| doc.id == id)
    }

    pub fn find_advisor(&self, id: &str) -> Option<&Advisor> {
        self.selected_advisors.iter().find(|advisor| advisor.id == id)
    }

    /// Analyzed documents, in upload order.
    pub fn analyzed_documents(&self) -> Vec<DocumentMetadata> {
        self.documents
            .iter()
            .filter(|doc| doc.analyzed)
            .cloned()
            .collect()
    }
}
