//! Application state manager.
//!
//! `AppStateManager` owns the in-memory [`AppState`] and is the only writer to
//! the snapshot store and the document content store.
//!
//! # Consistency
//!
//! Every mutation persists the snapshot while still holding the state lock,
//! so the order of persisted snapshots equals the order of mutations. Content
//! store calls are awaited before the lock is taken.

use std::sync::{Arc, PoisonError, RwLock, RwLockWriteGuard};

use chrono::Utc;

use boardroom_core::advisor::{
    Advisor, AdvisorDraft, CUSTOM_ADVISOR_PREFIX, apply_advisor_defaults,
};
use boardroom_core::document::{
    AnalysisResult, Document, DocumentContent, DocumentContentStore, DocumentMetadata,
};
use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::meeting::MeetingRecord;
use boardroom_core::state::{AppState, SaveOutcome, SnapshotStore};
use boardroom_core::user::UserProfile;

pub struct AppStateManager {
    snapshot_store: Arc<dyn SnapshotStore>,
    content_store: Arc<dyn DocumentContentStore>,
    state: RwLock<AppState>,
}

impl AppStateManager {
    /// Creates a manager holding the default state. Call [`initialize`] to
    /// load the saved snapshot.
    ///
    /// [`initialize`]: Self::initialize
    pub fn new(
        snapshot_store: Arc<dyn SnapshotStore>,
        content_store: Arc<dyn DocumentContentStore>,
    ) -> Self {
        Self {
            snapshot_store,
            content_store,
            state: RwLock::new(AppState::default()),
        }
    }

    /// Loads the saved snapshot, applying advisor defaulting, or falls back to
    /// the default state. Calling it again reloads.
    pub fn initialize(&self) {
        let state = match self.snapshot_store.load() {
            Some(state) => {
                tracing::info!(
                    "[AppStateManager] Loaded snapshot: {} documents, {} advisors, {} meetings",
                    state.documents.len(),
                    state.selected_advisors.len(),
                    state.active_conversations.len()
                );
                state.normalized()
            }
            None => {
                tracing::info!("[AppStateManager] No saved snapshot, starting from defaults");
                AppState::default()
            }
        };

        *self.write_state() = state;
    }

    /// Ensures the document content store is ready.
    pub async fn open_content_store(&self) -> Result<()> {
        self.content_store.open().await
    }

    /// Returns a copy of the current state.
    pub fn state(&self) -> AppState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, AppState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Applies `mutate` and persists the result inside one critical section.
    fn mutate<T>(&self, mutate: impl FnOnce(&mut AppState) -> Result<T>) -> Result<(T, SaveOutcome)> {
        let mut state = self.write_state();
        let value = mutate(&mut state)?;
        let outcome = self.snapshot_store.save(&state);
        if !outcome.is_persisted() {
            tracing::warn!("[AppStateManager] State change not persisted: {:?}", outcome);
        }
        Ok((value, outcome))
    }

    fn replace(&self, mutate: impl FnOnce(&mut AppState)) -> SaveOutcome {
        let mut state = self.write_state();
        mutate(&mut state);
        self.snapshot_store.save(&state)
    }

    // ============================================================================
    // Whole-field updates
    // ============================================================================

    pub fn update_documents(&self, documents: Vec<DocumentMetadata>) -> SaveOutcome {
        self.replace(|state| state.documents = documents)
    }

    /// Replaces the advisor list and re-applies host defaulting.
    pub fn update_advisors(&self, advisors: Vec<Advisor>) -> SaveOutcome {
        self.replace(|state| {
            state.selected_advisors = advisors;
            apply_advisor_defaults(&mut state.selected_advisors);
        })
    }

    pub fn update_conversations(&self, conversations: Vec<MeetingRecord>) -> SaveOutcome {
        self.replace(|state| state.active_conversations = conversations)
    }

    pub fn update_user_profile(&self, profile: UserProfile) -> SaveOutcome {
        self.replace(|state| state.user_profile = profile)
    }

    // ============================================================================
    // Documents
    // ============================================================================

    /// Stores the document content, then records its metadata.
    ///
    /// When the content store rejects the record the metadata is not added
    /// and the error is returned.
    pub async fn add_document(&self, document: Document) -> Result<DocumentMetadata> {
        let (metadata, content) = document.into_parts();

        self.content_store.put(&content).await.map_err(|e| {
            tracing::error!(
                "[AppStateManager] Failed to store content of '{}': {}",
                metadata.name,
                e
            );
            e
        })?;

        let stored = metadata.clone();
        self.mutate(move |state| {
            state.documents.push(metadata);
            Ok(())
        })?;

        tracing::info!(
            "[AppStateManager] Added document '{}' ({})",
            stored.name,
            stored.id
        );
        Ok(stored)
    }

    /// Returns the stored content of a document, or `None` when it is missing
    /// or the content store fails.
    pub async fn get_document_content(&self, id: &str) -> Option<DocumentContent> {
        match self.content_store.get(id).await {
            Ok(content) => Some(content),
            Err(e) if e.is_not_found() => {
                tracing::debug!("[AppStateManager] No content stored for '{}'", id);
                None
            }
            Err(e) => {
                tracing::warn!("[AppStateManager] Failed to read content of '{}': {}", id, e);
                None
            }
        }
    }

    /// Deletes the document content and metadata.
    ///
    /// A content store failure is logged and the metadata is removed anyway.
    pub async fn delete_document(&self, id: &str) -> SaveOutcome {
        if let Err(e) = self.content_store.delete(id).await {
            tracing::warn!("[AppStateManager] Failed to delete content of '{}': {}", id, e);
        }

        self.replace(|state| state.documents.retain(|doc| doc.id != id))
    }

    /// Attaches an analysis to a document and marks it analyzed.
    pub fn record_analysis(&self, id: &str, analysis: AnalysisResult) -> Result<SaveOutcome> {
        let ((), outcome) = self.mutate(|state| {
            let doc = state
                .documents
                .iter_mut()
                .find(|doc| doc.id == id)
                .ok_or_else(|| BoardroomError::not_found("document", id))?;
            doc.attach_analysis(analysis);
            Ok(())
        })?;
        Ok(outcome)
    }

    /// Empties both stores and resets the in-memory state to defaults.
    pub async fn clear_all_data(&self) {
        if let Err(e) = self.content_store.clear().await {
            tracing::warn!("[AppStateManager] Failed to clear document content: {}", e);
        }

        let mut state = self.write_state();
        self.snapshot_store.clear();
        *state = AppState::default();
        tracing::info!("[AppStateManager] All data cleared");
    }

    // ============================================================================
    // Advisors
    // ============================================================================

    /// Adds a user-created advisor with a fresh `custom-<millis>` id.
    pub fn create_advisor(&self, draft: AdvisorDraft) -> Result<Advisor> {
        if draft.name.trim().is_empty() || draft.role.trim().is_empty() {
            return Err(BoardroomError::validation("Advisor name and role are required"));
        }

        let (advisor, _) = self.mutate(|state| {
            let mut advisor = draft.into_advisor();
            // Two advisors created within the same millisecond need distinct ids
            let mut millis = Utc::now().timestamp_millis();
            while state.find_advisor(&advisor.id).is_some() {
                millis += 1;
                advisor.id = format!("{}{}", CUSTOM_ADVISOR_PREFIX, millis);
            }

            state.selected_advisors.push(advisor.clone());
            apply_advisor_defaults(&mut state.selected_advisors);
            Ok(advisor)
        })?;

        tracing::info!(
            "[AppStateManager] Created advisor '{}' ({})",
            advisor.name,
            advisor.id
        );
        Ok(advisor)
    }

    /// Replaces a user-created advisor. Built-in advisors cannot be edited.
    pub fn edit_advisor(&self, advisor: Advisor) -> Result<SaveOutcome> {
        if !advisor.is_custom() {
            return Err(BoardroomError::validation(format!(
                "Built-in advisor '{}' cannot be edited",
                advisor.id
            )));
        }

        let ((), outcome) = self.mutate(|state| {
            let slot = state
                .selected_advisors
                .iter_mut()
                .find(|existing| existing.id == advisor.id)
                .ok_or_else(|| BoardroomError::not_found("advisor", advisor.id.clone()))?;
            *slot = advisor;
            apply_advisor_defaults(&mut state.selected_advisors);
            Ok(())
        })?;
        Ok(outcome)
    }

    /// Removes a user-created advisor. Built-in advisors cannot be removed.
    pub fn remove_advisor(&self, id: &str) -> Result<SaveOutcome> {
        if !id.starts_with(CUSTOM_ADVISOR_PREFIX) {
            return Err(BoardroomError::validation(format!(
                "Built-in advisor '{}' cannot be removed",
                id
            )));
        }

        let ((), outcome) = self.mutate(|state| {
            let before = state.selected_advisors.len();
            state.selected_advisors.retain(|advisor| advisor.id != id);
            if state.selected_advisors.len() == before {
                return Err(BoardroomError::not_found("advisor", id));
            }
            apply_advisor_defaults(&mut state.selected_advisors);
            Ok(())
        })?;

        tracing::info!("[AppStateManager] Removed advisor '{}'", id);
        Ok(outcome)
    }

    // ============================================================================
    // Meetings
    // ============================================================================

    /// Appends a finished meeting, keeping only the newest `max_stored`.
    pub fn record_meeting(&self, record: MeetingRecord, max_stored: usize) -> SaveOutcome {
        self.replace(|state| {
            state.active_conversations.push(record);
            let len = state.active_conversations.len();
            if len > max_stored {
                state.active_conversations.drain(..len - max_stored);
            }
        })
    }
}
