//! Size-bounded snapshot store.
//!
//! Persists the application state as one versioned JSON document inside a
//! [`TextSlot`]. Saving never fails loudly: oversize snapshots are skipped and
//! rejected writes fall back to a minimal snapshot without meeting history.

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::state::{AppState, SaveOutcome, SnapshotStore, TextSlot};

use crate::dto::{create_snapshot_migrator, ensure_version_tag};

/// Snapshots must be strictly smaller than this to be written (4 MiB).
pub const SNAPSHOT_SIZE_LIMIT: usize = 4 * 1024 * 1024;

const ENTITY: &str = "snapshot";

pub struct BoundedSnapshotStore<S> {
    slot: S,
    size_limit: usize,
}

impl<S: TextSlot> BoundedSnapshotStore<S> {
    pub fn new(slot: S) -> Self {
        Self {
            slot,
            size_limit: SNAPSHOT_SIZE_LIMIT,
        }
    }

    /// Overrides the size ceiling.
    pub fn with_size_limit(mut self, size_limit: usize) -> Self {
        self.size_limit = size_limit;
        self
    }

    pub fn slot(&self) -> &S {
        &self.slot
    }

    /// Serializes `state` in the current snapshot schema.
    ///
    /// Document content is not part of the schema, so the output never
    /// carries it.
    pub fn serialize(state: &AppState) -> Result<String> {
        let migrator = create_snapshot_migrator();
        Ok(migrator.save_domain_flat(ENTITY, state.clone())?)
    }

    /// Parses a stored snapshot of any known version.
    pub fn deserialize(text: &str) -> Result<AppState> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        if !value.is_object() {
            return Err(BoardroomError::Serialization {
                format: "JSON".to_string(),
                message: "snapshot is not an object".to_string(),
            });
        }
        ensure_version_tag(&mut value);

        let migrator = create_snapshot_migrator();
        Ok(migrator.load_flat_from(ENTITY, value)?)
    }

    fn write_minimal(&self, state: &AppState) -> SaveOutcome {
        let minimal = match Self::serialize(&state.minimal()) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("[SnapshotStore] Failed to serialize minimal snapshot: {}", e);
                return SaveOutcome::Failed;
            }
        };

        match self.slot.write(&minimal) {
            Ok(()) => {
                tracing::info!(
                    "[SnapshotStore] Saved minimal snapshot ({} bytes)",
                    minimal.len()
                );
                SaveOutcome::Minimal
            }
            Err(e) => {
                tracing::error!("[SnapshotStore] Failed to save minimal snapshot: {}", e);
                SaveOutcome::Failed
            }
        }
    }
}

impl<S: TextSlot> SnapshotStore for BoundedSnapshotStore<S> {
    fn load(&self) -> Option<AppState> {
        let text = match self.slot.read() {
            Ok(Some(text)) => text,
            Ok(None) => return None,
            Err(e) => {
                tracing::warn!("[SnapshotStore] Failed to read snapshot: {}", e);
                return None;
            }
        };

        match Self::deserialize(&text) {
            Ok(state) => Some(state),
            Err(e) => {
                tracing::warn!("[SnapshotStore] Ignoring unreadable snapshot: {}", e);
                None
            }
        }
    }

    fn save(&self, state: &AppState) -> SaveOutcome {
        let json = match Self::serialize(state) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!("[SnapshotStore] Failed to serialize snapshot: {}", e);
                return SaveOutcome::Failed;
            }
        };

        if json.len() >= self.size_limit {
            tracing::warn!(
                "[SnapshotStore] Snapshot is {} bytes, not below the {} byte limit; not saved",
                json.len(),
                self.size_limit
            );
            return SaveOutcome::SkippedOversize;
        }

        match self.slot.write(&json) {
            Ok(()) => {
                tracing::debug!("[SnapshotStore] Saved snapshot ({} bytes)", json.len());
                SaveOutcome::Full
            }
            Err(e) => {
                tracing::warn!(
                    "[SnapshotStore] Full snapshot rejected ({}), trying minimal snapshot",
                    e
                );
                self.write_minimal(state)
            }
        }
    }

    fn clear(&self) {
        if let Err(e) = self.slot.remove() {
            tracing::warn!("[SnapshotStore] Failed to clear snapshot: {}", e);
        }
    }
}
