//! State persistence ports.

use crate::error::Result;
use crate::state::model::AppState;

/// How a snapshot save ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// The full snapshot was written.
    Full,
    /// The snapshot exceeded the size ceiling; nothing was written.
    SkippedOversize,
    /// The full write was rejected and the minimal snapshot was written.
    Minimal,
    /// Neither the full nor the minimal snapshot could be written.
    Failed,
}

impl SaveOutcome {
    pub fn is_persisted(self) -> bool {
        matches!(self, Self::Full | Self::Minimal)
    }
}

/// Single-slot, size-bounded store for the application state snapshot.
///
/// Access is synchronous. Failures are recovered inside the store and
/// reported through return values rather than errors.
pub trait SnapshotStore: Send + Sync {
    /// Returns the last saved state, or `None` when absent or unreadable.
    fn load(&self) -> Option<AppState>;

    /// Persists a snapshot of `state` without document content.
    fn save(&self, state: &AppState) -> SaveOutcome;

    /// Deletes the stored snapshot.
    fn clear(&self);
}

/// One durable string cell.
pub trait TextSlot: Send + Sync {
    /// Returns the stored text, or `None` when the slot is empty.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored text.
    ///
    /// # Errors
    ///
    /// Returns `QuotaExceeded` when the slot cannot hold `text`.
    fn write(&self, text: &str) -> Result<()>;

    /// Empties the slot. Removing an empty slot succeeds.
    fn remove(&self) -> Result<()>;
}
