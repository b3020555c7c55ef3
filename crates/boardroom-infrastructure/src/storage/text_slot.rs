//! Text slot implementations backing the snapshot store.

use std::fs::{self, File};
use std::io::Write as IoWrite;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Mutex, PoisonError};

use boardroom_core::error::{BoardroomError, Result};
use boardroom_core::state::TextSlot;

fn check_quota(text: &str, quota: Option<usize>) -> Result<()> {
    match quota {
        Some(limit) if text.len() > limit => Err(BoardroomError::QuotaExceeded {
            requested: text.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// A text slot stored in one file.
///
/// Writes go to a temporary file that is synced and then renamed over the
/// target, so readers see either the old or the new text.
pub struct FileTextSlot {
    path: PathBuf,
    quota: Option<usize>,
}

impl FileTextSlot {
    pub fn new(path: PathBuf) -> Self {
        Self { path, quota: None }
    }

    /// Rejects writes larger than `quota` bytes.
    pub fn with_quota(mut self, quota: Option<usize>) -> Self {
        self.quota = quota;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl TextSlot for FileTextSlot {
    fn read(&self) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&self.path).map_err(|e| {
            BoardroomError::io(format!(
                "Failed to read '{}': {}",
                self.path.display(),
                e
            ))
        })?;

        if content.trim().is_empty() {
            return Ok(None);
        }
        Ok(Some(content))
    }

    fn write(&self, text: &str) -> Result<()> {
        check_quota(text, self.quota)?;

        // Ensure parent directory exists
        if let Some(parent) = self.path.parent() {
            if !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let tmp_path = self.temp_path();
        let mut tmp_file = File::create(&tmp_path)?;
        tmp_file.write_all(text.as_bytes())?;

        // Ensure data is written to disk
        tmp_file.sync_all()?;
        drop(tmp_file);

        // Atomic rename
        fs::rename(&tmp_path, &self.path)?;

        Ok(())
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

/// A text slot held in memory.
#[derive(Default)]
pub struct MemoryTextSlot {
    text: Mutex<Option<String>>,
    quota: Option<usize>,
    writes: AtomicUsize,
}

impl MemoryTextSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rejects writes larger than `quota` bytes.
    pub fn with_quota(quota: usize) -> Self {
        Self {
            quota: Some(quota),
            ..Self::default()
        }
    }

    /// Creates a slot that already holds `text`.
    pub fn with_text(text: impl Into<String>) -> Self {
        Self {
            text: Mutex::new(Some(text.into())),
            ..Self::default()
        }
    }

    /// Number of successful writes.
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    pub fn contents(&self) -> Option<String> {
        self.text
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl TextSlot for MemoryTextSlot {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.contents())
    }

    fn write(&self, text: &str) -> Result<()> {
        check_quota(text, self.quota)?;
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = Some(text.to_string());
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.text.lock().unwrap_or_else(PoisonError::into_inner) = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_slot_roundtrip() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileTextSlot::new(temp_dir.path().join("nested").join("snapshot.json"));

        assert!(slot.read().unwrap().is_none());
        slot.write("{\"a\":1}").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("{\"a\":1}"));
        assert!(!slot.temp_path().exists());

        slot.remove().unwrap();
        assert!(slot.read().unwrap().is_none());
        // Removing again is fine
        slot.remove().unwrap();
    }

    #[test]
    fn test_file_slot_quota_keeps_previous_text() {
        let temp_dir = TempDir::new().unwrap();
        let slot = FileTextSlot::new(temp_dir.path().join("snapshot.json")).with_quota(Some(8));

        slot.write("small").unwrap();
        let err = slot.write("much too large").unwrap_err();
        assert!(err.is_quota_exceeded());
        assert_eq!(slot.read().unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn test_memory_slot_counts_writes() {
        let slot = MemoryTextSlot::with_quota(4);
        slot.write("abc").unwrap();
        assert!(slot.write("abcde").unwrap_err().is_quota_exceeded());
        assert_eq!(slot.write_count(), 1);
        assert_eq!(slot.contents().as_deref(), Some("abc"));
    }
}
