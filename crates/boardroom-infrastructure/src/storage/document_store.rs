//! Document content store implementations.

use std::collections::HashMap;
use std::path::Path;

use async_trait::async_trait;
use tokio::sync::RwLock;
use version_migrate::{
    AppPaths, AsyncDirStorage, DirStorageStrategy, FilenameEncoding, FormatStrategy,
    MigrationError, PathStrategy,
};

use boardroom_core::document::{DocumentContent, DocumentContentStore};
use boardroom_core::error::{BoardroomError, Result};

use crate::dto::create_document_content_migrator;

const ENTITY_TYPE: &str = "document content";
const ENTITY_NAME: &str = "document_content";
const APP_NAME: &str = "boardroom";

/// Subdirectory of the data directory holding the content records.
pub const DOCUMENTS_DOMAIN: &str = "documents";

/// Maps a storage failure for `id` onto the error taxonomy.
fn storage_error(action: &str, id: &str, err: MigrationError) -> BoardroomError {
    match err {
        MigrationError::FilenameEncoding { .. } => {
            BoardroomError::validation(format!("Invalid document id: '{}'", id))
        }
        MigrationError::DeserializationError(_) => err.into(),
        other => BoardroomError::data_access(format!(
            "Failed to {} document content '{}': {}",
            action, id, other
        )),
    }
}

/// AsyncDirStorage-based document content store.
///
/// Directory structure:
/// ```text
/// data_dir/
/// └── documents/
///     ├── doc_1700000000000_k3j9x0a1b.json
///     └── doc_1700000000123_z8y7w6v5u.json
/// ```
pub struct FileDocumentStore {
    storage: AsyncDirStorage,
}

impl FileDocumentStore {
    /// Creates a store under `<base_dir>/data/boardroom/documents`.
    pub async fn new(base_dir: impl AsRef<Path>) -> Result<Self> {
        let app_paths = AppPaths::new(APP_NAME)
            .data_strategy(PathStrategy::CustomBase(base_dir.as_ref().to_path_buf()));
        Self::with_app_paths(app_paths).await
    }

    /// Creates a store in the `documents` directory of `app_paths`' data dir.
    pub async fn with_app_paths(app_paths: AppPaths) -> Result<Self> {
        let migrator = create_document_content_migrator();

        // JSON keeps the data URL on one line; ids are already filename-safe
        let strategy = DirStorageStrategy::default()
            .with_format(FormatStrategy::Json)
            .with_filename_encoding(FilenameEncoding::Direct);

        let storage = AsyncDirStorage::new(app_paths, DOCUMENTS_DOMAIN, migrator, strategy)
            .await
            .map_err(|e| BoardroomError::io(format!("Failed to create document storage: {}", e)))?;

        Ok(Self { storage })
    }

    pub fn dir(&self) -> &Path {
        self.storage.base_path()
    }

    fn check_id(id: &str) -> Result<()> {
        if id.is_empty() {
            return Err(BoardroomError::validation("Document id is empty"));
        }
        Ok(())
    }
}

#[async_trait]
impl DocumentContentStore for FileDocumentStore {
    async fn open(&self) -> Result<()> {
        tokio::fs::create_dir_all(self.dir()).await.map_err(|e| {
            BoardroomError::io(format!(
                "Failed to create document directory '{}': {}",
                self.dir().display(),
                e
            ))
        })
    }

    async fn put(&self, content: &DocumentContent) -> Result<()> {
        Self::check_id(&content.id)?;

        self.storage
            .save(ENTITY_NAME, &content.id, content)
            .await
            .map_err(|e| storage_error("save", &content.id, e))?;

        tracing::debug!(
            "[DocumentStore] Stored content '{}' ({} bytes)",
            content.id,
            content.content.len()
        );
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<DocumentContent> {
        Self::check_id(id)?;

        let exists = self
            .storage
            .exists(id)
            .await
            .map_err(|e| storage_error("read", id, e))?;
        if !exists {
            return Err(BoardroomError::not_found(ENTITY_TYPE, id));
        }

        self.storage
            .load::<DocumentContent>(ENTITY_NAME, id)
            .await
            .map_err(|e| storage_error("read", id, e))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        Self::check_id(id)?;

        self.storage
            .delete(id)
            .await
            .map_err(|e| storage_error("delete", id, e))
    }

    async fn clear(&self) -> Result<()> {
        self.open().await?;
        let ids = self.storage.list_ids().await.map_err(|e| {
            BoardroomError::data_access(format!("Failed to list document content: {}", e))
        })?;

        for id in &ids {
            self.storage
                .delete(id)
                .await
                .map_err(|e| storage_error("delete", id, e))?;
        }

        tracing::info!(
            "[DocumentStore] Cleared {} records from '{}'",
            ids.len(),
            self.dir().display()
        );
        Ok(())
    }
}

/// Keeps content records in memory.
#[derive(Default)]
pub struct InMemoryDocumentStore {
    records: RwLock<HashMap<String, DocumentContent>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

#[async_trait]
impl DocumentContentStore for InMemoryDocumentStore {
    async fn open(&self) -> Result<()> {
        Ok(())
    }

    async fn put(&self, content: &DocumentContent) -> Result<()> {
        self.records
            .write()
            .await
            .insert(content.id.clone(), content.clone());
        Ok(())
    }

    async fn get(&self, id: &str) -> Result<DocumentContent> {
        self.records
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| BoardroomError::not_found(ENTITY_TYPE, id))
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.records.write().await.remove(id);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.records.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn content(id: &str, text: &str) -> DocumentContent {
        DocumentContent::from_bytes(id, "text/plain", text.as_bytes())
    }

    #[tokio::test]
    async fn test_file_store_put_get_delete() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).await.unwrap();
        store.open().await.unwrap();
        store.open().await.unwrap();

        let record = content("doc_1_abc", "hello");
        store.put(&record).await.unwrap();
        assert_eq!(store.get("doc_1_abc").await.unwrap(), record);
        assert!(store.dir().join("doc_1_abc.json").exists());

        // Upsert overwrites silently
        let updated = content("doc_1_abc", "hello again");
        store.put(&updated).await.unwrap();
        assert_eq!(store.get("doc_1_abc").await.unwrap(), updated);

        store.delete("doc_1_abc").await.unwrap();
        assert!(store.get("doc_1_abc").await.unwrap_err().is_not_found());
        store.delete("doc_1_abc").await.unwrap();
    }

    #[tokio::test]
    async fn test_file_store_writes_versioned_records() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).await.unwrap();
        store.put(&content("doc_1_abc", "hello")).await.unwrap();

        let text = std::fs::read_to_string(store.dir().join("doc_1_abc.json")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["version"], "1.0.0");
        assert_eq!(value["content"], "data:text/plain;base64,aGVsbG8=");
    }

    #[tokio::test]
    async fn test_file_store_distinguishes_corruption_from_missing() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).await.unwrap();
        std::fs::write(store.dir().join("doc_bad.json"), "{broken").unwrap();

        let err = store.get("doc_bad").await.unwrap_err();
        assert!(!err.is_not_found());
        assert!(err.is_serialization());
    }

    #[tokio::test]
    async fn test_file_store_rejects_unsafe_ids() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).await.unwrap();

        for id in ["", "../escape", "a/b", ".hidden"] {
            let err = store.put(&content(id, "x")).await.unwrap_err();
            assert!(err.is_validation(), "expected validation error for {:?}", id);
        }
    }

    #[tokio::test]
    async fn test_file_store_clear() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).await.unwrap();

        // Clearing an empty store is fine
        store.clear().await.unwrap();

        store.put(&content("doc_a", "a")).await.unwrap();
        store.put(&content("doc_b", "b")).await.unwrap();
        store.clear().await.unwrap();

        assert!(store.get("doc_a").await.unwrap_err().is_not_found());
        assert!(store.get("doc_b").await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_file_store_reopens_after_directory_removed() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::new(temp_dir.path()).await.unwrap();
        std::fs::remove_dir_all(store.dir()).unwrap();

        store.open().await.unwrap();
        store.put(&content("doc_a", "a")).await.unwrap();
        assert_eq!(store.get("doc_a").await.unwrap(), content("doc_a", "a"));
    }

    #[tokio::test]
    async fn test_in_memory_store() {
        let store = InMemoryDocumentStore::new();
        store.put(&content("doc_a", "a")).await.unwrap();
        assert_eq!(store.len().await, 1);
        assert!(store.get("missing").await.unwrap_err().is_not_found());

        store.clear().await.unwrap();
        assert!(store.is_empty().await);
    }
}
