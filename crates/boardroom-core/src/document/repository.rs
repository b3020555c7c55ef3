//! Document content store trait.

use async_trait::async_trait;

use super::model::DocumentContent;
use crate::error::Result;

/// Durable per-id store for document content.
///
/// `get` distinguishes a missing record (`BoardroomError::NotFound`) from a
/// storage failure (any other error). Deciding that both mean "absent" is left
/// to the caller.
#[async_trait]
pub trait DocumentContentStore: Send + Sync {
    /// Ensures the backing collection exists. Safe to call repeatedly.
    async fn open(&self) -> Result<()>;

    /// Upserts a content record keyed by its id.
    async fn put(&self, content: &DocumentContent) -> Result<()>;

    /// Fetches the content record for `id`.
    async fn get(&self, id: &str) -> Result<DocumentContent>;

    /// Removes the record for `id`. Absent records are not an error.
    async fn delete(&self, id: &str) -> Result<()>;

    /// Removes every record.
    async fn clear(&self) -> Result<()>;
}
