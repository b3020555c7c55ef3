//! Document content DTOs and migrations.

use serde::{Deserialize, Serialize};
use version_migrate::{FromDomain, IntoDomain, Versioned};

use boardroom_core::document::DocumentContent;

/// Document content DTO V1.0.0: the id and the base64 data URL.
#[derive(Debug, Clone, Serialize, Deserialize, Versioned)]
#[versioned(version = "1.0.0")]
pub struct DocumentContentV1_0_0 {
    pub id: String,
    pub content: String,
}

/// Type alias for the latest document content version.
pub type DocumentContentDTO = DocumentContentV1_0_0;

impl IntoDomain<DocumentContent> for DocumentContentV1_0_0 {
    fn into_domain(self) -> DocumentContent {
        DocumentContent {
            id: self.id,
            content: self.content,
        }
    }
}

impl FromDomain<DocumentContent> for DocumentContentV1_0_0 {
    fn from_domain(content: DocumentContent) -> Self {
        DocumentContentV1_0_0 {
            id: content.id,
            content: content.content,
        }
    }
}

// ============================================================================
// Migrator factory
// ============================================================================

/// Creates a Migrator for document content records.
pub fn create_document_content_migrator() -> version_migrate::Migrator {
    let mut migrator = version_migrate::Migrator::builder().build();
    let path = version_migrate::Migrator::define("document_content")
        .from::<DocumentContentV1_0_0>()
        .into_with_save::<DocumentContent>();
    migrator
        .register(path)
        .expect("Failed to register document_content migration path");
    migrator
}
