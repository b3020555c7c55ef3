//! Data Transfer Objects (DTOs) for persistence.
//!
//! These DTOs represent the versioned schemas of the state snapshot and the
//! document content records. They are private to the infrastructure layer
//! and handle the evolution of the storage format over time.
//!
//! ### Snapshot Version History
//! - **1.0.0**: Browser-era shape (`fileType`, `subscription`, optional advisor memory);
//!   also assumed for objects without a `version` key
//! - **1.1.0**: `fileKind`, `subscriptionTier`, advisor memory always present
//!
//! ### Document Content Version History
//! - **1.0.0**: `{id, content}` with a base64 data URL

mod document_content;
mod snapshot;

pub use document_content::{
    DocumentContentDTO, DocumentContentV1_0_0, create_document_content_migrator,
};
pub use snapshot::{
    LEGACY_SNAPSHOT_VERSION, SnapshotDTO, SnapshotV1_0_0, SnapshotV1_1_0,
    create_snapshot_migrator, ensure_version_tag,
};
