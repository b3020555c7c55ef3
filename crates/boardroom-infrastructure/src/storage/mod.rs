//! Storage layer: text slots, the bounded snapshot store, document content
//! stores and configuration files.

mod config_storage;
mod document_store;
mod secret_storage;
mod snapshot_store;
mod text_slot;

pub use config_storage::ConfigStorage;
pub use document_store::{DOCUMENTS_DOMAIN, FileDocumentStore, InMemoryDocumentStore};
pub use secret_storage::{API_KEY_ENV, SecretStorage};
pub use snapshot_store::{BoundedSnapshotStore, SNAPSHOT_SIZE_LIMIT};
pub use text_slot::{FileTextSlot, MemoryTextSlot};
