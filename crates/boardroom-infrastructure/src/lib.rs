pub mod dto;
pub mod paths;
pub mod storage;

pub use crate::paths::BoardroomPaths;
pub use crate::storage::{
    BoundedSnapshotStore, ConfigStorage, FileDocumentStore, FileTextSlot, InMemoryDocumentStore,
    MemoryTextSlot, SecretStorage,
};
