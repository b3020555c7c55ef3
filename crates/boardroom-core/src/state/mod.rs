//! Application state domain module.
//!
//! - `model`: The `AppState` aggregate
//! - `repository`: Snapshot store and text slot ports

mod model;
mod repository;

pub use model::AppState;
pub use repository::{SaveOutcome, SnapshotStore, TextSlot};
