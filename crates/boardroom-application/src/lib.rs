//! Application layer for Boardroom.
//!
//! This crate provides the state manager and meeting use cases that
//! coordinate between the domain and the storage ports.

pub mod bootstrap;
pub mod meeting;
pub mod state_manager;

pub use bootstrap::{Bootstrap, BootstrapOptions};
pub use meeting::{AdvisorQueue, MeetingService, MeetingSession};
pub use state_manager::AppStateManager;
