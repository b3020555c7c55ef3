pub mod advisor;
pub mod config;
pub mod document;
pub mod error;
pub mod meeting;
pub mod state;
pub mod user;

// Re-export common error type
pub use error::BoardroomError;
