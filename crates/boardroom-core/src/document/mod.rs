//! Document domain module.
//!
//! - `model`: metadata, content and analysis models
//! - `repository`: content store trait
//! - `intake`: upload validation and document construction

pub mod intake;
mod model;
mod repository;

pub use intake::{DocumentIntake, MAX_UPLOAD_BYTES};
pub use model::{AnalysisResult, Document, DocumentContent, DocumentMetadata, FileKind};
pub use repository::DocumentContentStore;
