//! Advisor domain module.
//!
//! # Module Structure
//!
//! - `model`: Core advisor domain models (`Advisor`, `Personality`, `AdvisorMemory`)
//! - `preset`: Built-in advisor roster
//! - `defaults`: Host defaulting rules
//!
//! # Usage
//!
//! ```ignore
//! use boardroom_core::advisor::{Advisor, apply_advisor_defaults, get_default_advisors};
//! ```

mod defaults;
mod model;
mod preset;

pub use defaults::{apply_advisor_defaults, default_active_advisors};
pub use model::{Advisor, AdvisorDraft, AdvisorMemory, CUSTOM_ADVISOR_PREFIX, Personality};
pub use preset::{HOST_ADVISOR_ID, default_host, get_default_advisors, is_builtin_advisor};
