//! User profile domain module.

mod model;

pub use model::UserProfile;
