//! Advisor responder port.

use async_trait::async_trait;

use crate::advisor::Advisor;
use crate::error::Result;

/// Produces one advisor's reply to a user message.
///
/// Implementations may call a remote completion API; callers invoke them one
/// advisor at a time.
#[async_trait]
pub trait AdvisorResponder: Send + Sync {
    /// Returns the reply text of `advisor` to `message`.
    async fn respond(&self, advisor: &Advisor, message: &str) -> Result<String>;
}
