//! Completion API access for Boardroom.
//!
//! - `upstream`: HTTP client for the Claude messages API
//! - `relay`: stateless chat relay that normalizes upstream failures
//! - `responder`: advisor responders used by meetings

pub mod relay;
pub mod responder;
pub mod upstream;

pub use relay::{ChatRelay, RelayRequest, RelayResponse};
pub use responder::{RelayAdvisorResponder, SimulatedResponder};
pub use upstream::{
    ChatMessage, ClaudeHttpUpstream, CompletionRequest, CompletionUpstream, UpstreamResponse,
};
