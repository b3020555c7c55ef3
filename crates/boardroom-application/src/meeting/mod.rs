//! Meeting use cases.
//!
//! - `queue`: ordered advisor queue processed one advisor at a time
//! - `session`: a running meeting
//! - `service`: starts meetings and stores finished ones

mod queue;
mod service;
mod session;

pub use queue::AdvisorQueue;
pub use service::MeetingService;
pub use session::MeetingSession;
