//! Meeting domain module.
//!
//! - `message`: Messages exchanged during a meeting
//! - `model`: Finished meeting records
//! - `responder`: Port producing one advisor's reply

mod message;
mod model;
mod responder;

pub use message::{AdvisorAttribution, Message, MessageKind};
pub use model::{DEFAULT_MAX_STORED_MEETINGS, MeetingRecord};
pub use responder::AdvisorResponder;
