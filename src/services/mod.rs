pub mod inbox;

pub use inbox::{InboxForwardService, ProcessingOutcome, INBOX_FORWARD_CREATED};
