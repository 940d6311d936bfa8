//! AppMessage enum for async communication into the update loop.

use crate::events::Event;

/// Messages delivered to the single-threaded update loop.
#[derive(Debug, Clone)]
pub enum AppMessage {
    /// A domain event forwarded by the event bus
    Event(Event),
    /// The agent invocation for the last submitted prompt has ended,
    /// successfully or not
    CommandFinished,
}

impl From<Event> for AppMessage {
    fn from(event: Event) -> Self {
        AppMessage::Event(event)
    }
}
