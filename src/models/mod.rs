mod message;

pub use message::{ConversationMessage, MessageKind};
