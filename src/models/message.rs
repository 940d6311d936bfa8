use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Kind of a conversation entry
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MessageKind {
    /// Prompt typed by the operator
    User,
    /// Text produced by the agent
    AssistantText,
    /// The agent invoking a tool
    ToolUse,
    /// Notices from the dashboard itself
    System,
    /// Errors the agent reported for a whole task
    Error,
}

impl MessageKind {
    /// Icon prefixed to the first display line of a message.
    pub fn prefix(&self) -> &'static str {
        match self {
            MessageKind::AssistantText => "🤖 ",
            MessageKind::ToolUse => "🔧 ",
            MessageKind::User => "👤 ",
            MessageKind::Error => "❌ ",
            MessageKind::System => "ℹ️  ",
        }
    }
}

/// One renderable unit of dialogue. Immutable once created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ConversationMessage {
    pub id: String,
    pub kind: MessageKind,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    /// Tool name for `ToolUse` entries
    #[serde(default)]
    pub tool_name: Option<String>,
    #[serde(default)]
    pub is_error: bool,
}

impl ConversationMessage {
    pub fn new(kind: MessageKind, content: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            kind,
            content: content.into(),
            timestamp: Utc::now(),
            tool_name: None,
            is_error: kind == MessageKind::Error,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(MessageKind::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(MessageKind::AssistantText, content)
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(MessageKind::System, content)
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self::new(MessageKind::Error, content)
    }

    pub fn tool_use(tool_name: impl Into<String>, description: impl Into<String>) -> Self {
        let mut msg = Self::new(MessageKind::ToolUse, description);
        msg.tool_name = Some(tool_name.into());
        msg
    }
}
