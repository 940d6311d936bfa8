//! Domain events published on the [`EventBus`](crate::bus::EventBus).

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{ProcessError, StreamError};
use crate::models::ConversationMessage;
use crate::session::{Session, ToolActivity, UsageStats};

/// Discriminant used to subscribe to one kind of event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum EventKind {
    SystemInit,
    SessionInfo,
    ConversationMessage,
    ToolActivity,
    Error,
    SessionStats,
}

impl EventKind {
    pub const ALL: [EventKind; 6] = [
        EventKind::SystemInit,
        EventKind::SessionInfo,
        EventKind::ConversationMessage,
        EventKind::ToolActivity,
        EventKind::Error,
        EventKind::SessionStats,
    ];

    /// Default subscriber queue capacity for this kind.
    pub fn default_capacity(&self) -> usize {
        match self {
            EventKind::ConversationMessage => 50,
            EventKind::ToolActivity | EventKind::Error => 20,
            EventKind::SystemInit | EventKind::SessionInfo | EventKind::SessionStats => 10,
        }
    }
}

/// One-time notice emitted on the first `system/init` of a conversation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SystemInitNotice {
    pub session_id: Option<String>,
    pub model: Option<String>,
    pub cwd: Option<String>,
    pub tool_count: usize,
}

impl SystemInitNotice {
    pub fn summary(&self) -> String {
        let mut text = format!(
            "Session initialized: {}",
            self.session_id.as_deref().unwrap_or("unknown")
        );
        let mut details = Vec::new();
        if let Some(model) = &self.model {
            details.push(format!("model {}", model));
        }
        details.push(format!("{} tools", self.tool_count));
        if let Some(cwd) = &self.cwd {
            details.push(format!("cwd {}", cwd));
        }
        text.push_str(&format!(" ({})", details.join(", ")));
        text
    }
}

/// Where an error was raised.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ErrorSource {
    /// Malformed stream line
    Decode,
    /// Well-formed line with an unexpected shape
    Protocol,
    /// Spawning, reading from, or waiting on the agent
    Process,
    /// A line the agent wrote to stderr
    Stderr,
    /// The agent reported a task-level failure
    Result,
}

/// Payload of an `Error` event.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorReport {
    pub source: ErrorSource,
    pub message: String,
    /// The offending input, for decode and protocol errors.
    pub raw: Option<String>,
}

impl ErrorReport {
    pub fn new(source: ErrorSource, message: impl Into<String>) -> Self {
        Self {
            source,
            message: message.into(),
            raw: None,
        }
    }
}

impl From<&StreamError> for ErrorReport {
    fn from(err: &StreamError) -> Self {
        let source = match err {
            StreamError::Decode { .. } => ErrorSource::Decode,
            StreamError::Protocol { .. } => ErrorSource::Protocol,
        };
        Self {
            source,
            message: err.user_message(),
            raw: Some(err.raw_line().to_string()),
        }
    }
}

impl From<&ProcessError> for ErrorReport {
    fn from(err: &ProcessError) -> Self {
        Self::new(ErrorSource::Process, err.user_message())
    }
}

/// Tagged union of everything the accumulator publishes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DomainEvent {
    SystemInit(SystemInitNotice),
    SessionInfo(Session),
    ConversationMessage(ConversationMessage),
    ToolActivity(ToolActivity),
    Error(ErrorReport),
    SessionStats(UsageStats),
}

impl DomainEvent {
    pub fn kind(&self) -> EventKind {
        match self {
            DomainEvent::SystemInit(_) => EventKind::SystemInit,
            DomainEvent::SessionInfo(_) => EventKind::SessionInfo,
            DomainEvent::ConversationMessage(_) => EventKind::ConversationMessage,
            DomainEvent::ToolActivity(_) => EventKind::ToolActivity,
            DomainEvent::Error(_) => EventKind::Error,
            DomainEvent::SessionStats(_) => EventKind::SessionStats,
        }
    }
}

/// A published event with its publication time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub timestamp: DateTime<Utc>,
    pub payload: DomainEvent,
}

impl Event {
    pub fn new(payload: DomainEvent) -> Self {
        Self {
            timestamp: Utc::now(),
            payload,
        }
    }

    pub fn kind(&self) -> EventKind {
        self.payload.kind()
    }
}

impl From<DomainEvent> for Event {
    fn from(payload: DomainEvent) -> Self {
        Event::new(payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_capacities() {
        assert_eq!(EventKind::ConversationMessage.default_capacity(), 50);
        assert_eq!(EventKind::Error.default_capacity(), 20);
        assert_eq!(EventKind::ToolActivity.default_capacity(), 20);
        assert_eq!(EventKind::SessionStats.default_capacity(), 10);
    }

    #[test]
    fn test_init_notice_summary() {
        let notice = SystemInitNotice {
            session_id: Some("abc".into()),
            model: Some("sonnet".into()),
            cwd: Some("/work".into()),
            tool_count: 3,
        };
        assert_eq!(
            notice.summary(),
            "Session initialized: abc (model sonnet, 3 tools, cwd /work)"
        );
    }

    #[test]
    fn test_stream_error_report_keeps_raw_line() {
        let err = StreamError::decode("garbage", "expected value");
        let report = ErrorReport::from(&err);
        assert_eq!(report.source, ErrorSource::Decode);
        assert_eq!(report.raw.as_deref(), Some("garbage"));
        assert_eq!(report.message, "parse error: garbage");
    }

    #[test]
    fn test_event_kind_matches_payload() {
        let event = Event::new(DomainEvent::Error(ErrorReport::new(
            ErrorSource::Stderr,
            "oops",
        )));
        assert_eq!(event.kind(), EventKind::Error);
    }
}
