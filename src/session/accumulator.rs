//! Session accumulator: turns raw stream lines into domain events.
//!
//! The accumulator is the single writer of session identity, usage counters
//! and tool lifecycle state. Everything it publishes is a copy.

use tracing::{debug, warn};
use uuid::Uuid;

use super::stats::{Session, UsageStats};
use super::tools::{describe_tool, ToolTracker};
use crate::events::{DomainEvent, ErrorReport, ErrorSource, SystemInitNotice};
use crate::models::ConversationMessage;
use crate::stream::{
    decode_line, AssistantLine, ContentBlock, ResultLine, ResultOutcome, StreamLine,
    SystemInitLine, UserLine,
};

#[derive(Debug, Default)]
pub struct SessionAccumulator {
    session: Session,
    stats: UsageStats,
    tools: ToolTracker,
    init_notice_shown: bool,
}

impl SessionAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode and apply one line of agent stdout.
    ///
    /// Malformed lines produce a single `Error` event and leave all state
    /// untouched.
    pub fn ingest(&mut self, line: &str) -> Vec<DomainEvent> {
        match decode_line(line) {
            Ok(decoded) => self.apply(decoded),
            Err(err) => {
                warn!(code = err.error_code(), "skipping stream line: {}", err);
                vec![DomainEvent::Error(ErrorReport::from(&err))]
            }
        }
    }

    /// Apply an already decoded line.
    pub fn apply(&mut self, line: StreamLine) -> Vec<DomainEvent> {
        match line {
            StreamLine::Blank => Vec::new(),
            StreamLine::SystemInit(init) => self.on_system_init(init),
            StreamLine::System { subtype } => {
                debug!(?subtype, "ignoring system line");
                Vec::new()
            }
            StreamLine::Assistant(assistant) => self.on_assistant(assistant),
            StreamLine::User(user) => self.on_user(user),
            StreamLine::Result(result) => self.on_result(result),
            StreamLine::Unknown(kind) => {
                debug!(%kind, "ignoring unknown stream line");
                Vec::new()
            }
        }
    }

    fn on_system_init(&mut self, init: SystemInitLine) -> Vec<DomainEvent> {
        if let Some(id) = init.session_id.as_deref().filter(|id| !id.is_empty()) {
            self.session.id = Some(id.to_string());
        }
        if let Some(model) = init.model.as_deref().filter(|m| !m.is_empty()) {
            self.session.model = Some(model.to_string());
        }

        let mut events = Vec::with_capacity(2);
        if !self.init_notice_shown {
            self.init_notice_shown = true;
            events.push(DomainEvent::SystemInit(SystemInitNotice {
                session_id: init.session_id,
                model: init.model,
                cwd: init.cwd,
                tool_count: init.tools.len(),
            }));
        }
        events.push(DomainEvent::SessionInfo(self.session.clone()));
        events
    }

    fn on_assistant(&mut self, assistant: AssistantLine) -> Vec<DomainEvent> {
        let mut events = Vec::new();
        for block in assistant.message.content {
            match block {
                ContentBlock::Text { text } => {
                    events.push(DomainEvent::ConversationMessage(
                        ConversationMessage::assistant(text),
                    ));
                }
                ContentBlock::ToolUse { id, name, input } => {
                    let description = describe_tool(&name, &input);
                    let id = id
                        .filter(|id| !id.is_empty())
                        .unwrap_or_else(|| Uuid::new_v4().to_string());
                    let activity = self.tools.start(id, name.clone(), description.clone());
                    debug!(tool = %name, id = %activity.tool_id, "tool starting");
                    events.push(DomainEvent::ToolActivity(activity));
                    events.push(DomainEvent::ConversationMessage(
                        ConversationMessage::tool_use(name, description),
                    ));
                }
                ContentBlock::Other => {}
            }
        }
        events
    }

    fn on_user(&mut self, user: UserLine) -> Vec<DomainEvent> {
        match self.tools.advance(user.is_error()) {
            Some(activity) => vec![DomainEvent::ToolActivity(activity)],
            None => {
                debug!("tool result with no active tool");
                Vec::new()
            }
        }
    }

    fn on_result(&mut self, result: ResultLine) -> Vec<DomainEvent> {
        match result.outcome() {
            ResultOutcome::Success => {
                if let Some(id) = result.session_id.as_deref().filter(|id| !id.is_empty()) {
                    self.session.advance(id);
                }
                self.stats.add_result(&result);
                vec![
                    DomainEvent::SessionInfo(self.session.clone()),
                    DomainEvent::SessionStats(self.stats),
                ]
            }
            ResultOutcome::Failure(text) => {
                vec![DomainEvent::Error(ErrorReport::new(
                    ErrorSource::Result,
                    format!("result error: {}", text),
                ))]
            }
            ResultOutcome::Other => {
                debug!(subtype = ?result.subtype, "ignoring result line");
                Vec::new()
            }
        }
    }

    /// Start a new conversation: identity, chain, counters and tools reset
    /// together.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn snapshot(&self) -> Session {
        self.session.clone()
    }

    pub fn stats(&self) -> UsageStats {
        self.stats
    }

    pub fn tools(&self) -> &ToolTracker {
        &self.tools
    }
}
