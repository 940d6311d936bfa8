//! Message handling for the App.

use tracing::debug;

use super::{App, AppMessage};
use crate::events::{DomainEvent, ErrorSource};
use crate::models::ConversationMessage;

impl App {
    /// Handle an incoming async message.
    /// All messages mark the app as dirty since they update visible state.
    pub fn handle_message(&mut self, msg: AppMessage) {
        self.mark_dirty();
        match msg {
            AppMessage::Event(event) => self.apply_event(event.payload),
            AppMessage::CommandFinished => {
                self.is_loading = false;
            }
        }
    }

    fn apply_event(&mut self, event: DomainEvent) {
        match event {
            DomainEvent::SystemInit(notice) => {
                self.push_message(ConversationMessage::system(notice.summary()));
            }
            DomainEvent::SessionInfo(session) => {
                self.session = session;
            }
            DomainEvent::ConversationMessage(message) => {
                self.push_message(message);
            }
            DomainEvent::ToolActivity(activity) => {
                self.push_tool_activity(activity);
            }
            DomainEvent::Error(report) => {
                debug!(source = ?report.source, "error event: {}", report.message);
                // Task-level failures also belong in the scrollback.
                if report.source == ErrorSource::Result {
                    self.push_message(ConversationMessage::error(report.message.clone()));
                }
                self.push_error(report);
            }
            DomainEvent::SessionStats(stats) => {
                self.stats = stats;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::tests::test_app;
    use super::*;
    use crate::events::{ErrorReport, Event, SystemInitNotice};
    use crate::models::MessageKind;
    use crate::session::{Session, ToolTracker, UsageStats};

    fn event(payload: DomainEvent) -> AppMessage {
        AppMessage::Event(Event::new(payload))
    }

    #[test]
    fn test_conversation_message_appends() {
        let (mut app, _rx) = test_app();
        app.needs_redraw = false;
        app.handle_message(event(DomainEvent::ConversationMessage(
            ConversationMessage::assistant("hi"),
        )));
        assert_eq!(app.messages.len(), 1);
        assert!(app.needs_redraw);
    }

    #[test]
    fn test_system_init_notice_shown() {
        let (mut app, _rx) = test_app();
        app.handle_message(event(DomainEvent::SystemInit(SystemInitNotice {
            session_id: Some("A".to_string()),
            model: Some("m".to_string()),
            cwd: None,
            tool_count: 2,
        })));
        assert_eq!(app.messages[0].kind, MessageKind::System);
        assert!(app.messages[0].content.starts_with("Session initialized: A"));
    }

    #[test]
    fn test_snapshots_replace_copies() {
        let (mut app, _rx) = test_app();
        let mut session = Session::new();
        session.advance("B");
        let mut stats = UsageStats::default();
        stats.turns = 3;

        app.handle_message(event(DomainEvent::SessionInfo(session.clone())));
        app.handle_message(event(DomainEvent::SessionStats(stats)));
        assert_eq!(app.session.id.as_deref(), Some("B"));
        assert_eq!(app.stats.turns, 3);
    }

    #[test]
    fn test_result_error_also_inline() {
        let (mut app, _rx) = test_app();
        app.handle_message(event(DomainEvent::Error(ErrorReport::new(
            ErrorSource::Result,
            "task failed",
        ))));
        app.handle_message(event(DomainEvent::Error(ErrorReport::new(
            ErrorSource::Stderr,
            "warning: noise",
        ))));
        assert_eq!(app.errors.len(), 2);
        assert_eq!(app.messages.len(), 1);
        assert_eq!(app.messages[0].kind, MessageKind::Error);
        assert_eq!(app.messages[0].content, "task failed");
    }

    #[test]
    fn test_tool_activity_kept() {
        let (mut app, _rx) = test_app();
        let mut tracker = ToolTracker::new();
        for i in 0..12 {
            let activity = tracker.start(format!("t{}", i), "Bash".into(), "ls".into());
            app.handle_message(event(DomainEvent::ToolActivity(activity)));
        }
        assert_eq!(app.tool_activity.len(), super::super::MAX_TOOL_ACTIVITY);
        assert_eq!(app.tool_activity.front().unwrap().tool_id, "t2");
    }

    #[test]
    fn test_command_finished_clears_loading() {
        let (mut app, _rx) = test_app();
        app.is_loading = true;
        app.handle_message(AppMessage::CommandFinished);
        assert!(!app.is_loading);
    }
}
