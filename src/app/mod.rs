//! Application state and logic for the dashboard.
//!
//! [`App`] is owned by the UI loop and is the only writer of UI state. It
//! learns about the agent exclusively through [`AppMessage`]s and talks back
//! through [`SessionCommand`]s; session and usage values are copies of the
//! snapshots the accumulator publishes.

mod actions;
mod handlers;
mod messages;
mod types;

pub use messages::AppMessage;
pub use types::{InputState, SettingsInfo, View};

use std::collections::VecDeque;
use std::sync::Arc;

use ratatui::text::Line;
use tokio::sync::mpsc;

use crate::domain::{expand_messages, EditorMode, LineEditor, ScrollState};
use crate::events::ErrorReport;
use crate::input::{CommandRegistry, InputContext};
use crate::markdown::RenderService;
use crate::models::ConversationMessage;
use crate::session::{Session, SessionCommand, ToolActivity, UsageStats};
use crate::ui::conversation::ConversationFormatter;
use crate::ui::layout::LayoutContext;

/// Messages kept in the conversation history.
pub const MAX_MESSAGES: usize = 500;
/// Errors kept for the side panel.
pub const MAX_ERRORS: usize = 5;
/// Tool notices kept for the side panel.
pub const MAX_TOOL_ACTIVITY: usize = 10;

/// Main application state
pub struct App {
    /// Flag to track if the app should quit
    pub should_quit: bool,
    /// Current view being displayed
    pub view: View,
    /// Terminal width in columns
    pub terminal_width: u16,
    /// Terminal height in rows
    pub terminal_height: u16,
    /// Conversation history, oldest first
    pub messages: VecDeque<ConversationMessage>,
    /// Most recent errors, oldest first
    pub errors: VecDeque<ErrorReport>,
    /// Most recent tool notices, oldest first
    pub tool_activity: VecDeque<ToolActivity>,
    /// Last published session snapshot
    pub session: Session,
    /// Last published usage snapshot
    pub stats: UsageStats,
    /// Whether the input panel is active
    pub input_active: bool,
    pub editor: LineEditor,
    pub scroll: ScrollState,
    /// Set on submit, cleared when the invocation finishes
    pub is_loading: bool,
    /// Shown in place of the input hint
    pub status_message: Option<String>,
    pub settings: SettingsInfo,
    /// Whether the UI needs to be redrawn
    pub needs_redraw: bool,
    /// Receiver for async messages; taken by the UI loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
    /// Sender for async messages (clone this to pass to async tasks)
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    renderer: Arc<dyn RenderService>,
    commands: mpsc::UnboundedSender<SessionCommand>,
    registry: CommandRegistry,
}

impl App {
    /// Create the application state.
    ///
    /// `commands` feeds the session runner; the returned app owns the
    /// receiving end of its own message channel until the UI loop takes it.
    pub fn new(
        renderer: Arc<dyn RenderService>,
        commands: mpsc::UnboundedSender<SessionCommand>,
        settings: SettingsInfo,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            should_quit: false,
            view: View::default(),
            terminal_width: 80,  // Default, will be updated on first render
            terminal_height: 24, // Default, will be updated on first render
            messages: VecDeque::with_capacity(MAX_MESSAGES),
            errors: VecDeque::with_capacity(MAX_ERRORS),
            tool_activity: VecDeque::with_capacity(MAX_TOOL_ACTIVITY),
            session: Session::new(),
            stats: UsageStats::default(),
            input_active: false,
            editor: LineEditor::new(),
            scroll: ScrollState::new(),
            is_loading: false,
            status_message: None,
            settings,
            needs_redraw: true,
            message_rx: Some(message_rx),
            message_tx,
            renderer,
            commands,
            registry: CommandRegistry::new(),
        }
    }

    /// Get a clone of the message sender for passing to async tasks
    pub fn message_sender(&self) -> mpsc::UnboundedSender<AppMessage> {
        self.message_tx.clone()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    pub fn renderer(&self) -> &dyn RenderService {
        self.renderer.as_ref()
    }

    pub fn layout(&self) -> LayoutContext {
        LayoutContext::new(self.terminal_width, self.terminal_height)
    }

    pub fn input_state(&self) -> InputState {
        match (self.input_active, self.editor.mode()) {
            (false, _) => InputState::Inactive,
            (true, EditorMode::Normal) => InputState::Normal,
            (true, EditorMode::Insert) => InputState::Insert,
        }
    }

    pub fn input_context(&self) -> InputContext {
        InputContext::new(self.view, self.input_active, self.editor.mode())
    }

    pub(crate) fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    pub(crate) fn send_command(&mut self, command: SessionCommand) {
        if self.commands.send(command).is_err() {
            tracing::warn!("session runner is gone; command dropped");
            self.is_loading = false;
            self.status_message = Some("Agent runner stopped".to_string());
        }
    }

    /// Every display line of the history at the current width.
    pub fn conversation_lines(&self) -> Vec<Line<'static>> {
        let layout = self.layout();
        let formatter = ConversationFormatter::new(self.renderer.as_ref());
        expand_messages(&self.messages, layout.wrap_width(), &formatter)
    }

    /// Recompute scroll limits from the current history and viewport.
    pub fn refresh_scroll_limits(&mut self) {
        let total = self.conversation_lines().len();
        let viewport = self.layout().viewport_height();
        self.scroll.update_limits(total, viewport);
    }

    /// Jump to the newest line, recomputing the limit from scratch.
    pub fn scroll_to_bottom(&mut self) {
        let total = self.conversation_lines().len();
        let viewport = self.layout().viewport_height();
        self.scroll.end(total, viewport);
    }

    /// Append to the history, evicting the oldest past the cap, and follow
    /// the newest output.
    pub fn push_message(&mut self, message: ConversationMessage) {
        self.messages.push_back(message);
        while self.messages.len() > MAX_MESSAGES {
            self.messages.pop_front();
        }
        self.scroll_to_bottom();
    }

    pub fn push_error(&mut self, report: ErrorReport) {
        self.errors.push_back(report);
        while self.errors.len() > MAX_ERRORS {
            self.errors.pop_front();
        }
    }

    pub fn push_tool_activity(&mut self, activity: ToolActivity) {
        self.tool_activity.push_back(activity);
        while self.tool_activity.len() > MAX_TOOL_ACTIVITY {
            self.tool_activity.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::MarkdownRenderer;

    pub(crate) fn test_app() -> (App, mpsc::UnboundedReceiver<SessionCommand>) {
        let renderer = Arc::new(MarkdownRenderer::new().unwrap());
        let (tx, rx) = mpsc::unbounded_channel();
        (App::new(renderer, tx, SettingsInfo::default()), rx)
    }

    #[test]
    fn test_new_app_defaults() {
        let (app, _rx) = test_app();
        assert_eq!(app.view, View::Main);
        assert_eq!(app.input_state(), InputState::Inactive);
        assert!(app.messages.is_empty());
        assert!(app.needs_redraw);
        assert!(app.message_rx.is_some());
    }

    #[test]
    fn test_history_is_bounded() {
        let (mut app, _rx) = test_app();
        for i in 0..(MAX_MESSAGES + 20) {
            app.push_message(ConversationMessage::assistant(format!("m{}", i)));
        }
        assert_eq!(app.messages.len(), MAX_MESSAGES);
        assert_eq!(app.messages.front().unwrap().content, "m20");
        assert_eq!(
            app.messages.back().unwrap().content,
            format!("m{}", MAX_MESSAGES + 19)
        );
    }

    #[test]
    fn test_push_message_follows_bottom() {
        let (mut app, _rx) = test_app();
        for i in 0..40 {
            app.push_message(ConversationMessage::user(format!("line {}", i)));
            assert!(app.scroll.is_at_bottom());
        }
        assert!(app.scroll.offset() > 0);
    }

    #[test]
    fn test_side_lists_are_bounded() {
        let (mut app, _rx) = test_app();
        for i in 0..8 {
            app.push_error(ErrorReport::new(
                crate::events::ErrorSource::Stderr,
                format!("e{}", i),
            ));
        }
        assert_eq!(app.errors.len(), MAX_ERRORS);
        assert_eq!(app.errors.front().unwrap().message, "e3");
    }

    #[test]
    fn test_send_command_after_runner_stops() {
        let (mut app, rx) = test_app();
        drop(rx);
        app.is_loading = true;
        app.send_command(SessionCommand::NewConversation);
        assert!(!app.is_loading);
        assert!(app.status_message.is_some());
    }
}
