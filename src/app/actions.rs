//! Keyboard actions for the App.
//!
//! Keys become [`Command`]s through the registry; each command is one state
//! transition here.

use crossterm::event::KeyEvent;
use tracing::{debug, info};

use super::{App, View};
use crate::input::Command;
use crate::models::ConversationMessage;
use crate::session::SessionCommand;

impl App {
    /// Translate a key press and apply it.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let context = self.input_context();
        let command = self.registry().dispatch(key, &context);
        // A pending `d`/`c` only combines with the very next command character.
        if context.is_normal() && !matches!(command, Some(Command::NormalKey(_))) {
            self.editor.clear_pending();
        }
        if let Some(command) = command {
            self.execute_command(command);
        }
    }

    /// Apply one command to the application state.
    pub fn execute_command(&mut self, command: Command) {
        if command.marks_dirty() {
            self.mark_dirty();
        }
        match command {
            Command::Quit => {
                info!("quit requested");
                self.should_quit = true;
            }
            Command::NewConversation => {
                self.send_command(SessionCommand::NewConversation);
            }
            Command::ShowHelp => self.view = View::Help,
            Command::ShowSettings => self.view = View::Settings,
            Command::ShowMain => self.view = View::Main,

            Command::StartInput => {
                if self.view == View::Main && !self.input_active {
                    self.input_active = true;
                    self.editor.escape_to_normal();
                    self.editor.clear_pending();
                    self.status_message = None;
                }
            }
            Command::LeaveInput => {
                self.editor.clear_pending();
                self.input_active = false;
            }
            Command::EnterNormal => self.editor.escape_to_normal(),
            Command::Submit => self.submit(),

            Command::InsertChar(c) => self.editor.insert(c),
            Command::Backspace => self.editor.backspace(),
            Command::NormalKey(c) => {
                if !self.editor.normal_key(c) {
                    debug!("ignored normal-mode key {:?}", c);
                }
            }
            Command::MoveCursorLeft => self.editor.move_left(),
            Command::MoveCursorRight => self.editor.move_right(),

            Command::ScrollUp => {
                self.refresh_scroll_limits();
                self.scroll.scroll_up(1);
            }
            Command::ScrollDown => {
                self.refresh_scroll_limits();
                self.scroll.scroll_down(1);
            }
            Command::ScrollPageUp => {
                self.refresh_scroll_limits();
                let page = self.layout().viewport_height();
                self.scroll.page_up(page);
            }
            Command::ScrollPageDown => {
                self.refresh_scroll_limits();
                let page = self.layout().viewport_height();
                self.scroll.page_down(page);
            }
            Command::ScrollHome => self.scroll.home(),
            Command::ScrollEnd => self.scroll_to_bottom(),

            Command::Noop => {}
        }
    }

    /// Send the buffer to the agent.
    ///
    /// The prompt is echoed into the history before the agent answers, and
    /// the current session is resumed when there is one. Blank buffers are
    /// ignored.
    fn submit(&mut self) {
        let prompt = self.editor.text().trim().to_string();
        if prompt.is_empty() {
            return;
        }
        self.editor.reset();
        self.input_active = false;
        self.is_loading = true;
        self.push_message(ConversationMessage::user(prompt.clone()));

        let resume = self.session.id.is_some();
        info!(resume, "prompt submitted");
        self.send_command(SessionCommand::Execute { prompt, resume });
    }

    /// Record a new terminal size and re-clamp the scroll offset.
    pub fn handle_resize(&mut self, width: u16, height: u16) {
        self.terminal_width = width;
        self.terminal_height = height;
        self.refresh_scroll_limits();
        self.mark_dirty();
    }
}
