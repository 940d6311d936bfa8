//! Command definitions for keyboard input handling.
//!
//! Every key the dashboard reacts to is first translated into a [`Command`],
//! decoupling the key map from the state transitions it triggers.

/// Represents all actions that can be triggered from the keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    // =========================================================================
    // Global Commands
    // =========================================================================
    /// Quit the application (Ctrl+C, or q while input is inactive)
    Quit,
    /// Reset the session and usage counters (Ctrl+N)
    NewConversation,
    /// Switch to the help view (Ctrl+H, ?)
    ShowHelp,
    /// Switch to the settings view (Ctrl+S)
    ShowSettings,
    /// Switch back to the conversation view (Ctrl+M, Esc)
    ShowMain,

    // =========================================================================
    // Input Lifecycle
    // =========================================================================
    /// Activate the input panel in Normal mode (Enter)
    StartInput,
    /// Deactivate the input panel (Esc in Normal mode)
    LeaveInput,
    /// Return from Insert to Normal mode (Esc in Insert mode)
    EnterNormal,
    /// Send the buffer to the agent (Enter in Insert mode)
    Submit,

    // =========================================================================
    // Editing
    // =========================================================================
    /// Insert a character at the cursor (Insert mode)
    InsertChar(char),
    /// Delete the character before the cursor (Insert mode)
    Backspace,
    /// A Normal-mode command key, resolved by the line editor
    NormalKey(char),
    MoveCursorLeft,
    MoveCursorRight,

    // =========================================================================
    // Scrolling (input inactive)
    // =========================================================================
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,
    ScrollHome,
    ScrollEnd,

    /// No operation (used when key should be ignored)
    Noop,
}

impl Command {
    /// Returns true if this command should mark the app as dirty (needs redraw).
    pub fn marks_dirty(&self) -> bool {
        !matches!(self, Command::Noop)
    }

    pub fn is_quit(&self) -> bool {
        matches!(self, Command::Quit)
    }

    /// Returns a human-readable description of the command.
    pub fn description(&self) -> &'static str {
        match self {
            Command::Quit => "Quit",
            Command::NewConversation => "Start a new conversation",
            Command::ShowHelp => "Show help",
            Command::ShowSettings => "Show settings",
            Command::ShowMain => "Back to conversation",
            Command::StartInput => "Start typing a message",
            Command::LeaveInput => "Leave the input panel",
            Command::EnterNormal => "Return to Normal mode",
            Command::Submit => "Send message",
            Command::InsertChar(_) => "Insert character",
            Command::Backspace => "Delete previous character",
            Command::NormalKey(_) => "Normal-mode command",
            Command::MoveCursorLeft => "Move cursor left",
            Command::MoveCursorRight => "Move cursor right",
            Command::ScrollUp => "Scroll up one line",
            Command::ScrollDown => "Scroll down one line",
            Command::ScrollPageUp => "Scroll up one page",
            Command::ScrollPageDown => "Scroll down one page",
            Command::ScrollHome => "Jump to the oldest message",
            Command::ScrollEnd => "Jump to the newest message",
            Command::Noop => "No operation",
        }
    }
}
