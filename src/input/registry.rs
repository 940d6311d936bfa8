//! Command registry for dispatching keyboard input to commands.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use super::command::Command;
use super::context::InputContext;
use super::keybindings::{KeyCombo, KeybindingConfig};
use crate::app::View;

/// Registry for dispatching key events to commands.
///
/// Priority:
/// 1. Ctrl+C, unconditionally
/// 2. Global bindings
/// 3. Insert mode: its bindings, then printable characters
/// 4. Normal mode: its bindings, then command characters
/// 5. Input inactive: view-independent bindings, then conversation bindings
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    config: KeybindingConfig,
}

impl CommandRegistry {
    pub fn new() -> Self {
        Self {
            config: KeybindingConfig::new(),
        }
    }

    pub fn with_config(config: KeybindingConfig) -> Self {
        Self { config }
    }

    /// Dispatches a key event to a command based on the current context.
    ///
    /// Returns `None` if the key has no meaning in this context.
    pub fn dispatch(&self, key: KeyEvent, context: &InputContext) -> Option<Command> {
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            return Some(Command::Quit);
        }

        let combo = KeyCombo::from_event(&key);
        if let Some(cmd) = self.config.get_global(&combo) {
            return Some(cmd);
        }

        if context.is_inserting() {
            if let Some(cmd) = self.config.get_insert(&combo) {
                return Some(cmd);
            }
            return printable(&key).map(Command::InsertChar);
        }

        if context.is_normal() {
            if let Some(cmd) = self.config.get_normal(&combo) {
                return Some(cmd);
            }
            return printable(&key).map(Command::NormalKey);
        }

        if let Some(cmd) = self.config.get_inactive(&combo) {
            return Some(cmd);
        }
        if context.view == View::Main {
            return self.config.get_main(&combo);
        }
        None
    }
}

/// The character of a key with no Control/Alt/Super modifier.
fn printable(key: &KeyEvent) -> Option<char> {
    match key.code {
        KeyCode::Char(c)
            if !key
                .modifiers
                .intersects(KeyModifiers::CONTROL | KeyModifiers::ALT | KeyModifiers::SUPER) =>
        {
            Some(c)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::EditorMode;

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ctrl(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL)
    }

    fn inactive(view: View) -> InputContext {
        InputContext::new(view, false, EditorMode::Normal)
    }

    fn active(mode: EditorMode) -> InputContext {
        InputContext::new(View::Main, true, mode)
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let registry = CommandRegistry::new();
        for ctx in [
            inactive(View::Main),
            inactive(View::Help),
            active(EditorMode::Normal),
            active(EditorMode::Insert),
        ] {
            assert_eq!(registry.dispatch(ctrl('c'), &ctx), Some(Command::Quit));
        }
    }

    #[test]
    fn test_global_view_switches() {
        let registry = CommandRegistry::new();
        let ctx = active(EditorMode::Insert);
        assert_eq!(registry.dispatch(ctrl('n'), &ctx), Some(Command::NewConversation));
        assert_eq!(registry.dispatch(ctrl('h'), &ctx), Some(Command::ShowHelp));
        assert_eq!(registry.dispatch(ctrl('s'), &ctx), Some(Command::ShowSettings));
        assert_eq!(registry.dispatch(ctrl('m'), &ctx), Some(Command::ShowMain));
    }

    #[test]
    fn test_insert_mode_keys() {
        let registry = CommandRegistry::new();
        let ctx = active(EditorMode::Insert);
        assert_eq!(
            registry.dispatch(key(KeyCode::Char('q')), &ctx),
            Some(Command::InsertChar('q'))
        );
        assert_eq!(
            registry.dispatch(KeyEvent::new(KeyCode::Char('A'), KeyModifiers::SHIFT), &ctx),
            Some(Command::InsertChar('A'))
        );
        assert_eq!(registry.dispatch(key(KeyCode::Enter), &ctx), Some(Command::Submit));
        assert_eq!(registry.dispatch(key(KeyCode::Esc), &ctx), Some(Command::EnterNormal));
        assert_eq!(
            registry.dispatch(key(KeyCode::Backspace), &ctx),
            Some(Command::Backspace)
        );
        assert_eq!(registry.dispatch(key(KeyCode::PageUp), &ctx), None);
    }

    #[test]
    fn test_normal_mode_keys() {
        let registry = CommandRegistry::new();
        let ctx = active(EditorMode::Normal);
        assert_eq!(
            registry.dispatch(key(KeyCode::Char('d')), &ctx),
            Some(Command::NormalKey('d'))
        );
        assert_eq!(
            registry.dispatch(key(KeyCode::Char('q')), &ctx),
            Some(Command::NormalKey('q'))
        );
        assert_eq!(registry.dispatch(key(KeyCode::Esc), &ctx), Some(Command::LeaveInput));
        assert_eq!(
            registry.dispatch(key(KeyCode::Left), &ctx),
            Some(Command::MoveCursorLeft)
        );
        assert_eq!(registry.dispatch(key(KeyCode::Up), &ctx), None);
    }

    #[test]
    fn test_inactive_main_keys() {
        let registry = CommandRegistry::new();
        let ctx = inactive(View::Main);
        assert_eq!(registry.dispatch(key(KeyCode::Enter), &ctx), Some(Command::StartInput));
        assert_eq!(registry.dispatch(key(KeyCode::Char('q')), &ctx), Some(Command::Quit));
        assert_eq!(registry.dispatch(key(KeyCode::Char('k')), &ctx), Some(Command::ScrollUp));
        assert_eq!(registry.dispatch(key(KeyCode::End), &ctx), Some(Command::ScrollEnd));
        assert_eq!(
            registry.dispatch(KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT), &ctx),
            Some(Command::ShowHelp)
        );
    }

    #[test]
    fn test_scroll_and_start_only_on_main() {
        let registry = CommandRegistry::new();
        let ctx = inactive(View::Help);
        assert_eq!(registry.dispatch(key(KeyCode::Enter), &ctx), None);
        assert_eq!(registry.dispatch(key(KeyCode::Down), &ctx), None);
        assert_eq!(registry.dispatch(key(KeyCode::Esc), &ctx), Some(Command::ShowMain));
    }
}
