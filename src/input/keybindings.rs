//! Default keybindings for the dashboard.
//!
//! Maps key combinations to commands, grouped by the state in which they
//! apply. [`super::CommandRegistry`] decides which group is consulted.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

use super::command::Command;

/// Represents a key combination (key code + modifiers).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyCombo {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

impl KeyCombo {
    /// Creates a new key combo with the given code and modifiers.
    pub const fn new(code: KeyCode, modifiers: KeyModifiers) -> Self {
        Self { code, modifiers }
    }

    /// Creates a key combo with no modifiers.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::NONE)
    }

    /// Creates a key combo with Control modifier.
    pub const fn ctrl(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::CONTROL)
    }

    /// Creates a key combo with Shift modifier.
    pub const fn shift(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::SHIFT)
    }

    /// Normalize a key event for lookup.
    ///
    /// Shift is already folded into the character for `Char` keys (`?`, `A`),
    /// so it is dropped there.
    pub fn from_event(key: &KeyEvent) -> Self {
        let modifiers = match key.code {
            KeyCode::Char(_) => key.modifiers.difference(KeyModifiers::SHIFT),
            _ => key.modifiers,
        };
        Self::new(key.code, modifiers)
    }
}

/// Keybinding configuration for the application.
#[derive(Debug, Clone)]
pub struct KeybindingConfig {
    /// Always active
    pub global: HashMap<KeyCombo, Command>,
    /// Active while the editor is in Insert mode
    pub insert: HashMap<KeyCombo, Command>,
    /// Active while the editor is in Normal mode
    pub normal: HashMap<KeyCombo, Command>,
    /// Active while input is inactive, in any view
    pub inactive: HashMap<KeyCombo, Command>,
    /// Active while input is inactive on the conversation view
    pub main: HashMap<KeyCombo, Command>,
}

impl Default for KeybindingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl KeybindingConfig {
    /// Creates a new keybinding configuration with default bindings.
    pub fn new() -> Self {
        let mut config = Self {
            global: HashMap::new(),
            insert: HashMap::new(),
            normal: HashMap::new(),
            inactive: HashMap::new(),
            main: HashMap::new(),
        };

        config.setup_global_bindings();
        config.setup_insert_bindings();
        config.setup_normal_bindings();
        config.setup_inactive_bindings();
        config.setup_main_bindings();

        config
    }

    fn setup_global_bindings(&mut self) {
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('c')), Command::Quit);
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('n')), Command::NewConversation);
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('h')), Command::ShowHelp);
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('s')), Command::ShowSettings);
        self.global
            .insert(KeyCombo::ctrl(KeyCode::Char('m')), Command::ShowMain);
    }

    /// Printable characters are handled by the registry, not listed here.
    fn setup_insert_bindings(&mut self) {
        self.insert
            .insert(KeyCombo::plain(KeyCode::Esc), Command::EnterNormal);
        self.insert
            .insert(KeyCombo::plain(KeyCode::Enter), Command::Submit);
        self.insert
            .insert(KeyCombo::plain(KeyCode::Backspace), Command::Backspace);
        self.insert
            .insert(KeyCombo::plain(KeyCode::Left), Command::MoveCursorLeft);
        self.insert
            .insert(KeyCombo::plain(KeyCode::Right), Command::MoveCursorRight);
    }

    fn setup_normal_bindings(&mut self) {
        self.normal
            .insert(KeyCombo::plain(KeyCode::Esc), Command::LeaveInput);
        self.normal
            .insert(KeyCombo::plain(KeyCode::Left), Command::MoveCursorLeft);
        self.normal
            .insert(KeyCombo::plain(KeyCode::Right), Command::MoveCursorRight);
    }

    fn setup_inactive_bindings(&mut self) {
        self.inactive
            .insert(KeyCombo::plain(KeyCode::Esc), Command::ShowMain);
        self.inactive
            .insert(KeyCombo::plain(KeyCode::Char('q')), Command::Quit);
        self.inactive
            .insert(KeyCombo::plain(KeyCode::Char('?')), Command::ShowHelp);
    }

    fn setup_main_bindings(&mut self) {
        let bindings = [
            (KeyCode::Enter, Command::StartInput),
            (KeyCode::Up, Command::ScrollUp),
            (KeyCode::Char('k'), Command::ScrollUp),
            (KeyCode::Down, Command::ScrollDown),
            (KeyCode::Char('j'), Command::ScrollDown),
            (KeyCode::PageUp, Command::ScrollPageUp),
            (KeyCode::PageDown, Command::ScrollPageDown),
            (KeyCode::Home, Command::ScrollHome),
            (KeyCode::End, Command::ScrollEnd),
        ];
        for (code, command) in bindings {
            self.main.insert(KeyCombo::plain(code), command);
        }
    }

    pub fn get_global(&self, combo: &KeyCombo) -> Option<Command> {
        self.global.get(combo).copied()
    }

    pub fn get_insert(&self, combo: &KeyCombo) -> Option<Command> {
        self.insert.get(combo).copied()
    }

    pub fn get_normal(&self, combo: &KeyCombo) -> Option<Command> {
        self.normal.get(combo).copied()
    }

    pub fn get_inactive(&self, combo: &KeyCombo) -> Option<Command> {
        self.inactive.get(combo).copied()
    }

    pub fn get_main(&self, combo: &KeyCombo) -> Option<Command> {
        self.main.get(combo).copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_combo_constructors() {
        let combo = KeyCombo::ctrl(KeyCode::Char('n'));
        assert_eq!(combo.code, KeyCode::Char('n'));
        assert_eq!(combo.modifiers, KeyModifiers::CONTROL);
        assert_eq!(KeyCombo::plain(KeyCode::Esc).modifiers, KeyModifiers::NONE);
    }

    #[test]
    fn test_from_event_drops_shift_on_chars() {
        let key = KeyEvent::new(KeyCode::Char('?'), KeyModifiers::SHIFT);
        assert_eq!(KeyCombo::from_event(&key), KeyCombo::plain(KeyCode::Char('?')));

        let key = KeyEvent::new(KeyCode::Up, KeyModifiers::SHIFT);
        assert_eq!(KeyCombo::from_event(&key), KeyCombo::shift(KeyCode::Up));
    }

    #[test]
    fn test_default_bindings() {
        let config = KeybindingConfig::new();
        assert_eq!(
            config.get_global(&KeyCombo::ctrl(KeyCode::Char('c'))),
            Some(Command::Quit)
        );
        assert_eq!(
            config.get_insert(&KeyCombo::plain(KeyCode::Enter)),
            Some(Command::Submit)
        );
        assert_eq!(
            config.get_normal(&KeyCombo::plain(KeyCode::Esc)),
            Some(Command::LeaveInput)
        );
        assert_eq!(
            config.get_main(&KeyCombo::plain(KeyCode::Char('j'))),
            Some(Command::ScrollDown)
        );
        assert_eq!(config.get_main(&KeyCombo::plain(KeyCode::Char('x'))), None);
    }
}
