//! Type definitions for the application state.
//!
//! - [`View`] - Which view is currently displayed
//! - [`InputState`] - Input panel state on the conversation view
//! - [`SettingsInfo`] - Read-only configuration shown on the settings view

/// Represents which view is currently active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum View {
    #[default]
    Main,
    Help,
    Settings,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Main => "Conversation",
            View::Help => "Help",
            View::Settings => "Settings",
        }
    }
}

/// Input panel state, derived from the input flag and the editor mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputState {
    Inactive,
    Normal,
    Insert,
}

/// Active configuration, captured at startup.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SettingsInfo {
    pub agent_bin: String,
    pub mcp_config: String,
    pub permission_tool: String,
    pub model: Option<String>,
    pub log_file: Option<String>,
}
