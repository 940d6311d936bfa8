//! Input context for determining which commands are available.

use crate::app::View;
use crate::domain::EditorMode;

/// The slice of application state the key map depends on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputContext {
    pub view: View,
    /// Whether the input panel is active
    pub input_active: bool,
    /// Editor mode; only meaningful while input is active
    pub mode: EditorMode,
}

impl InputContext {
    pub fn new(view: View, input_active: bool, mode: EditorMode) -> Self {
        Self {
            view,
            input_active,
            mode,
        }
    }

    pub fn is_inserting(&self) -> bool {
        self.input_active && self.mode == EditorMode::Insert
    }

    pub fn is_normal(&self) -> bool {
        self.input_active && self.mode == EditorMode::Normal
    }
}
