//! Errors from the markdown render service.

use std::fmt;

/// A render failure. Callers fall back to the unstyled literal text.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderError {
    /// The renderer cannot be constructed for the requested width.
    InvalidWidth(u16),

    /// The renderer produced no output for non-empty input.
    Empty,
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::InvalidWidth(w) => write!(f, "invalid render width {}", w),
            RenderError::Empty => write!(f, "renderer produced no output"),
        }
    }
}

impl std::error::Error for RenderError {}
