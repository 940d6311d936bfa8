//! Domain objects for the dashboard.
//!
//! - [`LineEditor`] - modal prompt line editing
//! - [`ScrollState`] and [`compute_visible`] - the conversation viewport
//! - [`word_wrap`] - cell-aware greedy wrapping

pub mod editor;
pub mod scroll;
pub mod wrap;

pub use editor::{EditorMode, LineEditor};
pub use scroll::{
    clamp_offset, compute_visible, expand_messages, max_offset, prefixed, window,
    MessageFormatter, PlainFormatter, ScrollState, VisibleWindow, INDICATOR_LINES,
};
pub use wrap::{truncate, word_wrap};
