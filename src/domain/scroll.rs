//! Scroll/viewport engine.
//!
//! Maps a variable-height message history onto a fixed number of terminal
//! rows. [`compute_visible`] is a pure function of the history, the content
//! width, the viewport height and a requested offset; [`ScrollState`] keeps
//! the operator's offset between frames.

use ratatui::text::Line;

use super::wrap::word_wrap;
use crate::models::ConversationMessage;

/// Rows under the viewport reserved for the scroll indicator.
pub const INDICATOR_LINES: usize = 2;

/// Turns one message into display lines.
pub trait MessageFormatter {
    fn format(&self, message: &ConversationMessage, width: usize) -> Vec<Line<'static>>;
}

/// Unstyled formatting: kind icon plus greedy word wrap.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlainFormatter;

impl MessageFormatter for PlainFormatter {
    fn format(&self, message: &ConversationMessage, width: usize) -> Vec<Line<'static>> {
        prefixed(message.kind.prefix(), word_wrap(&message.content, width))
            .into_iter()
            .map(Line::from)
            .collect()
    }
}

/// Put `prefix` on the first line and indent the rest to match.
pub fn prefixed(prefix: &str, lines: Vec<String>) -> Vec<String> {
    lines
        .into_iter()
        .enumerate()
        .map(|(i, line)| {
            if i == 0 {
                format!("{}{}", prefix, line)
            } else {
                format!("   {}", line)
            }
        })
        .collect()
}

/// Expand messages into display lines with one blank line between
/// consecutive messages.
pub fn expand_messages<'a, I, F>(messages: I, width: usize, formatter: &F) -> Vec<Line<'static>>
where
    I: IntoIterator<Item = &'a ConversationMessage>,
    F: MessageFormatter + ?Sized,
{
    let mut lines = Vec::new();
    for (i, message) in messages.into_iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.extend(formatter.format(message, width));
    }
    lines
}

pub fn max_offset(total_lines: usize, viewport_height: usize) -> usize {
    total_lines.saturating_sub(viewport_height)
}

pub fn clamp_offset(requested: usize, total_lines: usize, viewport_height: usize) -> usize {
    requested.min(max_offset(total_lines, viewport_height))
}

/// The slice of the history that fits in the viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct VisibleWindow {
    /// Exactly `viewport_height` lines, blank-padded.
    pub lines: Vec<Line<'static>>,
    pub offset: usize,
    pub max_offset: usize,
    pub total_lines: usize,
    pub needs_indicator: bool,
}

impl VisibleWindow {
    /// `[Lines a-b of n]` with a direction hint.
    pub fn indicator(&self) -> String {
        let shown = self.lines.len().min(self.total_lines.saturating_sub(self.offset));
        let first = self.offset + 1;
        let last = self.offset + shown;
        let hint = if self.offset == 0 {
            "↓ scroll down"
        } else if self.offset >= self.max_offset {
            "↑ scroll up"
        } else {
            "↑↓ scroll"
        };
        format!("[Lines {}-{} of {}] {}", first, last, self.total_lines, hint)
    }
}

/// Cut a window of `viewport_height` lines starting at the clamped offset.
pub fn window(
    mut lines: Vec<Line<'static>>,
    viewport_height: usize,
    requested_offset: usize,
) -> VisibleWindow {
    let total_lines = lines.len();
    let max = max_offset(total_lines, viewport_height);
    let offset = requested_offset.min(max);
    let needs_indicator = total_lines > viewport_height;

    if needs_indicator {
        lines.drain(..offset);
        lines.truncate(viewport_height);
    }
    lines.resize(viewport_height, Line::default());

    VisibleWindow {
        lines,
        offset,
        max_offset: max,
        total_lines,
        needs_indicator,
    }
}

/// Compute the visible slice of `messages` for one frame.
pub fn compute_visible<'a, I, F>(
    messages: I,
    content_width: usize,
    viewport_height: usize,
    requested_offset: usize,
    formatter: &F,
) -> VisibleWindow
where
    I: IntoIterator<Item = &'a ConversationMessage>,
    F: MessageFormatter + ?Sized,
{
    window(
        expand_messages(messages, content_width, formatter),
        viewport_height,
        requested_offset,
    )
}

/// Scroll offset kept between frames. Offset 0 shows the oldest line.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScrollState {
    offset: usize,
    max_offset: usize,
}

impl ScrollState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn offset(&self) -> usize {
        self.offset
    }

    pub fn max_offset(&self) -> usize {
        self.max_offset
    }

    /// Recompute the limit from fresh content size and clamp the offset.
    pub fn update_limits(&mut self, total_lines: usize, viewport_height: usize) {
        self.max_offset = max_offset(total_lines, viewport_height);
        self.offset = self.offset.min(self.max_offset);
    }

    /// Set the offset, clamping to the valid range.
    pub fn set_offset(&mut self, offset: usize) {
        self.offset = offset.min(self.max_offset);
    }

    pub fn scroll_up(&mut self, lines: usize) {
        self.set_offset(self.offset.saturating_sub(lines));
    }

    pub fn scroll_down(&mut self, lines: usize) {
        self.set_offset(self.offset.saturating_add(lines));
    }

    /// Move one viewport towards older content.
    pub fn page_up(&mut self, viewport_height: usize) {
        self.scroll_up(viewport_height.max(1));
    }

    /// Move one viewport towards newer content.
    pub fn page_down(&mut self, viewport_height: usize) {
        self.scroll_down(viewport_height.max(1));
    }

    pub fn home(&mut self) {
        self.offset = 0;
    }

    /// Jump to the newest content using a freshly computed limit.
    pub fn end(&mut self, total_lines: usize, viewport_height: usize) {
        self.update_limits(total_lines, viewport_height);
        self.offset = self.max_offset;
    }

    pub fn is_at_bottom(&self) -> bool {
        self.offset >= self.max_offset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn messages(n: usize) -> Vec<ConversationMessage> {
        (0..n)
            .map(|i| ConversationMessage::assistant(format!("message {}", i)))
            .collect()
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_expand_inserts_separators_between_messages() {
        let lines = expand_messages(&messages(3), 80, &PlainFormatter);
        assert_eq!(lines.len(), 5);
        assert_eq!(text(&lines[0]), "🤖 message 0");
        assert_eq!(text(&lines[1]), "");
        assert_eq!(text(&lines[4]), "🤖 message 2");
    }

    #[test]
    fn test_short_content_is_padded() {
        let window = compute_visible(&messages(2), 80, 10, 5, &PlainFormatter);
        assert_eq!(window.lines.len(), 10);
        assert_eq!(window.total_lines, 3);
        assert_eq!(window.offset, 0);
        assert_eq!(window.max_offset, 0);
        assert!(!window.needs_indicator);
        assert_eq!(text(&window.lines[2]), "🤖 message 1");
    }

    #[test]
    fn test_window_slices_at_offset() {
        let window = compute_visible(&messages(10), 80, 4, 2, &PlainFormatter);
        // 10 messages + 9 separators
        assert_eq!(window.total_lines, 19);
        assert_eq!(window.max_offset, 15);
        assert!(window.needs_indicator);
        assert_eq!(window.lines.len(), 4);
        assert_eq!(text(&window.lines[0]), "🤖 message 1");
        assert_eq!(window.indicator(), "[Lines 3-6 of 19] ↑↓ scroll");
    }

    #[test]
    fn test_requested_offset_beyond_max_is_clamped() {
        let window = compute_visible(&messages(10), 80, 4, 1000, &PlainFormatter);
        assert_eq!(window.offset, 15);
        assert_eq!(text(&window.lines[3]), "🤖 message 9");
        assert!(window.indicator().ends_with("↑ scroll up"));
    }

    #[test]
    fn test_viewport_exactness() {
        for count in 0..15 {
            let history = messages(count);
            for width in [1, 5, 40] {
                for height in 1..12 {
                    for offset in [0, 1, 3, 7, 50] {
                        let window = compute_visible(&history, width, height, offset, &PlainFormatter);
                        assert_eq!(window.lines.len(), height);
                        assert!(window.offset <= window.max_offset);
                    }
                }
            }
        }
    }

    #[test]
    fn test_clamp_idempotent() {
        for total in 0..30 {
            for viewport in 1..10 {
                for requested in 0..40 {
                    let once = clamp_offset(requested, total, viewport);
                    assert_eq!(clamp_offset(once, total, viewport), once);
                }
            }
        }
    }

    #[test]
    fn test_scroll_state_paging() {
        let mut state = ScrollState::new();
        state.update_limits(100, 10);
        assert_eq!(state.max_offset(), 90);

        state.page_down(10);
        assert_eq!(state.offset(), 10);
        state.page_up(10);
        state.page_up(10);
        assert_eq!(state.offset(), 0);

        state.set_offset(500);
        assert_eq!(state.offset(), 90);
        assert!(state.is_at_bottom());
        state.scroll_down(1);
        assert_eq!(state.offset(), 90);
        state.home();
        assert_eq!(state.offset(), 0);
    }

    #[test]
    fn test_end_uses_fresh_limit() {
        let mut state = ScrollState::new();
        state.update_limits(20, 10);
        // History grew since the last render.
        state.end(50, 10);
        assert_eq!(state.offset(), 40);
    }

    #[test]
    fn test_shrinking_content_reclamps() {
        let mut state = ScrollState::new();
        state.end(50, 10);
        state.update_limits(12, 10);
        assert_eq!(state.offset(), 2);
    }
}
