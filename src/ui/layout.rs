//! Dashboard layout arithmetic.
//!
//! All panel sizes derive from the terminal size through [`LayoutContext`],
//! so the state machine (scroll limits) and the renderer agree on the
//! conversation viewport without sharing render results.

use ratatui::layout::Rect;

use crate::domain::INDICATOR_LINES;

/// Rows taken by the title bar.
pub const HEADER_HEIGHT: u16 = 1;
/// Rows taken by the bordered input panel.
pub const INPUT_HEIGHT: u16 = 3;
/// Rows taken by the key hint line.
pub const FOOTER_HEIGHT: u16 = 1;
/// Columns taken by the side panel.
pub const SIDEBAR_WIDTH: u16 = 35;
/// Columns between the conversation panel edge and the wrap width
/// (borders, padding and the message icon).
pub const WRAP_MARGIN: u16 = 8;
/// A conversation panel shorter than this shows a size warning.
pub const MIN_PANEL_HEIGHT: u16 = 3;

/// The five regions of the main view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DashboardAreas {
    pub header: Rect,
    pub conversation: Rect,
    pub sidebar: Rect,
    pub input: Rect,
    pub footer: Rect,
}

/// Layout context holding terminal dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LayoutContext {
    /// Terminal width in columns
    pub width: u16,
    /// Terminal height in rows
    pub height: u16,
}

impl LayoutContext {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }

    /// Rows between the header and the input panel.
    pub fn body_height(&self) -> u16 {
        self.height
            .saturating_sub(HEADER_HEIGHT + INPUT_HEIGHT + FOOTER_HEIGHT)
    }

    pub fn sidebar_width(&self) -> u16 {
        SIDEBAR_WIDTH.min(self.width)
    }

    pub fn conversation_width(&self) -> u16 {
        self.width.saturating_sub(SIDEBAR_WIDTH)
    }

    /// Conversation rows inside the panel border.
    pub fn conversation_inner_height(&self) -> u16 {
        self.body_height().saturating_sub(2)
    }

    /// Rows available to message lines, after the indicator reservation.
    pub fn viewport_height(&self) -> usize {
        (self.conversation_inner_height() as usize)
            .saturating_sub(INDICATOR_LINES)
            .max(1)
    }

    /// Width messages are wrapped to.
    pub fn wrap_width(&self) -> usize {
        (self.conversation_width().saturating_sub(WRAP_MARGIN) as usize).max(1)
    }

    pub fn is_too_small(&self) -> bool {
        self.body_height() < MIN_PANEL_HEIGHT
    }

    /// Split `area` (the whole frame) into the dashboard regions.
    pub fn split(&self, area: Rect) -> DashboardAreas {
        let ctx = LayoutContext::new(area.width, area.height);
        let body = ctx.body_height();
        let conversation_width = ctx.conversation_width();

        let header = Rect::new(area.x, area.y, area.width, HEADER_HEIGHT.min(area.height));
        let body_y = area.y + header.height;
        let conversation = Rect::new(area.x, body_y, conversation_width, body);
        let sidebar = Rect::new(
            area.x + conversation_width,
            body_y,
            ctx.sidebar_width(),
            body,
        );
        let input_y = body_y + body;
        let input_height = INPUT_HEIGHT.min(area.height.saturating_sub(input_y - area.y));
        let input = Rect::new(area.x, input_y, area.width, input_height);
        let footer_y = input_y + input_height;
        let footer_height = FOOTER_HEIGHT.min(area.height.saturating_sub(footer_y - area.y));
        let footer = Rect::new(area.x, footer_y, area.width, footer_height);

        DashboardAreas {
            header,
            conversation,
            sidebar,
            input,
            footer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_terminal_metrics() {
        let ctx = LayoutContext::new(120, 40);
        assert_eq!(ctx.body_height(), 35);
        assert_eq!(ctx.conversation_width(), 85);
        assert_eq!(ctx.conversation_inner_height(), 33);
        assert_eq!(ctx.viewport_height(), 31);
        assert_eq!(ctx.wrap_width(), 77);
        assert!(!ctx.is_too_small());
    }

    #[test]
    fn test_tiny_terminal_has_floor_values() {
        let ctx = LayoutContext::new(20, 6);
        assert_eq!(ctx.body_height(), 1);
        assert_eq!(ctx.conversation_width(), 0);
        assert_eq!(ctx.sidebar_width(), 20);
        assert_eq!(ctx.viewport_height(), 1);
        assert_eq!(ctx.wrap_width(), 1);
        assert!(ctx.is_too_small());
    }

    #[test]
    fn test_split_tiles_the_frame() {
        let area = Rect::new(0, 0, 100, 30);
        let areas = LayoutContext::new(100, 30).split(area);
        assert_eq!(areas.header, Rect::new(0, 0, 100, 1));
        assert_eq!(areas.conversation, Rect::new(0, 1, 65, 25));
        assert_eq!(areas.sidebar, Rect::new(65, 1, 35, 25));
        assert_eq!(areas.input, Rect::new(0, 26, 100, 3));
        assert_eq!(areas.footer, Rect::new(0, 29, 100, 1));
    }

    #[test]
    fn test_split_never_exceeds_frame() {
        for height in 0..8 {
            let area = Rect::new(0, 0, 40, height);
            let areas = LayoutContext::new(40, height).split(area);
            for rect in [areas.header, areas.conversation, areas.input, areas.footer] {
                assert!(rect.y + rect.height <= height);
            }
        }
    }
}
