//! Style constants for markdown rendering

use ratatui::style::{Color, Modifier, Style};

/// Style for code blocks - gray/dim color
pub const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::DarkGray);

/// Style for inline code - cyan color
pub const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

/// Style for headings - cyan and bold
pub const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Style for links - blue and underlined
pub const STYLE_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);

/// Style for block quote bars and rules
pub const STYLE_QUOTE: Style = Style::new().fg(Color::DarkGray);

/// Style for table borders
pub const STYLE_TABLE_BORDER: Style = Style::new().fg(Color::DarkGray);
