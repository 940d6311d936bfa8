//! Help view: every keyboard shortcut, grouped by when it applies.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_LABEL};

const SECTIONS: &[(&str, &[(&str, &str)])] = &[
    (
        "Global",
        &[
            ("Ctrl+C", "Quit"),
            ("q", "Quit (input inactive)"),
            ("Ctrl+N", "New conversation"),
            ("Ctrl+H / ?", "Help"),
            ("Ctrl+S", "Settings"),
            ("Ctrl+M / Esc", "Back to conversation"),
        ],
    ),
    (
        "Conversation (input inactive)",
        &[
            ("Enter", "Start typing"),
            ("Up / k", "Scroll up"),
            ("Down / j", "Scroll down"),
            ("PageUp / PageDown", "Scroll one page"),
            ("Home / End", "Oldest / newest message"),
        ],
    ),
    (
        "Normal mode",
        &[
            ("i / a / A", "Insert at, after cursor, at end"),
            ("x", "Delete character"),
            ("dd / dw", "Delete line / word"),
            ("cc / cw", "Change line / word"),
            ("w / b", "Next / previous word"),
            ("0 / $", "Line start / end"),
            ("h l / Left Right", "Move cursor"),
            ("Esc", "Leave input"),
        ],
    ),
    (
        "Insert mode",
        &[
            ("Enter", "Send message"),
            ("Backspace", "Delete previous character"),
            ("Left / Right", "Move cursor"),
            ("Esc", "Normal mode"),
        ],
    ),
];

pub fn help_lines() -> Vec<Line<'static>> {
    let mut lines = Vec::new();
    for (i, (title, keys)) in SECTIONS.iter().enumerate() {
        if i > 0 {
            lines.push(Line::default());
        }
        lines.push(Line::from(Span::styled(
            *title,
            Style::default().fg(COLOR_LABEL).add_modifier(Modifier::BOLD),
        )));
        for (key, action) in keys.iter() {
            lines.push(Line::from(vec![
                Span::styled(format!("  {:<20}", key), Style::default().fg(COLOR_ACCENT)),
                Span::raw(*action),
            ]));
        }
    }
    lines
}

pub fn render_help(frame: &mut Frame, area: Rect) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Help ");
    frame.render_widget(
        Paragraph::new(help_lines())
            .block(block)
            .wrap(Wrap { trim: false }),
        area,
    );
}
