//! Input panel rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_LOADING, COLOR_MODE_INSERT, COLOR_MODE_NORMAL,
};
use crate::app::{App, InputState};

pub const INPUT_HINT: &str = "Press Enter to start typing your message...";

/// The single content line of the input panel.
pub fn input_line(app: &App) -> Line<'static> {
    if app.is_loading {
        return Line::from(Span::styled(
            "⏳ Processing...",
            Style::default().fg(COLOR_LOADING),
        ));
    }

    let state = app.input_state();
    if state == InputState::Inactive {
        let text = app
            .status_message
            .clone()
            .unwrap_or_else(|| INPUT_HINT.to_string());
        return Line::from(Span::styled(text, Style::default().fg(COLOR_DIM)));
    }

    let mode_color = match state {
        InputState::Insert => COLOR_MODE_INSERT,
        _ => COLOR_MODE_NORMAL,
    };
    let (before, under, after) = app.editor.split_at_cursor();
    let mut spans = vec![
        Span::styled(
            app.editor.mode_label(),
            Style::default().fg(mode_color).add_modifier(Modifier::BOLD),
        ),
        Span::raw(" "),
        Span::raw(before),
    ];
    match (state, under) {
        (InputState::Insert, under) => {
            spans.push(Span::styled("│", Style::default().fg(COLOR_ACCENT)));
            if let Some(c) = under {
                spans.push(Span::raw(c.to_string()));
            }
        }
        (_, Some(c)) => {
            spans.push(Span::styled(
                c.to_string(),
                Style::default().add_modifier(Modifier::REVERSED),
            ));
        }
        (_, None) => spans.push(Span::styled("█", Style::default().fg(COLOR_ACCENT))),
    }
    spans.push(Span::raw(after));
    Line::from(spans)
}

pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.input_active {
        COLOR_ACCENT
    } else {
        COLOR_BORDER
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(" Message ");
    frame.render_widget(Paragraph::new(input_line(app)).block(block), area);
}
