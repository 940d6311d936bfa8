//! Side panel: session, token usage, recent errors and tool activity.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{
    COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_LABEL, COLOR_TOOL_ERROR, COLOR_TOOL_RUNNING,
    COLOR_TOOL_SUCCESS,
};
use crate::app::App;
use crate::domain::truncate;
use crate::session::ToolStatus;

/// Characters of the session id shown.
const SESSION_ID_CHARS: usize = 18;
/// Characters of each error message shown.
const ERROR_CHARS: usize = 25;
/// Entries shown per list section.
const RECENT_ENTRIES: usize = 3;

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(COLOR_LABEL).add_modifier(Modifier::BOLD),
    ))
}

fn field(label: &str, value: String) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!(" {}: ", label), Style::default().fg(COLOR_DIM)),
        Span::raw(value),
    ])
}

/// Build the side panel lines.
pub fn sidebar_lines(app: &App) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    lines.push(heading("Session Info"));
    let id = app
        .session
        .id
        .as_deref()
        .map(|id| truncate(id, SESSION_ID_CHARS))
        .unwrap_or_else(|| "none".to_string());
    lines.push(field("ID", id));
    lines.push(field(
        "Model",
        app.session
            .model
            .clone()
            .or_else(|| app.settings.model.clone())
            .unwrap_or_else(|| "default".to_string()),
    ));
    lines.push(field("Turns", app.stats.turns.to_string()));
    lines.push(field("Cost", format!("${:.4}", app.stats.cost_usd)));
    lines.push(Line::default());

    let usage = app.stats.usage;
    lines.push(heading("Token Usage"));
    lines.push(field("Input", usage.input_tokens.to_string()));
    lines.push(field(
        "Cache Creation",
        usage.cache_creation_input_tokens.to_string(),
    ));
    lines.push(field("Cache Read", usage.cache_read_input_tokens.to_string()));
    lines.push(field("Output", usage.output_tokens.to_string()));
    lines.push(field("Total", usage.total().to_string()));
    lines.push(Line::default());

    lines.push(heading("Recent Errors"));
    if app.errors.is_empty() {
        lines.push(Line::from(Span::styled(" None", Style::default().fg(COLOR_DIM))));
    }
    for report in app.errors.iter().rev().take(RECENT_ENTRIES) {
        lines.push(Line::from(Span::styled(
            format!(" {}", truncate(&report.message, ERROR_CHARS)),
            Style::default().fg(COLOR_ERROR),
        )));
    }
    lines.push(Line::default());

    lines.push(heading("Tool Activity"));
    if app.tool_activity.is_empty() {
        lines.push(Line::from(Span::styled(" None", Style::default().fg(COLOR_DIM))));
    }
    for activity in app.tool_activity.iter().rev().take(RECENT_ENTRIES) {
        let color = match activity.status {
            ToolStatus::Starting | ToolStatus::Running => COLOR_TOOL_RUNNING,
            ToolStatus::Completed => COLOR_TOOL_SUCCESS,
            ToolStatus::Failed => COLOR_TOOL_ERROR,
        };
        lines.push(Line::from(Span::styled(
            format!(" {}", activity.display()),
            Style::default().fg(color),
        )));
    }

    lines
}

pub fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Status ");
    frame.render_widget(Paragraph::new(sidebar_lines(app)).block(block), area);
}
