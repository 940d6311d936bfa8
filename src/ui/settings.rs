//! Settings view: the active configuration, read-only.

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{COLOR_BORDER, COLOR_DIM, COLOR_LABEL};
use crate::app::SettingsInfo;

fn row(label: &str, value: &str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<18}", label), Style::default().fg(COLOR_LABEL)),
        Span::raw(value.to_string()),
    ])
}

pub fn settings_lines(settings: &SettingsInfo) -> Vec<Line<'static>> {
    vec![
        row("Agent binary", &settings.agent_bin),
        row("MCP config", &settings.mcp_config),
        row("Permission tool", &settings.permission_tool),
        row("Model", settings.model.as_deref().unwrap_or("default")),
        row("Log file", settings.log_file.as_deref().unwrap_or("none")),
        Line::default(),
        Line::from(Span::styled(
            "  Set with command-line flags or AGENTDECK_* environment variables.",
            Style::default().fg(COLOR_DIM),
        )),
    ]
}

pub fn render_settings(frame: &mut Frame, area: Rect, settings: &SettingsInfo) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Settings ");
    frame.render_widget(Paragraph::new(settings_lines(settings)).block(block), area);
}
