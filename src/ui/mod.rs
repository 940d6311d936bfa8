//! UI rendering for the dashboard.
//!
//! The main view stacks a title bar, the conversation panel next to a
//! status side panel, the input panel and a key hint line. Help and
//! Settings replace the body and input panel. All sizes come from
//! [`LayoutContext`]; rendering only reads [`App`].

pub mod conversation;
pub mod help;
pub mod input;
pub mod layout;
pub mod settings;
pub mod sidebar;
pub mod theme;

pub use layout::{DashboardAreas, LayoutContext};

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

use crate::app::{App, InputState, View};
use crate::domain::truncate;
use layout::MIN_PANEL_HEIGHT;
use theme::{COLOR_DIM, COLOR_ERROR, COLOR_HEADER};

// ============================================================================
// Main UI Rendering
// ============================================================================

/// Render the UI based on the current view
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    let areas = app.layout().split(area);

    frame.render_widget(Paragraph::new(header_line(app)), areas.header);

    match app.view {
        View::Main if areas.conversation.height < MIN_PANEL_HEIGHT => {
            let warning = Paragraph::new(Line::from(Span::styled(
                "Window too small",
                Style::default().fg(COLOR_ERROR),
            )));
            frame.render_widget(warning, full_body(&areas));
        }
        View::Main => {
            conversation::render_conversation(frame, areas.conversation, app);
            sidebar::render_sidebar(frame, areas.sidebar, app);
            input::render_input(frame, areas.input, app);
        }
        View::Help => help::render_help(frame, full_body(&areas)),
        View::Settings => settings::render_settings(frame, full_body(&areas), &app.settings),
    }

    frame.render_widget(Paragraph::new(footer_line(app)), areas.footer);
}

/// Body and input panel merged into one region.
fn full_body(areas: &DashboardAreas) -> Rect {
    Rect {
        x: areas.header.x,
        y: areas.conversation.y,
        width: areas.header.width,
        height: areas.conversation.height + areas.input.height,
    }
}

pub fn header_line(app: &App) -> Line<'static> {
    let session = app
        .session
        .id
        .as_deref()
        .map(|id| truncate(id, 18))
        .unwrap_or_else(|| "no session".to_string());
    Line::from(vec![
        Span::styled(
            " agentdeck ",
            Style::default()
                .fg(COLOR_HEADER)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("│ {} │ {}", app.view.title(), session),
            Style::default().fg(COLOR_DIM),
        ),
    ])
}

pub fn footer_line(app: &App) -> Line<'static> {
    let hints = match (app.view, app.input_state()) {
        (View::Main, InputState::Inactive) => {
            "Enter: type │ ↑↓/jk: scroll │ Ctrl+N: new │ ?: help │ q: quit"
        }
        (View::Main, InputState::Normal) => "i/a/A: insert │ dd/cw/x: edit │ Esc: leave input",
        (View::Main, InputState::Insert) => "Enter: send │ Esc: normal mode",
        _ => "Esc: back │ Ctrl+C: quit",
    };
    Line::from(Span::styled(format!(" {}", hints), Style::default().fg(COLOR_DIM)))
}
