//! Conversation panel rendering.

use ratatui::{
    layout::Rect,
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tracing::debug;

use super::theme::{
    COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_SYSTEM, COLOR_TOOL_ICON, COLOR_USER,
};
use crate::app::App;
use crate::domain::{compute_visible, word_wrap, MessageFormatter};
use crate::markdown::RenderService;
use crate::models::{ConversationMessage, MessageKind};

/// Indent for every display line after a message's first.
const CONTINUATION_INDENT: &str = "   ";

/// Styles messages by kind; assistant text goes through the render service
/// and falls back to plain wrapping when rendering fails.
pub struct ConversationFormatter<'a> {
    renderer: &'a dyn RenderService,
}

impl<'a> ConversationFormatter<'a> {
    pub fn new(renderer: &'a dyn RenderService) -> Self {
        Self { renderer }
    }

    fn style_for(kind: MessageKind) -> Style {
        match kind {
            MessageKind::User => Style::default().fg(COLOR_USER),
            MessageKind::AssistantText => Style::default(),
            MessageKind::ToolUse => Style::default().fg(COLOR_TOOL_ICON),
            MessageKind::System => Style::default()
                .fg(COLOR_SYSTEM)
                .add_modifier(Modifier::ITALIC),
            MessageKind::Error => Style::default().fg(COLOR_ERROR),
        }
    }

    fn plain(&self, message: &ConversationMessage, width: usize) -> Vec<Line<'static>> {
        let style = Self::style_for(message.kind);
        word_wrap(&message.content, width)
            .into_iter()
            .enumerate()
            .map(|(i, text)| {
                let lead = if i == 0 {
                    message.kind.prefix()
                } else {
                    CONTINUATION_INDENT
                };
                Line::from(vec![Span::raw(lead), Span::styled(text, style)])
            })
            .collect()
    }
}

impl MessageFormatter for ConversationFormatter<'_> {
    fn format(&self, message: &ConversationMessage, width: usize) -> Vec<Line<'static>> {
        if message.kind != MessageKind::AssistantText {
            return self.plain(message, width);
        }
        let render_width = width.min(u16::MAX as usize) as u16;
        match self.renderer.render(&message.content, render_width) {
            Ok(rendered) => rendered
                .into_iter()
                .enumerate()
                .map(|(i, line)| {
                    let lead = if i == 0 {
                        message.kind.prefix()
                    } else {
                        CONTINUATION_INDENT
                    };
                    let mut spans = Vec::with_capacity(line.spans.len() + 1);
                    spans.push(Span::raw(lead));
                    spans.extend(line.spans);
                    Line::from(spans).style(line.style)
                })
                .collect(),
            Err(e) => {
                debug!("markdown render failed, showing literal text: {}", e);
                self.plain(message, width)
            }
        }
    }
}

/// Render the bordered conversation panel with its scroll indicator.
pub fn render_conversation(frame: &mut Frame, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(COLOR_BORDER))
        .title(" Conversation ");

    let inner = block.inner(area);
    frame.render_widget(block, area);

    let layout = app.layout();
    let formatter = ConversationFormatter::new(app.renderer());
    let visible = compute_visible(
        &app.messages,
        layout.wrap_width(),
        layout.viewport_height(),
        app.scroll.offset(),
        &formatter,
    );

    let mut lines = visible.lines.clone();
    if visible.needs_indicator {
        lines.push(Line::default());
        lines.push(Line::from(Span::styled(
            visible.indicator(),
            Style::default().fg(COLOR_DIM),
        )));
    }

    let padded = Rect {
        x: inner.x.saturating_add(1),
        width: inner.width.saturating_sub(1),
        ..inner
    };
    frame.render_widget(Paragraph::new(lines), padded);
}
