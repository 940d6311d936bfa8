//! Markdown to styled, width-wrapped terminal lines.

use pulldown_cmark::{Event, HeadingLevel, Options, Parser, Tag, TagEnd};
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use super::styles::{
    STYLE_CODE_BLOCK, STYLE_HEADING, STYLE_INLINE_CODE, STYLE_LINK, STYLE_QUOTE,
    STYLE_TABLE_BORDER,
};
use crate::error::RenderError;

/// A source line before wrapping.
#[derive(Debug, Clone)]
enum Block {
    /// Flowing text, wrapped to the width. `first` prefixes the first
    /// wrapped line and `rest` the continuations.
    Text {
        first: String,
        rest: String,
        spans: Vec<Span<'static>>,
    },
    /// Code and tables: never reflowed, only split when too wide.
    Pre { prefix: String, spans: Vec<Span<'static>> },
    Rule,
    Blank,
}

#[derive(Default)]
struct Builder {
    blocks: Vec<Block>,
    spans: Vec<Span<'static>>,
    style_stack: Vec<Style>,
    /// `None` for bullet lists, `Some(next number)` for ordered ones
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    quote_depth: usize,
    in_code_block: bool,
    link_url: Option<String>,
    link_text: String,
    table: Option<TableState>,
}

#[derive(Default)]
struct TableState {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

impl Builder {
    fn style(&self) -> Style {
        self.style_stack.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.style_stack.push(next);
    }

    fn quote_prefix(&self) -> String {
        "│ ".repeat(self.quote_depth)
    }

    fn list_indent(&self) -> String {
        "  ".repeat(self.lists.len().saturating_sub(1))
    }

    /// Blank line between top-level blocks.
    fn separate(&mut self) {
        if self.lists.is_empty() && !matches!(self.blocks.last(), None | Some(Block::Blank)) {
            self.blocks.push(Block::Blank);
        }
    }

    fn flush(&mut self) {
        if self.spans.is_empty() && self.item_marker.is_none() {
            return;
        }
        let quote = self.quote_prefix();
        let indent = self.list_indent();
        let (first, rest) = match self.item_marker.take() {
            Some(marker) => {
                let pad = " ".repeat(marker.width());
                (
                    format!("{}{}{}", quote, indent, marker),
                    format!("{}{}{}", quote, indent, pad),
                )
            }
            None if !self.lists.is_empty() => {
                // Continuation paragraph inside a list item.
                let pad = format!("{}  ", indent);
                (format!("{}{}", quote, pad), format!("{}{}", quote, pad))
            }
            None => (quote.clone(), quote),
        };
        self.blocks.push(Block::Text {
            first,
            rest,
            spans: std::mem::take(&mut self.spans),
        });
    }

    fn text(&mut self, text: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        if self.link_url.is_some() {
            self.link_text.push_str(text);
        }
        if self.in_code_block {
            let prefix = format!("{}  ", self.quote_prefix());
            for line in text.trim_end_matches('\n').split('\n') {
                self.blocks.push(Block::Pre {
                    prefix: prefix.clone(),
                    spans: vec![Span::styled(line.to_string(), STYLE_CODE_BLOCK)],
                });
            }
            return;
        }
        let style = self.style();
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Paragraph => {
                if self.lists.is_empty() {
                    self.separate();
                }
            }
            Tag::Heading { level, .. } => {
                self.flush();
                self.separate();
                let hashes = match level {
                    HeadingLevel::H1 => 1,
                    HeadingLevel::H2 => 2,
                    HeadingLevel::H3 => 3,
                    HeadingLevel::H4 => 4,
                    HeadingLevel::H5 => 5,
                    HeadingLevel::H6 => 6,
                };
                self.style_stack.push(STYLE_HEADING);
                self.spans
                    .push(Span::styled(format!("{} ", "#".repeat(hashes)), STYLE_HEADING));
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.separate();
                self.quote_depth += 1;
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.separate();
                self.in_code_block = true;
            }
            Tag::List(start) => {
                self.flush();
                if self.lists.is_empty() {
                    self.separate();
                }
                self.lists.push(start);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.item_marker = Some(marker);
            }
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { dest_url, .. } => {
                self.link_url = Some(dest_url.to_string());
                self.link_text.clear();
                self.push_style(|s| s.patch(STYLE_LINK));
            }
            Tag::Table(_) => {
                self.flush();
                self.separate();
                self.table = Some(TableState::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.flush(),
            TagEnd::Heading(_) => {
                self.flush();
                self.style_stack.pop();
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
            }
            TagEnd::CodeBlock => self.in_code_block = false,
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
            }
            TagEnd::Item => self.flush(),
            TagEnd::Emphasis | TagEnd::Strong | TagEnd::Strikethrough => {
                self.style_stack.pop();
            }
            TagEnd::Link => {
                self.style_stack.pop();
                if let Some(url) = self.link_url.take() {
                    if self.link_text != url && !url.is_empty() {
                        self.spans
                            .push(Span::styled(format!(" ({})", url), STYLE_QUOTE));
                    }
                }
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    if !table.row.is_empty() {
                        let row = std::mem::take(&mut table.row);
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    let prefix = self.quote_prefix();
                    for spans in render_table(&table.rows) {
                        self.blocks.push(Block::Pre {
                            prefix: prefix.clone(),
                            spans,
                        });
                    }
                }
            }
            _ => {}
        }
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push_str(&code);
                } else {
                    self.spans
                        .push(Span::styled(code.to_string(), STYLE_INLINE_CODE));
                }
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush(),
            Event::Rule => {
                self.flush();
                self.separate();
                self.blocks.push(Block::Rule);
            }
            Event::TaskListMarker(checked) => {
                self.spans.push(Span::raw(if checked { "[x] " } else { "[ ] " }));
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }
}

/// Render markdown to lines no wider than `width` cells.
pub fn render_markdown(text: &str, width: u16) -> Result<Vec<Line<'static>>, RenderError> {
    if width == 0 {
        return Err(RenderError::InvalidWidth(width));
    }
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut builder = Builder::default();
    for event in Parser::new_ext(text, options) {
        builder.event(event);
    }
    builder.flush();

    let width = width as usize;
    let mut lines = Vec::new();
    for block in builder.blocks {
        layout_block(block, width, &mut lines);
    }
    while lines.last().is_some_and(|l: &Line<'_>| l.width() == 0) {
        lines.pop();
    }

    if lines.is_empty() {
        if text.trim().is_empty() {
            return Ok(vec![Line::default()]);
        }
        return Err(RenderError::Empty);
    }
    Ok(lines)
}

fn layout_block(block: Block, width: usize, out: &mut Vec<Line<'static>>) {
    match block {
        Block::Blank => out.push(Line::default()),
        Block::Rule => out.push(Line::from(Span::styled("─".repeat(width), STYLE_QUOTE))),
        Block::Pre { prefix, spans } => {
            let avail = width.saturating_sub(prefix.width()).max(1);
            for chunk in split_spans(spans, avail) {
                let mut line = vec![Span::styled(prefix.clone(), STYLE_QUOTE)];
                line.extend(chunk);
                out.push(Line::from(line));
            }
        }
        Block::Text { first, rest, spans } => {
            let words = words(spans);
            let mut prefix = first;
            let mut avail = width.saturating_sub(prefix.width()).max(1);
            let mut line: Vec<Span<'static>> = Vec::new();
            let mut line_width = 0;

            let mut emitted = false;
            let emit = |prefix: &str, line: Vec<Span<'static>>, out: &mut Vec<Line<'static>>| {
                let mut spans = Vec::with_capacity(line.len() + 1);
                if !prefix.is_empty() {
                    spans.push(Span::styled(prefix.to_string(), STYLE_QUOTE));
                }
                spans.extend(line);
                out.push(Line::from(spans));
            };

            for word in words {
                if line_width > 0 && line_width + 1 + word.width <= avail {
                    line.push(Span::raw(" "));
                    line.extend(word.fragments);
                    line_width += 1 + word.width;
                    continue;
                }
                if line_width > 0 {
                    emit(&prefix, std::mem::take(&mut line), out);
                    emitted = true;
                    prefix = rest.clone();
                    avail = width.saturating_sub(prefix.width()).max(1);
                }
                if word.width <= avail {
                    line_width = word.width;
                    line.extend(word.fragments);
                } else {
                    let mut chunks = split_spans(word.fragments, avail);
                    let last = chunks.pop().unwrap_or_default();
                    for chunk in chunks {
                        emit(&prefix, chunk, out);
                        emitted = true;
                        prefix = rest.clone();
                        avail = width.saturating_sub(prefix.width()).max(1);
                    }
                    line_width = last.iter().map(|s| s.content.width()).sum();
                    line = last;
                }
            }
            // A list marker with no text still gets its own line.
            if !line.is_empty() || (!emitted && !prefix.trim().is_empty()) {
                emit(&prefix, line, out);
            }
        }
    }
}

/// Whitespace-delimited word made of differently styled fragments.
struct Word {
    fragments: Vec<Span<'static>>,
    width: usize,
}

fn words(spans: Vec<Span<'static>>) -> Vec<Word> {
    let mut words = Vec::new();
    let mut fragments: Vec<Span<'static>> = Vec::new();
    let mut width = 0;

    for span in spans {
        let style = span.style;
        let mut piece = String::new();
        for c in span.content.chars() {
            if c.is_whitespace() {
                if !piece.is_empty() {
                    width += piece.width();
                    fragments.push(Span::styled(std::mem::take(&mut piece), style));
                }
                if !fragments.is_empty() {
                    words.push(Word {
                        fragments: std::mem::take(&mut fragments),
                        width,
                    });
                    width = 0;
                }
            } else {
                piece.push(c);
            }
        }
        if !piece.is_empty() {
            width += piece.width();
            fragments.push(Span::styled(piece, style));
        }
    }
    if !fragments.is_empty() {
        words.push(Word { fragments, width });
    }
    words
}

/// Split styled text into chunks at most `width` cells wide.
fn split_spans(spans: Vec<Span<'static>>, width: usize) -> Vec<Vec<Span<'static>>> {
    let mut chunks = Vec::new();
    let mut chunk: Vec<Span<'static>> = Vec::new();
    let mut chunk_width = 0;

    for span in spans {
        let style = span.style;
        let mut piece = String::new();
        for c in span.content.chars() {
            let w = c.width().unwrap_or(0);
            if chunk_width + w > width && (chunk_width > 0) {
                if !piece.is_empty() {
                    chunk.push(Span::styled(std::mem::take(&mut piece), style));
                }
                chunks.push(std::mem::take(&mut chunk));
                chunk_width = 0;
            }
            piece.push(c);
            chunk_width += w;
        }
        if !piece.is_empty() {
            chunk.push(Span::styled(piece, style));
        }
    }
    if !chunk.is_empty() || chunks.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// Box-drawn table, header row highlighted.
fn render_table(rows: &[Vec<String>]) -> Vec<Vec<Span<'static>>> {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }
    let mut widths = vec![3usize; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let border = |left: char, mid: char, right: char| -> Vec<Span<'static>> {
        let inner: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        vec![Span::styled(
            format!("{}{}{}", left, inner.join(&mid.to_string()), right),
            STYLE_TABLE_BORDER,
        )]
    };

    let mut out = vec![border('┌', '┬', '┐')];
    for (row_idx, row) in rows.iter().enumerate() {
        let style = if row_idx == 0 {
            STYLE_HEADING
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled("│", STYLE_TABLE_BORDER)];
        for (col, width) in widths.iter().enumerate() {
            let cell = row.get(col).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.width());
            spans.push(Span::styled(format!(" {}{} ", cell, " ".repeat(pad)), style));
            spans.push(Span::styled("│", STYLE_TABLE_BORDER));
        }
        out.push(spans);
        if row_idx == 0 && rows.len() > 1 {
            out.push(border('├', '┼', '┤'));
        }
    }
    out.push(border('└', '┴', '┘'));
    out
}
