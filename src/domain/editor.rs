//! Modal single-line editor.
//!
//! [`LineEditor`] models a vim-style prompt line: Insert mode for typing and
//! Normal mode for cursor and word commands. The buffer is kept as `char`s so
//! every cursor position is a character index.
//!
//! Every operation is total. In Insert mode the cursor lies in
//! `[0, len]`; in Normal mode it sits on a character, so it lies in
//! `[0, max(0, len - 1)]`.

/// Editing mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditorMode {
    #[default]
    Normal,
    Insert,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineEditor {
    buffer: Vec<char>,
    cursor: usize,
    mode: EditorMode,
    /// First key of a two-key command (`d` or `c`)
    pending: Option<char>,
}

impl LineEditor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> String {
        self.buffer.iter().collect()
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn mode(&self) -> EditorMode {
        self.mode
    }

    pub fn pending(&self) -> Option<char> {
        self.pending
    }

    /// Replace the buffer, placing the cursor at the end.
    pub fn set_text(&mut self, text: &str) {
        self.buffer = text.chars().collect();
        self.cursor = self.buffer.len();
        self.clamp_cursor();
    }

    /// Set the cursor, clamped to the valid range for the current mode.
    pub fn set_cursor(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.clamp_cursor();
    }

    /// Empty the buffer and return to Normal mode.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Remove and return the buffer contents, resetting the editor.
    pub fn take(&mut self) -> String {
        let text = self.text();
        self.reset();
        text
    }

    fn last_index(&self) -> usize {
        self.buffer.len().saturating_sub(1)
    }

    fn clamp_cursor(&mut self) {
        let max = match self.mode {
            EditorMode::Insert => self.buffer.len(),
            EditorMode::Normal => self.last_index(),
        };
        self.cursor = self.cursor.min(max);
    }

    // ---------------------------------------------------------------------
    // Mode transitions
    // ---------------------------------------------------------------------

    /// `i`: insert before the cursor.
    pub fn enter_insert(&mut self) {
        self.mode = EditorMode::Insert;
        self.pending = None;
        self.clamp_cursor();
    }

    /// `a`: insert after the cursor.
    pub fn append_insert(&mut self) {
        self.mode = EditorMode::Insert;
        self.pending = None;
        if self.cursor < self.buffer.len() {
            self.cursor += 1;
        }
    }

    /// `A`: insert at the end of the line.
    pub fn append_end_insert(&mut self) {
        self.mode = EditorMode::Insert;
        self.pending = None;
        self.cursor = self.buffer.len();
    }

    /// Esc from Insert: back to Normal with the cursor on a character.
    pub fn escape_to_normal(&mut self) {
        self.mode = EditorMode::Normal;
        self.pending = None;
        self.clamp_cursor();
    }

    // ---------------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------------

    /// Splice a character at the cursor and advance past it.
    pub fn insert(&mut self, c: char) {
        let at = self.cursor.min(self.buffer.len());
        self.buffer.insert(at, c);
        self.cursor = at + 1;
        self.clamp_cursor();
    }

    /// Remove the character before the cursor.
    pub fn backspace(&mut self) {
        let at = self.cursor.min(self.buffer.len());
        if at > 0 {
            self.buffer.remove(at - 1);
            self.cursor = at - 1;
        }
        self.clamp_cursor();
    }

    /// `x`: remove the character under the cursor.
    pub fn delete_char_at_cursor(&mut self) {
        if self.cursor < self.buffer.len() {
            self.buffer.remove(self.cursor);
        }
        self.cursor = self.cursor.min(self.last_index());
        self.clamp_cursor();
    }

    /// `dw`: delete from the cursor through the end of the word, plus one
    /// trailing space if present. The cursor stays at the deletion start.
    pub fn delete_word_at_cursor(&mut self) {
        let start = self.cursor;
        if start >= self.buffer.len() {
            self.clamp_cursor();
            return;
        }
        let mut end = start;
        while end < self.buffer.len() && !is_separator(self.buffer[end]) {
            end += 1;
        }
        if end < self.buffer.len() && is_separator(self.buffer[end]) {
            end += 1;
        }
        self.buffer.drain(start..end);
        self.cursor = start.min(self.last_index());
        self.clamp_cursor();
    }

    /// `dd` / `cc`: clear the whole line.
    pub fn clear_line(&mut self) {
        self.buffer.clear();
        self.cursor = 0;
    }

    // ---------------------------------------------------------------------
    // Motion
    // ---------------------------------------------------------------------

    pub fn move_left(&mut self) {
        self.cursor = self.cursor.saturating_sub(1);
        self.clamp_cursor();
    }

    pub fn move_right(&mut self) {
        self.cursor = self.cursor.saturating_add(1);
        self.clamp_cursor();
    }

    /// `w`: skip the rest of the word, then the separators after it.
    pub fn move_word_forward(&mut self) {
        let len = self.buffer.len();
        if self.cursor >= len {
            self.clamp_cursor();
            return;
        }
        let mut pos = self.cursor;
        while pos < len && !is_separator(self.buffer[pos]) {
            pos += 1;
        }
        while pos < len && is_separator(self.buffer[pos]) {
            pos += 1;
        }
        self.cursor = pos.min(self.last_index());
        self.clamp_cursor();
    }

    /// `b`: step back over separators, then to the start of the word.
    pub fn move_word_backward(&mut self) {
        if self.cursor == 0 || self.buffer.is_empty() {
            self.cursor = 0;
            return;
        }
        let mut pos = self.cursor.min(self.buffer.len()) - 1;
        while pos > 0 && is_separator(self.buffer[pos]) {
            pos -= 1;
        }
        while pos > 0 && !is_separator(self.buffer[pos - 1]) {
            pos -= 1;
        }
        self.cursor = pos;
        self.clamp_cursor();
    }

    /// `0`
    pub fn to_line_start(&mut self) {
        self.cursor = 0;
    }

    /// `$`: last character, or 0 on an empty line.
    pub fn to_line_end(&mut self) {
        self.cursor = self.last_index();
    }

    // ---------------------------------------------------------------------
    // Normal mode dispatch
    // ---------------------------------------------------------------------

    /// Apply one Normal-mode key, resolving `dd`, `dw`, `cc` and `cw`.
    ///
    /// A pending prefix followed by a key that does not complete it is
    /// dropped, and that key is then handled on its own. Returns false for
    /// keys with no Normal-mode meaning.
    pub fn normal_key(&mut self, c: char) -> bool {
        if let Some(prefix) = self.pending.take() {
            match (prefix, c) {
                ('d', 'd') => {
                    self.clear_line();
                    return true;
                }
                ('d', 'w') => {
                    self.delete_word_at_cursor();
                    return true;
                }
                ('c', 'c') => {
                    self.clear_line();
                    self.enter_insert();
                    return true;
                }
                ('c', 'w') => {
                    self.delete_word_at_cursor();
                    self.enter_insert();
                    return true;
                }
                _ => {}
            }
        }

        match c {
            'i' => self.enter_insert(),
            'a' => self.append_insert(),
            'A' => self.append_end_insert(),
            'x' => self.delete_char_at_cursor(),
            'd' | 'c' => self.pending = Some(c),
            'w' => self.move_word_forward(),
            'b' => self.move_word_backward(),
            '0' => self.to_line_start(),
            '$' => self.to_line_end(),
            'h' => self.move_left(),
            'l' => self.move_right(),
            _ => return false,
        }
        true
    }

    /// Forget any half-typed two-key command.
    pub fn clear_pending(&mut self) {
        self.pending = None;
    }

    // ---------------------------------------------------------------------
    // Rendering
    // ---------------------------------------------------------------------

    /// Split the buffer around the cursor: text before, the character under
    /// the cursor (if any), text after.
    pub fn split_at_cursor(&self) -> (String, Option<char>, String) {
        let at = self.cursor.min(self.buffer.len());
        let before: String = self.buffer[..at].iter().collect();
        let under = self.buffer.get(at).copied();
        let after_start = if under.is_some() { at + 1 } else { at };
        let after: String = self.buffer[after_start..].iter().collect();
        (before, under, after)
    }

    /// Mode indicator shown in the input panel.
    pub fn mode_label(&self) -> String {
        match (self.mode, self.pending) {
            (EditorMode::Insert, _) => "[INSERT]".to_string(),
            (EditorMode::Normal, Some(p)) => format!("[NORMAL:{}]", p),
            (EditorMode::Normal, None) => "[NORMAL]".to_string(),
        }
    }
}

fn is_separator(c: char) -> bool {
    c.is_whitespace()
}
