//! Greedy word wrapping measured in terminal cells.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Wrap `text` to `width` columns.
///
/// Each embedded newline starts a new paragraph. A paragraph that already
/// fits is kept verbatim; otherwise words are packed greedily while
/// `line + 1 + word <= width`. Words wider than the line are split.
/// Always returns at least one line.
pub fn word_wrap(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        if paragraph.width() <= width {
            lines.push(paragraph.to_string());
            continue;
        }
        wrap_paragraph(paragraph, width, &mut lines);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn wrap_paragraph(paragraph: &str, width: usize, out: &mut Vec<String>) {
    let first = out.len();
    let mut current = String::new();
    let mut current_width = 0;

    for word in paragraph.split_whitespace() {
        let word_width = word.width();
        if current_width > 0 && current_width + 1 + word_width <= width {
            current.push(' ');
            current.push_str(word);
            current_width += 1 + word_width;
            continue;
        }
        if current_width > 0 {
            out.push(std::mem::take(&mut current));
            current_width = 0;
        }
        if word_width <= width {
            current.push_str(word);
            current_width = word_width;
        } else {
            for chunk in split_long_word(word, width) {
                out.push(chunk);
            }
        }
    }

    if current_width > 0 || out.len() == first {
        out.push(current);
    }
}

fn split_long_word(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0;
    for c in word.chars() {
        let w = c.width().unwrap_or(0);
        if chunk_width + w > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += w;
    }
    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// Truncate to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{}...", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_unchanged() {
        assert_eq!(word_wrap("hello", 10), vec!["hello"]);
        assert_eq!(word_wrap("", 10), vec![""]);
    }

    #[test]
    fn test_greedy_packing() {
        assert_eq!(
            word_wrap("the quick brown fox jumps", 10),
            vec!["the quick", "brown fox", "jumps"]
        );
    }

    #[test]
    fn test_exact_fit_boundary() {
        // "aaaa bbbb" is exactly 9 columns.
        assert_eq!(word_wrap("aaaa bbbb cc", 9), vec!["aaaa bbbb", "cc"]);
    }

    #[test]
    fn test_newlines_are_respected() {
        assert_eq!(word_wrap("one\ntwo", 20), vec!["one", "two"]);
        assert_eq!(word_wrap("a\n\nb", 20), vec!["a", "", "b"]);
    }

    #[test]
    fn test_long_words_are_split() {
        assert_eq!(word_wrap("abcdefgh ij", 3), vec!["abc", "def", "gh", "ij"]);
    }

    #[test]
    fn test_wide_characters_measured_by_cells() {
        // Each CJK character is two cells wide.
        assert_eq!(word_wrap("日本 語語", 4), vec!["日本", "語語"]);
    }

    #[test]
    fn test_zero_width_treated_as_one() {
        assert_eq!(word_wrap("ab", 0), vec!["a", "b"]);
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghijkl", 8), "abcde...");
        assert_eq!(truncate("abcdef", 2), "ab");
    }
}
