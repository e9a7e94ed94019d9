//! Rope-backed text storage addressed by char offsets and line indices.

use ropey::Rope;
use std::ops::Range;

fn line_for_char(rope: &Rope, char_index: usize) -> usize {
    rope.char_to_line(char_index.min(rope.len_chars()))
}

/// Snapshot of the line holding a position, with that position's column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) struct LineView {
    pub(crate) index: usize,
    /// Global char index of column 0.
    pub(crate) start: usize,
    pub(crate) column: usize,
    pub(crate) text: String,
    pub(crate) chars: Vec<char>,
}

impl LineView {
    /// Global char index just past the last char.
    pub(crate) fn end(&self) -> usize {
        self.start + self.chars.len()
    }

    /// Char immediately left of the column.
    pub(crate) fn before(&self) -> Option<char> {
        self.column.checked_sub(1).map(|idx| self.chars[idx])
    }

    /// Char at `column + offset`.
    pub(crate) fn after(&self, offset: usize) -> Option<char> {
        self.chars.get(self.column + offset).copied()
    }
}

/// Text buffer owned by a [`crate::Document`].
#[derive(Clone, Debug, Default)]
pub struct RopeBuffer {
    rope: Rope,
}

impl RopeBuffer {
    /// Create a new buffer from UTF-8 text.
    pub fn new(text: &str) -> Self {
        Self {
            rope: Rope::from_str(text),
        }
    }

    /// Returns the content length in characters.
    pub fn len_chars(&self) -> usize {
        self.rope.len_chars()
    }

    /// Returns the number of lines. An empty buffer has one empty line.
    pub fn line_count(&self) -> usize {
        self.rope.len_lines().max(1)
    }

    /// Returns a UTF-8 snapshot of the whole buffer.
    pub fn to_text(&self) -> String {
        self.rope.to_string()
    }

    /// Returns the char at `char_index`, if in range.
    pub fn char_at(&self, char_index: usize) -> Option<char> {
        (char_index < self.len_chars()).then(|| self.rope.char(char_index))
    }

    /// Convert a global char index into `(line, column)` coordinates.
    pub fn char_to_line_col(&self, char_index: usize) -> (usize, usize) {
        let clamped = char_index.min(self.len_chars());
        let line = line_for_char(&self.rope, clamped);
        let line_start = self.rope.line_to_char(line);
        let col = clamped
            .saturating_sub(line_start)
            .min(self.line_len_chars(line));
        (line, col)
    }

    /// Global char index of the first char of `line`.
    pub fn line_start(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return self.len_chars();
        }
        self.rope.line_to_char(line)
    }

    /// Global char index just past the last char of `line`, before its terminator.
    pub fn line_end(&self, line: usize) -> usize {
        self.line_start(line) + self.line_len_chars(line)
    }

    /// Returns a line as UTF-8 without trailing `\r?\n`.
    pub fn line_text(&self, line: usize) -> String {
        if line >= self.line_count() {
            return String::new();
        }
        let keep_chars = self.line_len_chars(line);
        self.rope.line(line).slice(..keep_chars).to_string()
    }

    /// Returns the line containing `char_index` and the column inside it.
    pub(crate) fn line_view(&self, char_index: usize) -> LineView {
        let (index, column) = self.char_to_line_col(char_index);
        let text = self.line_text(index);
        LineView {
            index,
            start: self.line_start(index),
            column,
            chars: text.chars().collect(),
            text,
        }
    }

    /// Returns the character length of a line without trailing `\r?\n`.
    pub fn line_len_chars(&self, line: usize) -> usize {
        if line >= self.line_count() {
            return 0;
        }
        let line_slice = self.rope.line(line);
        let mut len = line_slice.len_chars();
        if len == 0 {
            return 0;
        }
        let last_char = line_slice.char(len - 1);
        if last_char == '\n' {
            len = len.saturating_sub(1);
            if len > 0 && line_slice.char(len - 1) == '\r' {
                len = len.saturating_sub(1);
            }
        } else if last_char == '\r' {
            len = len.saturating_sub(1);
        }
        len
    }

    fn terminator(&self, line: usize) -> Option<&'static str> {
        if line >= self.line_count() {
            return None;
        }
        let slice = self.rope.line(line);
        let total = slice.len_chars();
        match total - self.line_len_chars(line) {
            0 => None,
            2 => Some("\r\n"),
            _ if slice.char(total - 1) == '\r' => Some("\r"),
            _ => Some("\n"),
        }
    }

    /// Line terminator of `line`, borrowed from the line above when `line` has
    /// none (the last line). Defaults to `\n`.
    pub fn line_ending(&self, line: usize) -> &'static str {
        self.terminator(line)
            .or_else(|| line.checked_sub(1).and_then(|above| self.terminator(above)))
            .unwrap_or("\n")
    }

    /// Returns a UTF-8 snapshot for the given char range.
    pub fn slice_chars(&self, range: Range<usize>) -> String {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start >= end {
            return String::new();
        }
        self.rope.slice(start..end).to_string()
    }

    /// Replace a char range with new text.
    ///
    /// # Returns
    /// `false` when the call is a no-op (empty range and empty text).
    pub fn replace_char_range(&mut self, range: Range<usize>, text: &str) -> bool {
        let start = range.start.min(self.len_chars());
        let end = range.end.min(self.len_chars());
        if start > end || (start == end && text.is_empty()) {
            return false;
        }
        if start < end {
            self.rope.remove(start..end);
        }
        if !text.is_empty() {
            self.rope.insert(start, text);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_char_conversions_handle_multibyte_text() {
        let buf = RopeBuffer::new("aé\nb");
        assert_eq!(buf.char_to_line_col(2), (0, 2));
        assert_eq!(buf.char_to_line_col(3), (1, 0));
        assert_eq!(buf.char_to_line_col(99), (1, 1));
    }

    #[test]
    fn line_text_strips_crlf_terminators() {
        let buf = RopeBuffer::new("one\r\ntwo\n");
        assert_eq!(buf.line_text(0), "one");
        assert_eq!(buf.line_end(0), 3);
        assert_eq!(buf.line_start(1), 5);
        assert_eq!(buf.line_text(2), "");
        assert_eq!(buf.line_count(), 3);
    }

    #[test]
    fn replace_range_can_split_lines() {
        let mut buf = RopeBuffer::new("one\ntwo\nthree");
        assert!(buf.replace_char_range(4..7, "dos\nzwei"));
        assert_eq!(buf.line_text(1), "dos");
        assert_eq!(buf.line_text(2), "zwei");
        assert_eq!(buf.line_count(), 4);
    }

    #[test]
    fn line_ending_follows_the_document() {
        let buf = RopeBuffer::new("a\r\nb\nc");
        assert_eq!(buf.line_ending(0), "\r\n");
        assert_eq!(buf.line_ending(1), "\n");
        assert_eq!(buf.line_ending(2), "\n");
        let crlf = RopeBuffer::new("a\r\nb");
        assert_eq!(crlf.line_ending(1), "\r\n");
        assert_eq!(RopeBuffer::new("solo").line_ending(0), "\n");
    }

    #[test]
    fn line_view_reports_neighbors_of_the_column() {
        let buf = RopeBuffer::new("ab\n(é)");
        let view = buf.line_view(4);
        assert_eq!((view.index, view.start, view.column), (1, 3, 1));
        assert_eq!(view.before(), Some('('));
        assert_eq!(view.after(0), Some('é'));
        assert_eq!(view.after(2), None);
        assert_eq!(view.end(), 6);
        assert_eq!(buf.line_view(0).before(), None);
    }

    #[test]
    fn empty_replace_is_a_no_op() {
        let mut buf = RopeBuffer::new("abc");
        assert!(!buf.replace_char_range(1..1, ""));
        assert_eq!(buf.to_text(), "abc");
        assert_eq!(buf.char_at(3), None);
        assert_eq!(buf.char_at(2), Some('c'));
    }
}
