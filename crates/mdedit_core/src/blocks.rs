//! Block-level formatting over the lines touched by the selection.

use crate::buffer::RopeBuffer;
use crate::constants::{COMMENT_CLOSE, COMMENT_OPEN};
use crate::document::{Document, Transaction};
use crate::history::EditIntent;
use crate::line_state::LineState;
use crate::patterns::{
    self, EMPTY_BLOCKQUOTE, EMPTY_BULLET_LIST, EMPTY_NUMBERED_LIST, EMPTY_TASK_LIST, TASK_LIST,
};
use crate::selection::Selection;
use std::ops::RangeInclusive;
use tracing::debug;

/// Bullet char for new unordered lists.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletMarker {
    Asterisk,
    Minus,
    Plus,
}

impl BulletMarker {
    pub fn as_char(self) -> char {
        match self {
            Self::Asterisk => '*',
            Self::Minus => '-',
            Self::Plus => '+',
        }
    }
}

/// Char following the number in an ordered list item.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NumberDelimiter {
    Period,
    Parenthesis,
}

impl NumberDelimiter {
    pub fn as_char(self) -> char {
        match self {
            Self::Period => '.',
            Self::Parenthesis => ')',
        }
    }
}

/// Lines from the selection start to the selection end, inclusive.
pub(crate) fn touched_lines(buffer: &RopeBuffer, selection: Selection) -> RangeInclusive<usize> {
    let (first, _) = buffer.char_to_line_col(selection.start());
    let (last, _) = buffer.char_to_line_col(selection.end());
    first..=last
}

fn prefix_lines(doc: &mut Document, mut prefix_for: impl FnMut(usize) -> String) -> bool {
    let lines = touched_lines(doc.buffer(), doc.selection());
    let mut tx = doc.transaction(EditIntent::Format);
    for (ordinal, line) in lines.enumerate() {
        let start = tx.buffer().line_start(line);
        tx.insert(start, &prefix_for(ordinal));
    }
    tx.commit()
}

/// Prefixes every touched line with `marker` and a space.
pub fn create_bullet_list(doc: &mut Document, marker: BulletMarker) -> bool {
    let prefix = format!("{} ", marker.as_char());
    prefix_lines(doc, |_| prefix.clone())
}

/// Prefixes every touched line with an unchecked task marker.
pub fn create_task_list(doc: &mut Document) -> bool {
    prefix_lines(doc, |_| "- [ ] ".to_string())
}

/// Prefixes every touched line with `> `.
pub fn create_blockquote(doc: &mut Document) -> bool {
    prefix_lines(doc, |_| "> ".to_string())
}

/// Numbers the touched lines from 1.
pub fn create_numbered_list(doc: &mut Document, delimiter: NumberDelimiter) -> bool {
    prefix_lines(doc, |ordinal| {
        format!("{}{} ", ordinal + 1, delimiter.as_char())
    })
}

/// Strips one level of `>` (and one following whitespace char) from touched lines.
pub fn remove_blockquote(doc: &mut Document) -> bool {
    let lines = touched_lines(doc.buffer(), doc.selection());
    let mut tx = doc.transaction(EditIntent::Format);
    for line in lines {
        let start = tx.buffer().line_start(line);
        if tx.buffer().char_at(start) != Some('>') {
            continue;
        }
        let marker_len = match tx.buffer().char_at(start + 1) {
            Some(ch) if ch.is_whitespace() && ch != '\n' && ch != '\r' => 2,
            _ => 1,
        };
        tx.delete(start..start + marker_len);
    }
    tx.commit()
}

/// Flips `[ ]` and `[x]` on every touched task line.
///
/// `states` holds the [`LineState`] of each touched line, in order. Lines whose
/// state or text is not a task item are left alone.
pub fn toggle_task_complete(doc: &mut Document, states: &[LineState]) -> bool {
    let lines = touched_lines(doc.buffer(), doc.selection());
    let mut tx = doc.transaction(EditIntent::Format);
    for (line, state) in lines.zip(states.iter().copied()) {
        if state != LineState::TaskList {
            continue;
        }
        let text = tx.buffer().line_text(line);
        let Some(mark) = TASK_LIST
            .captures(&text)
            .and_then(|captures| captures.get(1))
        else {
            continue;
        };
        let replacement = if mark.as_str() == "x" { " " } else { "x" };
        let column = patterns::char_offset(&text, mark.start());
        let at = tx.buffer().line_start(line) + column;
        debug!(line, replacement, "toggle task");
        tx.replace(at..at + 1, replacement);
    }
    tx.commit();
    true
}

/// Wraps the selection in an HTML comment, or inserts an empty one around the caret.
pub fn insert_comment(doc: &mut Document) -> bool {
    let selection = doc.selection();
    let mut tx = doc.transaction(EditIntent::Format);
    let inner_start = selection.start() + COMMENT_OPEN.chars().count();
    if selection.has_selection() {
        let selected = tx.buffer().slice_chars(selection.start()..selection.end());
        tx.replace(
            selection.start()..selection.end(),
            &format!("{COMMENT_OPEN}{selected}{COMMENT_CLOSE}"),
        );
        let after = inner_start + selected.chars().count() + COMMENT_CLOSE.chars().count();
        tx.set_selection(Selection::caret(after));
    } else {
        tx.insert(selection.start(), &format!("{COMMENT_OPEN}{COMMENT_CLOSE}"));
        tx.set_selection(Selection::caret(inner_start));
    }
    tx.commit()
}

/// Column where an empty list or quote marker starts, if `line` is one.
fn empty_marker_start(line: &str, state: LineState) -> Option<usize> {
    let byte = match state {
        LineState::NumberedList if EMPTY_NUMBERED_LIST.is_match(line) => {
            line.find(|ch: char| ch.is_ascii_digit())
        }
        LineState::TaskList | LineState::BulletList
            if EMPTY_BULLET_LIST.is_match(line) || EMPTY_TASK_LIST.is_match(line) =>
        {
            line.find(['+', '*', '-'])
        }
        LineState::Blockquote if EMPTY_BLOCKQUOTE.is_match(line) => line.rfind('>'),
        _ => None,
    }?;
    Some(patterns::char_offset(line, byte))
}

fn remove_marker(tx: &mut Transaction<'_>, state: LineState) -> bool {
    let view = tx.buffer().line_view(tx.selection().cursor());
    let Some(column) = empty_marker_start(&view.text, state) else {
        return false;
    };
    if view.column <= column {
        return false;
    }
    debug!(line = view.index, column, ?state, "remove empty marker");
    tx.delete(view.start + column..view.end())
}

/// Backspace on an empty list item or quote removes its whole marker.
pub fn remove_empty_marker(doc: &mut Document, state: LineState) -> bool {
    if doc.selection().has_selection() {
        return false;
    }
    let mut tx = doc.transaction(EditIntent::DeleteBackward);
    remove_marker(&mut tx, state) && tx.commit()
}
