//! Host-owned document: buffer, selection and undo history.

use crate::buffer::RopeBuffer;
use crate::history::{EditGroup, EditHistory, EditIntent, EditOp};
use crate::line_state::{LineClassifier, LineState, LineStateCache};
use crate::selection::Selection;
use std::ops::Range;
use std::time::Instant;
use tracing::trace;

/// The text a host edits, with its caret and history.
///
/// Engines borrow a document mutably for one call and keep no references.
#[derive(Debug, Default)]
pub struct Document {
    buffer: RopeBuffer,
    selection: Selection,
    history: EditHistory,
    line_states: LineStateCache,
}

impl Document {
    /// Creates a document with the caret at the start.
    pub fn new(text: &str) -> Self {
        Self {
            buffer: RopeBuffer::new(text),
            selection: Selection::caret(0),
            history: EditHistory::default(),
            line_states: LineStateCache::default(),
        }
    }

    /// Returns the underlying buffer.
    pub fn buffer(&self) -> &RopeBuffer {
        &self.buffer
    }

    /// Returns a UTF-8 snapshot of the whole document.
    pub fn text(&self) -> String {
        self.buffer.to_text()
    }

    /// Returns the text of `line` without its terminator.
    pub fn line(&self, line: usize) -> String {
        self.buffer.line_text(line)
    }

    pub fn line_count(&self) -> usize {
        self.buffer.line_count()
    }

    pub fn selection(&self) -> Selection {
        self.selection
    }

    /// Returns the caret position (the active end of the selection).
    pub fn cursor(&self) -> usize {
        self.selection.cursor()
    }

    /// Returns the `(line, column)` of the caret.
    pub fn cursor_line_col(&self) -> (usize, usize) {
        self.buffer.char_to_line_col(self.selection.cursor())
    }

    /// Places a caret, clearing any selection.
    pub fn set_cursor(&mut self, position: usize) {
        self.selection = Selection::caret(position.min(self.buffer.len_chars()));
    }

    /// Selects `anchor..active`, clamped to the buffer.
    pub fn set_selection(&mut self, anchor: usize, active: usize) {
        self.selection = Selection::new(anchor, active).clamped(self.buffer.len_chars());
    }

    /// Returns the editing history.
    pub fn history(&self) -> &EditHistory {
        &self.history
    }

    /// Undo the most recent command.
    ///
    /// # Returns
    /// `true` when something was undone.
    pub fn undo(&mut self) -> bool {
        let restored = self.history.undo(&mut self.buffer);
        self.restore(restored)
    }

    /// Redo the next undone command.
    pub fn redo(&mut self) -> bool {
        let restored = self.history.redo(&mut self.buffer);
        self.restore(restored)
    }

    fn restore(&mut self, restored: Option<(Selection, usize)>) -> bool {
        let Some((selection, first_edit)) = restored else {
            return false;
        };
        self.buffer_changed_at(first_edit);
        self.selection = selection.clamped(self.buffer.len_chars());
        true
    }

    /// Forgets cached line states from the line holding `char_index` down.
    fn buffer_changed_at(&mut self, char_index: usize) {
        let (line, _) = self.buffer.char_to_line_col(char_index);
        self.line_states.invalidate_from(line);
    }

    /// States of lines `first..=last` as seen by `classifier`.
    ///
    /// `owner` identifies the classifier; states cached for a different owner
    /// are discarded.
    pub(crate) fn line_states<C: LineClassifier + ?Sized>(
        &mut self,
        owner: u64,
        classifier: &C,
        first: usize,
        last: usize,
    ) -> &[LineState] {
        self.line_states.states(owner, classifier, &self.buffer, first, last)
    }

    /// Host default for typed text: replaces the selection with `text`.
    pub fn insert_text(&mut self, text: &str) -> bool {
        let selection = self.selection;
        let mut tx = self.transaction(EditIntent::Insert);
        tx.replace(selection.start()..selection.end(), text);
        let end = selection.start() + text.chars().count();
        tx.set_selection(Selection::caret(end));
        tx.commit()
    }

    /// Host default for Backspace: deletes the selection or the char before the caret.
    pub fn delete_backward(&mut self) -> bool {
        let selection = self.selection;
        let range = match selection.range() {
            Some(range) => range,
            None if selection.cursor() == 0 => return false,
            None => selection.cursor() - 1..selection.cursor(),
        };
        let mut tx = self.transaction(EditIntent::DeleteBackward);
        tx.replace(range, "");
        tx.commit()
    }

    /// Opens an atomic edit unit.
    pub fn transaction(&mut self, intent: EditIntent) -> Transaction<'_> {
        let before = self.selection;
        Transaction {
            document: self,
            ops: Vec::new(),
            before,
            intent,
            committed: false,
        }
    }
}

/// A scoped group of edits that commits as one undo record.
///
/// The document's selection is mapped through every replacement the way a
/// live caret would move. Dropping the transaction without [`commit`]
/// reverts everything it applied.
///
/// [`commit`]: Transaction::commit
#[derive(Debug)]
pub struct Transaction<'a> {
    document: &'a mut Document,
    ops: Vec<EditOp>,
    before: Selection,
    intent: EditIntent,
    committed: bool,
}

fn map_position(position: usize, range: &Range<usize>, inserted: usize) -> usize {
    if position < range.start {
        position
    } else {
        position.max(range.end) - (range.end - range.start) + inserted
    }
}

impl Transaction<'_> {
    /// Returns the buffer as edited so far.
    pub fn buffer(&self) -> &RopeBuffer {
        &self.document.buffer
    }

    /// Returns the selection as mapped so far.
    pub fn selection(&self) -> Selection {
        self.document.selection
    }

    /// Overrides the selection that will be left after commit.
    pub fn set_selection(&mut self, selection: Selection) {
        self.document.selection = selection.clamped(self.document.buffer.len_chars());
    }

    /// Replaces `range` with `text`.
    ///
    /// # Returns
    /// `true` when the buffer changed.
    pub fn replace(&mut self, range: Range<usize>, text: &str) -> bool {
        let len = self.document.buffer.len_chars();
        let range = range.start.min(len)..range.end.min(len);
        if range.start > range.end {
            return false;
        }
        let deleted = self.document.buffer.slice_chars(range.clone());
        if !self.document.buffer.replace_char_range(range.clone(), text) {
            return false;
        }
        self.document.buffer_changed_at(range.start);
        trace!(
            start = range.start,
            deleted = deleted.as_str(),
            inserted = text,
            "transaction replace"
        );
        let inserted = text.chars().count();
        let selection = self.document.selection;
        self.document.selection = Selection::new(
            map_position(selection.anchor, &range, inserted),
            map_position(selection.active, &range, inserted),
        );
        self.ops.push(EditOp {
            start: range.start,
            deleted,
            inserted: text.to_string(),
        });
        true
    }

    /// Inserts `text` at `position`.
    pub fn insert(&mut self, position: usize, text: &str) -> bool {
        self.replace(position..position, text)
    }

    /// Deletes `range`.
    pub fn delete(&mut self, range: Range<usize>) -> bool {
        self.replace(range, "")
    }

    /// Records the group in history and keeps the edits.
    ///
    /// # Returns
    /// `true` when the buffer or the selection changed.
    pub fn commit(mut self) -> bool {
        self.committed = true;
        let changed = !self.ops.is_empty() || self.document.selection != self.before;
        let ops = std::mem::take(&mut self.ops);
        let group = EditGroup {
            ops,
            intent: self.intent,
            before: self.before,
            after: self.document.selection,
            at: Instant::now(),
        };
        self.document.history.record(group);
        changed
    }
}

impl Drop for Transaction<'_> {
    fn drop(&mut self) {
        if self.committed {
            return;
        }
        for op in self.ops.iter().rev() {
            op.revert(&mut self.document.buffer);
        }
        if let Some(first_edit) = self.ops.iter().map(|op| op.start).min() {
            self.document.buffer_changed_at(first_edit);
        }
        self.document.selection = self.before;
    }
}
