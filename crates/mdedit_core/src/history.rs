//! Grouped undo/redo history.
//!
//! Every command commits one [`EditGroup`], however many primitive replacements
//! it performed, so a single undo always reverts a whole command.

use crate::buffer::RopeBuffer;
use crate::selection::Selection;
use std::time::{Duration, Instant};

const DEFAULT_MAX_GROUPS: usize = 500;
const DEFAULT_MAX_BYTES: usize = 8 * 1024 * 1024;
const DEFAULT_COALESCE_WINDOW: Duration = Duration::from_millis(750);

/// Mutation intent used for history coalescing rules.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EditIntent {
    /// Plain typed text applied by the host.
    Insert,
    DeleteBackward,
    /// Newline plus list or indentation continuation.
    Continue,
    Indent,
    Unindent,
    /// Emphasis or block markup added or removed.
    Format,
    /// Auto-paired characters inserted, wrapped or deleted.
    Pair,
}

/// One primitive replacement: `deleted` at `start` became `inserted`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditOp {
    pub start: usize,
    pub deleted: String,
    pub inserted: String,
}

impl EditOp {
    fn bytes(&self) -> usize {
        self.deleted.len().saturating_add(self.inserted.len())
    }

    /// Reverts this op on `buffer`.
    pub(crate) fn revert(&self, buffer: &mut RopeBuffer) {
        let end = self.start.saturating_add(self.inserted.chars().count());
        buffer.replace_char_range(self.start..end, self.deleted.as_str());
    }

    /// Re-applies this op on `buffer`.
    pub(crate) fn reapply(&self, buffer: &mut RopeBuffer) {
        let end = self.start.saturating_add(self.deleted.chars().count());
        buffer.replace_char_range(self.start..end, self.inserted.as_str());
    }
}

/// All replacements performed by one command, in application order.
#[derive(Clone, Debug)]
pub struct EditGroup {
    pub ops: Vec<EditOp>,
    pub intent: EditIntent,
    pub before: Selection,
    pub after: Selection,
    pub at: Instant,
}

impl EditGroup {
    fn bytes(&self) -> usize {
        self.ops.iter().map(EditOp::bytes).sum()
    }

    /// Lowest char offset any op of the group touches.
    pub(crate) fn first_start(&self) -> usize {
        self.ops.iter().map(|op| op.start).min().unwrap_or_default()
    }
}

/// Group-based undo/redo stack with bounded memory.
#[derive(Debug)]
pub struct EditHistory {
    undo: Vec<EditGroup>,
    redo: Vec<EditGroup>,
    undo_bytes: usize,
    max_groups: usize,
    max_bytes: usize,
    coalesce_window: Duration,
}

impl Default for EditHistory {
    fn default() -> Self {
        Self {
            undo: Vec::new(),
            redo: Vec::new(),
            undo_bytes: 0,
            max_groups: DEFAULT_MAX_GROUPS,
            max_bytes: DEFAULT_MAX_BYTES,
            coalesce_window: DEFAULT_COALESCE_WINDOW,
        }
    }
}

impl EditHistory {
    /// Record a committed group in undo history.
    pub fn record(&mut self, group: EditGroup) {
        if group.ops.is_empty() {
            return;
        }
        self.redo.clear();
        if let Some(last) = self.undo.last_mut() {
            if Self::can_coalesce(last, &group, self.coalesce_window) {
                self.undo_bytes = self.undo_bytes.saturating_sub(last.bytes());
                last.ops[0].inserted.push_str(group.ops[0].inserted.as_str());
                last.after = group.after;
                last.at = group.at;
                self.undo_bytes = self.undo_bytes.saturating_add(last.bytes());
                self.trim_undo();
                return;
            }
        }
        self.undo_bytes = self.undo_bytes.saturating_add(group.bytes());
        self.undo.push(group);
        self.trim_undo();
    }

    fn can_coalesce(previous: &EditGroup, next: &EditGroup, window: Duration) -> bool {
        if previous.intent != EditIntent::Insert || next.intent != EditIntent::Insert {
            return false;
        }
        if next.at.saturating_duration_since(previous.at) > window {
            return false;
        }
        let ([prev_op], [next_op]) = (previous.ops.as_slice(), next.ops.as_slice()) else {
            return false;
        };
        if !prev_op.deleted.is_empty() || !next_op.deleted.is_empty() {
            return false;
        }
        next_op.start == prev_op.start + prev_op.inserted.chars().count()
    }

    fn trim_undo(&mut self) {
        while self.undo.len() > self.max_groups || self.undo_bytes > self.max_bytes {
            if self.undo.is_empty() {
                break;
            }
            let removed = self.undo.remove(0);
            self.undo_bytes = self.undo_bytes.saturating_sub(removed.bytes());
        }
    }

    /// Undo the most recent group.
    ///
    /// # Returns
    /// The selection to restore and the lowest char offset the group touched,
    /// or `None` when there is nothing to undo.
    pub fn undo(&mut self, buffer: &mut RopeBuffer) -> Option<(Selection, usize)> {
        let group = self.undo.pop()?;
        self.undo_bytes = self.undo_bytes.saturating_sub(group.bytes());
        for op in group.ops.iter().rev() {
            op.revert(buffer);
        }
        let restored = (group.before, group.first_start());
        self.redo.push(group);
        Some(restored)
    }

    /// Redo the next group, if available.
    pub fn redo(&mut self, buffer: &mut RopeBuffer) -> Option<(Selection, usize)> {
        let group = self.redo.pop()?;
        for op in &group.ops {
            op.reapply(buffer);
        }
        let restored = (group.after, group.first_start());
        self.undo_bytes = self.undo_bytes.saturating_add(group.bytes());
        self.undo.push(group);
        self.trim_undo();
        Some(restored)
    }

    /// Number of groups available to undo.
    pub fn undo_len(&self) -> usize {
        self.undo.len()
    }

    /// Number of groups available to redo.
    pub fn redo_len(&self) -> usize {
        self.redo.len()
    }
}
