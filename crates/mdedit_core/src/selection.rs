//! Caret and selection state in global char coordinates.

use std::ops::Range;

/// An anchor/active pair. `anchor == active` is a plain caret.
///
/// The active end is where the caret is drawn; the anchor is where the
/// selection started. Either may come first.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Selection {
    pub anchor: usize,
    pub active: usize,
}

impl Selection {
    /// A caret with no selected text.
    pub fn caret(position: usize) -> Self {
        Self {
            anchor: position,
            active: position,
        }
    }

    /// A selection spanning `anchor..active` in either direction.
    pub fn new(anchor: usize, active: usize) -> Self {
        Self { anchor, active }
    }

    /// Rebuilds a selection over `start..end` with the orientation of `self`.
    pub fn with_bounds(self, start: usize, end: usize) -> Self {
        if self.is_forward() {
            Self::new(start, end)
        } else {
            Self::new(end, start)
        }
    }

    /// Returns the caret position (the active end).
    pub fn cursor(&self) -> usize {
        self.active
    }

    /// True when the anchor does not come after the active end.
    pub fn is_forward(&self) -> bool {
        self.anchor <= self.active
    }

    /// True when some text is selected.
    pub fn has_selection(&self) -> bool {
        self.anchor != self.active
    }

    /// Lower bound of the selection.
    pub fn start(&self) -> usize {
        self.anchor.min(self.active)
    }

    /// Upper bound of the selection.
    pub fn end(&self) -> usize {
        self.anchor.max(self.active)
    }

    /// Returns a normalized selected range, if any.
    pub fn range(&self) -> Option<Range<usize>> {
        self.has_selection().then(|| self.start()..self.end())
    }

    /// Clamp both ends to `text_len`.
    pub fn clamped(self, text_len: usize) -> Self {
        Self::new(self.anchor.min(text_len), self.active.min(text_len))
    }
}
