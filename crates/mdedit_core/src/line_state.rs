//! Per-line block classification.
//!
//! The editing engines treat [`LineState`] as an oracle supplied by the host's
//! highlighter. [`MarkdownLineClassifier`] is the built-in implementation for
//! hosts without one.

use crate::buffer::RopeBuffer;
use crate::patterns::{BLOCKQUOTE, BULLET_LIST, CODE_FENCE, NUMBERED_LIST, TASK_LIST};

/// Position of a line inside a fenced code block.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CodeFence {
    Opening,
    Body,
    Closing,
}

/// Structural role of a single line.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LineState {
    #[default]
    None,
    Blockquote,
    CodeBlock(CodeFence),
    NumberedList,
    TaskList,
    BulletList,
}

impl LineState {
    pub fn is_code_block(self) -> bool {
        matches!(self, Self::CodeBlock(_))
    }

    pub fn is_blockquote(self) -> bool {
        matches!(self, Self::Blockquote)
    }

    /// True when the next line is still inside the fenced block.
    fn continues_code_block(self) -> bool {
        matches!(
            self,
            Self::CodeBlock(CodeFence::Opening) | Self::CodeBlock(CodeFence::Body)
        )
    }
}

/// Classifies a line from its own text and the previous line's state.
pub trait LineClassifier {
    fn classify(&self, line: &str, previous: LineState) -> LineState;
}

/// Regex-based classifier for fenced code, blockquotes and lists.
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkdownLineClassifier;

impl LineClassifier for MarkdownLineClassifier {
    fn classify(&self, line: &str, previous: LineState) -> LineState {
        let is_fence = CODE_FENCE.is_match(line);
        if previous.continues_code_block() {
            return if is_fence {
                LineState::CodeBlock(CodeFence::Closing)
            } else {
                LineState::CodeBlock(CodeFence::Body)
            };
        }
        if is_fence {
            LineState::CodeBlock(CodeFence::Opening)
        } else if BLOCKQUOTE.is_match(line) {
            LineState::Blockquote
        } else if TASK_LIST.is_match(line) {
            LineState::TaskList
        } else if NUMBERED_LIST.is_match(line) {
            LineState::NumberedList
        } else if BULLET_LIST.is_match(line) {
            LineState::BulletList
        } else {
            LineState::None
        }
    }
}

/// Line states for a prefix of a document, as produced by one classifier.
///
/// A document keeps one cache and truncates it from the first edited line on
/// every mutation, so a query classifies only lines that changed since the
/// last one. States above an edit never depend on text below it.
#[derive(Clone, Debug, Default)]
pub(crate) struct LineStateCache {
    /// Editor that filled the cache; `0` means nobody has.
    owner: u64,
    states: Vec<LineState>,
}

impl LineStateCache {
    /// Drops every state from `line` down.
    pub(crate) fn invalidate_from(&mut self, line: usize) {
        self.states.truncate(line);
    }

    /// States of lines `first..=last`, classifying any uncached lines above them.
    pub(crate) fn states<C: LineClassifier + ?Sized>(
        &mut self,
        owner: u64,
        classifier: &C,
        buffer: &RopeBuffer,
        first: usize,
        last: usize,
    ) -> &[LineState] {
        if self.owner != owner {
            self.owner = owner;
            self.states.clear();
        }
        let last = last.min(buffer.line_count().saturating_sub(1));
        let mut previous = self.states.last().copied().unwrap_or_default();
        for line in self.states.len()..=last {
            previous = classifier.classify(buffer.line_text(line).as_str(), previous);
            self.states.push(previous);
        }
        &self.states[first.min(last)..=last]
    }
}
