//! The editing service a host talks to.

use crate::blocks::{self, touched_lines, BulletMarker, NumberDelimiter};
use crate::command::{apply_host_default, EditorCommand};
use crate::config::EditorConfig;
use crate::document::Document;
use crate::emphasis;
use crate::error::EditorError;
use crate::indent;
use crate::line_state::{LineClassifier, LineState, MarkdownLineClassifier};
use crate::list;
use crate::markup::MarkupToken;
use crate::pair_edit;
use crate::pairs::PairTable;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, info};

/// Source of editor ids; `0` is reserved for "no editor".
static NEXT_EDITOR_ID: AtomicU64 = AtomicU64::new(1);

/// Markdown-aware key and command handling over a host [`Document`].
///
/// Holds only immutable configuration. Every entry point borrows the document
/// for one call and commits at most one undo step.
///
/// Entry points return `true` when the command was handled and the host must
/// suppress its default behavior.
#[derive(Debug, Clone)]
pub struct MarkdownEditor<C: LineClassifier = MarkdownLineClassifier> {
    /// Keys the document's line-state cache to this editor's classifier.
    id: u64,
    config: EditorConfig,
    pairs: PairTable,
    classifier: C,
}

impl MarkdownEditor<MarkdownLineClassifier> {
    /// Builds an editor using the built-in line classifier.
    ///
    /// # Errors
    /// Returns [`EditorError`] when `config` is invalid.
    pub fn new(config: EditorConfig) -> Result<Self, EditorError> {
        Self::with_classifier(config, MarkdownLineClassifier)
    }
}

impl<C: LineClassifier> MarkdownEditor<C> {
    /// Builds an editor that asks `classifier` for line states.
    ///
    /// # Errors
    /// Returns [`EditorError`] when `config` is invalid.
    pub fn with_classifier(config: EditorConfig, classifier: C) -> Result<Self, EditorError> {
        config.validate()?;
        let pairs = PairTable::from_config(&config);
        info!(
            tab_width = config.tab_width,
            spaces = config.insert_spaces_for_tabs,
            auto_match = config.auto_match_enabled,
            bullet_cycling = config.bullet_cycling_enabled,
            "markdown editor ready"
        );
        Ok(Self {
            id: NEXT_EDITOR_ID.fetch_add(1, Ordering::Relaxed),
            config,
            pairs,
            classifier,
        })
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn pairs(&self) -> &PairTable {
        &self.pairs
    }

    /// State of the line holding the caret.
    ///
    /// Takes the document mutably to reuse and extend its cached line states.
    pub fn caret_line_state(&self, doc: &mut Document) -> LineState {
        let (line, _) = doc.cursor_line_col();
        self.line_state(doc, line)
    }

    fn line_state(&self, doc: &mut Document, line: usize) -> LineState {
        doc.line_states(self.id, &self.classifier, line, line)
            .first()
            .copied()
            .unwrap_or_default()
    }

    /// Enter.
    pub fn handle_return(&self, doc: &mut Document) -> bool {
        let state = self.caret_line_state(doc);
        list::handle_return(doc, state)
    }

    /// Shift+Enter.
    pub fn handle_hard_line_break(&self, doc: &mut Document) -> bool {
        let state = self.caret_line_state(doc);
        list::handle_hard_line_break(doc, state)
    }

    /// Ctrl+Enter: a newline with no continuation. Always handled.
    pub fn handle_plain_newline(&self, doc: &mut Document) -> bool {
        list::handle_plain_newline(doc)
    }

    /// Backspace: empty list or quote marker first, then an empty auto-pair.
    pub fn handle_backspace(&self, doc: &mut Document) -> bool {
        if doc.selection().has_selection() {
            return false;
        }
        let state = self.caret_line_state(doc);
        blocks::remove_empty_marker(doc, state)
            || pair_edit::on_backspace(doc, &self.config, &self.pairs)
    }

    /// Tab. Always handled.
    pub fn handle_tab(&self, doc: &mut Document) -> bool {
        if pair_edit::on_whitespace_typed(doc, &self.pairs, '\t') {
            return true;
        }
        let state = self.caret_line_state(doc);
        indent::handle_tab(doc, &self.config, state)
    }

    /// Backtab. Always handled.
    pub fn handle_backtab(&self, doc: &mut Document) -> bool {
        let last = *touched_lines(doc.buffer(), doc.selection()).end();
        let state = self.line_state(doc, last);
        indent::handle_backtab(doc, &self.config, state)
    }

    /// A printable, non-whitespace char.
    pub fn handle_character(&self, doc: &mut Document, ch: char) -> bool {
        pair_edit::on_character_typed(doc, &self.config, &self.pairs, ch)
    }

    /// A space or other whitespace char.
    pub fn handle_whitespace(&self, doc: &mut Document, whitespace: char) -> bool {
        pair_edit::on_whitespace_typed(doc, &self.pairs, whitespace)
    }

    pub fn toggle_bold(&self, doc: &mut Document) -> bool {
        self.toggle_markup(doc, MarkupToken::Bold)
    }

    pub fn toggle_italic(&self, doc: &mut Document) -> bool {
        self.toggle_markup(doc, MarkupToken::Italic)
    }

    pub fn toggle_strikethrough(&self, doc: &mut Document) -> bool {
        self.toggle_markup(doc, MarkupToken::Strikethrough)
    }

    /// Applies `token` at the caret or selection. Always handled.
    pub fn toggle_markup(&self, doc: &mut Document, token: MarkupToken) -> bool {
        emphasis::apply_markup(doc, token);
        true
    }

    /// Checks or unchecks every touched task item. Always handled.
    pub fn toggle_task_complete(&self, doc: &mut Document) -> bool {
        let lines = touched_lines(doc.buffer(), doc.selection());
        let states = doc
            .line_states(self.id, &self.classifier, *lines.start(), *lines.end())
            .to_vec();
        blocks::toggle_task_complete(doc, &states)
    }

    pub fn create_bullet_list(&self, doc: &mut Document, marker: BulletMarker) -> bool {
        blocks::create_bullet_list(doc, marker)
    }

    pub fn create_numbered_list(&self, doc: &mut Document, delimiter: NumberDelimiter) -> bool {
        blocks::create_numbered_list(doc, delimiter)
    }

    pub fn create_task_list(&self, doc: &mut Document) -> bool {
        blocks::create_task_list(doc)
    }

    pub fn create_blockquote(&self, doc: &mut Document) -> bool {
        blocks::create_blockquote(doc)
    }

    pub fn remove_blockquote(&self, doc: &mut Document) -> bool {
        blocks::remove_blockquote(doc)
    }

    pub fn insert_comment(&self, doc: &mut Document) -> bool {
        blocks::insert_comment(doc)
    }

    /// Routes `command` to its entry point.
    ///
    /// Undo and redo report whether history moved; caret movement is never
    /// handled here.
    pub fn dispatch(&self, doc: &mut Document, command: &EditorCommand) -> bool {
        let handled = match command {
            EditorCommand::Return => self.handle_return(doc),
            EditorCommand::HardLineBreak => self.handle_hard_line_break(doc),
            EditorCommand::PlainNewline => self.handle_plain_newline(doc),
            EditorCommand::Backspace => self.handle_backspace(doc),
            EditorCommand::Tab => self.handle_tab(doc),
            EditorCommand::Backtab => self.handle_backtab(doc),
            EditorCommand::Char(ch) if ch.is_whitespace() => self.handle_whitespace(doc, *ch),
            EditorCommand::Char(ch) => self.handle_character(doc, *ch),
            EditorCommand::Markup(token) => self.toggle_markup(doc, *token),
            EditorCommand::ToggleTaskComplete => self.toggle_task_complete(doc),
            EditorCommand::InsertComment => self.insert_comment(doc),
            EditorCommand::CreateBlockquote => self.create_blockquote(doc),
            EditorCommand::RemoveBlockquote => self.remove_blockquote(doc),
            EditorCommand::CreateBulletList(marker) => self.create_bullet_list(doc, *marker),
            EditorCommand::CreateNumberedList(delimiter) => {
                self.create_numbered_list(doc, *delimiter)
            }
            EditorCommand::CreateTaskList => self.create_task_list(doc),
            EditorCommand::Undo => doc.undo(),
            EditorCommand::Redo => doc.redo(),
            EditorCommand::MoveLeft
            | EditorCommand::MoveRight
            | EditorCommand::MoveHome
            | EditorCommand::MoveEnd => false,
        };
        debug!(?command, handled, "dispatch");
        handled
    }

    /// Dispatches `command`, falling back to the host default when unhandled.
    pub fn apply(&self, doc: &mut Document, command: &EditorCommand) {
        if !self.dispatch(doc, command) {
            apply_host_default(doc, command);
        }
    }
}
