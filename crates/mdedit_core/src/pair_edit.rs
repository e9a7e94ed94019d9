//! Auto-pairing of brackets, quotes and emphasis chars.

use crate::config::EditorConfig;
use crate::document::Document;
use crate::history::EditIntent;
use crate::pairs::PairTable;
use crate::selection::Selection;
use tracing::debug;

fn is_space_or_edge(ch: Option<char>) -> bool {
    ch.map_or(true, char::is_whitespace)
}

/// Steps over `ch` when it is an enabled closer already sitting at the caret.
fn skip_closing(doc: &mut Document, config: &EditorConfig, pairs: &PairTable, ch: char) -> bool {
    if !config.auto_match_enabled || doc.selection().has_selection() {
        return false;
    }
    if !pairs.by_close(ch).is_some_and(|entry| entry.enabled) {
        return false;
    }
    let caret = doc.cursor();
    let view = doc.buffer().line_view(caret);
    if view.after(0) != Some(ch) {
        return false;
    }
    debug!(char = %ch, caret, "skip over closing char");
    doc.set_cursor(caret + 1);
    true
}

/// Inserts an opening char with its closer, wrapping a single-line selection.
fn insert_pair(doc: &mut Document, config: &EditorConfig, pairs: &PairTable, ch: char) -> bool {
    if !config.auto_match_enabled {
        return false;
    }
    let Some(entry) = pairs.by_open(ch).filter(|entry| entry.enabled) else {
        return false;
    };
    let selection = doc.selection();
    let (open, close) = (entry.open.to_string(), entry.close.to_string());

    if selection.has_selection() {
        let (start, end) = (selection.start(), selection.end());
        let buffer = doc.buffer();
        if buffer.char_to_line_col(start).0 != buffer.char_to_line_col(end).0 {
            return false;
        }
        let mut tx = doc.transaction(EditIntent::Pair);
        tx.insert(start, &open);
        tx.insert(end + 1, &close);
        tx.set_selection(selection.with_bounds(start + 1, end + 1));
        return tx.commit();
    }

    let caret = selection.cursor();
    let view = doc.buffer().line_view(caret);
    let opens_here = is_space_or_edge(view.before()) || entry.matches_after_word;
    if !opens_here || !is_space_or_edge(view.after(0)) {
        return false;
    }
    debug!(open = %entry.open, close = %entry.close, caret, "auto-pair");
    let mut tx = doc.transaction(EditIntent::Pair);
    tx.insert(caret, &format!("{open}{close}"));
    tx.set_selection(Selection::caret(caret + 1));
    tx.commit()
}

/// A printable char was typed.
///
/// # Returns
/// `true` when the char was consumed by skip-over or pairing.
pub fn on_character_typed(
    doc: &mut Document,
    config: &EditorConfig,
    pairs: &PairTable,
    ch: char,
) -> bool {
    skip_closing(doc, config, pairs, ch) || insert_pair(doc, config, pairs, ch)
}

/// Deletes both chars of an empty pair around the caret.
pub fn on_backspace(doc: &mut Document, config: &EditorConfig, pairs: &PairTable) -> bool {
    if !config.auto_match_enabled || doc.selection().has_selection() {
        return false;
    }
    let caret = doc.cursor();
    let view = doc.buffer().line_view(caret);
    let (Some(before), Some(after)) = (view.before(), view.after(0)) else {
        return false;
    };
    if !pairs.is_pair(before, after) {
        return false;
    }
    let mut tx = doc.transaction(EditIntent::Pair);
    tx.delete(caret - 1..caret + 1);
    tx.commit()
}

/// Whitespace typed inside an empty `**`, `__` or `<>` replaces the closer.
pub fn on_whitespace_typed(doc: &mut Document, pairs: &PairTable, whitespace: char) -> bool {
    if doc.selection().has_selection() {
        return false;
    }
    let caret = doc.cursor();
    let view = doc.buffer().line_view(caret);
    let (Some(before), Some(after)) = (view.before(), view.after(0)) else {
        return false;
    };
    if !pairs.is_non_empty_pair(before, after) {
        return false;
    }
    let mut tx = doc.transaction(EditIntent::Pair);
    tx.replace(caret..caret + 1, &whitespace.to_string());
    tx.set_selection(Selection::caret(caret + 1));
    tx.commit()
}
