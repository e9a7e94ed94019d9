//! Tab and Backtab, including list-marker cycling and numbered-list restart.

use crate::blocks::touched_lines;
use crate::config::EditorConfig;
use crate::document::{Document, Transaction};
use crate::history::EditIntent;
use crate::line_state::LineState;
use crate::patterns::{DIGITS, EMPTY_BULLET_LIST, EMPTY_NUMBERED_LIST, EMPTY_TASK_LIST};
use tracing::debug;

/// Marker that follows `bullet` when indenting.
pub fn next_bullet(bullet: char) -> char {
    match bullet {
        '*' => '-',
        '-' => '+',
        _ => '*',
    }
}

/// Marker that follows `bullet` when unindenting.
pub fn previous_bullet(bullet: char) -> char {
    match bullet {
        '*' => '+',
        '-' => '*',
        _ => '-',
    }
}

fn bullet_char(line: &str) -> Option<char> {
    line.trim_start().chars().next()
}

/// Replaces line `line` with `text` unless they already agree.
fn rewrite_line(tx: &mut Transaction<'_>, line: usize, text: &str) {
    let buffer = tx.buffer();
    let range = buffer.line_start(line)..buffer.line_end(line);
    if buffer.line_text(line) != text {
        tx.replace(range, text);
    }
}

/// Rewritten text for an empty list item being indented, if the line is one.
fn indented_empty_item(line: &str, state: LineState, config: &EditorConfig) -> Option<String> {
    match state {
        LineState::NumberedList if EMPTY_NUMBERED_LIST.is_match(line) => {
            Some(DIGITS.replace_all(line, "1").into_owned())
        }
        LineState::TaskList if EMPTY_TASK_LIST.is_match(line) => Some(line.to_string()),
        LineState::BulletList if EMPTY_BULLET_LIST.is_match(line) => {
            match bullet_char(line).filter(|_| config.bullet_cycling_enabled) {
                Some(old) => Some(line.replacen(old, &next_bullet(old).to_string(), 1)),
                None => Some(line.to_string()),
            }
        }
        _ => None,
    }
}

/// Tab.
///
/// With a selection every touched line gains one indent unit. On an empty list
/// item the marker is renumbered or cycled and the whole item is indented.
/// Elsewhere the caret advances to the next tab stop.
///
/// # Returns
/// Always `true`; Tab is never left to the host.
pub fn handle_tab(doc: &mut Document, config: &EditorConfig, state: LineState) -> bool {
    let unit = config.indent_unit();
    let selection = doc.selection();
    let mut tx = doc.transaction(EditIntent::Indent);

    if selection.has_selection() {
        for line in touched_lines(tx.buffer(), selection) {
            let start = tx.buffer().line_start(line);
            tx.insert(start, &unit);
        }
        tx.commit();
        return true;
    }

    let view = tx.buffer().line_view(selection.cursor());
    if let Some(rewritten) = indented_empty_item(&view.text, state, config) {
        debug!(line = view.index, ?state, rewritten = rewritten.as_str(), "indent empty item");
        rewrite_line(&mut tx, view.index, &rewritten);
        tx.insert(view.start, &unit);
    } else {
        let text = if config.insert_spaces_for_tabs {
            let width = config.tab_width.max(1);
            " ".repeat(width - view.column % width)
        } else {
            "\t".to_string()
        };
        tx.insert(selection.cursor(), &text);
    }
    tx.commit();
    true
}

/// Removes one tab or up to `tab_width` leading spaces from `line`.
fn outdent_line(tx: &mut Transaction<'_>, line: usize, tab_width: usize) {
    let start = tx.buffer().line_start(line);
    let text = tx.buffer().line_text(line);
    let width = if text.starts_with('\t') {
        1
    } else {
        text.chars().take(tab_width).take_while(|ch| *ch == ' ').count()
    };
    if width > 0 {
        tx.delete(start..start + width);
    }
}

/// Backtab.
///
/// `last_state` is the state of the last touched line; an empty bullet there
/// has its marker cycled backwards after the outdent.
///
/// # Returns
/// Always `true`.
pub fn handle_backtab(doc: &mut Document, config: &EditorConfig, last_state: LineState) -> bool {
    let selection = doc.selection();
    let mut tx = doc.transaction(EditIntent::Unindent);
    let lines = touched_lines(tx.buffer(), selection);
    let last = *lines.end();
    for line in lines {
        outdent_line(&mut tx, line, config.tab_width);
    }

    let text = tx.buffer().line_text(last);
    if last_state == LineState::BulletList
        && config.bullet_cycling_enabled
        && EMPTY_BULLET_LIST.is_match(&text)
    {
        if let Some(old) = bullet_char(&text) {
            let cycled = text.replacen(old, &previous_bullet(old).to_string(), 1);
            debug!(line = last, from = %old, to = %previous_bullet(old), "cycle bullet back");
            rewrite_line(&mut tx, last, &cycled);
        }
    }
    tx.commit();
    true
}
