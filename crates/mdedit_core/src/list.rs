//! Enter-key continuation of lists, task lists and blockquotes.

use crate::constants::HARD_LINE_BREAK;
use crate::document::{Document, Transaction};
use crate::history::EditIntent;
use crate::line_state::LineState;
use crate::patterns::{self, BLOCKQUOTE, BULLET_LIST, DIGITS, NUMBERED_LIST, TASK_LIST};
use crate::selection::Selection;
use tracing::debug;

/// What pressing Enter does to the current line.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ReturnPlan {
    /// Insert a newline followed by `prefix`.
    Continue { prefix: String },
    /// Replace the empty item with `indentation`, then insert a bare newline.
    Terminate { indentation: String },
}

fn indentation_before(line: &str, column: usize) -> String {
    patterns::indentation(line).chars().take(column).collect()
}

fn continue_with(prefix: impl Into<String>) -> ReturnPlan {
    ReturnPlan::Continue {
        prefix: prefix.into(),
    }
}

/// Item prefix to repeat, or termination when the line is nothing but that prefix.
fn list_item_plan(line: &str, prefix: &str, next_prefix: impl FnOnce() -> String) -> ReturnPlan {
    if line.len() == prefix.len() {
        ReturnPlan::Terminate {
            indentation: patterns::indentation(line).to_string(),
        }
    } else {
        continue_with(next_prefix())
    }
}

/// Decides what Enter inserts for `line` with the caret at `column`.
///
/// `state` is only a hint: list and quote handling re-check the line text and
/// fall back to plain indentation when it does not match.
pub fn plan_return(line: &str, column: usize, state: LineState) -> ReturnPlan {
    let plain = || continue_with(indentation_before(line, usize::MAX));
    if column < line.chars().count() {
        return continue_with(indentation_before(line, column));
    }
    match state {
        LineState::NumberedList => {
            let Some(captures) = NUMBERED_LIST.captures(line) else {
                return plain();
            };
            let prefix = captures.get(0).map_or("", |m| m.as_str());
            let Some(number) = captures
                .get(1)
                .and_then(|m| m.as_str().parse::<u64>().ok())
            else {
                return plain();
            };
            list_item_plan(line, prefix, || {
                DIGITS
                    .replace(prefix, number.saturating_add(1).to_string().as_str())
                    .into_owned()
            })
        }
        LineState::TaskList => match patterns::prefix(&TASK_LIST, line) {
            Some(prefix) => list_item_plan(line, prefix, || prefix.replace('x', " ")),
            None => plain(),
        },
        LineState::BulletList => match patterns::prefix(&BULLET_LIST, line) {
            Some(prefix) => list_item_plan(line, prefix, || prefix.to_string()),
            None => plain(),
        },
        LineState::Blockquote => match patterns::prefix(&BLOCKQUOTE, line) {
            Some(prefix) => continue_with(prefix),
            None => plain(),
        },
        LineState::None | LineState::CodeBlock(_) => plain(),
    }
}

fn apply_return(tx: &mut Transaction<'_>, state: LineState) {
    let view = tx.buffer().line_view(tx.selection().cursor());
    let ending = tx.buffer().line_ending(view.index);
    let plan = plan_return(&view.text, view.column, state);
    debug!(line = view.index, ?state, ?plan, "return continuation");
    let prefix = match plan {
        ReturnPlan::Continue { prefix } => prefix,
        ReturnPlan::Terminate { indentation } => {
            tx.replace(view.start..view.end(), &indentation);
            String::new()
        }
    };
    let caret = tx.selection().cursor();
    let inserted = format!("{ending}{prefix}");
    tx.insert(caret, &inserted);
    tx.set_selection(Selection::caret(caret + inserted.chars().count()));
}

/// Enter: newline plus continuation of the current line's structure.
///
/// # Returns
/// `false` with an active selection (the host replaces it with a newline).
pub fn handle_return(doc: &mut Document, state: LineState) -> bool {
    if doc.selection().has_selection() {
        return false;
    }
    let mut tx = doc.transaction(EditIntent::Continue);
    apply_return(&mut tx, state);
    tx.commit()
}

/// Shift+Enter: Markdown hard line break, then continuation as for Enter.
pub fn handle_hard_line_break(doc: &mut Document, state: LineState) -> bool {
    if doc.selection().has_selection() {
        return false;
    }
    let mut tx = doc.transaction(EditIntent::Continue);
    let caret = tx.selection().cursor();
    tx.insert(caret, HARD_LINE_BREAK);
    apply_return(&mut tx, state);
    tx.commit()
}

/// Ctrl+Enter: replaces the selection with a bare line break, no continuation.
///
/// # Returns
/// Always `true`.
pub fn handle_plain_newline(doc: &mut Document) -> bool {
    let selection = doc.selection();
    let mut tx = doc.transaction(EditIntent::Continue);
    let (line, _) = tx.buffer().char_to_line_col(selection.start());
    let ending = tx.buffer().line_ending(line);
    tx.replace(selection.start()..selection.end(), ending);
    tx.set_selection(Selection::caret(selection.start() + ending.chars().count()));
    tx.commit();
    true
}
