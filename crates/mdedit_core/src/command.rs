//! Normalized editor commands and the host's fallback behavior for them.

use crate::blocks::{BulletMarker, NumberDelimiter};
use crate::document::Document;
use crate::markup::MarkupToken;

/// One user action, as delivered by a host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EditorCommand {
    Return,
    /// Shift+Enter.
    HardLineBreak,
    /// Ctrl+Enter: a line break without list or quote continuation.
    PlainNewline,
    Backspace,
    Tab,
    Backtab,
    /// A typed char; whitespace goes through the empty-pair check.
    Char(char),
    Markup(MarkupToken),
    ToggleTaskComplete,
    InsertComment,
    CreateBlockquote,
    RemoveBlockquote,
    CreateBulletList(BulletMarker),
    CreateNumberedList(NumberDelimiter),
    CreateTaskList,
    Undo,
    Redo,
    MoveLeft,
    MoveRight,
    MoveHome,
    MoveEnd,
}

/// What a plain text widget does with `command` when the editor declines it.
///
/// # Returns
/// `true` when the document changed.
pub fn apply_host_default(doc: &mut Document, command: &EditorCommand) -> bool {
    let selection = doc.selection();
    match command {
        EditorCommand::Return | EditorCommand::HardLineBreak | EditorCommand::PlainNewline => {
            let (line, _) = doc.cursor_line_col();
            let ending = doc.buffer().line_ending(line);
            doc.insert_text(ending)
        }
        EditorCommand::Backspace => doc.delete_backward(),
        EditorCommand::Tab => doc.insert_text("\t"),
        EditorCommand::Char(ch) => doc.insert_text(&ch.to_string()),
        EditorCommand::MoveLeft => {
            let to = if selection.has_selection() {
                selection.start()
            } else {
                selection.cursor().saturating_sub(1)
            };
            doc.set_cursor(to);
            true
        }
        EditorCommand::MoveRight => {
            let to = if selection.has_selection() {
                selection.end()
            } else {
                selection.cursor() + 1
            };
            doc.set_cursor(to);
            true
        }
        EditorCommand::MoveHome | EditorCommand::MoveEnd => {
            let (line, _) = doc.cursor_line_col();
            let to = if *command == EditorCommand::MoveHome {
                doc.buffer().line_start(line)
            } else {
                doc.buffer().line_end(line)
            };
            doc.set_cursor(to);
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_default_inserts_and_moves() {
        let mut doc = Document::new("ab\ncd");
        doc.set_cursor(4);
        assert!(apply_host_default(&mut doc, &EditorCommand::MoveHome));
        assert_eq!(doc.cursor(), 3);
        assert!(apply_host_default(&mut doc, &EditorCommand::MoveEnd));
        assert_eq!(doc.cursor(), 5);
        assert!(apply_host_default(&mut doc, &EditorCommand::Char('é')));
        assert_eq!(doc.text(), "ab\ncdé");
        assert!(apply_host_default(&mut doc, &EditorCommand::MoveLeft));
        assert_eq!(doc.cursor(), 5);
        assert!(apply_host_default(&mut doc, &EditorCommand::Return));
        assert_eq!(doc.text(), "ab\ncd\né");
    }

    #[test]
    fn arrows_collapse_a_selection() {
        let mut doc = Document::new("abcd");
        doc.set_selection(3, 1);
        apply_host_default(&mut doc, &EditorCommand::MoveRight);
        assert_eq!(doc.cursor(), 3);
        doc.set_selection(3, 1);
        apply_host_default(&mut doc, &EditorCommand::MoveLeft);
        assert_eq!(doc.cursor(), 1);
    }

    #[test]
    fn formatting_commands_have_no_host_default() {
        let mut doc = Document::new("x");
        assert!(!apply_host_default(&mut doc, &EditorCommand::Markup(MarkupToken::Bold)));
        assert!(!apply_host_default(&mut doc, &EditorCommand::CreateTaskList));
        assert_eq!(doc.text(), "x");
    }

    #[test]
    fn host_newline_matches_the_line_ending() {
        let mut doc = Document::new("a\r\nb");
        doc.set_cursor(1);
        assert!(apply_host_default(&mut doc, &EditorCommand::PlainNewline));
        assert_eq!(doc.text(), "a\r\n\r\nb");
    }
}
