//! Bold, italic and strikethrough toggling.
//!
//! A request is first turned into a [`MarkupPlan`] by inspecting the selection
//! and the markup touching the caret, then applied as one edit. The plan is
//! exposed so hosts and tests can see which rule fired.

use crate::buffer::{LineView, RopeBuffer};
use crate::document::{Document, Transaction};
use crate::history::EditIntent;
use crate::markup::{detect_adjacent_markup, find_markup, MarkupToken, ScanDirection};
use crate::selection::Selection;
use tracing::debug;

/// Which rule selected the span to toggle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkupRule {
    /// The user's own selection.
    Selection,
    /// The caret sits between two identical tokens.
    Enclosing,
    /// A token just before the caret closes a run opened earlier on the line.
    ClosePreceding,
    /// A token just before the caret opens a run closed later on the line.
    OpenPreceding,
    /// A token just after the caret opens a run closed later on the line.
    OpenFollowing,
    /// A token just after the caret closes a run opened earlier on the line.
    CloseFollowing,
}

/// Outcome of inspecting the caret or selection for a markup request.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MarkupPlan {
    /// Add or remove the token around `span`.
    Toggle { rule: MarkupRule, span: Selection },
    /// Step the caret over a closing token that already provides the markup.
    SkipClosing { to: usize },
    /// Insert the token twice at `at` and park the caret between them.
    InsertPair { at: usize },
}

/// Whitespace or ASCII punctuation. The end of the line is not a boundary.
fn is_word_boundary(ch: Option<char>) -> bool {
    ch.is_some_and(|ch| ch.is_whitespace() || ch.is_ascii_punctuation())
}

fn toggle(rule: MarkupRule, span: Selection) -> MarkupPlan {
    MarkupPlan::Toggle { rule, span }
}

fn plan_preceding(view: &LineView, preceding: MarkupToken) -> Option<MarkupPlan> {
    let width = preceding.width();
    let caret = view.start + view.column;
    let open_end = caret.saturating_sub(width);
    if is_word_boundary(view.after(0)) {
        let found = view.column.checked_sub(width + 1).and_then(|from| {
            find_markup(preceding, &view.chars, from, ScanDirection::Backward, true)
        });
        if let Some(last) = found {
            return Some(toggle(
                MarkupRule::ClosePreceding,
                Selection::new(open_end, view.start + last + 1),
            ));
        }
    }
    find_markup(
        preceding,
        &view.chars,
        view.column,
        ScanDirection::Forward,
        false,
    )
    .map(|first| {
        toggle(
            MarkupRule::OpenPreceding,
            Selection::new(caret, view.start + first),
        )
    })
}

fn plan_following(
    view: &LineView,
    following: MarkupToken,
    requested: MarkupToken,
) -> Option<MarkupPlan> {
    let width = following.width();
    let caret = view.start + view.column;
    if view.before().is_some_and(char::is_whitespace) {
        let found = find_markup(
            following,
            &view.chars,
            view.column + width,
            ScanDirection::Forward,
            false,
        );
        if let Some(first) = found {
            return Some(toggle(
                MarkupRule::OpenFollowing,
                Selection::new(caret + width, view.start + first),
            ));
        }
    }
    if following.covers(requested) {
        return Some(MarkupPlan::SkipClosing { to: caret + width });
    }
    if is_word_boundary(view.after(width)) {
        let found = view.column.checked_sub(1).and_then(|from| {
            find_markup(following, &view.chars, from, ScanDirection::Backward, false)
        });
        if let Some(last) = found {
            return Some(toggle(
                MarkupRule::CloseFollowing,
                Selection::new(caret, view.start + last + 1),
            ));
        }
    }
    None
}

/// Decides how a request for `token` applies to `selection`.
pub fn plan_markup(buffer: &RopeBuffer, selection: Selection, token: MarkupToken) -> MarkupPlan {
    if selection.has_selection() {
        return toggle(MarkupRule::Selection, selection);
    }
    let caret = selection.cursor();
    let adjacency = detect_adjacent_markup(buffer, caret, caret);
    if adjacency.symmetric().is_some() {
        return toggle(MarkupRule::Enclosing, selection);
    }
    let view = buffer.line_view(caret);
    adjacency
        .preceding
        .and_then(|preceding| plan_preceding(&view, preceding))
        .or_else(|| {
            adjacency
                .following
                .and_then(|following| plan_following(&view, following, token))
        })
        .unwrap_or(MarkupPlan::InsertPair { at: caret })
}

/// Adds or removes `token` around the transaction's current selection.
///
/// Removal happens when the selection is bracketed on both sides by the same
/// token and that token provides `token` (so `***` loses one layer at a time).
fn toggle_selection(tx: &mut Transaction<'_>, token: MarkupToken) {
    let selection = tx.selection();
    let (start, end) = (selection.start(), selection.end());
    let width = token.width();
    let existing = detect_adjacent_markup(tx.buffer(), start, end).symmetric();
    if let (Some(existing), Some(open)) = (existing, start.checked_sub(width)) {
        if existing.covers(token) {
            tx.delete(end..end + width);
            tx.delete(open..start);
            return;
        }
    }
    tx.insert(start, token.as_str());
    tx.insert(end + width, token.as_str());
    tx.set_selection(selection.with_bounds(start + width, end + width));
}

/// Toggles `token` at the document's caret or selection as one undo step.
///
/// # Returns
/// The plan that was applied.
pub fn apply_markup(doc: &mut Document, token: MarkupToken) -> MarkupPlan {
    let plan = plan_markup(doc.buffer(), doc.selection(), token);
    debug!(token = token.as_str(), ?plan, "apply markup");
    let mut tx = doc.transaction(EditIntent::Format);
    match plan {
        MarkupPlan::Toggle { span, .. } => {
            tx.set_selection(span);
            toggle_selection(&mut tx, token);
        }
        MarkupPlan::SkipClosing { to } => tx.set_selection(Selection::caret(to)),
        MarkupPlan::InsertPair { at } => {
            tx.insert(at, &token.as_str().repeat(2));
            tx.set_selection(Selection::caret(at + token.width()));
        }
    }
    tx.commit();
    plan
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc_with_caret(text: &str, caret: usize) -> Document {
        let mut doc = Document::new(text);
        doc.set_cursor(caret);
        doc
    }

    #[test]
    fn selection_toggle_is_idempotent() {
        let mut doc = Document::new("x abc y");
        doc.set_selection(2, 5);
        apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(doc.text(), "x **abc** y");
        assert_eq!(doc.selection(), Selection::new(4, 7));

        apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(doc.text(), "x abc y");
        assert_eq!(doc.selection(), Selection::new(2, 5));
    }

    #[test]
    fn backward_selection_keeps_orientation() {
        let mut doc = Document::new("abc");
        doc.set_selection(3, 0);
        apply_markup(&mut doc, MarkupToken::Strikethrough);
        assert_eq!(doc.text(), "~~abc~~");
        assert_eq!(doc.selection(), Selection::new(5, 2));
    }

    #[test]
    fn bold_then_italic_nests_into_triple_asterisks() {
        let mut doc = Document::new("x abc y");
        doc.set_selection(2, 5);
        apply_markup(&mut doc, MarkupToken::Bold);
        apply_markup(&mut doc, MarkupToken::Italic);
        assert_eq!(doc.text(), "x ***abc*** y");

        apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(doc.text(), "x *abc* y");
        apply_markup(&mut doc, MarkupToken::Italic);
        assert_eq!(doc.text(), "x abc y");
    }

    #[test]
    fn empty_pair_around_caret_is_removed() {
        let mut doc = doc_with_caret("a **** b", 4);
        let plan = apply_markup(&mut doc, MarkupToken::Bold);
        assert!(matches!(
            plan,
            MarkupPlan::Toggle {
                rule: MarkupRule::Enclosing,
                ..
            }
        ));
        assert_eq!(doc.text(), "a  b");
        assert_eq!(doc.cursor(), 2);
    }

    #[test]
    fn caret_after_closed_run_removes_it() {
        let mut doc = doc_with_caret("**bold** x", 8);
        let plan = apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(
            plan,
            MarkupPlan::Toggle {
                rule: MarkupRule::ClosePreceding,
                span: Selection::new(6, 2),
            }
        );
        assert_eq!(doc.text(), "bold x");
    }

    #[test]
    fn caret_after_opening_token_unwraps_the_run() {
        let mut doc = doc_with_caret("**bold**", 2);
        let plan = apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(
            plan,
            MarkupPlan::Toggle {
                rule: MarkupRule::OpenPreceding,
                span: Selection::new(2, 6),
            }
        );
        assert_eq!(doc.text(), "bold");
    }

    #[test]
    fn caret_before_opening_token_after_space() {
        let mut doc = doc_with_caret("x **bold** y", 2);
        let plan = apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(
            plan,
            MarkupPlan::Toggle {
                rule: MarkupRule::OpenFollowing,
                span: Selection::new(4, 8),
            }
        );
        assert_eq!(doc.text(), "x bold y");
    }

    #[test]
    fn caret_before_matching_closer_skips_over_it() {
        let mut doc = doc_with_caret("**bold**", 6);
        let plan = apply_markup(&mut doc, MarkupToken::Bold);
        assert_eq!(plan, MarkupPlan::SkipClosing { to: 8 });
        assert_eq!(doc.text(), "**bold**");
        assert_eq!(doc.cursor(), 8);
        assert_eq!(doc.history().undo_len(), 0);
    }

    #[test]
    fn caret_before_other_closer_wraps_the_run() {
        let mut doc = doc_with_caret("**bold**.", 6);
        let plan = apply_markup(&mut doc, MarkupToken::Italic);
        assert_eq!(
            plan,
            MarkupPlan::Toggle {
                rule: MarkupRule::CloseFollowing,
                span: Selection::new(6, 2),
            }
        );
        assert_eq!(doc.text(), "***bold***.");
        assert_eq!(doc.selection(), Selection::new(7, 3));
    }

    #[test]
    fn line_end_after_markup_is_not_a_word_boundary() {
        let mut doc = doc_with_caret("x\n**bold**", 10);
        assert_eq!(
            apply_markup(&mut doc, MarkupToken::Bold),
            MarkupPlan::InsertPair { at: 10 }
        );
        assert_eq!(doc.text(), "x\n**bold******");
        assert_eq!(doc.cursor(), 12);

        let mut doc = doc_with_caret("x\n**bold**", 8);
        assert_eq!(
            apply_markup(&mut doc, MarkupToken::Italic),
            MarkupPlan::InsertPair { at: 8 }
        );
        assert_eq!(doc.text(), "x\n**bold****");
        assert_eq!(doc.cursor(), 9);
    }

    #[test]
    fn opening_token_at_line_start_does_not_look_ahead() {
        let buffer = RopeBuffer::new("**a** b");
        let plan = plan_markup(&buffer, Selection::caret(0), MarkupToken::Italic);
        assert_eq!(plan, MarkupPlan::InsertPair { at: 0 });
    }

    #[test]
    fn plain_caret_inserts_an_empty_pair() {
        let mut doc = doc_with_caret("say ", 4);
        assert_eq!(
            apply_markup(&mut doc, MarkupToken::Strikethrough),
            MarkupPlan::InsertPair { at: 4 }
        );
        assert_eq!(doc.text(), "say ~~~~");
        assert_eq!(doc.cursor(), 6);
        assert!(doc.undo());
        assert_eq!(doc.text(), "say ");
    }

    #[test]
    fn closing_search_stops_at_whitespace() {
        let buffer = RopeBuffer::new("**two words**");
        let plan = plan_markup(&buffer, Selection::caret(13), MarkupToken::Bold);
        assert_eq!(plan, MarkupPlan::InsertPair { at: 13 });
    }
}
