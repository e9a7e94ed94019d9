//! Root crate facade for the mdedit markdown editing engine.

pub use mdedit_core::{
    blocks, buffer, command, config, constants, document, editor, emphasis, env, error, history,
    indent, line_state, list, markup, pair_edit, pairs, selection, BulletMarker, CodeFence,
    Document, EditIntent, EditorCommand, EditorConfig, EditorError, LineClassifier, LineState,
    MarkdownEditor, MarkdownLineClassifier, MarkupPlan, MarkupRule, MarkupToken,
    NumberDelimiter, PairEntry, PairTable, RopeBuffer, Selection, Transaction,
};

/// Builds an editor from defaults overlaid with `MDEDIT_*` environment variables.
///
/// # Errors
/// Returns [`EditorError`] when a variable holds an invalid value.
pub fn editor_from_env() -> Result<MarkdownEditor, EditorError> {
    let config = EditorConfig::from_env()?;
    tracing::debug!(?config, "editor configuration from environment");
    MarkdownEditor::new(config)
}
