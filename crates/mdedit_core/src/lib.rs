//! Markdown-aware text editing engine (pairs, lists, indentation, emphasis).
//!
//! A host owns a [`Document`] and forwards key presses and formatting commands
//! to a [`MarkdownEditor`]. Each entry point either applies its whole edit as a
//! single undo step and returns `true`, or leaves the document untouched and
//! returns `false` so the host can apply its default behavior.

/// Block formatting commands and empty-marker removal.
pub mod blocks;
/// Rope-backed text storage.
pub mod buffer;
/// Host commands and default key behavior.
pub mod command;
/// Editor settings and environment overrides.
pub mod config;
/// Shared defaults and environment variable names.
pub mod constants;
/// Buffer, selection and history bundle plus edit transactions.
pub mod document;
/// The editing service object.
pub mod editor;
/// Bold, italic and strikethrough toggling.
pub mod emphasis;
/// Environment helpers for tests that exercise overrides.
pub mod env;
/// Configuration error types.
pub mod error;
/// Grouped undo/redo history.
pub mod history;
/// Tab and Backtab handling.
pub mod indent;
/// Line classification.
pub mod line_state;
/// Enter-key list continuation.
pub mod list;
/// Inline markup tokens and scanners.
pub mod markup;
/// Auto-pairing behavior.
pub mod pair_edit;
/// Pair table.
pub mod pairs;
mod patterns;
/// Caret and selection state.
pub mod selection;

pub use blocks::{BulletMarker, NumberDelimiter};
pub use buffer::RopeBuffer;
pub use command::EditorCommand;
pub use config::EditorConfig;
pub use document::{Document, Transaction};
pub use editor::MarkdownEditor;
pub use emphasis::{MarkupPlan, MarkupRule};
pub use error::EditorError;
pub use history::EditIntent;
pub use line_state::{CodeFence, LineClassifier, LineState, MarkdownLineClassifier};
pub use markup::MarkupToken;
pub use pairs::{PairEntry, PairTable};
pub use selection::Selection;
