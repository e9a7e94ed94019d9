//! Auto-pairing table: which chars open a pair and how each pair behaves.

use crate::config::EditorConfig;
use tracing::warn;

/// One opening/closing char pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PairEntry {
    pub open: char,
    pub close: char,
    /// Per-char auto-match switch.
    pub enabled: bool,
    /// Typing whitespace between an empty pair replaces the closer.
    pub non_empty: bool,
    /// Paired even right after a word char, as in `f(` or `a[`.
    pub matches_after_word: bool,
}

impl PairEntry {
    const fn new(open: char, close: char) -> Self {
        Self {
            open,
            close,
            enabled: true,
            non_empty: false,
            matches_after_word: false,
        }
    }

    const fn non_empty(mut self) -> Self {
        self.non_empty = true;
        self
    }

    const fn after_word(mut self) -> Self {
        self.matches_after_word = true;
        self
    }
}

const DEFAULT_PAIRS: [PairEntry; 9] = [
    PairEntry::new('"', '"'),
    PairEntry::new('\'', '\''),
    PairEntry::new('(', ')').after_word(),
    PairEntry::new('[', ']').after_word(),
    PairEntry::new('{', '}').after_word(),
    PairEntry::new('*', '*').non_empty(),
    PairEntry::new('_', '_').non_empty(),
    PairEntry::new('`', '`'),
    PairEntry::new('<', '>').non_empty().after_word(),
];

/// Immutable pair lookup built once from configuration.
#[derive(Clone, Debug)]
pub struct PairTable {
    entries: Vec<PairEntry>,
}

impl Default for PairTable {
    fn default() -> Self {
        Self {
            entries: DEFAULT_PAIRS.to_vec(),
        }
    }
}

impl PairTable {
    /// Builds the table, applying per-char switches from `config`.
    ///
    /// Switches for chars that open no pair are logged and ignored.
    pub fn from_config(config: &EditorConfig) -> Self {
        let mut table = Self::default();
        for (&ch, &enabled) in &config.auto_match_per_char {
            match table.entries.iter_mut().find(|entry| entry.open == ch) {
                Some(entry) => entry.enabled = enabled,
                None => warn!(char = %ch, "ignoring auto-match switch for a non-pairing char"),
            }
        }
        table
    }

    /// Entry opened by `open`.
    pub fn by_open(&self, open: char) -> Option<&PairEntry> {
        self.entries.iter().find(|entry| entry.open == open)
    }

    /// Entry closed by `close`.
    pub fn by_close(&self, close: char) -> Option<&PairEntry> {
        self.entries.iter().find(|entry| entry.close == close)
    }

    /// True when `open` followed by `close` is a registered pair.
    pub fn is_pair(&self, open: char, close: char) -> bool {
        self.by_open(open).is_some_and(|entry| entry.close == close)
    }

    /// True when `open` followed by `close` is a pair that must not stay empty.
    pub fn is_non_empty_pair(&self, open: char, close: char) -> bool {
        self.by_open(open)
            .is_some_and(|entry| entry.non_empty && entry.close == close)
    }

    pub fn entries(&self) -> &[PairEntry] {
        &self.entries
    }
}
