//! Line-prefix patterns shared by the classifier and the editing engines.

use regex::Regex;
use std::sync::LazyLock;

pub(crate) static BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(>\s*)+").expect("blockquote pattern"));
pub(crate) static NUMBERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+)[.)]\s+").expect("numbered list pattern"));
pub(crate) static BULLET_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+*-]\s+").expect("bullet list pattern"));
pub(crate) static TASK_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+] \[([x ])\]\s+").expect("task list pattern"));

pub(crate) static EMPTY_BLOCKQUOTE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(>\s*)+$").expect("empty blockquote pattern"));
pub(crate) static EMPTY_NUMBERED_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*([0-9]+)[.)]\s+$").expect("empty numbered pattern"));
pub(crate) static EMPTY_BULLET_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[+*-]\s+$").expect("empty bullet pattern"));
pub(crate) static EMPTY_TASK_LIST: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*+] \[([x ])\]\s+$").expect("empty task pattern"));

pub(crate) static CODE_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ {0,3}(```|~~~)").expect("code fence pattern"));
pub(crate) static DIGITS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("digits pattern"));

/// Returns the matched prefix of `line`, if `pattern` matches at its start.
pub(crate) fn prefix<'a>(pattern: &Regex, line: &'a str) -> Option<&'a str> {
    pattern.find(line).map(|found| found.as_str())
}

/// Leading whitespace of `line`.
pub(crate) fn indentation(line: &str) -> &str {
    let end = line
        .char_indices()
        .find(|(_, ch)| !ch.is_whitespace())
        .map_or(line.len(), |(idx, _)| idx);
    &line[..end]
}

/// Converts a byte offset inside `line` into a char offset.
pub(crate) fn char_offset(line: &str, byte_offset: usize) -> usize {
    line[..byte_offset].chars().count()
}
