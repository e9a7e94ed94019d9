//! Inline emphasis tokens and the scanners that locate them.

use crate::buffer::RopeBuffer;
use tracing::trace;

/// Longest token length, in chars.
pub const MARKUP_MAX_LEN: usize = 3;

/// An inline emphasis delimiter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MarkupToken {
    /// `***`, only detected, never requested directly.
    BoldItalic,
    Bold,
    Strikethrough,
    Italic,
}

impl MarkupToken {
    /// All tokens, longest first. Matching must walk this order.
    pub const ALL: [MarkupToken; 4] = [
        MarkupToken::BoldItalic,
        MarkupToken::Bold,
        MarkupToken::Strikethrough,
        MarkupToken::Italic,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BoldItalic => "***",
            Self::Bold => "**",
            Self::Strikethrough => "~~",
            Self::Italic => "*",
        }
    }

    /// Length in chars.
    pub fn width(self) -> usize {
        self.as_str().len()
    }

    fn chars(self) -> Vec<char> {
        self.as_str().chars().collect()
    }

    /// Token whose string is exactly `text`.
    pub fn from_markup(text: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|token| token.as_str() == text)
    }

    /// True when `self` already provides `requested`, counting `***` as
    /// containing both `**` and `*`.
    pub fn covers(self, requested: MarkupToken) -> bool {
        self == requested
            || (self == Self::BoldItalic && matches!(requested, Self::Bold | Self::Italic))
    }
}

/// Chars that can form a markup token.
pub fn is_markup_char(ch: char) -> bool {
    matches!(ch, '*' | '~')
}

/// Direction of a [`find_markup`] scan.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScanDirection {
    Forward,
    Backward,
}

/// Finds `token` in `line` starting at `start`.
///
/// Forward scans return the index of the token's first char; backward scans
/// treat each candidate as the token's last char and return that index. A
/// comparison that would run off either end of the line ends the scan. With
/// `stop_at_space`, any whitespace met while comparing ends the scan.
pub fn find_markup(
    token: MarkupToken,
    line: &[char],
    start: usize,
    direction: ScanDirection,
    stop_at_space: bool,
) -> Option<usize> {
    let markup = token.chars();
    let len = markup.len();
    if start >= line.len() {
        return None;
    }
    let found = match direction {
        ScanDirection::Forward => {
            let mut found = None;
            'candidates: for i in start..line.len() {
                for (j, expected) in markup.iter().enumerate() {
                    let ch = *line.get(i + j)?;
                    if stop_at_space && ch.is_whitespace() {
                        return None;
                    }
                    if ch != *expected {
                        continue 'candidates;
                    }
                }
                found = Some(i);
                break;
            }
            found
        }
        ScanDirection::Backward => {
            let mut found = None;
            'candidates: for i in (0..=start).rev() {
                for j in 0..len {
                    let ch = line[i.checked_sub(j)?];
                    if stop_at_space && ch.is_whitespace() {
                        return None;
                    }
                    if ch != markup[len - j - 1] {
                        continue 'candidates;
                    }
                }
                found = Some(i);
                break;
            }
            found
        }
    };
    trace!(token = token.as_str(), start, ?direction, ?found, "markup scan");
    found
}

/// Tokens found immediately before and after a caret or selection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MarkupAdjacency {
    pub preceding: Option<MarkupToken>,
    pub following: Option<MarkupToken>,
}

impl MarkupAdjacency {
    /// The token bracketing both sides, when they agree.
    pub fn symmetric(self) -> Option<MarkupToken> {
        match (self.preceding, self.following) {
            (Some(before), Some(after)) if before == after => Some(before),
            _ => None,
        }
    }
}

/// Detects the markup tokens touching `start` from the left and `end` from the right.
///
/// Windows of 1 to [`MARKUP_MAX_LEN`] chars are read on each side; the run of
/// markup chars nearest the boundary is kept, and the widest window whose run
/// spells a token wins.
pub fn detect_adjacent_markup(buffer: &RopeBuffer, start: usize, end: usize) -> MarkupAdjacency {
    let len = buffer.len_chars();
    let start = start.min(len);
    let end = end.min(len);
    let mut adjacency = MarkupAdjacency::default();
    for width in 1..=MARKUP_MAX_LEN {
        let before = buffer.slice_chars(start.saturating_sub(width)..start);
        let preceding: String = before
            .chars()
            .rev()
            .take_while(|ch| is_markup_char(*ch))
            .collect();
        if let Some(token) = MarkupToken::from_markup(&preceding) {
            adjacency.preceding = Some(token);
        }

        let after = buffer.slice_chars(end..(end + width).min(len));
        let following: String = after.chars().take_while(|ch| is_markup_char(*ch)).collect();
        if let Some(token) = MarkupToken::from_markup(&following) {
            adjacency.following = Some(token);
        }
    }
    adjacency
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(text: &str) -> Vec<char> {
        text.chars().collect()
    }

    #[test]
    fn forward_scan_prefers_the_requested_token() {
        let line = chars("a **b** *c*");
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 2, ScanDirection::Forward, false),
            Some(2)
        );
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 3, ScanDirection::Forward, false),
            Some(5)
        );
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 7, ScanDirection::Forward, false),
            None
        );
    }

    #[test]
    fn backward_scan_returns_last_char_of_match() {
        let line = chars("**bold** x");
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 5, ScanDirection::Backward, false),
            Some(1)
        );
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 0, ScanDirection::Backward, false),
            None
        );
    }

    #[test]
    fn stop_at_space_aborts_the_scan() {
        let line = chars("**two words**");
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 10, ScanDirection::Backward, true),
            None
        );
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 10, ScanDirection::Backward, false),
            Some(1)
        );
        assert_eq!(
            find_markup(MarkupToken::Italic, &line, 20, ScanDirection::Forward, false),
            None
        );
    }

    #[test]
    fn forward_scan_stops_at_the_first_space() {
        let line = chars("a **b c**");
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 3, ScanDirection::Forward, true),
            None
        );
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 3, ScanDirection::Forward, false),
            Some(7)
        );
        assert_eq!(
            find_markup(MarkupToken::Bold, &line, 2, ScanDirection::Forward, true),
            Some(2)
        );
    }

    #[test]
    fn detects_longest_adjacent_tokens() {
        let buffer = RopeBuffer::new("x***abc**~~");
        let adjacency = detect_adjacent_markup(&buffer, 4, 7);
        assert_eq!(adjacency.preceding, Some(MarkupToken::BoldItalic));
        assert_eq!(adjacency.following, Some(MarkupToken::Bold));
        assert_eq!(adjacency.symmetric(), None);

        let buffer = RopeBuffer::new("**ab**");
        assert_eq!(
            detect_adjacent_markup(&buffer, 2, 4).symmetric(),
            Some(MarkupToken::Bold)
        );
        assert_eq!(detect_adjacent_markup(&buffer, 0, 0).preceding, None);
    }

    #[test]
    fn bold_italic_covers_its_components() {
        assert!(MarkupToken::BoldItalic.covers(MarkupToken::Bold));
        assert!(MarkupToken::BoldItalic.covers(MarkupToken::Italic));
        assert!(!MarkupToken::BoldItalic.covers(MarkupToken::Strikethrough));
        assert!(!MarkupToken::Bold.covers(MarkupToken::Italic));
        assert_eq!(MarkupToken::ALL.map(MarkupToken::width), [3, 2, 2, 1]);
    }
}
