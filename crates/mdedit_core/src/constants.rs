//! Shared defaults and environment variable names.

/// Default tab stop width in columns.
pub const DEFAULT_TAB_WIDTH: usize = 4;

/// Environment override for the tab stop width.
pub const ENV_TAB_WIDTH: &str = "MDEDIT_TAB_WIDTH";
/// Environment override for inserting spaces instead of a tab.
pub const ENV_INSERT_SPACES: &str = "MDEDIT_INSERT_SPACES";
/// Environment override for the global auto-match switch.
pub const ENV_AUTO_MATCH: &str = "MDEDIT_AUTO_MATCH";
/// Opening chars whose auto-matching is disabled, e.g. `"'_`.
pub const ENV_AUTO_MATCH_DISABLED: &str = "MDEDIT_AUTO_MATCH_DISABLED";
/// Environment override for bullet marker cycling on Tab/Backtab.
pub const ENV_BULLET_CYCLING: &str = "MDEDIT_BULLET_CYCLING";

/// Opening and closing delimiters of an HTML comment.
pub const COMMENT_OPEN: &str = "<!-- ";
pub const COMMENT_CLOSE: &str = " -->";

/// Markdown hard line break: two trailing spaces.
pub const HARD_LINE_BREAK: &str = "  ";
