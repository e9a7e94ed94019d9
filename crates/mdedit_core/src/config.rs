//! Editor configuration with environment overrides.

use crate::constants::{
    DEFAULT_TAB_WIDTH, ENV_AUTO_MATCH, ENV_AUTO_MATCH_DISABLED, ENV_BULLET_CYCLING,
    ENV_INSERT_SPACES, ENV_TAB_WIDTH,
};
use crate::error::EditorError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;

/// Read-only settings consulted by every editing engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Columns per tab stop. Must be greater than zero.
    pub tab_width: usize,
    /// Indent with `tab_width` spaces instead of a literal tab.
    pub insert_spaces_for_tabs: bool,
    /// Global auto-pairing switch.
    pub auto_match_enabled: bool,
    /// Per-opening-char auto-pairing switches; absent chars stay enabled.
    pub auto_match_per_char: BTreeMap<char, bool>,
    /// Cycle `*`/`-`/`+` when indenting an empty bullet item.
    pub bullet_cycling_enabled: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            tab_width: DEFAULT_TAB_WIDTH,
            insert_spaces_for_tabs: false,
            auto_match_enabled: true,
            auto_match_per_char: BTreeMap::new(),
            bullet_cycling_enabled: true,
        }
    }
}

/// Parse a boolean-like environment flag value.
///
/// # Supported Values
/// - Truthy: `1`, `true`, `yes`, `on`
/// - Falsy: `0`, `false`, `no`, `off`, empty string
///
/// Matching is case-insensitive and ignores surrounding whitespace.
///
/// # Returns
/// `Some(bool)` when the value is recognized, otherwise `None`.
pub fn parse_env_flag(value: &str) -> Option<bool> {
    let normalized = value.trim().to_ascii_lowercase();
    match normalized.as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "" | "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

fn env_flag(name: &str) -> Result<Option<bool>, EditorError> {
    match env::var(name) {
        Ok(value) => parse_env_flag(&value)
            .map(Some)
            .ok_or_else(|| EditorError::InvalidEnvValue {
                name: name.to_string(),
                value,
            }),
        Err(_) => Ok(None),
    }
}

impl EditorConfig {
    /// Defaults overlaid with `MDEDIT_*` environment variables.
    ///
    /// # Errors
    /// Returns [`EditorError`] when a variable is set to an unrecognized value
    /// or the resulting configuration is invalid.
    pub fn from_env() -> Result<Self, EditorError> {
        Self::default().with_env_overrides()
    }

    /// Applies `MDEDIT_*` environment variables on top of `self`.
    ///
    /// # Errors
    /// Same as [`EditorConfig::from_env`].
    pub fn with_env_overrides(mut self) -> Result<Self, EditorError> {
        if let Ok(value) = env::var(ENV_TAB_WIDTH) {
            self.tab_width =
                value
                    .trim()
                    .parse()
                    .map_err(|_| EditorError::InvalidEnvValue {
                        name: ENV_TAB_WIDTH.to_string(),
                        value: value.clone(),
                    })?;
        }
        if let Some(flag) = env_flag(ENV_INSERT_SPACES)? {
            self.insert_spaces_for_tabs = flag;
        }
        if let Some(flag) = env_flag(ENV_AUTO_MATCH)? {
            self.auto_match_enabled = flag;
        }
        if let Some(flag) = env_flag(ENV_BULLET_CYCLING)? {
            self.bullet_cycling_enabled = flag;
        }
        if let Ok(disabled) = env::var(ENV_AUTO_MATCH_DISABLED) {
            for ch in disabled.chars().filter(|ch| !ch.is_whitespace()) {
                self.auto_match_per_char.insert(ch, false);
            }
        }
        self.validate()?;
        Ok(self)
    }

    /// Parses a JSON settings document; missing keys take their defaults.
    ///
    /// # Errors
    /// Returns [`EditorError::Config`] for malformed JSON and
    /// [`EditorError::ZeroTabWidth`] for an invalid tab width.
    pub fn from_json(json: &str) -> Result<Self, EditorError> {
        let config: Self =
            serde_json::from_str(json).map_err(|err| EditorError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Checks invariants the engines rely on.
    ///
    /// # Errors
    /// Returns [`EditorError::ZeroTabWidth`] when `tab_width` is zero.
    pub fn validate(&self) -> Result<(), EditorError> {
        if self.tab_width == 0 {
            return Err(EditorError::ZeroTabWidth);
        }
        Ok(())
    }

    /// Text inserted for one full indentation step.
    pub fn indent_unit(&self) -> String {
        if self.insert_spaces_for_tabs {
            " ".repeat(self.tab_width)
        } else {
            "\t".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::{env_lock, EnvGuard};

    #[test]
    fn parse_env_flag_accepts_truthy_values() {
        for value in ["1", "true", "TRUE", " yes ", "on"] {
            assert_eq!(parse_env_flag(value), Some(true), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_accepts_falsy_values() {
        for value in ["", "0", "false", "FALSE", " no ", "off"] {
            assert_eq!(parse_env_flag(value), Some(false), "value: {}", value);
        }
    }

    #[test]
    fn parse_env_flag_rejects_unknown_values() {
        assert_eq!(parse_env_flag("maybe"), None);
        assert_eq!(parse_env_flag("enabled"), None);
    }

    #[test]
    fn env_overrides_apply_on_top_of_defaults() {
        let _lock = env_lock().lock().expect("env lock");
        let _width = EnvGuard::set(ENV_TAB_WIDTH, "2");
        let _spaces = EnvGuard::set(ENV_INSERT_SPACES, "yes");
        let _cycling = EnvGuard::set(ENV_BULLET_CYCLING, "off");
        let _auto = EnvGuard::remove(ENV_AUTO_MATCH);
        let _disabled = EnvGuard::set(ENV_AUTO_MATCH_DISABLED, "' _");

        let config = EditorConfig::from_env().expect("config");
        assert_eq!(config.tab_width, 2);
        assert!(config.insert_spaces_for_tabs);
        assert!(!config.bullet_cycling_enabled);
        assert!(config.auto_match_enabled);
        assert_eq!(config.auto_match_per_char.get(&'\''), Some(&false));
        assert_eq!(config.auto_match_per_char.get(&'_'), Some(&false));
        assert_eq!(config.indent_unit(), "  ");
    }

    #[test]
    fn invalid_env_values_are_rejected() {
        let _lock = env_lock().lock().expect("env lock");
        let _width = EnvGuard::set(ENV_TAB_WIDTH, "0");
        assert_eq!(EditorConfig::from_env(), Err(EditorError::ZeroTabWidth));

        let _width = EnvGuard::set(ENV_TAB_WIDTH, "four");
        assert!(matches!(
            EditorConfig::from_env(),
            Err(EditorError::InvalidEnvValue { .. })
        ));
    }

    #[test]
    fn deserializes_camel_case_with_defaults() {
        let config = EditorConfig::from_json(r#"{"tabWidth": 8, "autoMatchPerChar": {"*": false}}"#)
            .expect("json");
        assert_eq!(config.tab_width, 8);
        assert!(!config.insert_spaces_for_tabs);
        assert!(config.bullet_cycling_enabled);
        assert_eq!(config.auto_match_per_char.get(&'*'), Some(&false));
        assert_eq!(config.indent_unit(), "\t");
    }

    #[test]
    fn json_errors_are_reported() {
        assert!(matches!(
            EditorConfig::from_json("{tabWidth: 2}"),
            Err(EditorError::Config(_))
        ));
        assert_eq!(
            EditorConfig::from_json(r#"{"tabWidth": 0}"#),
            Err(EditorError::ZeroTabWidth)
        );
    }
}
