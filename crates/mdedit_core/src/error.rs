//! Error types for configuration and host-facing setup.
use thiserror::Error;

/// Top-level error type for the editing engine.
///
/// Editing operations never fail; they report "not handled" instead. Errors
/// only come from building an editor out of invalid settings.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum EditorError {
    #[error("Invalid configuration: tab width must be greater than zero")]
    ZeroTabWidth,

    #[error("Invalid configuration: {name}={value:?} is not a recognized value")]
    InvalidEnvValue { name: String, value: String },

    #[error("Invalid configuration: {0}")]
    Config(String),
}
