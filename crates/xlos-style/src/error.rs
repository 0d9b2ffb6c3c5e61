//! Error types for the style crate.

use thiserror::Error;

/// Errors that can occur while parsing style values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StyleError {
    /// The theme name is not one of the built-in themes.
    #[error("unknown theme '{0}' (expected 'dark' or 'light')")]
    UnknownTheme(String),
}

/// Result type for style operations.
pub type StyleResult<T> = Result<T, StyleError>;
