//! Error types for hint-core.

use thiserror::Error;

/// Result type alias using HintError.
pub type Result<T> = std::result::Result<T, HintError>;

/// Errors raised while validating hint settings.
///
/// Engine operations themselves never fail.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum HintError {
    #[error("extra separator {ch:?} is alphanumeric")]
    InvalidSeparator { ch: char },

    #[error("hint limit must be at least 1")]
    ZeroHintLimit,
}
