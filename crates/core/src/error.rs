//! Core error model.

use thiserror::Error;

/// Result type used across the domain-level crates.
pub type CoreResult<T> = Result<T, CoreError>;

/// Deterministic, domain-level failure.
///
/// Infrastructure concerns (network, storage) carry their own error types in
/// the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A value failed validation (e.g. malformed input).
    #[error("validation failed: {0}")]
    Validation(String),

    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),
}

impl CoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }
}
