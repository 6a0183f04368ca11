//! Shared primitives for all Rust crates in the Webflow CMS manager.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across workspace crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

impl std::fmt::Display for NonEmptyString {
    fn fmt(&self, formatter: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.0.as_str())
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Requested resource does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Write operation conflicts with existing state.
    #[error("conflict: {0}")]
    Conflict(String),

    /// The configured CMS token was rejected.
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// The configured CMS token lacks the required scope.
    #[error("forbidden: {0}")]
    Forbidden(String),

    /// The upstream CMS provider failed or returned an unexpected response.
    #[error("upstream error: {0}")]
    Upstream(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn non_empty_string_displays_inner_value() {
        let value = NonEmptyString::new("blog-posts").unwrap_or_else(|_| unreachable!());
        assert_eq!(value.to_string(), "blog-posts");
    }

    #[test]
    fn upstream_error_formats_with_category_prefix() {
        let error = AppError::Upstream("status 502".to_owned());
        assert_eq!(error.to_string(), "upstream error: status 502");
    }
}
