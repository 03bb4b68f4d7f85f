//! Unified error handling for kindle core.
//!
//! Wraps domain and application errors in one root type with
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for kindle core operations.
#[derive(Debug, Error, Clone)]
pub enum KindleError {
    /// Errors from the domain layer (flag conflicts, bundle integrity).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (I/O, tools, prompts).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Configuration or setup errors.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl KindleError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Configuration { message } => vec![
                format!("Configuration issue: {message}"),
                "Run `kindle init --force` to restore the default config file".into(),
            ],
            Self::Internal { .. } => vec![
                "This appears to be a bug in kindle".into(),
                "Re-run with -vvv and include the log when reporting it".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Compatibility => ErrorCategory::Compatibility,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Configuration { .. } => ErrorCategory::Configuration,
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }

    /// Whether the failure came from the user's input rather than the system.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self.category(),
            ErrorCategory::Validation | ErrorCategory::Compatibility
        )
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type KindleResult<T> = Result<T, KindleError>;

/// Extension trait for adding context to errors.
pub trait Context<T> {
    /// Add context to an error.
    fn context(self, msg: impl Into<String>) -> KindleResult<T>;
}

impl<T, E> Context<T> for Result<T, E>
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn context(self, msg: impl Into<String>) -> KindleResult<T> {
        self.map_err(|e| KindleError::Internal {
            message: format!("{}: {}", msg.into(), e),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conflicts_are_user_errors() {
        let err: KindleError = DomainError::ConflictingFlags {
            first: "db".into(),
            second: "no-db".into(),
        }
        .into();
        assert!(err.is_user_error());
        assert_eq!(err.category(), ErrorCategory::Compatibility);
    }

    #[test]
    fn io_failures_are_internal() {
        let err: KindleError = ApplicationError::MandatoryArtifact {
            path: "package.json".into(),
            reason: "disk full".into(),
        }
        .into();
        assert!(!err.is_user_error());
        assert!(err.to_string().contains("package.json"));
    }

    #[test]
    fn context_wraps_foreign_errors() {
        let parsed: Result<u16, _> = "x".parse::<u16>();
        let err = parsed.context("reading port").unwrap_err();
        assert!(err.to_string().starts_with("Internal error: reading port"));
    }
}
