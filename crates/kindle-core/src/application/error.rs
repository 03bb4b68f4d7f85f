//! Application layer errors.
//!
//! These errors represent failures in orchestration and I/O, not business
//! rules. Business rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while collecting answers or writing a project.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// A filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A base descriptor could not be written; the run is aborted.
    #[error("Could not write mandatory artifact {path}: {reason}")]
    MandatoryArtifact { path: PathBuf, reason: String },

    /// An external tool exited non-zero or could not be spawned.
    #[error("`{command}` failed: {reason}")]
    ToolFailed { command: String, reason: String },

    /// The prompt backend failed (closed stdin, no terminal).
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// The user aborted the prompt sequence.
    #[error("Cancelled by user")]
    Cancelled,

    /// An artifact could not be serialised.
    #[error("Failed to render {artifact}: {reason}")]
    RenderingFailed { artifact: String, reason: String },

    /// The in-memory filesystem lock was poisoned.
    #[error("Filesystem store lock poisoned")]
    StoreLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } | Self::MandatoryArtifact { path, .. } => vec![
                format!("Failed to write: {}", path.display()),
                "Check that you have write permissions".into(),
                "Choose another parent directory with --output".into(),
            ],
            Self::ToolFailed { command, .. } => vec![
                format!("Run `{command}` yourself to see its output"),
                "Use --skip-tools to generate files without running external tools".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Interactive mode needs a terminal".into(),
                "Pass flags instead, e.g. `kindle --ts --name my-app`".into(),
            ],
            Self::StoreLockError => vec!["Try again in a moment".into()],
            _ => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::PromptFailed { .. } | Self::Cancelled => ErrorCategory::Validation,
            Self::FilesystemError { .. }
            | Self::MandatoryArtifact { .. }
            | Self::ToolFailed { .. }
            | Self::RenderingFailed { .. }
            | Self::StoreLockError => ErrorCategory::Internal,
        }
    }
}
