// ============================================================================
// domain/error.rs - DOMAIN ERRORS AND SOFT WARNINGS
// ============================================================================

use std::fmt;

use thiserror::Error;

use crate::domain::{answers::AnswerKey, presets::PresetId};

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (reported after the fact by the CLI)
/// - Categorizable (for CLI display and exit codes)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Flag conflicts (checked before any resolution or filesystem work)
    // ========================================================================
    #[error("--{first} and --{second} cannot be used together")]
    ConflictingFlags { first: String, second: String },

    #[error("--{flag} cannot be combined with --{other}: {reason}")]
    IncompatibleFlags {
        flag: String,
        other: String,
        reason: String,
    },

    #[error("--{flag} requires a non-empty value")]
    MissingValue { flag: String },

    #[error("invalid value '{value}' for {field}: {reason}")]
    InvalidAnswer {
        field: String,
        value: String,
        reason: String,
    },

    // ========================================================================
    // Artifact bundle integrity
    // ========================================================================
    #[error("artifact bundle is empty")]
    EmptyBundle,

    #[error("duplicate artifact path: {path}")]
    DuplicatePath { path: String },

    #[error("absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("'{path}' is written before its directory '{parent}' is created")]
    MissingParentDirectory { path: String, parent: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConflictingFlags { first, second } => vec![
                format!("Pick either --{first} or --{second}, not both"),
                "Run `kindle --help` to see which flags are mutually exclusive".into(),
            ],
            Self::IncompatibleFlags { flag, .. } => vec![
                format!("--{flag} only applies to Java projects"),
                "Combine it with --java, or drop the other preset flag".into(),
            ],
            Self::MissingValue { flag } => vec![format!("Pass a value, e.g. --{flag} my-project")],
            Self::InvalidAnswer { field, .. } => {
                vec![format!("Check the value given for {field}")]
            }
            _ => vec!["This is likely a bug in an artifact generator".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConflictingFlags { .. } | Self::IncompatibleFlags { .. } => {
                ErrorCategory::Compatibility
            }
            Self::MissingValue { .. } | Self::InvalidAnswer { .. } => ErrorCategory::Validation,
            _ => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Compatibility,
    Internal,
}

/// A soft fallback taken during resolution or generation.
///
/// Warnings never abort a run; they are logged and listed in the report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// Free text that matched no known option; the default was used instead.
    Unrecognized {
        key: AnswerKey,
        input: String,
        fallback: String,
    },
    /// `--db` (or a "yes") on a target that does not offer a database.
    DatabaseNotOffered { preset: PresetId },
    /// A dependency name with characters outside the allowed set.
    RejectedDependency { input: String },
    /// A deploy target that needs a container image while containers are off.
    DeployNeedsContainer { target: String },
    /// The workspace generator failed; the static scaffold was written instead.
    GeneratorFailed { preset: PresetId, reason: String },
    /// A best-effort external step (install, git init) failed.
    ToolFailed { command: String, reason: String },
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Unrecognized {
                key,
                input,
                fallback,
            } => write!(
                f,
                "unrecognized {} '{input}', using '{fallback}'",
                key.as_str()
            ),
            Self::DatabaseNotOffered { preset } => write!(
                f,
                "the '{preset}' preset does not offer a database service; ignoring --db"
            ),
            Self::RejectedDependency { input } => {
                write!(f, "skipping dependency '{input}': invalid characters")
            }
            Self::DeployNeedsContainer { target } => write!(
                f,
                "{target} deployment needs a container image; enable --docker to get its manifest"
            ),
            Self::GeneratorFailed { preset, reason } => write!(
                f,
                "the '{preset}' generator failed ({reason}); wrote the static starter instead"
            ),
            Self::ToolFailed { command, reason } => write!(f, "`{command}` failed: {reason}"),
        }
    }
}
