//! Driven (output) ports - implemented by infrastructure.

use std::fmt;
use std::path::{Path, PathBuf};

use crate::domain::Question;
use crate::error::KindleResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `kindle_adapters::LocalFilesystem` (production)
/// - `kindle_adapters::MemoryFilesystem` (testing, dry runs)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> KindleResult<()>;

    /// Write content to a file.
    fn write_file(&self, path: &Path, content: &str) -> KindleResult<()>;

    /// Set file permissions.
    fn set_permissions(&self, path: &Path, executable: bool) -> KindleResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Remove a directory and all contents.
    fn remove_dir_all(&self, path: &Path) -> KindleResult<()>;
}

/// A single external command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolInvocation {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: PathBuf,
}

impl ToolInvocation {
    pub fn new(program: impl Into<String>, cwd: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            cwd: cwd.into(),
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }
}

impl fmt::Display for ToolInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Port for running external tools.
///
/// Only success or failure is observed; output belongs to the tool.
///
/// Implemented by:
/// - `kindle_adapters::ProcessToolRunner` (production)
/// - `kindle_adapters::ScriptedToolRunner` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait ToolRunner: Send + Sync {
    fn run(&self, invocation: &ToolInvocation) -> KindleResult<()>;
}

/// Port for asking the user one question.
///
/// Returns the raw text typed by the user; an empty string accepts the
/// default. Normalization happens in the domain, never in the prompter.
pub trait Prompter {
    fn ask(&mut self, question: &Question) -> KindleResult<String>;
}
