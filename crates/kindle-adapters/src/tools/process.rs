//! Runs tools as child processes.

use std::process::{Command, Stdio};

use kindle_core::{
    application::{
        ApplicationError,
        ports::{ToolInvocation, ToolRunner},
    },
    error::KindleResult,
};
use tracing::{debug, instrument};

/// Production tool runner backed by `std::process::Command`.
///
/// Output is captured; only the last stderr line is kept for the failure
/// reason.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessToolRunner;

impl ProcessToolRunner {
    pub fn new() -> Self {
        Self
    }
}

impl ToolRunner for ProcessToolRunner {
    #[instrument(skip_all, fields(command = %invocation, cwd = %invocation.cwd.display()))]
    fn run(&self, invocation: &ToolInvocation) -> KindleResult<()> {
        let output = Command::new(&invocation.program)
            .args(&invocation.args)
            .current_dir(&invocation.cwd)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| ApplicationError::ToolFailed {
                command: invocation.to_string(),
                reason: format!("could not start {}: {e}", invocation.program),
            })?;

        if output.status.success() {
            debug!("tool succeeded");
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        let last_line = stderr.lines().rev().find(|l| !l.trim().is_empty());
        let reason = match last_line {
            Some(line) => format!("{}: {}", output.status, line.trim()),
            None => output.status.to_string(),
        };
        Err(ApplicationError::ToolFailed {
            command: invocation.to_string(),
            reason,
        }
        .into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_program_is_a_tool_failure() {
        let dir = tempfile::tempdir().unwrap();
        let invocation = ToolInvocation::new("kindle-definitely-not-installed", dir.path());
        let err = ProcessToolRunner::new().run(&invocation).unwrap_err();
        assert!(err.to_string().contains("could not start"));
    }

    #[cfg(unix)]
    #[test]
    fn exit_status_decides_success() {
        let dir = tempfile::tempdir().unwrap();
        let runner = ProcessToolRunner::new();
        assert!(runner.run(&ToolInvocation::new("true", dir.path())).is_ok());
        assert!(runner.run(&ToolInvocation::new("false", dir.path())).is_err());
    }
}
