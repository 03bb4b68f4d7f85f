//! Tool runner that records invocations instead of running them.

use std::sync::{Arc, Mutex};

use kindle_core::{
    application::{
        ApplicationError,
        ports::{ToolInvocation, ToolRunner},
    },
    error::KindleResult,
};

/// Records every invocation; fails those whose command line contains one
/// of the configured fragments.
#[derive(Debug, Clone, Default)]
pub struct ScriptedToolRunner {
    failing: Vec<String>,
    calls: Arc<Mutex<Vec<ToolInvocation>>>,
}

impl ScriptedToolRunner {
    /// Every invocation succeeds.
    pub fn succeeding() -> Self {
        Self::default()
    }

    /// Fail invocations whose command line contains `fragment`.
    pub fn failing_on(mut self, fragment: impl Into<String>) -> Self {
        self.failing.push(fragment.into());
        self
    }

    /// Command lines seen so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls
            .lock()
            .map(|calls| calls.iter().map(ToString::to_string).collect())
            .unwrap_or_default()
    }
}

impl ToolRunner for ScriptedToolRunner {
    fn run(&self, invocation: &ToolInvocation) -> KindleResult<()> {
        let command = invocation.to_string();
        self.calls
            .lock()
            .map_err(|_| ApplicationError::StoreLockError)?
            .push(invocation.clone());

        if self.failing.iter().any(|f| command.contains(f.as_str())) {
            return Err(ApplicationError::ToolFailed {
                command,
                reason: "scripted failure".into(),
            }
            .into());
        }
        Ok(())
    }
}
