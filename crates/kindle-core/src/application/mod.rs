//! Application layer for kindle.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (`GenerateService`, `PromptSession`)
//! - **Composer**: Pure artifact generation from a `ResolvedContext`
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types

pub mod composer;
pub mod error;
pub mod ports;
pub mod services;

pub use composer::ArtifactComposer;
pub use services::{GenerateOptions, GenerateService, GenerationPlan, GenerationReport, PromptSession, ScaffoldOutcome};

pub use ports::{Filesystem, Prompter, ToolInvocation, ToolRunner};

pub use error::ApplicationError;
