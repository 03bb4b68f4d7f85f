//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `kindle-adapters` and
//! `kindle-cli` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `ToolRunner`: External build tools (pnpm, nx, git)
//!   - `Prompter`: One question at a time from the user
//!
//! - **Driving (Input) Ports**: Called by the CLI, implemented by services
//!   - `GenerateService`, `PromptSession`

pub mod output;

pub use output::{Filesystem, Prompter, ToolInvocation, ToolRunner};
