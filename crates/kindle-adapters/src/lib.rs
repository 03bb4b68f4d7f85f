//! Infrastructure adapters for kindle.
//!
//! This crate implements the ports defined in `kindle-core::application::ports`.
//! It contains all filesystem and process I/O.

pub mod filesystem;
pub mod prompter;
pub mod tools;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use prompter::ScriptedPrompter;
pub use tools::{ProcessToolRunner, ScriptedToolRunner};
