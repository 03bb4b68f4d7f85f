pub mod bundle;
pub mod common;
pub mod config;
pub mod context;

pub use bundle::{ArtifactBundle, ArtifactRole, DirectoryToCreate, FileToWrite, FsEntry};
pub use config::{Resolution, ResolvedConfig};
pub use context::{ContainerImage, NativeCommands, ResolvedContext, ToolchainCommands, ToolchainMode};
