//! Core domain layer for kindle.
//!
//! Pure logic: answers go in, a resolved configuration and an artifact
//! bundle come out. No filesystem, process or terminal access happens here;
//! those concerns sit behind the ports in `crate::application`.
//!
//! ## Resolution pipeline
//!
//! 1. [`RawAnswers`] from flags ([`FlagSelection`]) or prompts
//! 2. [`normalize`] turns raw text into option values
//! 3. [`LanguageProfile::detect`] classifies the language once
//! 4. [`presets`] picks the workspace preset and evaluates the service matrix
//! 5. [`identity`] derives names and ports
//! 6. [`ResolvedContext`] bundles every derived fact for the composer

pub mod answers;
pub mod dependencies;
pub mod entities;
pub mod error;
pub mod identity;
pub mod normalize;
pub mod presets;
pub mod profile;
pub mod questions;
pub mod value_objects;

pub use answers::{AnswerKey, AnswerOrigin, AnswerValue, FlagSelection, RawAnswers};
pub use dependencies::{DependencyName, DependencyPlan};
pub use entities::{
    ArtifactBundle, ArtifactRole, ContainerImage, DirectoryToCreate, FileToWrite, FsEntry,
    NativeCommands, Resolution, ResolvedConfig, ResolvedContext, ToolchainCommands,
    ToolchainMode,
    common::{Permissions, RelativePath},
};
pub use error::{DomainError, ErrorCategory, Warning};
pub use identity::{PortAssignment, ProjectIdentity, slug};
pub use presets::{
    PRESET_REGISTRY, PresetDescriptor, PresetId, PresetKind, find_preset, offers_database,
};
pub use profile::LanguageProfile;
pub use questions::{Question, QuestionKind, question_for};
pub use value_objects::{
    Assistant, BaseImageFamily, DeployTarget, JavaFramework, LanguageFamily, ProjectType,
};
