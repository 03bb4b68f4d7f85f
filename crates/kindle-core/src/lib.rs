//! Kindle Core - configuration resolution and artifact composition.
//!
//! This crate provides the domain and application layers for the kindle
//! project generator, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           kindle-cli (CLI)              │
//! │   flags / prompts → RawAnswers          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (GenerateService, PromptSession)      │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │   (Filesystem, ToolRunner, Prompter)    │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     kindle-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ProcessToolRunner...) │
//! └─────────────────────────────────────────┘
//!
//!   Domain: RawAnswers → ResolvedConfig → ResolvedContext → ArtifactBundle
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//! use kindle_core::prelude::*;
//!
//! # fn run(fs: Box<dyn Filesystem>, tools: Box<dyn ToolRunner>) -> KindleResult<()> {
//! let answers = FlagSelection {
//!     presets: vec![PresetId::SpringBoot],
//!     name: Some("demo".into()),
//!     ..Default::default()
//! }
//! .into_answers()?;
//!
//! let service = GenerateService::new(fs, tools, GenerateOptions::default());
//! let report = service.generate(&answers, Path::new("."))?;
//! println!("{}", report.project_dir.display());
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod error;

/// Public API - what external crates should use.
pub mod prelude {
    pub use crate::application::{
        ArtifactComposer, GenerateOptions, GenerateService, GenerationPlan, GenerationReport,
        PromptSession, ScaffoldOutcome,
        ports::{Filesystem, Prompter, ToolInvocation, ToolRunner},
    };
    pub use crate::domain::{
        AnswerKey, AnswerOrigin, ArtifactBundle, ArtifactRole, FlagSelection, LanguageProfile,
        PresetId, Question, QuestionKind, RawAnswers, ResolvedConfig, ResolvedContext, Warning,
    };
    pub use crate::error::{KindleError, KindleResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
