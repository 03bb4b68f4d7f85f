//! Application services - orchestrate use cases.
//!
//! `PromptSession` collects answers one question at a time;
//! `GenerateService` resolves them, composes the bundle and writes it.

pub mod generate_service;
pub mod prompt_session;

pub use generate_service::{
    GenerateOptions, GenerateService, GenerationPlan, GenerationReport, ScaffoldOutcome,
};
pub use prompt_session::PromptSession;
