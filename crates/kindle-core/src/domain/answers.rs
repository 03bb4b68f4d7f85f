//! Raw answers and the flag selection that produces them.
//!
//! Both answer sources (parsed flags and the prompt sequence) produce a
//! [`RawAnswers`] map. Nothing downstream of resolution reads it.

use std::collections::BTreeMap;

use crate::domain::{
    error::DomainError,
    presets::PresetId,
    profile::LanguageProfile,
    value_objects::{JavaFramework, ProjectType},
};

/// Every question the engine can ask, in prompt order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AnswerKey {
    RepoName,
    ProjectType,
    Language,
    Framework,
    Description,
    Dependencies,
    Workspace,
    Preset,
    Assistant,
    DeployTarget,
    Container,
    BaseImage,
    Database,
    Readme,
    Git,
    GithubUser,
}

impl AnswerKey {
    pub const ALL: [Self; 16] = [
        Self::RepoName,
        Self::ProjectType,
        Self::Language,
        Self::Framework,
        Self::Description,
        Self::Dependencies,
        Self::Workspace,
        Self::Preset,
        Self::Assistant,
        Self::DeployTarget,
        Self::Container,
        Self::BaseImage,
        Self::Database,
        Self::Readme,
        Self::Git,
        Self::GithubUser,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::RepoName => "repository name",
            Self::ProjectType => "project type",
            Self::Language => "language",
            Self::Framework => "java framework",
            Self::Description => "description",
            Self::Dependencies => "dependencies",
            Self::Workspace => "workspace",
            Self::Preset => "preset",
            Self::Assistant => "assistant",
            Self::DeployTarget => "deploy target",
            Self::Container => "container",
            Self::BaseImage => "base image",
            Self::Database => "database",
            Self::Readme => "readme",
            Self::Git => "git",
            Self::GithubUser => "github user",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnswerValue {
    Text(String),
    Flag(bool),
}

/// Which adapter produced the answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnswerOrigin {
    #[default]
    Prompts,
    Flags,
}

/// Unvalidated answers keyed by question.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawAnswers {
    values: BTreeMap<AnswerKey, AnswerValue>,
    origin: AnswerOrigin,
}

impl RawAnswers {
    pub fn new(origin: AnswerOrigin) -> Self {
        Self {
            values: BTreeMap::new(),
            origin,
        }
    }

    pub fn origin(&self) -> AnswerOrigin {
        self.origin
    }

    pub fn set_text(&mut self, key: AnswerKey, value: impl Into<String>) {
        self.values.insert(key, AnswerValue::Text(value.into()));
    }

    pub fn set_flag(&mut self, key: AnswerKey, value: bool) {
        self.values.insert(key, AnswerValue::Flag(value));
    }

    pub fn with_text(mut self, key: AnswerKey, value: impl Into<String>) -> Self {
        self.set_text(key, value);
        self
    }

    pub fn with_flag(mut self, key: AnswerKey, value: bool) -> Self {
        self.set_flag(key, value);
        self
    }

    pub fn get(&self, key: AnswerKey) -> Option<&AnswerValue> {
        self.values.get(&key)
    }

    /// The text answer for `key`; flag answers read as `None`.
    pub fn text(&self, key: AnswerKey) -> Option<&str> {
        match self.values.get(&key) {
            Some(AnswerValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    pub fn contains(&self, key: AnswerKey) -> bool {
        self.values.contains_key(&key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

// ── FlagSelection ────────────────────────────────────────────────────────────

/// Generation flags as parsed by the CLI, before conflict checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlagSelection {
    pub presets: Vec<PresetId>,
    pub project_types: Vec<ProjectType>,
    pub frameworks: Vec<JavaFramework>,
    pub name: Option<String>,
    pub github_user: Option<String>,
    pub docker: bool,
    pub no_docker: bool,
    pub db: bool,
    pub no_db: bool,
    pub minimal: bool,
    pub assistant: Option<String>,
}

impl FlagSelection {
    /// No generation flag was given, so the prompt sequence runs instead.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Reject contradictory flags. Runs before anything is resolved or written.
    pub fn validate(&self) -> Result<(), DomainError> {
        if let [first, second, ..] = self.presets.as_slice() {
            return Err(conflict(first.as_str(), second.as_str()));
        }
        if let [first, second, ..] = self.project_types.as_slice() {
            return Err(conflict(first.as_str(), second.as_str()));
        }
        if let [first, second, ..] = self.frameworks.as_slice() {
            return Err(conflict(first.as_str(), second.as_str()));
        }
        if self.docker && self.no_docker {
            return Err(conflict("docker", "no-docker"));
        }
        if self.db && self.no_db {
            return Err(conflict("db", "no-db"));
        }

        if let (Some(framework), Some(preset)) = (self.frameworks.first(), self.presets.first()) {
            let reason = match preset.descriptor().language {
                LanguageProfile::Java(None) => None,
                LanguageProfile::Java(Some(own)) if own == *framework => None,
                LanguageProfile::Java(Some(own)) => {
                    Some(format!("the {} preset is built on {}", preset, own.label()))
                }
                _ => Some(format!("{} is a Java framework", framework.label())),
            };
            if let Some(reason) = reason {
                return Err(DomainError::IncompatibleFlags {
                    flag: framework.as_str().into(),
                    other: preset.as_str().into(),
                    reason,
                });
            }
        }

        for (flag, value) in [("name", &self.name), ("user", &self.github_user)] {
            if value.as_deref().is_some_and(|v| v.trim().is_empty()) {
                return Err(DomainError::MissingValue { flag: flag.into() });
            }
        }
        Ok(())
    }

    /// Validate and translate the flags into the shared answer shape.
    pub fn into_answers(self) -> Result<RawAnswers, DomainError> {
        self.validate()?;

        let mut answers = RawAnswers::new(AnswerOrigin::Flags);

        if let Some(preset) = self.presets.first() {
            let implied = preset.descriptor().language;
            answers.set_text(AnswerKey::Preset, preset.as_str());
            answers.set_text(AnswerKey::Language, implied.language_label());
            if let LanguageProfile::Java(Some(framework)) = implied {
                answers.set_text(AnswerKey::Framework, framework.label());
            }
        }
        if let Some(framework) = self.frameworks.first() {
            answers.set_text(AnswerKey::Framework, framework.label());
            if !answers.contains(AnswerKey::Language) {
                answers.set_text(AnswerKey::Language, "Java");
            }
        }
        if let Some(project_type) = self.project_types.first() {
            answers.set_text(AnswerKey::ProjectType, project_type.label());
        }
        if let Some(name) = self.name {
            answers.set_text(AnswerKey::RepoName, name);
        }
        if let Some(user) = self.github_user {
            answers.set_text(AnswerKey::GithubUser, user);
        }
        if let Some(assistant) = self.assistant {
            answers.set_text(AnswerKey::Assistant, assistant);
        }
        if self.docker || self.no_docker {
            answers.set_flag(AnswerKey::Container, self.docker);
        }
        if self.db || self.no_db {
            answers.set_flag(AnswerKey::Database, self.db);
        }
        if self.minimal {
            answers.set_flag(AnswerKey::Workspace, false);
        }

        Ok(answers)
    }
}

fn conflict(first: &str, second: &str) -> DomainError {
    DomainError::ConflictingFlags {
        first: first.into(),
        second: second.into(),
    }
}
