//! The question catalog: prompt text, fixed option lists and defaults.
//!
//! Option lists here are the same lists the resolver uses, so a numeric
//! answer always selects the option the user was shown.

use crate::domain::{
    answers::{AnswerKey, RawAnswers},
    entities::config::Resolver,
    presets::{PresetId, preset_options},
    profile::LanguageProfile,
};

pub const DEFAULT_REPO_NAME: &str = "my-project";

pub const PROJECT_TYPE_OPTIONS: &[&str] =
    &["Web App", "API Service", "CLI Tool", "Library", "Fullstack"];
pub const LANGUAGE_OPTIONS: &[&str] =
    &["TypeScript", "JavaScript", "Python", "Java", "Rust", "Go"];
pub const JAVA_FRAMEWORK_OPTIONS: &[&str] = &["Spring Boot", "Quarkus", "None"];
pub const ASSISTANT_OPTIONS: &[&str] = &["Claude", "Gemini", "Codex", "Copilot", "None"];
pub const DEPLOY_OPTIONS: &[&str] = &["Local only", "Fly.io", "Kubernetes"];
pub const BASE_IMAGE_OPTIONS: &[&str] = &["Debian slim", "Alpine", "Distroless"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QuestionKind {
    Text { default: String },
    Choice {
        options: Vec<&'static str>,
        default: String,
    },
    YesNo { default: bool },
}

/// One prompt shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    pub key: AnswerKey,
    pub prompt: &'static str,
    pub kind: QuestionKind,
}

impl Question {
    fn text(key: AnswerKey, prompt: &'static str, default: &str) -> Self {
        Self {
            key,
            prompt,
            kind: QuestionKind::Text {
                default: default.to_string(),
            },
        }
    }

    fn choice(key: AnswerKey, prompt: &'static str, options: &[&'static str], default: &str) -> Self {
        Self {
            key,
            prompt,
            kind: QuestionKind::Choice {
                options: options.to_vec(),
                default: default.to_string(),
            },
        }
    }

    fn yes_no(key: AnswerKey, prompt: &'static str, default: bool) -> Self {
        Self {
            key,
            prompt,
            kind: QuestionKind::YesNo { default },
        }
    }

    pub fn options(&self) -> &[&'static str] {
        match &self.kind {
            QuestionKind::Choice { options, .. } => options,
            _ => &[],
        }
    }

    /// Default rendered for display (`Y/n` style for yes/no questions).
    pub fn default_hint(&self) -> String {
        match &self.kind {
            QuestionKind::Text { default } | QuestionKind::Choice { default, .. } => {
                default.clone()
            }
            QuestionKind::YesNo { default: true } => "Y/n".into(),
            QuestionKind::YesNo { default: false } => "y/N".into(),
        }
    }
}

/// Build the question for `key`, or `None` when earlier answers make it
/// irrelevant (framework for non-Java, preset outside workspace mode,
/// base image without a container, database where none is offered).
pub fn question_for(key: AnswerKey, answers: &RawAnswers) -> Option<Question> {
    let mut resolver = Resolver::new(answers);

    let question = match key {
        AnswerKey::RepoName => Question::text(key, "Repository name", DEFAULT_REPO_NAME),
        AnswerKey::ProjectType => Question::choice(
            key,
            "What are you building?",
            PROJECT_TYPE_OPTIONS,
            PROJECT_TYPE_OPTIONS[0],
        ),
        AnswerKey::Language => Question::choice(
            key,
            "Primary language",
            LANGUAGE_OPTIONS,
            LANGUAGE_OPTIONS[0],
        ),
        AnswerKey::Framework => {
            if !matches!(
                LanguageProfile::detect(&resolver.language_text(), None),
                Some(LanguageProfile::Java(_))
            ) {
                return None;
            }
            Question::choice(
                key,
                "Java framework",
                JAVA_FRAMEWORK_OPTIONS,
                JAVA_FRAMEWORK_OPTIONS[0],
            )
        }
        AnswerKey::Description => Question::text(key, "Short description", ""),
        AnswerKey::Dependencies => Question::text(
            key,
            "Dependencies (comma or space separated)",
            "",
        ),
        AnswerKey::Workspace => Question::yes_no(key, "Use an Nx workspace?", true),
        AnswerKey::Preset => {
            if !resolver.workspace() {
                return None;
            }
            let profile = resolver.profile();
            let natural = PresetId::default_for(profile);
            Question::choice(
                key,
                "Workspace preset",
                &preset_options(profile),
                natural.as_str(),
            )
        }
        AnswerKey::Assistant => Question::choice(
            key,
            "AI coding assistant",
            ASSISTANT_OPTIONS,
            ASSISTANT_OPTIONS[0],
        ),
        AnswerKey::DeployTarget => Question::choice(
            key,
            "Deployment target",
            DEPLOY_OPTIONS,
            DEPLOY_OPTIONS[0],
        ),
        AnswerKey::Container => Question::yes_no(key, "Generate container files?", true),
        AnswerKey::BaseImage => {
            if !resolver.flag(AnswerKey::Container, true) {
                return None;
            }
            Question::choice(
                key,
                "Base image family",
                BASE_IMAGE_OPTIONS,
                BASE_IMAGE_OPTIONS[0],
            )
        }
        AnswerKey::Database => {
            let project_type = resolver.project_type();
            let profile = resolver.profile();
            let workspace = resolver.workspace();
            let preset = resolver.preset(profile);
            let offered = crate::domain::presets::offers_database(
                workspace,
                preset.descriptor(),
                profile,
                project_type,
            );
            if !offered {
                return None;
            }
            Question::yes_no(key, "Add a PostgreSQL database?", false)
        }
        AnswerKey::Readme => Question::yes_no(key, "Generate a README?", true),
        AnswerKey::Git => Question::yes_no(key, "Initialise a git repository?", true),
        AnswerKey::GithubUser => Question::text(key, "GitHub username (optional)", ""),
    };

    Some(question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answers::AnswerOrigin;

    fn answers() -> RawAnswers {
        RawAnswers::new(AnswerOrigin::Prompts)
    }

    #[test]
    fn framework_is_asked_only_for_java() {
        assert!(question_for(AnswerKey::Framework, &answers()).is_none());
        let java = answers().with_text(AnswerKey::Language, "4");
        let question = question_for(AnswerKey::Framework, &java).unwrap();
        assert_eq!(question.options(), JAVA_FRAMEWORK_OPTIONS);
    }

    #[test]
    fn preset_options_follow_the_language() {
        let python = answers().with_text(AnswerKey::Language, "Python");
        let question = question_for(AnswerKey::Preset, &python).unwrap();
        assert_eq!(question.options(), &["python"]);
        assert_eq!(question.default_hint(), "python");

        let minimal = python.with_text(AnswerKey::Workspace, "n");
        assert!(question_for(AnswerKey::Preset, &minimal).is_none());
    }

    #[test]
    fn database_question_follows_the_service_matrix() {
        // Default TypeScript workspace with the general preset: not offered.
        assert!(question_for(AnswerKey::Database, &answers()).is_none());

        let express = answers().with_text(AnswerKey::Preset, "express");
        assert!(question_for(AnswerKey::Database, &express).is_some());
    }

    #[test]
    fn base_image_needs_a_container() {
        let no_container = answers().with_text(AnswerKey::Container, "no");
        assert!(question_for(AnswerKey::BaseImage, &no_container).is_none());
        assert!(question_for(AnswerKey::BaseImage, &answers()).is_some());
    }

    #[test]
    fn yes_no_hint_reflects_the_default() {
        let question = question_for(AnswerKey::Database, &answers().with_text(AnswerKey::Language, "Go"));
        assert_eq!(question.unwrap().default_hint(), "y/N");
    }
}
