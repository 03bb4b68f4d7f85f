//! The immutable resolved configuration.
//!
//! [`ResolvedConfig::resolve`] is the only constructor that takes answers.
//! It normalizes every raw value, applies defaults, classifies the language
//! once and evaluates the service matrix. The result has no setters.

use std::str::FromStr;

use serde::Serialize;
use tracing::warn;

use crate::domain::{
    answers::{AnswerKey, AnswerValue, RawAnswers},
    error::Warning,
    normalize::{resolve_choice, resolve_yes_no, split_list},
    presets::{PresetId, find_preset, offers_database, preset_options},
    profile::LanguageProfile,
    questions::{
        ASSISTANT_OPTIONS, BASE_IMAGE_OPTIONS, DEFAULT_REPO_NAME, DEPLOY_OPTIONS,
        JAVA_FRAMEWORK_OPTIONS, LANGUAGE_OPTIONS, PROJECT_TYPE_OPTIONS,
    },
    value_objects::{Assistant, BaseImageFamily, DeployTarget, ProjectType},
};

/// Every user decision for one run, normalized and defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedConfig {
    repo_name: String,
    project_type: ProjectType,
    profile: LanguageProfile,
    description: String,
    dependencies: Vec<String>,
    workspace: bool,
    preset: PresetId,
    assistant: Option<Assistant>,
    deploy_target: DeployTarget,
    container: bool,
    base_image: BaseImageFamily,
    database: bool,
    readme: bool,
    git: bool,
    github_user: Option<String>,
}

/// A resolved configuration plus the fallbacks taken to reach it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub config: ResolvedConfig,
    pub warnings: Vec<Warning>,
}

impl Default for ResolvedConfig {
    /// The configuration produced by accepting every default.
    fn default() -> Self {
        Self {
            repo_name: DEFAULT_REPO_NAME.to_string(),
            project_type: ProjectType::WebApp,
            profile: LanguageProfile::TypeScript,
            description: String::new(),
            dependencies: Vec::new(),
            workspace: true,
            preset: PresetId::Ts,
            assistant: Some(Assistant::Claude),
            deploy_target: DeployTarget::Local,
            container: true,
            base_image: BaseImageFamily::Debian,
            database: false,
            readme: true,
            git: true,
            github_user: None,
        }
    }
}

impl ResolvedConfig {
    pub fn resolve(answers: &RawAnswers) -> Resolution {
        let mut resolver = Resolver::new(answers);

        let repo_name = resolver.repo_name();
        let project_type = resolver.project_type();
        let profile = resolver.profile();
        let workspace = resolver.workspace();
        let preset = resolver.preset(profile);
        let description = resolver.text(AnswerKey::Description).unwrap_or_default();
        let dependencies = split_list(&resolver.text(AnswerKey::Dependencies).unwrap_or_default());
        let assistant = resolver.assistant();
        let deploy_target = resolver.deploy_target();
        let container = resolver.flag(AnswerKey::Container, true);
        let base_image = resolver.base_image();
        let database = resolver.database(workspace, preset, profile, project_type);
        let readme = resolver.flag(AnswerKey::Readme, true);
        let git = resolver.flag(AnswerKey::Git, true);
        let github_user = resolver.text(AnswerKey::GithubUser);

        if deploy_target.requires_container() && !container {
            resolver.warn(Warning::DeployNeedsContainer {
                target: deploy_target.label().to_string(),
            });
        }

        for warning in &resolver.warnings {
            warn!(%warning, "resolution fallback");
        }

        Resolution {
            config: Self {
                repo_name,
                project_type,
                profile,
                description,
                dependencies,
                workspace,
                preset,
                assistant,
                deploy_target,
                container,
                base_image,
                database,
                readme,
                git,
                github_user,
            },
            warnings: resolver.warnings,
        }
    }

    pub fn repo_name(&self) -> &str {
        &self.repo_name
    }

    pub fn project_type(&self) -> ProjectType {
        self.project_type
    }

    pub fn profile(&self) -> LanguageProfile {
        self.profile
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn dependencies(&self) -> &[String] {
        &self.dependencies
    }

    /// Multi-project workspace layout rather than a single minimal project.
    pub fn workspace(&self) -> bool {
        self.workspace
    }

    pub fn preset(&self) -> PresetId {
        self.preset
    }

    pub fn assistant(&self) -> Option<Assistant> {
        self.assistant
    }

    pub fn deploy_target(&self) -> DeployTarget {
        self.deploy_target
    }

    pub fn container(&self) -> bool {
        self.container
    }

    pub fn base_image(&self) -> BaseImageFamily {
        self.base_image
    }

    pub fn database(&self) -> bool {
        self.database
    }

    pub fn readme(&self) -> bool {
        self.readme
    }

    pub fn git(&self) -> bool {
        self.git
    }

    pub fn github_user(&self) -> Option<&str> {
        self.github_user.as_deref()
    }
}

// ── Resolver ─────────────────────────────────────────────────────────────────

/// Per-field resolution rules, shared with the prompt session so that
/// conditional questions see the same values the final config will.
pub(crate) struct Resolver<'a> {
    answers: &'a RawAnswers,
    warnings: Vec<Warning>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(answers: &'a RawAnswers) -> Self {
        Self {
            answers,
            warnings: Vec::new(),
        }
    }

    fn warn(&mut self, warning: Warning) {
        self.warnings.push(warning);
    }

    /// Trimmed, non-empty text answer.
    fn text(&self, key: AnswerKey) -> Option<String> {
        self.answers
            .text(key)
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }

    pub(crate) fn flag(&self, key: AnswerKey, default: bool) -> bool {
        match self.answers.get(key) {
            Some(AnswerValue::Flag(value)) => *value,
            Some(AnswerValue::Text(raw)) => resolve_yes_no(raw, default),
            None => default,
        }
    }

    fn choice(&self, key: AnswerKey, options: &[&str], default: &str) -> String {
        resolve_choice(self.answers.text(key).unwrap_or_default(), options, default)
    }

    /// Parse a resolved choice, falling back to `fallback` with a warning.
    fn parsed<T: FromStr + Copy>(&mut self, key: AnswerKey, options: &[&str], fallback: T) -> T
    where
        T: std::fmt::Display,
    {
        let chosen = self.choice(key, options, &fallback.to_string());
        match chosen.parse() {
            Ok(value) => value,
            Err(_) => {
                self.warn(Warning::Unrecognized {
                    key,
                    input: chosen,
                    fallback: fallback.to_string(),
                });
                fallback
            }
        }
    }

    fn repo_name(&self) -> String {
        self.choice(AnswerKey::RepoName, &[], DEFAULT_REPO_NAME)
    }

    pub(crate) fn project_type(&mut self) -> ProjectType {
        self.parsed(
            AnswerKey::ProjectType,
            PROJECT_TYPE_OPTIONS,
            ProjectType::default(),
        )
    }

    pub(crate) fn language_text(&self) -> String {
        self.choice(AnswerKey::Language, LANGUAGE_OPTIONS, LANGUAGE_OPTIONS[0])
    }

    pub(crate) fn profile(&mut self) -> LanguageProfile {
        let language = self.language_text();
        // Only present when the framework question was asked or a flag set it.
        let framework = self.answers.text(AnswerKey::Framework).map(|raw| {
            resolve_choice(raw, JAVA_FRAMEWORK_OPTIONS, JAVA_FRAMEWORK_OPTIONS[0])
        });

        match LanguageProfile::detect(&language, framework.as_deref()) {
            Some(profile) => profile,
            None => {
                let fallback = LanguageProfile::default();
                self.warn(Warning::Unrecognized {
                    key: AnswerKey::Language,
                    input: language,
                    fallback: fallback.language_label().to_string(),
                });
                fallback
            }
        }
    }

    pub(crate) fn workspace(&self) -> bool {
        self.flag(AnswerKey::Workspace, true)
    }

    /// The answered preset when it fits the profile, otherwise the profile's
    /// natural preset with a warning.
    pub(crate) fn preset(&mut self, profile: LanguageProfile) -> PresetId {
        let natural = PresetId::default_for(profile);
        let Some(raw) = self.answers.text(AnswerKey::Preset) else {
            return natural;
        };

        let chosen = resolve_choice(raw, &preset_options(profile), natural.as_str());
        let fitting = chosen
            .parse::<PresetId>()
            .ok()
            .map(|id| id.refine_for(profile))
            .filter(|id| find_preset(*id).fits(profile));

        match fitting {
            Some(id) => id,
            None => {
                self.warn(Warning::Unrecognized {
                    key: AnswerKey::Preset,
                    input: chosen,
                    fallback: natural.as_str().to_string(),
                });
                natural
            }
        }
    }

    fn assistant(&mut self) -> Option<Assistant> {
        let default = Assistant::default().label();
        let chosen = self.choice(AnswerKey::Assistant, ASSISTANT_OPTIONS, default);
        match Assistant::parse_choice(&chosen) {
            Ok(assistant) => assistant,
            Err(_) => {
                self.warn(Warning::Unrecognized {
                    key: AnswerKey::Assistant,
                    input: chosen,
                    fallback: default.to_string(),
                });
                Some(Assistant::default())
            }
        }
    }

    fn deploy_target(&mut self) -> DeployTarget {
        self.parsed(
            AnswerKey::DeployTarget,
            DEPLOY_OPTIONS,
            DeployTarget::default(),
        )
    }

    fn base_image(&mut self) -> BaseImageFamily {
        self.parsed(
            AnswerKey::BaseImage,
            BASE_IMAGE_OPTIONS,
            BaseImageFamily::default(),
        )
    }

    pub(crate) fn database(
        &mut self,
        workspace: bool,
        preset: PresetId,
        profile: LanguageProfile,
        project_type: ProjectType,
    ) -> bool {
        let requested = self.flag(AnswerKey::Database, false);
        let offered = offers_database(workspace, find_preset(preset), profile, project_type);
        if requested && !offered {
            self.warn(Warning::DatabaseNotOffered { preset });
        }
        requested && offered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        answers::{AnswerOrigin, FlagSelection},
        value_objects::JavaFramework,
    };

    fn prompts() -> RawAnswers {
        RawAnswers::new(AnswerOrigin::Prompts)
    }

    #[test]
    fn no_answers_resolve_to_the_documented_defaults() {
        let resolution = ResolvedConfig::resolve(&prompts());
        assert_eq!(resolution.config, ResolvedConfig::default());
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn spring_boot_api_scenario() {
        let answers = FlagSelection {
            presets: vec![PresetId::Java],
            frameworks: vec![JavaFramework::SpringBoot],
            project_types: vec![ProjectType::ApiService],
            name: Some("demo".into()),
            docker: true,
            db: true,
            ..Default::default()
        }
        .into_answers()
        .unwrap();

        let Resolution { config, warnings } = ResolvedConfig::resolve(&answers);
        assert!(warnings.is_empty(), "{warnings:?}");
        assert_eq!(
            config.profile(),
            LanguageProfile::Java(Some(JavaFramework::SpringBoot))
        );
        assert_eq!(config.preset(), PresetId::SpringBoot);
        assert_eq!(config.project_type(), ProjectType::ApiService);
        assert_eq!(config.repo_name(), "demo");
        assert!(config.container());
        assert!(config.database());
    }

    #[test]
    fn quarkus_flag_alone_selects_the_quarkus_preset() {
        let answers = FlagSelection {
            frameworks: vec![JavaFramework::Quarkus],
            ..Default::default()
        }
        .into_answers()
        .unwrap();

        let config = ResolvedConfig::resolve(&answers).config;
        assert_eq!(
            config.profile(),
            LanguageProfile::Java(Some(JavaFramework::Quarkus))
        );
        assert_eq!(config.preset(), PresetId::Quarkus);
    }

    #[test]
    fn numeric_answers_match_literal_answers() {
        let by_number = prompts()
            .with_text(AnswerKey::ProjectType, "2")
            .with_text(AnswerKey::Language, "4")
            .with_text(AnswerKey::Framework, "2")
            .with_text(AnswerKey::DeployTarget, "3");
        let by_text = prompts()
            .with_text(AnswerKey::ProjectType, "api service")
            .with_text(AnswerKey::Language, "Java")
            .with_text(AnswerKey::Framework, "quarkus")
            .with_text(AnswerKey::DeployTarget, "Kubernetes");

        assert_eq!(
            ResolvedConfig::resolve(&by_number).config,
            ResolvedConfig::resolve(&by_text).config
        );
    }

    #[test]
    fn unknown_language_falls_back_with_a_warning() {
        let answers = prompts().with_text(AnswerKey::Language, "COBOL");
        let resolution = ResolvedConfig::resolve(&answers);
        assert_eq!(resolution.config.profile(), LanguageProfile::TypeScript);
        assert!(matches!(
            resolution.warnings.as_slice(),
            [Warning::Unrecognized {
                key: AnswerKey::Language,
                ..
            }]
        ));
    }

    #[test]
    fn unknown_preset_falls_back_to_the_natural_preset() {
        let answers = prompts()
            .with_text(AnswerKey::Language, "Python")
            .with_text(AnswerKey::Preset, "svelte");
        let resolution = ResolvedConfig::resolve(&answers);
        assert_eq!(resolution.config.preset(), PresetId::Python);
        assert_eq!(resolution.config.profile(), LanguageProfile::Python);
        assert_eq!(resolution.warnings.len(), 1);
    }

    #[test]
    fn preset_for_another_framework_is_replaced() {
        for preset in ["3", "quarkus", "java"] {
            let answers = prompts()
                .with_text(AnswerKey::Language, "Java")
                .with_text(AnswerKey::Framework, "Spring Boot")
                .with_text(AnswerKey::Preset, preset);
            let resolution = ResolvedConfig::resolve(&answers);
            assert_eq!(
                resolution.config.profile(),
                LanguageProfile::Java(Some(JavaFramework::SpringBoot))
            );
            assert_eq!(resolution.config.preset(), PresetId::SpringBoot, "{preset}");
            assert_eq!(
                find_preset(resolution.config.preset()).generator_args,
                &["--framework=spring-boot"]
            );
        }
    }

    #[test]
    fn preset_for_another_language_warns_and_is_replaced() {
        let answers = prompts()
            .with_text(AnswerKey::Language, "Python")
            .with_text(AnswerKey::Preset, "react");
        let resolution = ResolvedConfig::resolve(&answers);
        assert_eq!(resolution.config.preset(), PresetId::Python);
        assert_eq!(
            resolution.warnings,
            vec![Warning::Unrecognized {
                key: AnswerKey::Preset,
                input: "react".into(),
                fallback: "python".into(),
            }]
        );
    }

    #[test]
    fn node_presets_fit_javascript() {
        let answers = prompts()
            .with_text(AnswerKey::Language, "JavaScript")
            .with_text(AnswerKey::Preset, "express");
        let resolution = ResolvedConfig::resolve(&answers);
        assert_eq!(resolution.config.preset(), PresetId::Express);
        assert!(resolution.warnings.is_empty());
    }

    #[test]
    fn db_flag_is_ignored_where_no_database_is_offered() {
        let answers = FlagSelection {
            presets: vec![PresetId::React],
            db: true,
            ..Default::default()
        }
        .into_answers()
        .unwrap();

        let resolution = ResolvedConfig::resolve(&answers);
        assert!(!resolution.config.database());
        assert_eq!(
            resolution.warnings,
            vec![Warning::DatabaseNotOffered {
                preset: PresetId::React
            }]
        );
    }

    #[test]
    fn assistant_none_disables_the_assistant() {
        let answers = prompts().with_text(AnswerKey::Assistant, "5");
        assert_eq!(ResolvedConfig::resolve(&answers).config.assistant(), None);
    }

    #[test]
    fn remote_deploy_without_container_warns() {
        let answers = prompts()
            .with_text(AnswerKey::DeployTarget, "Fly.io")
            .with_flag(AnswerKey::Container, false);
        let resolution = ResolvedConfig::resolve(&answers);
        assert!(matches!(
            resolution.warnings.as_slice(),
            [Warning::DeployNeedsContainer { .. }]
        ));
    }

    #[test]
    fn blank_handle_is_no_handle() {
        let answers = prompts().with_text(AnswerKey::GithubUser, "   ");
        assert_eq!(ResolvedConfig::resolve(&answers).config.github_user(), None);
    }
}
