//! Everything the artifact composer reads, computed once per run.
//!
//! Ports, names, toolchain commands and container images are derived here
//! from the [`ResolvedConfig`]; generators never recompute them.

use serde::Serialize;

use crate::domain::{
    dependencies::DependencyPlan,
    entities::config::ResolvedConfig,
    error::Warning,
    identity::{PortAssignment, ProjectIdentity},
    presets::PresetDescriptor,
    profile::LanguageProfile,
    value_objects::{BaseImageFamily, JavaFramework},
};

/// Whether scripts drive the workspace orchestrator or the raw toolchain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ToolchainMode {
    Workspace,
    Native,
}

/// Commands as run from inside the application directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NativeCommands {
    pub install: String,
    pub dev: String,
    pub build: String,
    pub test: String,
}

impl NativeCommands {
    fn for_profile(
        profile: LanguageProfile,
        identity: &ProjectIdentity,
        dependencies: &DependencyPlan,
    ) -> Self {
        let (install, dev, build, test) = match profile {
            LanguageProfile::TypeScript | LanguageProfile::JavaScript => (
                "pnpm install".to_string(),
                "pnpm run dev".to_string(),
                "pnpm run build".to_string(),
                "pnpm test".to_string(),
            ),
            LanguageProfile::Python => (
                "uv sync".to_string(),
                format!("uv run python -m {}", identity.snake),
                "uv build".to_string(),
                "uv run pytest".to_string(),
            ),
            LanguageProfile::Java(framework) => (
                "mvn -q dependency:go-offline".to_string(),
                match framework {
                    Some(JavaFramework::SpringBoot) => "mvn spring-boot:run",
                    Some(JavaFramework::Quarkus) => "mvn quarkus:dev",
                    None => "mvn -q compile exec:java",
                }
                .to_string(),
                "mvn -q package -DskipTests".to_string(),
                "mvn test".to_string(),
            ),
            LanguageProfile::Rust => (
                "cargo fetch".to_string(),
                "cargo run".to_string(),
                "cargo build --release".to_string(),
                "cargo test".to_string(),
            ),
            // go.mod cannot list unversioned requirements, so they are fetched.
            LanguageProfile::Go if !dependencies.native.is_empty() => (
                format!(
                    "go get {} && go mod download",
                    dependencies
                        .native
                        .iter()
                        .map(|d| d.as_str())
                        .collect::<Vec<_>>()
                        .join(" ")
                ),
                "go run .".to_string(),
                format!("go build -o bin/{} .", identity.slug),
                "go test ./...".to_string(),
            ),
            LanguageProfile::Go => (
                "go mod download".to_string(),
                "go run .".to_string(),
                format!("go build -o bin/{} .", identity.slug),
                "go test ./...".to_string(),
            ),
        };
        Self {
            install,
            dev,
            build,
            test,
        }
    }
}

/// The single set of user-facing commands for a run.
///
/// Scripts, `devbox.json`, the README, assistant files and printed next
/// steps all read these values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolchainCommands {
    pub mode: ToolchainMode,
    pub install: String,
    pub dev: String,
    pub build: String,
    pub test: String,
    /// Enters the pinned toolchain environment.
    pub shell: String,
}

impl ToolchainCommands {
    fn derive(workspace: bool, profile: LanguageProfile, native: &NativeCommands, slug: &str) -> Self {
        if workspace {
            let install = if profile.is_node() {
                "pnpm install".to_string()
            } else {
                format!("pnpm install && pnpm nx run {slug}:install")
            };
            Self {
                mode: ToolchainMode::Workspace,
                install,
                dev: format!("pnpm nx serve {slug}"),
                build: format!("pnpm nx build {slug}"),
                test: format!("pnpm nx test {slug}"),
                shell: "devbox shell".into(),
            }
        } else {
            Self {
                mode: ToolchainMode::Native,
                install: native.install.clone(),
                dev: native.dev.clone(),
                build: native.build.clone(),
                test: native.test.clone(),
                shell: "devbox shell".into(),
            }
        }
    }

    pub fn all(&self) -> [&str; 4] {
        [
            self.install.as_str(),
            self.dev.as_str(),
            self.build.as_str(),
            self.test.as_str(),
        ]
    }
}

/// Build and runtime images for the container manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContainerImage {
    pub build: String,
    pub runtime: String,
}

impl ContainerImage {
    pub fn select(profile: LanguageProfile, family: BaseImageFamily) -> Self {
        let (build, runtime) = match (profile, family) {
            (LanguageProfile::TypeScript | LanguageProfile::JavaScript, BaseImageFamily::Debian) => {
                ("node:22-bookworm-slim", "node:22-bookworm-slim")
            }
            (LanguageProfile::TypeScript | LanguageProfile::JavaScript, BaseImageFamily::Alpine) => {
                ("node:22-alpine", "node:22-alpine")
            }
            (LanguageProfile::TypeScript | LanguageProfile::JavaScript, BaseImageFamily::Distroless) => {
                ("node:22-bookworm-slim", "gcr.io/distroless/nodejs22-debian12")
            }
            (LanguageProfile::Python, BaseImageFamily::Debian) => {
                ("python:3.12-slim", "python:3.12-slim")
            }
            (LanguageProfile::Python, BaseImageFamily::Alpine) => {
                ("python:3.12-alpine", "python:3.12-alpine")
            }
            (LanguageProfile::Python, BaseImageFamily::Distroless) => {
                ("python:3.12-slim", "gcr.io/distroless/python3-debian12")
            }
            (LanguageProfile::Java(_), BaseImageFamily::Debian) => {
                ("maven:3.9-eclipse-temurin-21", "eclipse-temurin:21-jdk")
            }
            (LanguageProfile::Java(_), BaseImageFamily::Alpine) => (
                "maven:3.9-eclipse-temurin-21-alpine",
                "eclipse-temurin:21-jdk-alpine",
            ),
            (LanguageProfile::Java(_), BaseImageFamily::Distroless) => {
                ("maven:3.9-eclipse-temurin-21", "gcr.io/distroless/java21-debian12")
            }
            (LanguageProfile::Rust, BaseImageFamily::Debian) => {
                ("rust:1.85-slim", "debian:bookworm-slim")
            }
            (LanguageProfile::Rust, BaseImageFamily::Alpine) => ("rust:1.85-alpine", "alpine:3.20"),
            (LanguageProfile::Rust, BaseImageFamily::Distroless) => {
                ("rust:1.85-slim", "gcr.io/distroless/cc-debian12")
            }
            (LanguageProfile::Go, BaseImageFamily::Debian) => ("golang:1.23", "debian:bookworm-slim"),
            (LanguageProfile::Go, BaseImageFamily::Alpine) => ("golang:1.23-alpine", "alpine:3.20"),
            (LanguageProfile::Go, BaseImageFamily::Distroless) => {
                ("golang:1.23", "gcr.io/distroless/static-debian12")
            }
        };
        Self {
            build: build.to_string(),
            runtime: runtime.to_string(),
        }
    }
}

/// The resolved configuration plus every fact derived from it.
#[derive(Debug, Clone)]
pub struct ResolvedContext {
    config: ResolvedConfig,
    preset: &'static PresetDescriptor,
    ports: PortAssignment,
    identity: ProjectIdentity,
    native: NativeCommands,
    commands: ToolchainCommands,
    image: ContainerImage,
    dependencies: DependencyPlan,
}

impl ResolvedContext {
    /// Derive the context; dependency names that cannot be used are
    /// reported as warnings.
    pub fn derive(config: ResolvedConfig) -> (Self, Vec<Warning>) {
        let profile = config.profile();
        let preset = config.preset().descriptor();
        let ports = PortAssignment::allocate(profile, preset);
        let identity = ProjectIdentity::derive(config.repo_name(), config.github_user());
        let dependencies = DependencyPlan::from_requested(config.dependencies());
        let native = NativeCommands::for_profile(profile, &identity, &dependencies);
        let commands =
            ToolchainCommands::derive(config.workspace(), profile, &native, &identity.slug);
        let image = ContainerImage::select(profile, config.base_image());

        let warnings = dependencies
            .rejected
            .iter()
            .map(|input| Warning::RejectedDependency {
                input: input.clone(),
            })
            .collect();

        (
            Self {
                config,
                preset,
                ports,
                identity,
                native,
                commands,
                image,
                dependencies,
            },
            warnings,
        )
    }

    pub fn config(&self) -> &ResolvedConfig {
        &self.config
    }

    pub fn profile(&self) -> LanguageProfile {
        self.config.profile()
    }

    pub fn preset(&self) -> &'static PresetDescriptor {
        self.preset
    }

    pub fn ports(&self) -> PortAssignment {
        self.ports
    }

    pub fn identity(&self) -> &ProjectIdentity {
        &self.identity
    }

    pub fn slug(&self) -> &str {
        &self.identity.slug
    }

    pub fn native(&self) -> &NativeCommands {
        &self.native
    }

    pub fn commands(&self) -> &ToolchainCommands {
        &self.commands
    }

    pub fn image(&self) -> &ContainerImage {
        &self.image
    }

    pub fn dependencies(&self) -> &DependencyPlan {
        &self.dependencies
    }

    /// Directory holding the application, relative to the project root.
    ///
    /// Empty in minimal mode.
    pub fn app_dir(&self) -> String {
        if self.config.workspace() {
            format!("apps/{}", self.identity.slug)
        } else {
            String::new()
        }
    }

    /// Join a path onto [`Self::app_dir`].
    pub fn app_path(&self, relative: &str) -> String {
        let dir = self.app_dir();
        if dir.is_empty() {
            relative.to_string()
        } else {
            format!("{dir}/{relative}")
        }
    }

    /// Deployment manifests need the container image.
    pub fn deploys_container(&self) -> bool {
        self.config.container() && self.config.deploy_target().requires_container()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{
        answers::{AnswerKey, AnswerOrigin, FlagSelection, RawAnswers},
        presets::PresetId,
        value_objects::ProjectType,
    };

    fn context(answers: RawAnswers) -> ResolvedContext {
        ResolvedContext::derive(ResolvedConfig::resolve(&answers).config).0
    }

    #[test]
    fn spring_boot_context_uses_the_jdk_image_and_port() {
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

        let ctx = context(answers);
        assert_eq!(ctx.image().runtime, "eclipse-temurin:21-jdk");
        assert_eq!(ctx.ports().application, 8081);
        assert_eq!(ctx.slug(), "demo");
        assert_eq!(ctx.app_dir(), "apps/demo");
    }

    #[test]
    fn workspace_commands_never_use_the_raw_toolchain() {
        let ctx = context(RawAnswers::new(AnswerOrigin::Prompts).with_text(AnswerKey::Language, "Rust"));
        assert_eq!(ctx.commands().mode, ToolchainMode::Workspace);
        for command in ctx.commands().all() {
            assert!(command.starts_with("pnpm"), "{command}");
            assert!(!command.contains("cargo"), "{command}");
        }
    }

    #[test]
    fn minimal_commands_never_use_the_orchestrator() {
        let ctx = context(
            RawAnswers::new(AnswerOrigin::Prompts)
                .with_text(AnswerKey::Language, "Go")
                .with_flag(AnswerKey::Workspace, false),
        );
        assert_eq!(ctx.commands().mode, ToolchainMode::Native);
        assert_eq!(ctx.app_dir(), "");
        assert_eq!(ctx.app_path("main.go"), "main.go");
        for command in ctx.commands().all() {
            assert!(!command.contains("nx"), "{command}");
        }
    }

    #[test]
    fn go_dependencies_are_fetched_by_the_install_command() {
        let ctx = context(
            RawAnswers::new(AnswerOrigin::Prompts)
                .with_text(AnswerKey::Language, "Go")
                .with_text(AnswerKey::Dependencies, "github.com/go-chi/chi/v5")
                .with_flag(AnswerKey::Workspace, false),
        );
        assert_eq!(
            ctx.commands().install,
            "go get github.com/go-chi/chi/v5 && go mod download"
        );
    }

    #[test]
    fn rejected_dependencies_become_warnings() {
        let answers = RawAnswers::new(AnswerOrigin::Prompts)
            .with_text(AnswerKey::Dependencies, "express, $(rm), redis");
        let (ctx, warnings) = ResolvedContext::derive(ResolvedConfig::resolve(&answers).config);
        assert_eq!(ctx.dependencies().system, vec!["redis"]);
        assert_eq!(ctx.dependencies().native.len(), 2);
        assert_eq!(
            warnings,
            vec![Warning::RejectedDependency {
                input: "$(rm)".into()
            }]
        );
    }
}
