//! Domain value objects: project type, language family, Java sub-framework,
//! assistant, deployment target and base-image family.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! Each carries its machine name (`as_str`), its prompt label (`label`) and
//! a tolerant `FromStr` that accepts either. Option lists shown by the
//! prompt session are built from the `ALL` arrays, so adding a variant here
//! is the only change needed to offer it.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::error::DomainError;

fn invalid(field: &str, value: &str, expected: &[&str]) -> DomainError {
    DomainError::InvalidAnswer {
        field: field.into(),
        value: value.into(),
        reason: format!("expected one of: {}", expected.join(", ")),
    }
}

fn normalized(s: &str) -> String {
    s.trim().to_ascii_lowercase().replace(['_', ' '], "-")
}

// ── ProjectType ──────────────────────────────────────────────────────────────

/// The kind of project being bootstrapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProjectType {
    WebApp,
    ApiService,
    CliTool,
    Library,
    Fullstack,
}

impl ProjectType {
    pub const ALL: [Self; 5] = [
        Self::WebApp,
        Self::ApiService,
        Self::CliTool,
        Self::Library,
        Self::Fullstack,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::WebApp => "web-app",
            Self::ApiService => "api-service",
            Self::CliTool => "cli-tool",
            Self::Library => "library",
            Self::Fullstack => "fullstack",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::WebApp => "Web App",
            Self::ApiService => "API Service",
            Self::CliTool => "CLI Tool",
            Self::Library => "Library",
            Self::Fullstack => "Fullstack",
        }
    }

    /// Nx `projectType` for the workspace project.
    pub const fn nx_project_type(&self) -> &'static str {
        match self {
            Self::Library => "library",
            _ => "application",
        }
    }
}

impl Default for ProjectType {
    fn default() -> Self {
        Self::WebApp
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProjectType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "web-app" | "webapp" | "web" | "frontend" => Ok(Self::WebApp),
            "api-service" | "api" | "service" | "backend" => Ok(Self::ApiService),
            "cli-tool" | "cli" => Ok(Self::CliTool),
            "library" | "lib" => Ok(Self::Library),
            "fullstack" | "full-stack" => Ok(Self::Fullstack),
            _ => Err(invalid(
                "project type",
                s,
                &Self::ALL.map(|t| t.label()),
            )),
        }
    }
}

// ── LanguageFamily ───────────────────────────────────────────────────────────

/// Coarse classification that drives port defaults and toolchain shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LanguageFamily {
    /// Node and Python style interpreters.
    Scripting,
    /// Natively compiled: Rust, Go.
    Systems,
    /// JVM.
    ManagedRuntime,
}

impl LanguageFamily {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Scripting => "scripting",
            Self::Systems => "systems",
            Self::ManagedRuntime => "managed-runtime",
        }
    }
}

impl fmt::Display for LanguageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── JavaFramework ────────────────────────────────────────────────────────────

/// Sub-framework of the managed-runtime family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JavaFramework {
    SpringBoot,
    Quarkus,
}

impl JavaFramework {
    pub const ALL: [Self; 2] = [Self::SpringBoot, Self::Quarkus];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SpringBoot => "spring-boot",
            Self::Quarkus => "quarkus",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::SpringBoot => "Spring Boot",
            Self::Quarkus => "Quarkus",
        }
    }
}

impl fmt::Display for JavaFramework {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JavaFramework {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "spring-boot" | "springboot" | "spring" => Ok(Self::SpringBoot),
            "quarkus" => Ok(Self::Quarkus),
            _ => Err(invalid("java framework", s, &Self::ALL.map(|f| f.label()))),
        }
    }
}

// ── Assistant ────────────────────────────────────────────────────────────────

/// AI coding assistant whose instruction file is generated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Assistant {
    Claude,
    Gemini,
    Codex,
    Copilot,
}

impl Assistant {
    pub const ALL: [Self; 4] = [Self::Claude, Self::Gemini, Self::Codex, Self::Copilot];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Codex => "codex",
            Self::Copilot => "copilot",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Claude => "Claude",
            Self::Gemini => "Gemini",
            Self::Codex => "Codex",
            Self::Copilot => "Copilot",
        }
    }

    /// Instruction file the assistant reads from the repository.
    pub const fn config_path(&self) -> &'static str {
        match self {
            Self::Claude => "CLAUDE.md",
            Self::Gemini => "GEMINI.md",
            Self::Codex => "AGENTS.md",
            Self::Copilot => ".github/copilot-instructions.md",
        }
    }

    /// Credential variable documented in `.env.example`.
    pub const fn api_key_var(&self) -> &'static str {
        match self {
            Self::Claude => "ANTHROPIC_API_KEY",
            Self::Gemini => "GEMINI_API_KEY",
            Self::Codex => "OPENAI_API_KEY",
            Self::Copilot => "GITHUB_TOKEN",
        }
    }

    pub const fn launch_command(&self) -> &'static str {
        match self {
            Self::Claude => "claude",
            Self::Gemini => "gemini",
            Self::Codex => "codex",
            Self::Copilot => "gh copilot",
        }
    }

    /// Parse an assistant answer where `none` means "no assistant".
    pub fn parse_choice(s: &str) -> Result<Option<Self>, DomainError> {
        match normalized(s).as_str() {
            "none" | "no" | "skip" | "off" => Ok(None),
            _ => s.parse().map(Some),
        }
    }
}

impl Default for Assistant {
    fn default() -> Self {
        Self::Claude
    }
}

impl fmt::Display for Assistant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Assistant {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "claude" | "claude-code" | "anthropic" => Ok(Self::Claude),
            "gemini" | "gemini-cli" => Ok(Self::Gemini),
            "codex" | "openai" => Ok(Self::Codex),
            "copilot" | "github-copilot" => Ok(Self::Copilot),
            _ => Err(invalid("assistant", s, &Self::ALL.map(|a| a.label()))),
        }
    }
}

// ── DeployTarget ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DeployTarget {
    Local,
    FlyIo,
    Kubernetes,
}

impl DeployTarget {
    pub const ALL: [Self; 3] = [Self::Local, Self::FlyIo, Self::Kubernetes];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::FlyIo => "fly",
            Self::Kubernetes => "kubernetes",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Local => "Local only",
            Self::FlyIo => "Fly.io",
            Self::Kubernetes => "Kubernetes",
        }
    }

    /// Remote targets deploy the generated container image.
    pub const fn requires_container(&self) -> bool {
        !matches!(self, Self::Local)
    }
}

impl Default for DeployTarget {
    fn default() -> Self {
        Self::Local
    }
}

impl fmt::Display for DeployTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for DeployTarget {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "local" | "local-only" | "none" => Ok(Self::Local),
            "fly" | "fly.io" | "flyio" => Ok(Self::FlyIo),
            "kubernetes" | "k8s" => Ok(Self::Kubernetes),
            _ => Err(invalid("deploy target", s, &Self::ALL.map(|d| d.label()))),
        }
    }
}

// ── BaseImageFamily ──────────────────────────────────────────────────────────

/// Container base image flavour; the concrete image also depends on the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseImageFamily {
    Debian,
    Alpine,
    Distroless,
}

impl BaseImageFamily {
    pub const ALL: [Self; 3] = [Self::Debian, Self::Alpine, Self::Distroless];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debian => "debian",
            Self::Alpine => "alpine",
            Self::Distroless => "distroless",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Debian => "Debian slim",
            Self::Alpine => "Alpine",
            Self::Distroless => "Distroless",
        }
    }
}

impl Default for BaseImageFamily {
    fn default() -> Self {
        Self::Debian
    }
}

impl fmt::Display for BaseImageFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for BaseImageFamily {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalized(s).as_str() {
            "debian" | "debian-slim" | "slim" | "bookworm" => Ok(Self::Debian),
            "alpine" => Ok(Self::Alpine),
            "distroless" => Ok(Self::Distroless),
            _ => Err(invalid("base image", s, &Self::ALL.map(|b| b.label()))),
        }
    }
}
