//! Workspace preset registry and the service matrix.
//!
//! Each preset is described exactly once by its [`PresetDescriptor`] in
//! [`PRESET_REGISTRY`]. Lookups never fail: an unknown identity resolves to
//! the [`DEFAULT_PRESET`] descriptor and the caller records a warning.
//!
//! # Adding a New Preset
//!
//! 1. Add a variant to [`PresetId`] with its `as_str` and `FromStr` arms
//! 2. Add one [`PresetDescriptor`] entry to [`PRESET_REGISTRY`]
//! 3. If it is the natural preset for a profile, update [`PresetId::default_for`]

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::{
    error::DomainError,
    profile::LanguageProfile,
    value_objects::{JavaFramework, ProjectType},
};

// ── PresetId ─────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetId {
    Ts,
    React,
    Angular,
    Next,
    Express,
    Nest,
    Python,
    Java,
    SpringBoot,
    Quarkus,
    Rust,
    Go,
}

pub const DEFAULT_PRESET: PresetId = PresetId::Ts;

impl PresetId {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Ts => "ts",
            Self::React => "react",
            Self::Angular => "angular",
            Self::Next => "next",
            Self::Express => "express",
            Self::Nest => "nest",
            Self::Python => "python",
            Self::Java => "java",
            Self::SpringBoot => "spring-boot",
            Self::Quarkus => "quarkus",
            Self::Rust => "rust",
            Self::Go => "go",
        }
    }

    /// The natural preset for a profile.
    ///
    /// A Java profile with a sub-framework maps to that framework's preset,
    /// never to the bare `java` preset.
    pub const fn default_for(profile: LanguageProfile) -> Self {
        match profile {
            LanguageProfile::TypeScript | LanguageProfile::JavaScript => Self::Ts,
            LanguageProfile::Python => Self::Python,
            LanguageProfile::Rust => Self::Rust,
            LanguageProfile::Go => Self::Go,
            LanguageProfile::Java(None) => Self::Java,
            LanguageProfile::Java(Some(JavaFramework::SpringBoot)) => Self::SpringBoot,
            LanguageProfile::Java(Some(JavaFramework::Quarkus)) => Self::Quarkus,
        }
    }

    /// Narrow the bare `java` preset to the profile's sub-framework preset.
    pub const fn refine_for(self, profile: LanguageProfile) -> Self {
        match (self, profile) {
            (Self::Java, LanguageProfile::Java(Some(_))) => Self::default_for(profile),
            (id, _) => id,
        }
    }

    pub fn descriptor(self) -> &'static PresetDescriptor {
        find_preset(self)
    }
}

impl fmt::Display for PresetId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PresetId {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace(['_', ' '], "-").as_str() {
            "ts" | "typescript" => Ok(Self::Ts),
            "react" => Ok(Self::React),
            "angular" => Ok(Self::Angular),
            "next" | "nextjs" | "next.js" => Ok(Self::Next),
            "express" => Ok(Self::Express),
            "nest" | "nestjs" => Ok(Self::Nest),
            "python" | "py" => Ok(Self::Python),
            "java" => Ok(Self::Java),
            "spring-boot" | "springboot" | "spring" => Ok(Self::SpringBoot),
            "quarkus" => Ok(Self::Quarkus),
            "rust" => Ok(Self::Rust),
            "go" | "golang" => Ok(Self::Go),
            _ => Err(DomainError::InvalidAnswer {
                field: "preset".into(),
                value: s.into(),
                reason: "not a known workspace preset".into(),
            }),
        }
    }
}

// ── PresetDescriptor ─────────────────────────────────────────────────────────

/// Where a preset sits in the service matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PresetKind {
    /// Library-first preset with no server of its own.
    General,
    /// Browser application.
    Frontend,
    /// Node or Python server.
    ScriptingServer,
    /// JVM service.
    ManagedRuntime,
    /// Natively compiled service.
    SystemsRuntime,
}

impl PresetKind {
    /// Kinds that run a server process and can sit next to a database.
    pub const fn is_server(&self) -> bool {
        matches!(
            self,
            Self::ScriptingServer | Self::ManagedRuntime | Self::SystemsRuntime
        )
    }
}

/// One workspace preset: the Nx plugins it installs and the generator it runs.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct PresetDescriptor {
    pub id: PresetId,
    pub label: &'static str,
    pub docs_url: &'static str,
    /// Nx plugin packages added to the workspace `devDependencies`.
    pub plugins: &'static [&'static str],
    /// Nx generator producing the starter (`plugin:generator`).
    pub generator: Option<&'static str>,
    /// Extra arguments passed to the generator.
    pub generator_args: &'static [&'static str],
    /// The app itself runs on the Node toolchain.
    pub uses_node_toolchain: bool,
    pub kind: PresetKind,
    /// Profile implied by choosing this preset from a flag.
    pub language: LanguageProfile,
    /// Preset-specific base port; `None` defers to the language family.
    pub base_port: Option<u16>,
}

impl PresetDescriptor {
    /// Whether this preset generates the same kind of project as `profile`.
    ///
    /// Node presets fit any Node profile. Everything else must match the
    /// profile exactly, sub-framework included, so a Spring Boot profile
    /// never receives the Quarkus generator.
    pub fn fits(&self, profile: LanguageProfile) -> bool {
        if self.language.is_node() {
            return profile.is_node();
        }
        self.language == profile
    }
}

/// Single source of truth for workspace presets.
pub static PRESET_REGISTRY: &[PresetDescriptor] = &[
    PresetDescriptor {
        id: PresetId::Ts,
        label: "TypeScript",
        docs_url: "https://nx.dev/nx-api/js",
        plugins: &["@nx/js"],
        generator: Some("@nx/js:library"),
        generator_args: &["--bundler=tsc"],
        uses_node_toolchain: true,
        kind: PresetKind::General,
        language: LanguageProfile::TypeScript,
        base_port: None,
    },
    PresetDescriptor {
        id: PresetId::React,
        label: "React",
        docs_url: "https://nx.dev/nx-api/react",
        plugins: &["@nx/react", "@nx/vite"],
        generator: Some("@nx/react:application"),
        generator_args: &["--bundler=vite", "--style=css"],
        uses_node_toolchain: true,
        kind: PresetKind::Frontend,
        language: LanguageProfile::TypeScript,
        base_port: Some(4200),
    },
    PresetDescriptor {
        id: PresetId::Angular,
        label: "Angular",
        docs_url: "https://nx.dev/nx-api/angular",
        plugins: &["@nx/angular"],
        generator: Some("@nx/angular:application"),
        generator_args: &["--style=css"],
        uses_node_toolchain: true,
        kind: PresetKind::Frontend,
        language: LanguageProfile::TypeScript,
        base_port: Some(4200),
    },
    PresetDescriptor {
        id: PresetId::Next,
        label: "Next.js",
        docs_url: "https://nx.dev/nx-api/next",
        plugins: &["@nx/next"],
        generator: Some("@nx/next:application"),
        generator_args: &["--style=css"],
        uses_node_toolchain: true,
        kind: PresetKind::Frontend,
        language: LanguageProfile::TypeScript,
        base_port: Some(3000),
    },
    PresetDescriptor {
        id: PresetId::Express,
        label: "Express",
        docs_url: "https://nx.dev/nx-api/express",
        plugins: &["@nx/express", "@nx/node"],
        generator: Some("@nx/express:application"),
        generator_args: &[],
        uses_node_toolchain: true,
        kind: PresetKind::ScriptingServer,
        language: LanguageProfile::TypeScript,
        base_port: Some(3000),
    },
    PresetDescriptor {
        id: PresetId::Nest,
        label: "NestJS",
        docs_url: "https://nx.dev/nx-api/nest",
        plugins: &["@nx/nest", "@nx/node"],
        generator: Some("@nx/nest:application"),
        generator_args: &[],
        uses_node_toolchain: true,
        kind: PresetKind::ScriptingServer,
        language: LanguageProfile::TypeScript,
        base_port: Some(3000),
    },
    PresetDescriptor {
        id: PresetId::Python,
        label: "Python (uv)",
        docs_url: "https://github.com/lucasvieirasilva/nx-plugins",
        plugins: &["@nxlv/python"],
        generator: Some("@nxlv/python:uv-project"),
        generator_args: &["--projectType=application"],
        uses_node_toolchain: false,
        kind: PresetKind::ScriptingServer,
        language: LanguageProfile::Python,
        base_port: Some(8000),
    },
    PresetDescriptor {
        id: PresetId::Java,
        label: "Java (Maven)",
        docs_url: "https://github.com/khalilou88/jnxplus",
        plugins: &["@jnxplus/nx-maven"],
        generator: Some("@jnxplus/nx-maven:application"),
        generator_args: &["--framework=none"],
        uses_node_toolchain: false,
        kind: PresetKind::ManagedRuntime,
        language: LanguageProfile::Java(None),
        base_port: None,
    },
    PresetDescriptor {
        id: PresetId::SpringBoot,
        label: "Spring Boot",
        docs_url: "https://github.com/khalilou88/jnxplus",
        plugins: &["@jnxplus/nx-maven"],
        generator: Some("@jnxplus/nx-maven:application"),
        generator_args: &["--framework=spring-boot"],
        uses_node_toolchain: false,
        kind: PresetKind::ManagedRuntime,
        language: LanguageProfile::Java(Some(JavaFramework::SpringBoot)),
        base_port: Some(8080),
    },
    PresetDescriptor {
        id: PresetId::Quarkus,
        label: "Quarkus",
        docs_url: "https://github.com/khalilou88/jnxplus",
        plugins: &["@jnxplus/nx-maven"],
        generator: Some("@jnxplus/nx-maven:application"),
        generator_args: &["--framework=quarkus"],
        uses_node_toolchain: false,
        kind: PresetKind::ManagedRuntime,
        language: LanguageProfile::Java(Some(JavaFramework::Quarkus)),
        base_port: Some(8080),
    },
    PresetDescriptor {
        id: PresetId::Rust,
        label: "Rust (Cargo)",
        docs_url: "https://github.com/cammisuli/monodon",
        plugins: &["@monodon/rust"],
        generator: Some("@monodon/rust:binary"),
        generator_args: &[],
        uses_node_toolchain: false,
        kind: PresetKind::SystemsRuntime,
        language: LanguageProfile::Rust,
        base_port: None,
    },
    PresetDescriptor {
        id: PresetId::Go,
        label: "Go",
        docs_url: "https://github.com/nx-go/nx-go",
        plugins: &["@nx-go/nx-go"],
        generator: Some("@nx-go/nx-go:application"),
        generator_args: &[],
        uses_node_toolchain: false,
        kind: PresetKind::SystemsRuntime,
        language: LanguageProfile::Go,
        base_port: Some(8080),
    },
];

// ── Lookups ──────────────────────────────────────────────────────────────────

/// Find a preset descriptor, falling back to the default preset.
pub fn find_preset(id: PresetId) -> &'static PresetDescriptor {
    PRESET_REGISTRY
        .iter()
        .find(|d| d.id == id)
        .unwrap_or(&PRESET_REGISTRY[0])
}

/// Preset identities offered for a profile, natural preset first.
pub fn preset_options(profile: LanguageProfile) -> Vec<&'static str> {
    let natural = PresetId::default_for(profile);
    let mut options = vec![natural.as_str()];
    options.extend(
        PRESET_REGISTRY
            .iter()
            .filter(|d| d.id != natural && d.fits(profile))
            .map(|d| d.id.as_str()),
    );
    options
}

/// Whether a database service is offered for this combination.
///
/// Server presets always qualify. Outside workspace mode a backend-typical
/// language or an API-service project also qualifies.
pub fn offers_database(
    workspace: bool,
    preset: &PresetDescriptor,
    profile: LanguageProfile,
    project_type: ProjectType,
) -> bool {
    preset.kind.is_server()
        || (!workspace
            && (profile.is_backend_typical() || project_type == ProjectType::ApiService))
}

// ── Registry integrity (checked in tests) ────────────────────────────────────

/// Assert that the registry is internally consistent.
///
/// Call this in a test; it panics with a clear message on any violation.
#[doc(hidden)]
pub fn assert_registry_integrity() {
    assert_eq!(
        PRESET_REGISTRY[0].id, DEFAULT_PRESET,
        "the fallback preset must be the first registry entry"
    );

    for (i, def) in PRESET_REGISTRY.iter().enumerate() {
        assert!(
            PRESET_REGISTRY[i + 1..].iter().all(|other| other.id != def.id),
            "Preset {:?} is registered twice",
            def.id
        );
        assert!(!def.plugins.is_empty(), "Preset {:?} has no plugins", def.id);
        assert_eq!(
            def.uses_node_toolchain,
            def.language.is_node(),
            "Preset {:?}: node toolchain flag disagrees with its language",
            def.id
        );
        assert_eq!(
            def.id.as_str().parse::<PresetId>().ok(),
            Some(def.id),
            "Preset {:?} does not round-trip through its identity",
            def.id
        );
    }

    for def in PRESET_REGISTRY {
        let natural = PresetId::default_for(def.language);
        assert!(
            PRESET_REGISTRY.iter().any(|d| d.id == natural),
            "Natural preset {natural:?} for {:?} is not registered",
            def.language
        );
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_is_internally_consistent() {
        assert_registry_integrity();
    }

    #[test]
    fn sub_framework_profiles_map_to_their_preset() {
        let quarkus = LanguageProfile::Java(Some(JavaFramework::Quarkus));
        assert_eq!(PresetId::default_for(quarkus), PresetId::Quarkus);
        assert_eq!(
            PresetId::default_for(LanguageProfile::Java(None)),
            PresetId::Java
        );
    }

    #[test]
    fn java_preset_is_refined_by_framework() {
        let spring = LanguageProfile::Java(Some(JavaFramework::SpringBoot));
        assert_eq!(PresetId::Java.refine_for(spring), PresetId::SpringBoot);
        assert_eq!(PresetId::React.refine_for(spring), PresetId::React);
        assert_eq!(
            PresetId::Java.refine_for(LanguageProfile::Java(None)),
            PresetId::Java
        );
    }

    #[test]
    fn unknown_text_is_not_a_preset() {
        assert!("svelte".parse::<PresetId>().is_err());
        assert_eq!("Next.js".parse::<PresetId>().unwrap(), PresetId::Next);
    }

    #[test]
    fn options_are_filtered_by_profile() {
        let node = preset_options(LanguageProfile::TypeScript);
        assert_eq!(node[0], "ts");
        assert!(node.contains(&"react"));
        assert!(!node.contains(&"python"));

        let spring = preset_options(LanguageProfile::Java(Some(JavaFramework::SpringBoot)));
        assert_eq!(spring, vec!["spring-boot"]);
        assert_eq!(preset_options(LanguageProfile::Java(None)), vec!["java"]);
        assert_eq!(preset_options(LanguageProfile::Go), vec!["go"]);
    }

    #[test]
    fn presets_fit_only_their_own_profile() {
        let spring = LanguageProfile::Java(Some(JavaFramework::SpringBoot));
        assert!(find_preset(PresetId::SpringBoot).fits(spring));
        assert!(!find_preset(PresetId::Quarkus).fits(spring));
        assert!(!find_preset(PresetId::Java).fits(spring));
        assert!(find_preset(PresetId::React).fits(LanguageProfile::JavaScript));
        assert!(!find_preset(PresetId::React).fits(LanguageProfile::Python));
    }

    #[test]
    fn every_profile_fits_its_natural_preset() {
        for def in PRESET_REGISTRY {
            let natural = PresetId::default_for(def.language);
            assert!(find_preset(natural).fits(def.language), "{natural:?}");
        }
    }

    #[test]
    fn server_presets_always_offer_a_database() {
        let express = find_preset(PresetId::Express);
        assert!(offers_database(
            true,
            express,
            LanguageProfile::TypeScript,
            ProjectType::WebApp
        ));
    }

    #[test]
    fn frontend_presets_offer_a_database_only_outside_workspaces() {
        let react = find_preset(PresetId::React);
        assert!(!offers_database(
            true,
            react,
            LanguageProfile::TypeScript,
            ProjectType::ApiService
        ));
        assert!(offers_database(
            false,
            react,
            LanguageProfile::TypeScript,
            ProjectType::ApiService
        ));
        assert!(!offers_database(
            false,
            react,
            LanguageProfile::TypeScript,
            ProjectType::WebApp
        ));
    }
}
