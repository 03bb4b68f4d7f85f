//! Project identity and port allocation.
//!
//! Names and ports are derived once per run. Every artifact that mentions
//! them reads the values computed here.

use serde::Serialize;

use crate::domain::{
    presets::PresetDescriptor, profile::LanguageProfile, value_objects::LanguageFamily,
};

/// Slug used when a name has no usable characters.
pub const DEFAULT_SLUG: &str = "my-project";

/// Port used when neither the preset nor the language family has one.
pub const GLOBAL_DEFAULT_PORT: u16 = 3000;

/// Filesystem- and identifier-safe form of a repository name.
///
/// Lowercases, turns each run of characters outside `[a-z0-9_-]` into one
/// hyphen, collapses repeated hyphens and trims them from both ends.
/// Idempotent, and never empty.
pub fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for c in name.chars().flat_map(char::to_lowercase) {
        let c = if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' {
            c
        } else {
            '-'
        };
        if c == '-' && out.ends_with('-') {
            continue;
        }
        out.push(c);
    }

    let trimmed = out.trim_matches('-');
    if trimmed.is_empty() {
        DEFAULT_SLUG.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Every name form derived from the repository name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectIdentity {
    /// Directory, package and Nx project name.
    pub slug: String,
    /// Python module and Rust crate name.
    pub snake: String,
    /// Java class prefix.
    pub pascal: String,
    /// Java base package.
    pub java_package: String,
}

impl ProjectIdentity {
    pub fn derive(repo_name: &str, github_user: Option<&str>) -> Self {
        let slug = slug(repo_name);

        let mut snake = slug.replace('-', "_");
        if !snake.starts_with(|c: char| c.is_ascii_lowercase()) {
            snake.insert_str(0, "app_");
        }

        let mut pascal: String = slug
            .split(['-', '_'])
            .filter(|part| !part.is_empty())
            .map(|part| {
                let mut chars = part.chars();
                chars.next().map_or_else(String::new, |first| {
                    first.to_ascii_uppercase().to_string() + chars.as_str()
                })
            })
            .collect();
        if !pascal.starts_with(|c: char| c.is_ascii_uppercase()) {
            pascal.insert_str(0, "App");
        }

        let owner = github_user
            .map(package_segment)
            .filter(|segment| !segment.is_empty())
            .unwrap_or_else(|| "example".to_string());
        let java_package = format!("com.{owner}.{}", package_segment(&slug));

        Self {
            slug,
            snake,
            pascal,
            java_package,
        }
    }

    /// Java package as a source directory (`com/example/demo`).
    pub fn java_package_path(&self) -> String {
        self.java_package.replace('.', "/")
    }
}

fn package_segment(raw: &str) -> String {
    let mut segment: String = raw
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if segment.starts_with(|c: char| c.is_ascii_digit()) {
        segment.insert_str(0, "app");
    }
    segment
}

/// The two ports a run allocates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PortAssignment {
    pub base: u16,
    pub application: u16,
}

impl PortAssignment {
    pub fn allocate(profile: LanguageProfile, preset: &PresetDescriptor) -> Self {
        let base = base_port(profile, preset);
        Self {
            base,
            application: base.saturating_add(1),
        }
    }
}

/// Preset table first, then the language-family table, then the global default.
pub fn base_port(profile: LanguageProfile, preset: &PresetDescriptor) -> u16 {
    preset
        .base_port
        .or_else(|| family_port(profile.family()))
        .unwrap_or(GLOBAL_DEFAULT_PORT)
}

const fn family_port(family: LanguageFamily) -> Option<u16> {
    match family {
        LanguageFamily::Scripting => Some(3000),
        LanguageFamily::Systems => Some(8000),
        LanguageFamily::ManagedRuntime => Some(8080),
    }
}
