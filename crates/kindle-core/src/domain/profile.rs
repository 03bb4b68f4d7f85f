//! Language/framework profile resolution.
//!
//! Free-text language answers are classified exactly once into a closed
//! [`LanguageProfile`]. Everything downstream matches on the variant instead
//! of re-reading strings.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{JavaFramework, LanguageFamily};

/// The resolved language and optional Java sub-framework of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "language", content = "framework", rename_all = "lowercase")]
pub enum LanguageProfile {
    TypeScript,
    JavaScript,
    Python,
    Rust,
    Go,
    Java(Option<JavaFramework>),
}

impl Default for LanguageProfile {
    fn default() -> Self {
        Self::TypeScript
    }
}

impl LanguageProfile {
    pub const fn family(&self) -> LanguageFamily {
        match self {
            Self::TypeScript | Self::JavaScript | Self::Python => LanguageFamily::Scripting,
            Self::Rust | Self::Go => LanguageFamily::Systems,
            Self::Java(_) => LanguageFamily::ManagedRuntime,
        }
    }

    pub const fn framework(&self) -> Option<JavaFramework> {
        match self {
            Self::Java(framework) => *framework,
            _ => None,
        }
    }

    /// Languages usually chosen for server-side work.
    pub const fn is_backend_typical(&self) -> bool {
        matches!(self, Self::Python | Self::Java(_) | Self::Go | Self::Rust)
    }

    /// Runs on the Node toolchain (pnpm, tsc).
    pub const fn is_node(&self) -> bool {
        matches!(self, Self::TypeScript | Self::JavaScript)
    }

    pub const fn language_label(&self) -> &'static str {
        match self {
            Self::TypeScript => "TypeScript",
            Self::JavaScript => "JavaScript",
            Self::Python => "Python",
            Self::Rust => "Rust",
            Self::Go => "Go",
            Self::Java(_) => "Java",
        }
    }

    /// Classify free-text answers.
    ///
    /// Sub-framework keywords in either text win and imply Java. `javascript`
    /// is checked before `java`, and short names (`ts`, `js`, `py`, `go`)
    /// only match as whole tokens. Returns `None` when nothing matches; the
    /// caller decides the fallback.
    pub fn detect(language: &str, framework: Option<&str>) -> Option<Self> {
        let language = language.to_ascii_lowercase();
        let framework = framework.map(str::to_ascii_lowercase);

        let sub_framework = framework
            .as_deref()
            .and_then(detect_framework)
            .or_else(|| detect_framework(&language));
        if let Some(fw) = sub_framework {
            return Some(Self::Java(Some(fw)));
        }

        detect_language(&language)
    }
}

impl fmt::Display for LanguageProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Java(Some(framework)) => write!(f, "Java ({framework})"),
            other => f.write_str(other.language_label()),
        }
    }
}

fn detect_framework(text: &str) -> Option<JavaFramework> {
    if text.contains("spring") {
        Some(JavaFramework::SpringBoot)
    } else if text.contains("quarkus") {
        Some(JavaFramework::Quarkus)
    } else {
        None
    }
}

fn detect_language(text: &str) -> Option<LanguageProfile> {
    let tokens: Vec<&str> = text
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|t| !t.is_empty())
        .collect();
    let has_token = |names: &[&str]| tokens.iter().any(|t| names.contains(t));

    if text.contains("typescript") || has_token(&["ts", "tsx"]) {
        Some(LanguageProfile::TypeScript)
    } else if text.contains("javascript") || has_token(&["js", "node", "nodejs"]) {
        Some(LanguageProfile::JavaScript)
    } else if text.contains("java") || text.contains("jvm") {
        Some(LanguageProfile::Java(None))
    } else if text.contains("python") || has_token(&["py"]) {
        Some(LanguageProfile::Python)
    } else if tokens.iter().any(|t| t.starts_with("rust")) {
        Some(LanguageProfile::Rust)
    } else if text.contains("golang") || has_token(&["go"]) {
        Some(LanguageProfile::Go)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn javascript_is_not_mistaken_for_java() {
        assert_eq!(
            LanguageProfile::detect("JavaScript", None),
            Some(LanguageProfile::JavaScript)
        );
        assert_eq!(
            LanguageProfile::detect("Java", None),
            Some(LanguageProfile::Java(None))
        );
    }

    #[test]
    fn framework_keywords_imply_java() {
        assert_eq!(
            LanguageProfile::detect("", Some("Quarkus")),
            Some(LanguageProfile::Java(Some(JavaFramework::Quarkus)))
        );
        assert_eq!(
            LanguageProfile::detect("java with spring", None),
            Some(LanguageProfile::Java(Some(JavaFramework::SpringBoot)))
        );
        assert_eq!(
            LanguageProfile::detect("Java", Some("None")),
            Some(LanguageProfile::Java(None))
        );
    }

    #[test]
    fn short_names_match_whole_tokens_only() {
        assert_eq!(
            LanguageProfile::detect("go", None),
            Some(LanguageProfile::Go)
        );
        assert_eq!(LanguageProfile::detect("django-ish", None), None);
        assert_eq!(
            LanguageProfile::detect("ts", None),
            Some(LanguageProfile::TypeScript)
        );
        assert_eq!(LanguageProfile::detect("cobol", None), None);
    }

    #[test]
    fn families() {
        assert_eq!(LanguageProfile::Python.family(), LanguageFamily::Scripting);
        assert_eq!(LanguageProfile::Go.family(), LanguageFamily::Systems);
        assert_eq!(
            LanguageProfile::Java(Some(JavaFramework::Quarkus)).family(),
            LanguageFamily::ManagedRuntime
        );
    }

    #[test]
    fn only_typescript_and_javascript_run_on_node() {
        assert!(LanguageProfile::TypeScript.is_node());
        assert!(LanguageProfile::JavaScript.is_node());
        assert!(!LanguageProfile::Java(Some(JavaFramework::SpringBoot)).is_node());
    }
}
