//! Free-text dependency handling.
//!
//! A dependency typed by the user can land in two places: the
//! language-native manifest (every syntactically valid name) and, in
//! addition, the system package manifest (only names on the allow-list,
//! directly or through an alias).

use std::fmt;

use serde::Serialize;

/// Packages that may be written to `devbox.json`.
pub static SYSTEM_PACKAGE_ALLOW_LIST: &[&str] = &[
    "postgresql",
    "redis",
    "sqlite",
    "jq",
    "yq-go",
    "ffmpeg",
    "imagemagick",
    "graphviz",
    "protobuf",
    "gnumake",
    "curl",
    "git",
    "openssl",
    "just",
];

/// Common names mapped onto allow-listed packages.
pub static SYSTEM_PACKAGE_ALIASES: &[(&str, &str)] = &[
    ("postgres", "postgresql"),
    ("pg", "postgresql"),
    ("psql", "postgresql"),
    ("sqlite3", "sqlite"),
    ("yq", "yq-go"),
    ("protoc", "protobuf"),
    ("make", "gnumake"),
    ("magick", "imagemagick"),
    ("dot", "graphviz"),
];

/// A dependency name restricted to `[A-Za-z0-9@/._:+-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct DependencyName(String);

impl DependencyName {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        let valid = !raw.is_empty()
            && raw
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || "@/._:+-".contains(c));
        valid.then(|| Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The allow-listed system package this name refers to, if any.
    pub fn system_package(&self) -> Option<&'static str> {
        let lower = self.0.to_ascii_lowercase();
        SYSTEM_PACKAGE_ALLOW_LIST
            .iter()
            .copied()
            .find(|pkg| *pkg == lower)
            .or_else(|| {
                SYSTEM_PACKAGE_ALIASES
                    .iter()
                    .find(|(alias, _)| *alias == lower)
                    .map(|(_, pkg)| *pkg)
            })
    }
}

impl fmt::Display for DependencyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where each requested dependency goes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DependencyPlan {
    /// Names forwarded to the language-native manifest.
    pub native: Vec<DependencyName>,
    /// Allow-listed system packages, deduplicated.
    pub system: Vec<&'static str>,
    /// Inputs dropped for invalid characters.
    pub rejected: Vec<String>,
}

impl DependencyPlan {
    /// Route requested names to their manifests.
    ///
    /// Every valid name reaches the native manifest, so `pg` still becomes
    /// the Node client library. Names that resolve to a system package are
    /// also installed as that package.
    pub fn from_requested(requested: &[String]) -> Self {
        let mut plan = Self::default();
        for raw in requested {
            let Some(name) = DependencyName::parse(raw) else {
                plan.rejected.push(raw.clone());
                continue;
            };
            if let Some(pkg) = name.system_package() {
                if !plan.system.contains(&pkg) {
                    plan.system.push(pkg);
                }
            }
            if !plan.native.contains(&name) {
                plan.native.push(name);
            }
        }
        plan
    }
}
