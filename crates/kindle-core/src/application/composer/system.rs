//! `devbox.json`: the pinned toolchain environment.

use serde_json::{Value, json};

use crate::{
    application::composer::to_json,
    domain::{ArtifactBundle, ArtifactRole, LanguageProfile, ResolvedContext},
    error::KindleResult,
};

const DEVBOX_SCHEMA: &str =
    "https://raw.githubusercontent.com/jetify-com/devbox/0.13.7/.schema/devbox.schema.json";
const NODE_PACKAGES: &[&str] = &["nodejs@22", "pnpm@9"];

fn toolchain_packages(profile: LanguageProfile) -> &'static [&'static str] {
    match profile {
        LanguageProfile::TypeScript | LanguageProfile::JavaScript => NODE_PACKAGES,
        LanguageProfile::Python => &["python@3.12", "uv@latest"],
        LanguageProfile::Java(_) => &["jdk21@latest", "maven@latest"],
        LanguageProfile::Rust => &["rustup@latest"],
        LanguageProfile::Go => &["go@1.23"],
    }
}

/// Toolchain packages, then allow-listed system dependencies.
///
/// Names that never passed the allow-list cannot reach this list.
pub(crate) fn packages(ctx: &ResolvedContext) -> Vec<String> {
    let mut packages: Vec<String> = Vec::new();
    let mut push = |package: String| {
        let name = package.split('@').next().unwrap_or_default().to_string();
        if !packages.iter().any(|p| p.split('@').next() == Some(name.as_str())) {
            packages.push(package);
        }
    };

    if ctx.config().workspace() {
        NODE_PACKAGES.iter().for_each(|p| push((*p).to_string()));
    }
    toolchain_packages(ctx.profile())
        .iter()
        .for_each(|p| push((*p).to_string()));
    if ctx.config().database() {
        push("postgresql@16".to_string());
    }
    for system in &ctx.dependencies().system {
        push(format!("{system}@latest"));
    }
    packages
}

fn devbox(ctx: &ResolvedContext) -> Value {
    let commands = ctx.commands();
    json!({
        "$schema": DEVBOX_SCHEMA,
        "packages": packages(ctx),
        "env": { "PORT": ctx.ports().application.to_string() },
        "shell": {
            "init_hook": [format!("echo '{} toolchain ready'", ctx.slug())],
            "scripts": {
                "install": commands.install,
                "dev": commands.dev,
                "build": commands.build,
                "test": commands.test,
            },
        },
    })
}

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    bundle.add_file(
        "devbox.json",
        to_json("devbox.json", &devbox(ctx))?,
        ArtifactRole::Standard,
    )?;
    Ok(())
}
