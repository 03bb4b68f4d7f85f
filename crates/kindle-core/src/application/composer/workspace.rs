//! Nx workspace descriptors.

use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::{
    application::composer::{to_json, to_yaml},
    domain::{ArtifactBundle, ArtifactRole, LanguageProfile, ResolvedContext},
    error::KindleResult,
};

pub(crate) const NX_VERSION: &str = "^20.3.0";
pub(crate) const PACKAGE_MANAGER: &str = "pnpm@9.15.0";

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    if !ctx.config().workspace() {
        return Ok(());
    }

    bundle.add_file(
        "package.json",
        to_json("package.json", &root_package(ctx))?,
        ArtifactRole::Descriptor,
    )?;
    bundle.add_file(
        "nx.json",
        to_json("nx.json", &nx_config(ctx))?,
        ArtifactRole::Descriptor,
    )?;
    bundle.add_file(
        "pnpm-workspace.yaml",
        to_yaml(
            "pnpm-workspace.yaml",
            &PnpmWorkspace {
                packages: vec!["apps/*"],
            },
        )?,
        ArtifactRole::Descriptor,
    )?;

    let project = ctx.app_path("project.json");
    bundle.add_file(&project, to_json(&project, &project_config(ctx))?, ArtifactRole::Standard)?;
    Ok(())
}

#[derive(Serialize)]
struct PnpmWorkspace {
    packages: Vec<&'static str>,
}

fn plugin_version(plugin: &str) -> &'static str {
    if plugin.starts_with("@nx/") {
        NX_VERSION
    } else {
        "latest"
    }
}

fn root_package(ctx: &ResolvedContext) -> Value {
    let commands = ctx.commands();
    let mut dev_dependencies = Map::new();
    dev_dependencies.insert("nx".into(), NX_VERSION.into());
    for plugin in ctx.preset().plugins {
        dev_dependencies.insert((*plugin).into(), plugin_version(plugin).into());
    }

    json!({
        "name": ctx.slug(),
        "version": "0.0.0",
        "private": true,
        "description": ctx.config().description(),
        "scripts": {
            "dev": commands.dev,
            "build": commands.build,
            "test": commands.test,
        },
        "devDependencies": dev_dependencies,
        "packageManager": PACKAGE_MANAGER,
    })
}

fn nx_config(ctx: &ResolvedContext) -> Value {
    json!({
        "$schema": "./node_modules/nx/schemas/nx-schema.json",
        "plugins": ctx.preset().plugins,
        "targetDefaults": {
            "build": { "cache": true, "dependsOn": ["^build"] },
            "test": { "cache": true },
        },
        "defaultBase": "main",
    })
}

/// Source directory relative to the project root.
fn source_root(ctx: &ResolvedContext) -> String {
    let relative = match ctx.profile() {
        LanguageProfile::Python => ctx.identity().snake.clone(),
        LanguageProfile::Java(_) => "src/main/java".to_string(),
        LanguageProfile::Go => String::new(),
        _ => "src".to_string(),
    };
    if relative.is_empty() {
        ctx.app_dir()
    } else {
        ctx.app_path(&relative)
    }
}

/// Targets wrap the native commands so `nx serve` and the scripts agree.
pub(crate) fn project_config(ctx: &ResolvedContext) -> Value {
    let native = ctx.native();
    let cwd = ctx.app_dir();
    let port = ctx.ports().application;
    let run = |command: &str| {
        json!({
            "executor": "nx:run-commands",
            "options": { "command": command, "cwd": cwd },
        })
    };

    let mut targets = Map::new();
    targets.insert(
        "serve".into(),
        json!({
            "executor": "nx:run-commands",
            "options": {
                "command": native.dev,
                "cwd": cwd,
                "port": port,
                "env": { "PORT": port.to_string() },
            },
        }),
    );
    targets.insert("build".into(), run(&native.build));
    targets.insert("test".into(), run(&native.test));
    if !ctx.profile().is_node() {
        targets.insert("install".into(), run(&native.install));
    }

    json!({
        "name": ctx.slug(),
        "$schema": "../../node_modules/nx/schemas/project-schema.json",
        "projectType": ctx.config().project_type().nx_project_type(),
        "sourceRoot": source_root(ctx),
        "tags": [
            format!("preset:{}", ctx.preset().id),
            format!("lang:{}", ctx.profile().language_label().to_lowercase()),
        ],
        "targets": targets,
    })
}
