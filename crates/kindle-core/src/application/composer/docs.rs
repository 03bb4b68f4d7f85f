//! README, environment files and `.gitignore`.

use chrono::NaiveDate;

use crate::{
    application::composer::{DB_PASSWORD, DB_USER, assistant::summary, database_url},
    domain::{ArtifactBundle, ArtifactRole, DeployTarget, LanguageProfile, ResolvedContext},
    error::KindleResult,
};

pub(super) fn add(
    ctx: &ResolvedContext,
    generated_on: NaiveDate,
    bundle: &mut ArtifactBundle,
) -> KindleResult<()> {
    let config = ctx.config();
    if config.readme() {
        bundle.add_file("README.md", readme(ctx, generated_on), ArtifactRole::Standard)?;
    }
    if let Some(user) = config.github_user() {
        bundle.add_file(".env", format!("GITHUB_USER={user}\n"), ArtifactRole::Standard)?;
    }
    bundle.add_file(".env.example", env_example(ctx), ArtifactRole::Standard)?;
    if config.git() {
        bundle.add_file(".gitignore", gitignore(ctx), ArtifactRole::Standard)?;
    }
    Ok(())
}

fn readme(ctx: &ResolvedContext, generated_on: NaiveDate) -> String {
    let config = ctx.config();
    let commands = ctx.commands();
    let port = ctx.ports().application;

    let mut text = format!(
        "# {name}\n\n{summary}\n\n## Getting started\n\nThe toolchain is pinned with [devbox](https://www.jetify.com/devbox).\n\n```sh\n{shell}\n{install}\n{dev}\n```\n\nThe app listens on http://localhost:{port}.\n\n## Scripts\n\n| Script | Runs |\n|--------|------|\n| `scripts/install-deps.sh` | `{install}` |\n| `scripts/dev.sh` | `{dev}` |\n| `scripts/build.sh` | `{build}` |\n| `scripts/test.sh` | `{test}` |\n",
        name = config.repo_name(),
        summary = summary(ctx),
        shell = commands.shell,
        install = commands.install,
        dev = commands.dev,
        build = commands.build,
        test = commands.test,
    );

    if config.workspace() {
        let preset = ctx.preset();
        text.push_str(&format!(
            "\n## Workspace\n\nThis is an Nx workspace using the `{}` preset ({}). The application lives in `{}`. See {} for the plugin documentation.\n",
            preset.id,
            preset.label,
            ctx.app_dir(),
            preset.docs_url,
        ));
    }

    if config.container() {
        text.push_str("\n## Containers\n\n```sh\ndocker compose up --build\n```\n");
        if config.database() {
            text.push_str("\nCompose also starts PostgreSQL; the app receives `DATABASE_URL`.\n");
        }
    }

    match config.deploy_target() {
        DeployTarget::FlyIo if ctx.deploys_container() => {
            text.push_str("\n## Deployment\n\n```sh\nfly launch --copy-config\nfly deploy\n```\n");
        }
        DeployTarget::Kubernetes if ctx.deploys_container() => {
            text.push_str(&format!(
                "\n## Deployment\n\nBuild and push the image, then apply the manifest:\n\n```sh\ndocker build -t {slug}:latest .\nkubectl apply -f k8s/deployment.yaml\n```\n",
                slug = ctx.slug(),
            ));
        }
        _ => {}
    }

    if let Some(assistant) = config.assistant() {
        text.push_str(&format!(
            "\n## Coding assistant\n\nInstructions for {} are in `{}`. Put `{}` in `.env` and run `{}`.\n",
            assistant,
            assistant.config_path(),
            assistant.api_key_var(),
            assistant.launch_command(),
        ));
    }

    text.push_str(&format!(
        "\n---\n\nGenerated by kindle on {}.\n",
        generated_on.format("%Y-%m-%d")
    ));
    text
}

fn env_example(ctx: &ResolvedContext) -> String {
    let config = ctx.config();
    let mut text = format!(
        "# Copy to .env and fill in the blanks.\nPORT={}\n",
        ctx.ports().application
    );
    if config.database() {
        text.push_str(&format!(
            "DATABASE_URL={}\nPOSTGRES_HOST=localhost\nPOSTGRES_DB={}\nPOSTGRES_USER={DB_USER}\nPOSTGRES_PASSWORD={DB_PASSWORD}\n",
            database_url(ctx, "localhost"),
            ctx.identity().snake,
        ));
    }
    if let Some(assistant) = config.assistant() {
        text.push_str(&format!("{}=\n", assistant.api_key_var()));
    }
    text.push_str("GITHUB_USER=\n");
    text
}

fn gitignore(ctx: &ResolvedContext) -> String {
    let mut lines = vec![".env", ".devbox/", ".DS_Store"];
    if ctx.config().workspace() || ctx.profile().is_node() {
        lines.extend(["node_modules/", ".nx/", "dist/"]);
    }
    match ctx.profile() {
        LanguageProfile::Python => {
            lines.extend(["__pycache__/", ".venv/", "*.egg-info/", ".pytest_cache/"])
        }
        LanguageProfile::Java(_) | LanguageProfile::Rust => lines.push("target/"),
        LanguageProfile::Go => lines.push("bin/"),
        LanguageProfile::TypeScript | LanguageProfile::JavaScript => {}
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
