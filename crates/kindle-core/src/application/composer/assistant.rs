//! Instruction file for the selected coding assistant.

use crate::{
    domain::{ArtifactBundle, ArtifactRole, Assistant, ResolvedContext, ToolchainMode},
    error::KindleResult,
};

pub(super) fn add(
    ctx: &ResolvedContext,
    assistant: Assistant,
    bundle: &mut ArtifactBundle,
) -> KindleResult<()> {
    bundle.add_file(
        assistant.config_path(),
        instructions(ctx, assistant),
        ArtifactRole::Standard,
    )?;
    Ok(())
}

/// One-line summary used when no description was given.
pub(crate) fn summary(ctx: &ResolvedContext) -> String {
    let description = ctx.config().description();
    if description.is_empty() {
        format!(
            "{} written in {}.",
            ctx.config().project_type().label(),
            ctx.profile()
        )
    } else {
        description.to_string()
    }
}

fn instructions(ctx: &ResolvedContext, assistant: Assistant) -> String {
    let config = ctx.config();
    let commands = ctx.commands();
    let port = ctx.ports().application;
    let preset = ctx.preset();

    let layout = match commands.mode {
        ToolchainMode::Workspace => format!(
            "Nx workspace (preset `{}`, {}); the application lives in `{}`",
            preset.id,
            preset.label,
            ctx.app_dir()
        ),
        ToolchainMode::Native => "single project at the repository root".to_string(),
    };

    let mut text = format!(
        "# {name}\n\n{summary}\n\nInstructions for {assistant} working in this repository.\n\n## Stack\n\n- Language: {profile}\n- Layout: {layout}\n- Application port: {port} (read from `PORT`)\n",
        name = config.repo_name(),
        summary = summary(ctx),
        profile = ctx.profile(),
    );
    if config.database() {
        text.push_str("- Database: PostgreSQL, connection settings in `.env.example`\n");
    }
    if config.container() {
        text.push_str("- Container: `Dockerfile` and `compose.yaml`\n");
    }

    text.push_str(&format!(
        "\n## Commands\n\nEnter the toolchain with `{shell}` first.\n\n| Task | Command |\n|------|---------|\n| Install | `{install}` |\n| Dev server | `{dev}` |\n| Build | `{build}` |\n| Test | `{test}` |\n",
        shell = commands.shell,
        install = commands.install,
        dev = commands.dev,
        build = commands.build,
        test = commands.test,
    ));

    text.push_str(
        "\n## Conventions\n\n- Use the commands above or the scripts in `scripts/`; do not call other build tools directly.\n- Keep the port configurable through `PORT`.\n- Add system packages to `devbox.json`, not to the host.\n- Never commit `.env`.\n",
    );
    text
}
