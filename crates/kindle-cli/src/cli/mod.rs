//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases
//! and help text. Flag conflicts are not expressed in clap: they are checked
//! by [`FlagSelection::validate`] so that flags and prompts share one set of
//! rules.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use kindle_core::domain::{FlagSelection, JavaFramework, PresetId, ProjectType};

pub mod global;
pub use global::{GlobalArgs, OutputFormat};

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
///
/// Without a subcommand, kindle generates a project: from flags when any
/// generation flag is present, from interactive prompts otherwise.
#[derive(Debug, Parser)]
#[command(
    name     = "kindle",
    bin_name = "kindle",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "\u{1f525} Bootstrap a project from one resolved configuration",
    long_about = "kindle asks a short set of questions (or reads flags), resolves them \
                  into one configuration and writes a consistent project: workspace \
                  descriptors, devbox toolchain, scripts, container and deploy manifests, \
                  assistant instructions and a runnable starter.",
    after_help = "EXAMPLES:\n\
        \x20 kindle                                   # interactive\n\
        \x20 kindle --react --name storefront\n\
        \x20 kindle --java --spring-boot --api-service --name demo --docker --db\n\
        \x20 kindle --python --minimal --name etl -o ~/src\n\
        \x20 kindle presets --format json",
    args_conflicts_with_subcommands = true,
)]
pub struct Cli {
    /// Flags available on every invocation.
    #[command(flatten)]
    pub global: GlobalArgs,

    /// Generation flags; only valid without a subcommand.
    #[command(flatten)]
    pub generate: GenerateArgs,

    /// Optional subcommand.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the workspace presets.
    #[command(
        visible_alias = "ls",
        about = "List workspace presets",
        after_help = "EXAMPLES:\n\
            \x20 kindle presets\n\
            \x20 kindle presets --format json"
    )]
    Presets(PresetsArgs),

    /// Write the default configuration file.
    #[command(
        about = "Initialise configuration",
        after_help = "EXAMPLES:\n\
            \x20 kindle init\n\
            \x20 kindle init --force"
    )]
    Init(InitArgs),

    /// Generate shell completion scripts.
    #[command(
        about = "Generate shell completions",
        after_help = "EXAMPLES:\n\
            \x20 kindle completions bash > ~/.local/share/bash-completion/completions/kindle\n\
            \x20 kindle completions zsh  > ~/.zfunc/_kindle\n\
            \x20 kindle completions fish > ~/.config/fish/completions/kindle.fish"
    )]
    Completions(CompletionsArgs),
}

impl Commands {
    /// Subcommand name as typed on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Presets(_) => "presets",
            Self::Init(_) => "init",
            Self::Completions(_) => "completions",
        }
    }
}

// ── generation ────────────────────────────────────────────────────────────────

/// Flags for the default generate action.
#[derive(Debug, Default, Args)]
pub struct GenerateArgs {
    #[arg(long, help_heading = "Preset", help = "TypeScript library workspace")]
    pub ts: bool,
    #[arg(long, help_heading = "Preset", help = "React application")]
    pub react: bool,
    #[arg(long, help_heading = "Preset", help = "Angular application")]
    pub angular: bool,
    #[arg(long, help_heading = "Preset", help = "Next.js application")]
    pub next: bool,
    #[arg(long, help_heading = "Preset", help = "Express API")]
    pub express: bool,
    #[arg(long, help_heading = "Preset", help = "NestJS API")]
    pub nest: bool,
    #[arg(long, help_heading = "Preset", help = "Python project (uv)")]
    pub python: bool,
    #[arg(long, help_heading = "Preset", help = "Java project (Maven)")]
    pub java: bool,
    #[arg(long, help_heading = "Preset", help = "Rust binary (Cargo)")]
    pub rust: bool,
    #[arg(long, help_heading = "Preset", help = "Go application")]
    pub go: bool,

    #[arg(long = "web-app", help_heading = "Project type")]
    pub web_app: bool,
    #[arg(long = "api-service", help_heading = "Project type")]
    pub api_service: bool,
    #[arg(long = "cli-tool", help_heading = "Project type")]
    pub cli_tool: bool,
    #[arg(long, help_heading = "Project type")]
    pub library: bool,
    #[arg(long, help_heading = "Project type")]
    pub fullstack: bool,

    #[arg(long = "spring-boot", help_heading = "Java framework")]
    pub spring_boot: bool,
    #[arg(long, help_heading = "Java framework")]
    pub quarkus: bool,

    /// Repository name; the project directory is its slug.
    #[arg(long = "name", visible_alias = "project-name", value_name = "NAME")]
    pub name: Option<String>,

    /// GitHub handle written to `.env`.
    #[arg(long = "user", visible_alias = "github-user", value_name = "HANDLE")]
    pub github_user: Option<String>,

    #[arg(long, help = "Generate container files")]
    pub docker: bool,
    #[arg(long = "no-docker", help = "Skip container files")]
    pub no_docker: bool,
    #[arg(long, help = "Add a PostgreSQL service where offered")]
    pub db: bool,
    #[arg(long = "no-db", help = "No database service")]
    pub no_db: bool,

    #[arg(long, help = "Single-project layout instead of an Nx workspace")]
    pub minimal: bool,

    #[arg(
        long,
        value_name = "ASSISTANT",
        value_parser = ["claude", "gemini", "codex", "copilot", "none"],
        help = "Coding assistant instruction file"
    )]
    pub assistant: Option<String>,

    /// Parent directory of the new project.
    #[arg(short = 'o', long = "output", value_name = "DIR", help_heading = "Run")]
    pub output: Option<PathBuf>,

    #[arg(
        long = "skip-tools",
        help_heading = "Run",
        help = "Do not run pnpm, Nx generators or git"
    )]
    pub skip_tools: bool,

    #[arg(
        long = "dry-run",
        help_heading = "Run",
        help = "Print the artifact plan without writing anything"
    )]
    pub dry_run: bool,
}

impl GenerateArgs {
    /// Collect the generation flags, in declaration order, for validation.
    pub fn selection(&self) -> FlagSelection {
        let presets = [
            (self.ts, PresetId::Ts),
            (self.react, PresetId::React),
            (self.angular, PresetId::Angular),
            (self.next, PresetId::Next),
            (self.express, PresetId::Express),
            (self.nest, PresetId::Nest),
            (self.python, PresetId::Python),
            (self.java, PresetId::Java),
            (self.rust, PresetId::Rust),
            (self.go, PresetId::Go),
        ];
        let project_types = [
            (self.web_app, ProjectType::WebApp),
            (self.api_service, ProjectType::ApiService),
            (self.cli_tool, ProjectType::CliTool),
            (self.library, ProjectType::Library),
            (self.fullstack, ProjectType::Fullstack),
        ];
        let frameworks = [
            (self.spring_boot, JavaFramework::SpringBoot),
            (self.quarkus, JavaFramework::Quarkus),
        ];

        FlagSelection {
            presets: enabled(presets),
            project_types: enabled(project_types),
            frameworks: enabled(frameworks),
            name: self.name.clone(),
            github_user: self.github_user.clone(),
            docker: self.docker,
            no_docker: self.no_docker,
            db: self.db,
            no_db: self.no_db,
            minimal: self.minimal,
            assistant: self.assistant.clone(),
        }
    }
}

fn enabled<T, const N: usize>(flags: [(bool, T); N]) -> Vec<T> {
    flags
        .into_iter()
        .filter_map(|(on, value)| on.then_some(value))
        .collect()
}

// ── presets ───────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PresetsArgs {
    /// Output format.
    #[arg(
        long = "format",
        value_enum,
        default_value = "table",
        help = "Output format"
    )]
    pub format: ListFormat,
}

/// Output format for the `presets` command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Human-readable table.
    Table,
    /// One identity per line.
    List,
    /// JSON array.
    Json,
    /// CSV rows.
    Csv,
}

// ── init ──────────────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct InitArgs {
    /// Overwrite an existing config file.
    #[arg(short = 'f', long = "force", help = "Overwrite existing configuration")]
    pub force: bool,
}

// ── completions ───────────────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Target shell.
    #[arg(value_enum, help = "Shell to generate completions for")]
    pub shell: Shell,
}

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("kindle").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn verify_cli_structure() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_arguments_means_interactive() {
        let cli = parse(&[]);
        assert!(cli.command.is_none());
        assert!(cli.generate.selection().is_empty());
    }

    #[test]
    fn spring_scenario_flags() {
        let cli = parse(&[
            "--java",
            "--spring-boot",
            "--api-service",
            "--name",
            "demo",
            "--docker",
            "--db",
        ]);
        let selection = cli.generate.selection();
        assert_eq!(selection.presets, vec![PresetId::Java]);
        assert_eq!(selection.frameworks, vec![JavaFramework::SpringBoot]);
        assert_eq!(selection.project_types, vec![ProjectType::ApiService]);
        assert_eq!(selection.name.as_deref(), Some("demo"));
        assert!(selection.docker && selection.db);
    }

    #[test]
    fn long_aliases() {
        let cli = parse(&["--project-name", "x", "--github-user", "octo"]);
        let selection = cli.generate.selection();
        assert_eq!(selection.name.as_deref(), Some("x"));
        assert_eq!(selection.github_user.as_deref(), Some("octo"));
    }

    #[test]
    fn contradictory_flags_parse_and_fail_validation() {
        let cli = parse(&["--react", "--go", "--docker", "--no-docker"]);
        let selection = cli.generate.selection();
        assert_eq!(selection.presets, vec![PresetId::React, PresetId::Go]);
        assert!(selection.validate().is_err());
    }

    #[test]
    fn run_options_are_not_generation_flags() {
        let cli = parse(&["--skip-tools", "--dry-run", "-o", "/tmp"]);
        assert!(cli.generate.selection().is_empty());
        assert!(cli.generate.skip_tools && cli.generate.dry_run);
    }

    #[test]
    fn unknown_assistant_is_rejected() {
        assert!(Cli::try_parse_from(["kindle", "--assistant", "clippy"]).is_err());
    }

    #[test]
    fn subcommands_reject_generation_flags() {
        assert!(Cli::try_parse_from(["kindle", "--react", "presets"]).is_err());
        assert!(matches!(
            parse(&["presets", "--format", "json"]).command,
            Some(Commands::Presets(PresetsArgs {
                format: ListFormat::Json
            }))
        ));
    }

    #[test]
    fn global_flags_follow_the_subcommand() {
        let cli = parse(&["presets", "-c", "team.toml", "-vv"]);
        assert_eq!(cli.global.config_file.as_deref(), Some(std::path::Path::new("team.toml")));
        assert_eq!(cli.global.verbose, 2);
        assert_eq!(cli.command.as_ref().map(Commands::name), Some("presets"));
    }

    #[test]
    fn quiet_and_verbose_conflict() {
        assert!(Cli::try_parse_from(["kindle", "--quiet", "--verbose", "presets"]).is_err());
    }
}
