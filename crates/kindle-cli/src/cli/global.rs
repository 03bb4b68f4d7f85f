//! Flags shared by generation and every subcommand.
//!
//! `kindle --ts -v` and `kindle presets -v` both see these, so they are
//! flattened into [`super::Cli`] with `global = true`.

use clap::Args;
use std::path::PathBuf;

#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Log more of what kindle does while it works.
    ///
    /// `-v` reports the run summary and generator outcome, `-vv` adds every
    /// file written and tool invoked, `-vvv` adds the emitting module.
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        global = true,
        help = "Log the run summary (-v), files and tools (-vv), everything (-vvv)",
        long_help = "How much kindle logs to stderr:
    (none)  - warnings, such as an unknown preset answer
    -v      - run summary and the preset generator outcome
    -vv     - every file written and every tool invocation
    -vvv    - trace output tagged with the emitting module

KINDLE_LOG (or RUST_LOG) replaces this with a full filter."
    )]
    pub verbose: u8,

    /// Only errors reach the terminal; the next-steps banner is dropped too.
    #[arg(
        short = 'q',
        long = "quiet",
        global = true,
        conflicts_with = "verbose",
        help = "Print errors only"
    )]
    pub quiet: bool,

    /// Plain stderr and summaries. `NO_COLOR` sets this from the environment.
    #[arg(
        long = "no-color",
        global = true,
        env = "NO_COLOR",
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// kindle settings file used instead of the per-user `config.toml`.
    #[arg(
        short = 'c',
        long = "config",
        global = true,
        value_name = "FILE",
        help = "Read kindle settings from FILE"
    )]
    pub config_file: Option<PathBuf>,

    /// How reports and preset listings are printed.
    #[arg(
        long = "output-format",
        global = true,
        value_enum,
        default_value = "auto",
        help = "Report format: auto, human, plain or json"
    )]
    pub output_format: OutputFormat,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// `output.format` from the settings file, else human on a terminal.
    #[default]
    Auto,
    /// Colored summary, spinners and the next-steps banner.
    Human,
    Plain,
    /// The generation report or preset list as JSON on stdout; logs become JSON lines.
    Json,
}
