//! Log subscriber for the `kindle` binary.
//!
//! `kindle-core` and `kindle-adapters` emit events while a project is
//! generated (the run summary, each file written, each tool invocation);
//! this module decides which of them reach stderr. Stdout stays reserved
//! for the report.
//!
//! Filter precedence: `KINDLE_LOG`, then `RUST_LOG`, then `-v`/`-q`.

use std::io::IsTerminal as _;

use anyhow::Context as _;
use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::{GlobalArgs, OutputFormat};

/// Environment variable holding a full `EnvFilter` directive for kindle runs.
pub const LOG_ENV: &str = "KINDLE_LOG";

/// Tracing targets of the binary and the two library crates.
const TARGETS: [&str; 3] = ["kindle", "kindle_core", "kindle_adapters"];

/// Install the stderr subscriber. Call once, before generation starts.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let level = verbosity(args);
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(level == LevelFilter::TRACE)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);
    let registry = tracing_subscriber::registry().with(env_filter(level));

    let installed = if args.output_format == OutputFormat::Json {
        registry.with(layer.json()).try_init()
    } else {
        let ansi = !args.no_color && std::io::stderr().is_terminal();
        registry.with(layer.with_ansi(ansi)).try_init()
    };
    installed.context("installing the kindle log subscriber")
}

fn env_filter(level: LevelFilter) -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new(kindle_directives(level)))
}

/// Dependencies (`config`, `clap`) stay silent unless a filter variable asks.
fn kindle_directives(level: LevelFilter) -> String {
    TARGETS
        .iter()
        .map(|target| format!("{target}={level}"))
        .collect::<Vec<_>>()
        .join(",")
}

fn verbosity(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            ..Default::default()
        }
    }

    #[test]
    fn warnings_show_without_flags() {
        assert_eq!(verbosity(&args(0, false)), LevelFilter::WARN);
    }

    #[test]
    fn each_v_opens_one_level() {
        assert_eq!(verbosity(&args(1, false)), LevelFilter::INFO);
        assert_eq!(verbosity(&args(2, false)), LevelFilter::DEBUG);
        assert_eq!(verbosity(&args(3, false)), LevelFilter::TRACE);
        assert_eq!(verbosity(&args(9, false)), LevelFilter::TRACE);
    }

    #[test]
    fn quiet_keeps_only_errors() {
        assert_eq!(verbosity(&args(0, true)), LevelFilter::ERROR);
        assert_eq!(verbosity(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_name_only_kindle_targets() {
        assert_eq!(
            kindle_directives(LevelFilter::DEBUG),
            "kindle=debug,kindle_core=debug,kindle_adapters=debug"
        );
    }
}
