//! The default action: collect answers, then generate the project.
//!
//! Responsibility: pick the answer source, wire adapters into the core
//! [`GenerateService`], and display results. No business logic lives here.

use std::path::{Path, PathBuf};

use serde_json::json;
use tracing::{debug, info, instrument};

use kindle_adapters::{LocalFilesystem, MemoryFilesystem, ProcessToolRunner, ScriptedToolRunner};
use kindle_core::{
    application::{GenerateOptions, GenerateService, GenerationReport},
    domain::{RawAnswers, ResolvedContext},
};

use crate::{
    cli::{GenerateArgs, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

/// Execute a generation run.
///
/// 1. Flags present: validate them (conflicts abort before any write).
///    No flags: run the interactive prompt sequence.
/// 2. Resolve the parent directory: `--output`, then config, then `.`
/// 3. `--dry-run`: execute against an in-memory filesystem and list it
/// 4. Otherwise write to disk and print next steps
#[instrument(skip_all)]
pub fn execute(args: GenerateArgs, config: &AppConfig, output: &OutputManager) -> CliResult<()> {
    let selection = args.selection();
    let answers = if selection.is_empty() {
        debug!("No generation flags; prompting");
        collect_interactively()?
    } else {
        selection.into_answers()?
    };

    let parent = parent_dir(&args, config);
    let options = GenerateOptions {
        run_tools: config.generation.run_tools && !args.skip_tools && !args.dry_run,
    };

    if args.dry_run {
        return dry_run(&answers, &parent, output);
    }

    let service = GenerateService::new(
        Box::new(LocalFilesystem::new()),
        Box::new(ProcessToolRunner::new()),
        options,
    );
    let plan = service.plan(&answers, &parent)?;
    show_configuration(&plan.context, plan.bundle.root(), output)?;

    info!(run_id = %plan.run_id, "Generation started");
    let spinner = output.spinner(&format!("Creating {}...", plan.context.slug()));
    let result = service.execute(plan);
    spinner.finish_and_clear();
    let report = result?;

    show_report(&report, output)
}

fn parent_dir(args: &GenerateArgs, config: &AppConfig) -> PathBuf {
    args.output
        .clone()
        .or_else(|| config.generation.output_dir.clone())
        .unwrap_or_else(|| PathBuf::from("."))
}

#[cfg(feature = "interactive")]
fn collect_interactively() -> CliResult<RawAnswers> {
    let mut prompter = crate::prompt::DialoguerPrompter::new();
    Ok(kindle_core::application::PromptSession::new(&mut prompter).collect()?)
}

#[cfg(not(feature = "interactive"))]
fn collect_interactively() -> CliResult<RawAnswers> {
    Err(crate::error::CliError::FeatureNotAvailable {
        feature: "interactive",
    })
}

// ── Dry run ───────────────────────────────────────────────────────────────────

fn dry_run(answers: &RawAnswers, parent: &Path, output: &OutputManager) -> CliResult<()> {
    let filesystem = MemoryFilesystem::new();
    let service = GenerateService::new(
        Box::new(filesystem.clone()),
        Box::new(ScriptedToolRunner::succeeding()),
        GenerateOptions { run_tools: false },
    );
    let plan = service.plan(answers, parent)?;
    let run_id = plan.run_id;
    let root = plan.bundle.root().to_path_buf();
    let context = plan.context.clone();
    let warnings = plan.warnings.clone();

    service.execute(plan)?;
    let files = filesystem.tree(&root);

    if output.format() == OutputFormat::Json {
        output.json(&json!({
            "run_id": run_id.to_string(),
            "dry_run": true,
            "project_dir": root.display().to_string(),
            "files": files.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
            "warnings": warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
        }))?;
        return Ok(());
    }

    show_configuration(&context, &root, output)?;
    for warning in &warnings {
        output.warning(&warning.to_string())?;
    }
    output.info(&format!(
        "Dry run: would create '{}' with {} files",
        context.slug(),
        files.len()
    ))?;
    for file in &files {
        let marker = if filesystem.is_executable(&root.join(file)) {
            " (executable)"
        } else {
            ""
        };
        output.print(&format!("  {}{marker}", file.display()))?;
    }
    Ok(())
}

// ── UI helpers ────────────────────────────────────────────────────────────────

fn show_configuration(ctx: &ResolvedContext, root: &Path, out: &OutputManager) -> CliResult<()> {
    let config = ctx.config();
    let layout = if config.workspace() {
        format!("Nx workspace ({})", ctx.preset().label)
    } else {
        "single project".to_string()
    };
    let container = if config.container() {
        config.base_image().to_string()
    } else {
        "none".to_string()
    };
    let assistant = config
        .assistant()
        .map_or_else(|| "none".to_string(), |a| a.to_string());

    out.header("Configuration")?;
    out.print(&format!("  Project:    {}", config.repo_name()))?;
    out.print(&format!("  Type:       {}", config.project_type()))?;
    out.print(&format!("  Language:   {}", config.profile()))?;
    out.print(&format!("  Layout:     {layout}"))?;
    out.print(&format!("  Port:       {}", ctx.ports().application))?;
    out.print(&format!("  Container:  {container}"))?;
    out.print(&format!(
        "  Database:   {}",
        if config.database() { "PostgreSQL" } else { "none" }
    ))?;
    out.print(&format!("  Deploy:     {}", config.deploy_target()))?;
    out.print(&format!("  Assistant:  {assistant}"))?;
    out.print(&format!("  Location:   {}", root.display()))?;
    out.print("")?;
    Ok(())
}

fn show_report(report: &GenerationReport, out: &OutputManager) -> CliResult<()> {
    if out.format() == OutputFormat::Json {
        out.json(&json!({
            "run_id": report.run_id.to_string(),
            "project_dir": report.project_dir.display().to_string(),
            "outcome": report.outcome.as_str(),
            "git_initialized": report.git_initialized,
            "files": report.written.iter().map(|f| f.display().to_string()).collect::<Vec<_>>(),
            "warnings": report.warnings.iter().map(ToString::to_string).collect::<Vec<_>>(),
            "next_steps": report.next_steps,
        }))?;
        return Ok(());
    }

    for warning in &report.warnings {
        out.warning(&warning.to_string())?;
    }
    out.success(&format!(
        "Created {} ({} files)",
        report.project_dir.display(),
        report.written.len()
    ))?;

    out.print("")?;
    out.print("Next steps:")?;
    for step in &report.next_steps {
        out.print(&format!("  {step}"))?;
    }
    Ok(())
}
