//! Generate Service - main application orchestrator.
//!
//! 1. Resolve answers into a `ResolvedConfig` and derive the context
//! 2. Compose the artifact bundle (pure)
//! 3. Write descriptors, run the preset generator, write the rest
//! 4. Initialise git and report next steps
//!
//! Filesystem failures abort the run. Tool failures degrade to warnings.

use std::path::{Path, PathBuf};

use tracing::{debug, info, instrument, warn};
use uuid::Uuid;

use crate::{
    application::{
        ApplicationError, ArtifactComposer,
        ports::{Filesystem, ToolInvocation, ToolRunner},
    },
    domain::{
        ArtifactBundle, ArtifactRole, FsEntry, RawAnswers, ResolvedConfig, ResolvedContext,
        Warning,
    },
    error::{KindleError, KindleResult},
};

/// Switches that change how a run touches the outside world.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Invoke pnpm, the preset generator and git.
    pub run_tools: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self { run_tools: true }
    }
}

/// How the starter source came to be.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldOutcome {
    /// The preset generator produced the application; static starter files
    /// only filled the paths it left empty.
    Generated,
    /// The generator failed; the static starter was written instead.
    StaticFallback,
    /// No generator was attempted.
    Static,
}

impl ScaffoldOutcome {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Generated => "generated",
            Self::StaticFallback => "static-fallback",
            Self::Static => "static",
        }
    }
}

/// Everything decided before the first write.
#[derive(Debug, Clone)]
pub struct GenerationPlan {
    pub run_id: Uuid,
    pub context: ResolvedContext,
    pub bundle: ArtifactBundle,
    pub warnings: Vec<Warning>,
}

/// Result of a successful run.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub run_id: Uuid,
    pub project_dir: PathBuf,
    /// Files written, relative to `project_dir`.
    pub written: Vec<PathBuf>,
    pub warnings: Vec<Warning>,
    pub outcome: ScaffoldOutcome,
    pub git_initialized: bool,
    pub next_steps: Vec<String>,
}

/// Main generation service.
pub struct GenerateService {
    filesystem: Box<dyn Filesystem>,
    tools: Box<dyn ToolRunner>,
    options: GenerateOptions,
}

impl GenerateService {
    pub fn new(
        filesystem: Box<dyn Filesystem>,
        tools: Box<dyn ToolRunner>,
        options: GenerateOptions,
    ) -> Self {
        Self {
            filesystem,
            tools,
            options,
        }
    }

    /// Resolve and compose without touching the filesystem.
    ///
    /// The project directory is `parent/<slug>`.
    pub fn plan(&self, answers: &RawAnswers, parent: &Path) -> KindleResult<GenerationPlan> {
        let resolution = ResolvedConfig::resolve(answers);
        let (context, derived) = ResolvedContext::derive(resolution.config);
        let mut warnings = resolution.warnings;
        for warning in &derived {
            warn!(%warning, "dependency skipped");
        }
        warnings.extend(derived);

        let bundle = ArtifactComposer::new(&context).compose(parent.join(context.slug()))?;

        Ok(GenerationPlan {
            run_id: Uuid::new_v4(),
            context,
            bundle,
            warnings,
        })
    }

    /// Plan and execute in one step.
    pub fn generate(&self, answers: &RawAnswers, parent: &Path) -> KindleResult<GenerationReport> {
        let plan = self.plan(answers, parent)?;
        self.execute(plan)
    }

    #[instrument(
        skip_all,
        fields(
            run_id = %plan.run_id,
            project = %plan.context.slug(),
            root = %plan.bundle.root().display()
        )
    )]
    pub fn execute(&self, plan: GenerationPlan) -> KindleResult<GenerationReport> {
        let GenerationPlan {
            run_id,
            context,
            bundle,
            mut warnings,
        } = plan;
        let root = bundle.root().to_path_buf();

        info!(
            profile = %context.profile(),
            preset = %context.preset().id,
            "Generating project"
        );

        // The directory may already exist; only a directory created here is
        // removed again on failure.
        let created_root = !self.filesystem.exists(&root);
        self.filesystem
            .create_dir_all(&root)
            .map_err(|e| mandatory(&root, &e))?;

        let mut written = Vec::new();
        let result = self.write_all(&context, &bundle, &mut written, &mut warnings);
        let outcome = match result {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!(error = %e, "Write failed");
                if created_root {
                    self.rollback(&root);
                }
                return Err(e);
            }
        };

        let git_initialized = self.init_git(&context, &root, &mut warnings);

        info!(
            files = written.len(),
            warnings = warnings.len(),
            ?outcome,
            "Generation completed"
        );

        Ok(GenerationReport {
            run_id,
            next_steps: next_steps(&context, &root),
            project_dir: root,
            written,
            warnings,
            outcome,
            git_initialized,
        })
    }

    // ── Writing ─────────────────────────────────────────────────────────────

    fn write_all(
        &self,
        context: &ResolvedContext,
        bundle: &ArtifactBundle,
        written: &mut Vec<PathBuf>,
        warnings: &mut Vec<Warning>,
    ) -> KindleResult<ScaffoldOutcome> {
        self.write_phase(bundle, ArtifactRole::Descriptor, false, written)
            .map_err(|e| match e {
                KindleError::Application(ApplicationError::FilesystemError { path, reason }) => {
                    ApplicationError::MandatoryArtifact { path, reason }.into()
                }
                other => other,
            })?;

        let outcome = self.run_generator(context, bundle.root(), warnings);

        // Standard files reference the starter sources, so every starter path
        // must exist afterwards. Generator output is kept where present.
        self.write_phase(bundle, ArtifactRole::Standard, false, written)?;
        let keep_existing = outcome == ScaffoldOutcome::Generated;
        self.write_phase(bundle, ArtifactRole::Scaffold, keep_existing, written)?;
        Ok(outcome)
    }

    /// Write every entry of one phase, in bundle order.
    ///
    /// With `keep_existing`, files already on disk are left untouched.
    fn write_phase(
        &self,
        bundle: &ArtifactBundle,
        phase: ArtifactRole,
        keep_existing: bool,
        written: &mut Vec<PathBuf>,
    ) -> KindleResult<()> {
        for entry in bundle.entries().iter().filter(|e| e.role() == phase) {
            let path = bundle.root().join(entry.path());
            match entry {
                FsEntry::Directory(_) => self.filesystem.create_dir_all(&path)?,
                FsEntry::File(_) if keep_existing && self.filesystem.exists(&path) => {
                    debug!(path = %path.display(), "kept generator output");
                }
                FsEntry::File(file) => {
                    self.filesystem.write_file(&path, &file.content)?;
                    if file.permissions.is_executable() {
                        self.filesystem.set_permissions(&path, true)?;
                    }
                    debug!(path = %file.path, "written");
                    written.push(file.path.as_path().to_path_buf());
                }
            }
        }
        Ok(())
    }

    /// Best-effort rollback on failure.
    fn rollback(&self, root: &Path) {
        if let Err(e) = self.filesystem.remove_dir_all(root) {
            warn!(error = %e, path = %root.display(), "Rollback failed");
        } else {
            info!("Rollback successful");
        }
    }

    // ── External tools ──────────────────────────────────────────────────────

    fn run_generator(
        &self,
        context: &ResolvedContext,
        root: &Path,
        warnings: &mut Vec<Warning>,
    ) -> ScaffoldOutcome {
        let preset = context.preset();
        let generator = match preset.generator {
            Some(generator) if self.options.run_tools && context.config().workspace() => generator,
            _ => return ScaffoldOutcome::Static,
        };

        let install = ToolInvocation::new("pnpm", root).arg("install");
        let generate = ToolInvocation::new("pnpm", root)
            .args(["nx", "g", generator, context.slug()])
            .arg(format!("--directory={}", context.app_dir()))
            .arg("--no-interactive")
            .args(preset.generator_args.iter().copied());

        let result = self
            .tools
            .run(&install)
            .and_then(|()| self.tools.run(&generate));
        match result {
            Ok(()) => {
                info!(generator, "Preset generator succeeded");
                ScaffoldOutcome::Generated
            }
            Err(e) => {
                let warning = Warning::GeneratorFailed {
                    preset: preset.id,
                    reason: e.to_string(),
                };
                warn!(%warning, "Falling back to the static scaffold");
                warnings.push(warning);
                ScaffoldOutcome::StaticFallback
            }
        }
    }

    fn init_git(
        &self,
        context: &ResolvedContext,
        root: &Path,
        warnings: &mut Vec<Warning>,
    ) -> bool {
        if !self.options.run_tools || !context.config().git() {
            return false;
        }
        if self.filesystem.exists(&root.join(".git")) {
            debug!("git repository already present");
            return true;
        }

        let init = ToolInvocation::new("git", root).arg("init");
        match self.tools.run(&init) {
            Ok(()) => true,
            Err(e) => {
                let warning = Warning::ToolFailed {
                    command: init.to_string(),
                    reason: e.to_string(),
                };
                warn!(%warning, "git init skipped");
                warnings.push(warning);
                false
            }
        }
    }
}

fn mandatory(path: &Path, err: &KindleError) -> KindleError {
    ApplicationError::MandatoryArtifact {
        path: path.to_path_buf(),
        reason: err.to_string(),
    }
    .into()
}

/// Printed after a successful run; every command comes from the context.
pub fn next_steps(context: &ResolvedContext, root: &Path) -> Vec<String> {
    let commands = context.commands();
    let mut steps = vec![
        format!("cd {}", root.display()),
        commands.shell.clone(),
        commands.install.clone(),
        commands.dev.clone(),
        format!("open http://localhost:{}", context.ports().application),
    ];
    if let Some(assistant) = context.config().assistant() {
        steps.push(format!(
            "set {} in .env, then run `{}`",
            assistant.api_key_var(),
            assistant.launch_command()
        ));
    }
    steps
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    use super::*;
    use crate::{
        application::ports::output::MockToolRunner,
        domain::{AnswerKey, AnswerOrigin, FlagSelection, PresetId, ProjectType},
    };

    /// Minimal in-memory filesystem that can refuse one path.
    #[derive(Clone, Default)]
    struct TestFs {
        files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
        dirs: Arc<Mutex<Vec<PathBuf>>>,
        fail_on: Option<&'static str>,
    }

    impl Filesystem for TestFs {
        fn create_dir_all(&self, path: &Path) -> KindleResult<()> {
            self.dirs.lock().unwrap().push(path.to_path_buf());
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> KindleResult<()> {
            if self.fail_on.is_some_and(|name| path.ends_with(name)) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "disk full".into(),
                }
                .into());
            }
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn set_permissions(&self, _path: &Path, _executable: bool) -> KindleResult<()> {
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.dirs.lock().unwrap().iter().any(|d| d == path)
                || self.files.lock().unwrap().contains_key(path)
        }

        fn remove_dir_all(&self, path: &Path) -> KindleResult<()> {
            self.files.lock().unwrap().retain(|p, _| !p.starts_with(path));
            self.dirs.lock().unwrap().retain(|p| !p.starts_with(path));
            Ok(())
        }
    }

    fn tools_ok() -> MockToolRunner {
        let mut tools = MockToolRunner::new();
        tools.expect_run().returning(|_| Ok(()));
        tools
    }

    fn failing(program: &'static str) -> MockToolRunner {
        let mut tools = MockToolRunner::new();
        tools.expect_run().returning(move |invocation| {
            if invocation.to_string().contains(program) {
                Err(ApplicationError::ToolFailed {
                    command: invocation.to_string(),
                    reason: "exit status 1".into(),
                }
                .into())
            } else {
                Ok(())
            }
        });
        tools
    }

    fn service(fs: &TestFs, tools: MockToolRunner, run_tools: bool) -> GenerateService {
        GenerateService::new(
            Box::new(fs.clone()),
            Box::new(tools),
            GenerateOptions { run_tools },
        )
    }

    fn react() -> RawAnswers {
        FlagSelection {
            presets: vec![PresetId::React],
            name: Some("shop".into()),
            ..Default::default()
        }
        .into_answers()
        .unwrap()
    }

    #[test]
    fn generator_success_keeps_generated_sources() {
        let fs = TestFs::default();
        fs.files.lock().unwrap().insert(
            PathBuf::from("/work/shop/apps/shop/src/main.ts"),
            "// from the generator".into(),
        );

        let report = service(&fs, tools_ok(), true)
            .generate(&react(), Path::new("/work"))
            .unwrap();

        assert_eq!(report.outcome, ScaffoldOutcome::Generated);
        assert!(report.git_initialized);
        assert_eq!(report.project_dir, PathBuf::from("/work/shop"));
        let files = fs.files.lock().unwrap();
        assert!(files.contains_key(Path::new("/work/shop/package.json")));
        assert!(files.contains_key(Path::new("/work/shop/apps/shop/project.json")));
        assert_eq!(
            files[Path::new("/work/shop/apps/shop/src/main.ts")],
            "// from the generator"
        );
        assert!(!report.written.contains(&PathBuf::from("apps/shop/src/main.ts")));
    }

    #[test]
    fn generated_tree_has_every_source_its_manifests_name() {
        let answers = FlagSelection {
            presets: vec![PresetId::Ts],
            project_types: vec![ProjectType::ApiService],
            name: Some("shop".into()),
            ..Default::default()
        }
        .into_answers()
        .unwrap();
        let fs = TestFs::default();
        let service = service(&fs, tools_ok(), true);
        let plan = service.plan(&answers, Path::new("/work")).unwrap();
        let scaffold: Vec<PathBuf> = plan
            .bundle
            .files()
            .filter(|f| f.role == ArtifactRole::Scaffold)
            .map(|f| plan.bundle.root().join(f.path.as_path()))
            .collect();
        let report = service.execute(plan).unwrap();

        assert_eq!(report.outcome, ScaffoldOutcome::Generated);
        let files = fs.files.lock().unwrap();
        let package: serde_json::Value =
            serde_json::from_str(&files[Path::new("/work/shop/apps/shop/package.json")]).unwrap();
        assert_eq!(package["scripts"]["dev"], "tsx watch src/main.ts");
        assert!(files.contains_key(Path::new("/work/shop/apps/shop/src/main.ts")));
        assert!(!scaffold.is_empty());
        for path in &scaffold {
            assert!(files.contains_key(path), "{} missing", path.display());
        }
    }

    #[test]
    fn generator_failure_falls_back_and_still_succeeds() {
        let fs = TestFs::default();
        let report = service(&fs, failing("nx g"), true)
            .generate(&react(), Path::new("/work"))
            .unwrap();

        assert_eq!(report.outcome, ScaffoldOutcome::StaticFallback);
        assert!(matches!(
            report.warnings.as_slice(),
            [Warning::GeneratorFailed {
                preset: PresetId::React,
                ..
            }]
        ));
        assert!(
            fs.files
                .lock()
                .unwrap()
                .contains_key(Path::new("/work/shop/apps/shop/src/main.ts"))
        );
    }

    #[test]
    fn skipping_tools_runs_nothing() {
        let fs = TestFs::default();
        let mut tools = MockToolRunner::new();
        tools.expect_run().never();

        let report = service(&fs, tools, false)
            .generate(&react(), Path::new("/work"))
            .unwrap();
        assert_eq!(report.outcome, ScaffoldOutcome::Static);
        assert!(!report.git_initialized);
    }

    #[test]
    fn git_failure_is_a_warning() {
        let fs = TestFs::default();
        let answers = RawAnswers::new(AnswerOrigin::Prompts).with_flag(AnswerKey::Workspace, false);
        let report = service(&fs, failing("git"), true)
            .generate(&answers, Path::new("/work"))
            .unwrap();

        assert!(!report.git_initialized);
        assert!(matches!(
            report.warnings.as_slice(),
            [Warning::ToolFailed { command, .. }] if command == "git init"
        ));
    }

    #[test]
    fn descriptor_failure_aborts_and_rolls_back() {
        let fs = TestFs {
            fail_on: Some("nx.json"),
            ..Default::default()
        };
        let err = service(&fs, tools_ok(), true)
            .generate(&react(), Path::new("/work"))
            .unwrap_err();

        assert!(matches!(
            err,
            KindleError::Application(ApplicationError::MandatoryArtifact { .. })
        ));
        assert!(fs.files.lock().unwrap().is_empty());
    }

    #[test]
    fn existing_directory_is_reused_and_kept_on_failure() {
        let fs = TestFs {
            fail_on: Some("README.md"),
            ..Default::default()
        };
        fs.dirs.lock().unwrap().push(PathBuf::from("/work/shop"));

        let err = service(&fs, tools_ok(), false)
            .generate(&react(), Path::new("/work"))
            .unwrap_err();
        assert!(matches!(
            err,
            KindleError::Application(ApplicationError::FilesystemError { .. })
        ));
        assert!(
            fs.files
                .lock()
                .unwrap()
                .contains_key(Path::new("/work/shop/package.json"))
        );
    }

    #[test]
    fn next_steps_use_the_resolved_commands() {
        let fs = TestFs::default();
        let report = service(&fs, tools_ok(), false)
            .generate(&react(), Path::new("/work"))
            .unwrap();
        assert_eq!(
            report.next_steps,
            vec![
                "cd /work/shop".to_string(),
                "devbox shell".into(),
                "pnpm install".into(),
                "pnpm nx serve shop".into(),
                "open http://localhost:4201".into(),
                "set ANTHROPIC_API_KEY in .env, then run `claude`".into(),
            ]
        );
    }
}
