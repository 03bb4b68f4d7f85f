//! Integration tests for kindle-core, run against the in-memory adapters.

use std::path::{Path, PathBuf};

use kindle_adapters::{MemoryFilesystem, ScriptedPrompter, ScriptedToolRunner};
use kindle_core::{
    domain::{
        AnswerKey, AnswerOrigin, BaseImageFamily, DomainError, FlagSelection, JavaFramework,
        LanguageProfile, PresetId, ProjectType, QuestionKind, RawAnswers, ResolvedConfig,
        question_for,
    },
    error::KindleError,
    prelude::*,
};

fn service(fs: &MemoryFilesystem, tools: &ScriptedToolRunner, run_tools: bool) -> GenerateService {
    GenerateService::new(
        Box::new(fs.clone()),
        Box::new(tools.clone()),
        GenerateOptions { run_tools },
    )
}

fn read(fs: &MemoryFilesystem, path: &str) -> String {
    fs.read_file(Path::new(path))
        .unwrap_or_else(|| panic!("{path} was not written"))
}

// ── Flag scenarios ──────────────────────────────────────────────────────────

#[test]
fn spring_boot_api_with_container_and_database() {
    let answers = FlagSelection {
        presets: vec![PresetId::Java],
        frameworks: vec![JavaFramework::SpringBoot],
        project_types: vec![ProjectType::ApiService],
        name: Some("demo".into()),
        docker: true,
        db: true,
        ..Default::default()
    }
    .into_answers()
    .unwrap();

    let fs = MemoryFilesystem::new();
    let tools = ScriptedToolRunner::succeeding();
    let report = service(&fs, &tools, false)
        .generate(&answers, Path::new("/work"))
        .unwrap();

    let plan = service(&fs, &tools, false)
        .plan(&answers, Path::new("/work"))
        .unwrap();
    let config = plan.context.config();
    assert_eq!(
        config.profile(),
        LanguageProfile::Java(Some(JavaFramework::SpringBoot))
    );
    assert_eq!(config.project_type(), ProjectType::ApiService);
    assert!(config.container());
    assert!(config.database());
    assert_eq!(config.base_image(), BaseImageFamily::Debian);
    assert_eq!(plan.context.image().runtime, "eclipse-temurin:21-jdk");
    assert_eq!(plan.context.ports().application, 8081);

    assert_eq!(report.project_dir, PathBuf::from("/work/demo"));
    let dockerfile = read(&fs, "/work/demo/Dockerfile");
    let compose: serde_yaml::Value =
        serde_yaml::from_str(&read(&fs, "/work/demo/compose.yaml")).unwrap();
    assert!(dockerfile.contains("EXPOSE 8081"));
    assert_eq!(compose["services"]["app"]["ports"][0].as_str(), Some("8081:8081"));
    assert!(compose["services"]["db"].is_mapping());

    let project: serde_json::Value =
        serde_json::from_str(&read(&fs, "/work/demo/apps/demo/project.json")).unwrap();
    assert_eq!(project["targets"]["serve"]["options"]["port"], 8081);
}

#[test]
fn quarkus_alone_implies_java_and_its_own_preset() {
    let answers = FlagSelection {
        frameworks: vec![JavaFramework::Quarkus],
        ..Default::default()
    }
    .into_answers()
    .unwrap();

    let config = ResolvedConfig::resolve(&answers).config;
    assert_eq!(
        config.profile(),
        LanguageProfile::Java(Some(JavaFramework::Quarkus))
    );
    assert_eq!(config.preset(), PresetId::Quarkus);
}

#[test]
fn conflicting_flags_fail_before_anything_is_written() {
    let selections = [
        FlagSelection {
            docker: true,
            no_docker: true,
            ..Default::default()
        },
        FlagSelection {
            db: true,
            no_db: true,
            ..Default::default()
        },
        FlagSelection {
            presets: vec![PresetId::React, PresetId::Go],
            ..Default::default()
        },
        FlagSelection {
            frameworks: vec![JavaFramework::SpringBoot, JavaFramework::Quarkus],
            ..Default::default()
        },
    ];

    let fs = MemoryFilesystem::new();
    let tools = ScriptedToolRunner::succeeding();
    for selection in selections {
        let err = selection.into_answers().unwrap_err();
        assert!(matches!(err, DomainError::ConflictingFlags { .. }), "{err}");
        assert!(KindleError::from(err).is_user_error());
    }
    assert!(fs.list_files().is_empty());
    assert!(tools.calls().is_empty());
}

#[test]
fn framework_with_a_non_java_preset_is_incompatible() {
    let err = FlagSelection {
        presets: vec![PresetId::React],
        frameworks: vec![JavaFramework::SpringBoot],
        ..Default::default()
    }
    .into_answers()
    .unwrap_err();
    assert!(matches!(err, DomainError::IncompatibleFlags { .. }));
}

// ── Prompt scenarios ────────────────────────────────────────────────────────

#[test]
fn pressing_enter_everywhere_yields_the_default_config() {
    let mut prompter = ScriptedPrompter::defaults();
    let answers = PromptSession::new(&mut prompter).collect().unwrap();

    let resolution = ResolvedConfig::resolve(&answers);
    assert_eq!(resolution.config, ResolvedConfig::default());
    assert!(resolution.warnings.is_empty());
}

#[test]
fn numeric_and_literal_choices_resolve_identically() {
    let defaults = RawAnswers::new(AnswerOrigin::Prompts);
    for key in AnswerKey::ALL {
        let Some(question) = question_for(key, &defaults) else {
            continue;
        };
        let QuestionKind::Choice { options, .. } = &question.kind else {
            continue;
        };
        for (index, option) in options.iter().enumerate() {
            let numeric = ResolvedConfig::resolve(
                &RawAnswers::new(AnswerOrigin::Prompts).with_text(key, (index + 1).to_string()),
            );
            let literal = ResolvedConfig::resolve(
                &RawAnswers::new(AnswerOrigin::Prompts).with_text(key, *option),
            );
            assert_eq!(numeric, literal, "{} option {option}", key.as_str());
        }
    }
}

#[test]
fn prompted_python_project_in_minimal_mode() {
    let mut prompter = ScriptedPrompter::defaults()
        .answer(AnswerKey::RepoName, "Data Cruncher")
        .answer(AnswerKey::Language, "py")
        .answer(AnswerKey::Dependencies, "requests postgresql")
        .answer(AnswerKey::Workspace, "n")
        .answer(AnswerKey::Assistant, "none")
        .answer(AnswerKey::Git, "no");
    let answers = PromptSession::new(&mut prompter).collect().unwrap();
    assert!(!prompter.asked().contains(&AnswerKey::Preset));

    let fs = MemoryFilesystem::new();
    let tools = ScriptedToolRunner::succeeding();
    let report = service(&fs, &tools, true)
        .generate(&answers, Path::new("/work"))
        .unwrap();

    assert_eq!(report.outcome, ScaffoldOutcome::Static);
    assert!(tools.calls().is_empty());

    let root = Path::new("/work/data-cruncher");
    let tree = fs.tree(root);
    assert!(tree.contains(&PathBuf::from("pyproject.toml")));
    assert!(tree.contains(&PathBuf::from("data_cruncher/__main__.py")));
    assert!(!tree.contains(&PathBuf::from("CLAUDE.md")));
    assert!(!tree.contains(&PathBuf::from(".gitignore")));

    let devbox = read(&fs, "/work/data-cruncher/devbox.json");
    assert!(devbox.contains("postgresql@latest"));
    assert!(!devbox.contains("requests"));
    assert!(fs.is_executable(&root.join("scripts/dev.sh")));
    assert!(read(&fs, "/work/data-cruncher/scripts/dev.sh").contains("uv run python -m data_cruncher"));
}

// ── Fail-soft and abort paths ───────────────────────────────────────────────

#[test]
fn generator_failure_keeps_the_static_scaffold() {
    let answers = FlagSelection {
        presets: vec![PresetId::Go],
        name: Some("svc".into()),
        ..Default::default()
    }
    .into_answers()
    .unwrap();

    let fs = MemoryFilesystem::new();
    let tools = ScriptedToolRunner::succeeding().failing_on("nx g");
    let report = service(&fs, &tools, true)
        .generate(&answers, Path::new("/work"))
        .unwrap();

    assert_eq!(report.outcome, ScaffoldOutcome::StaticFallback);
    assert!(report.git_initialized);
    assert!(fs.read_file(Path::new("/work/svc/apps/svc/main.go")).is_some());
    assert_eq!(
        tools.calls(),
        vec![
            "pnpm install",
            "pnpm nx g @nx-go/nx-go:application svc --directory=apps/svc --no-interactive",
            "git init",
        ]
    );
}

#[test]
fn descriptor_failure_aborts_the_run() {
    let fs = MemoryFilesystem::new().fail_writes_to("package.json");
    let tools = ScriptedToolRunner::succeeding();
    let err = service(&fs, &tools, true)
        .generate(&RawAnswers::new(AnswerOrigin::Prompts), Path::new("/work"))
        .unwrap_err();

    assert!(err.to_string().contains("package.json"));
    assert!(fs.list_files().is_empty());
    assert!(tools.calls().is_empty());
}

#[test]
fn existing_project_directory_is_accepted() {
    let fs = MemoryFilesystem::new();
    fs.create_dir_all(Path::new("/work/my-project")).unwrap();

    let tools = ScriptedToolRunner::succeeding();
    let report = service(&fs, &tools, false)
        .generate(&RawAnswers::new(AnswerOrigin::Prompts), Path::new("/work"))
        .unwrap();
    assert!(report.written.contains(&PathBuf::from("package.json")));
}
