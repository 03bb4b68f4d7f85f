//! End-to-end tests for the kindle binary.

use std::path::Path;

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

/// A `kindle` command isolated from the user's config and `.env`.
fn kindle(dir: &TempDir) -> Command {
    let mut cmd = assert_cmd::cargo::cargo_bin_cmd!("kindle");
    cmd.current_dir(dir.path())
        .env("XDG_CONFIG_HOME", dir.path().join("xdg"))
        .env("HOME", dir.path())
        .env("NO_COLOR", "1")
        .env_remove("RUST_LOG");
    cmd
}

fn entries(dir: &Path) -> Vec<String> {
    std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect()
}

// ── Help and metadata ─────────────────────────────────────────────────────────

#[test]
fn help_lists_generation_flags_and_subcommands() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--spring-boot"))
        .stdout(predicate::str::contains("--no-docker"))
        .stdout(predicate::str::contains("presets"));
}

#[test]
fn version_flag() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

// ── Flag validation ───────────────────────────────────────────────────────────

#[test]
fn conflicting_toggles_exit_two_and_write_nothing() {
    let dir = TempDir::new().unwrap();
    let out = dir.path().join("out");
    std::fs::create_dir(&out).unwrap();

    kindle(&dir)
        .args(["--docker", "--no-docker", "--name", "demo", "-o"])
        .arg(&out)
        .assert()
        .code(2)
        .stderr(predicate::str::contains("cannot be used together"));

    assert!(entries(&out).is_empty());
}

#[test]
fn two_presets_conflict() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--react", "--go", "--skip-tools"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("--react and --go"));
    assert!(!dir.path().join("my-project").exists());
}

#[test]
fn framework_needs_a_java_preset() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--react", "--quarkus"])
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Java"));
}

// ── Generation ────────────────────────────────────────────────────────────────

#[test]
fn spring_boot_service_ports_agree() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args([
            "--java",
            "--spring-boot",
            "--api-service",
            "--name",
            "demo",
            "--docker",
            "--db",
            "--skip-tools",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Next steps:"));

    let root = dir.path().join("demo");
    let dockerfile = std::fs::read_to_string(root.join("Dockerfile")).unwrap();
    let compose = std::fs::read_to_string(root.join("compose.yaml")).unwrap();
    assert!(dockerfile.contains("eclipse-temurin:21-jdk"));
    assert!(dockerfile.contains("EXPOSE 8081"));
    assert!(compose.contains("8081:8081"));
    assert!(compose.contains("postgres:16-alpine"));
    assert!(root.join("apps/demo/pom.xml").exists());
    assert!(!root.join(".git").exists());
}

#[test]
fn workspace_go_project_layout() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--go", "--name", "svc", "--skip-tools", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    let root = dir.path().join("svc");
    for file in [
        "package.json",
        "nx.json",
        "pnpm-workspace.yaml",
        "devbox.json",
        "apps/svc/project.json",
        "apps/svc/go.mod",
        "apps/svc/main.go",
        "CLAUDE.md",
        "README.md",
    ] {
        assert!(root.join(file).exists(), "{file} missing");
    }

    let dev = std::fs::read_to_string(root.join("scripts/dev.sh")).unwrap();
    assert!(dev.contains("pnpm nx serve svc"));

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        let mode = std::fs::metadata(root.join("scripts/dev.sh"))
            .unwrap()
            .permissions()
            .mode();
        assert_ne!(mode & 0o111, 0);
    }
}

#[test]
fn minimal_python_project_uses_raw_toolchain() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--python", "--minimal", "--name", "etl", "--skip-tools"])
        .assert()
        .success();

    let root = dir.path().join("etl");
    assert!(root.join("pyproject.toml").exists());
    assert!(root.join("etl/__main__.py").exists());
    assert!(!root.join("nx.json").exists());
    let dev = std::fs::read_to_string(root.join("scripts/dev.sh")).unwrap();
    assert!(dev.contains("uv run python -m etl"));
    assert!(!dev.contains("nx"));
}

#[test]
fn github_user_lands_in_dotenv() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--rust", "--name", "tool", "--user", "octocat", "--skip-tools"])
        .assert()
        .success();
    let env = std::fs::read_to_string(dir.path().join("tool/.env")).unwrap();
    assert_eq!(env, "GITHUB_USER=octocat\n");
}

#[test]
fn database_on_a_library_preset_is_a_warning() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--ts", "--db", "--name", "lib", "--skip-tools"])
        .assert()
        .success()
        .stderr(predicate::str::contains("does not offer a database"));
    let compose = std::fs::read_to_string(dir.path().join("lib/compose.yaml")).unwrap();
    assert!(!compose.contains("postgres"));
}

#[test]
fn dry_run_writes_nothing() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--react", "--name", "shop", "--dry-run"])
        .assert()
        .success()
        .stdout(predicate::str::contains("apps/shop/project.json"))
        .stdout(predicate::str::contains("scripts/dev.sh (executable)"));
    assert!(!dir.path().join("shop").exists());
}

#[test]
fn json_report() {
    let dir = TempDir::new().unwrap();
    let output = kindle(&dir)
        .args(["--output-format", "json", "--rust", "--name", "cli", "--skip-tools"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "static");
    assert_eq!(report["git_initialized"], false);
    assert!(
        report["files"]
            .as_array()
            .unwrap()
            .iter()
            .any(|f| f == "apps/cli/Cargo.toml")
    );
}

// ── Configuration ─────────────────────────────────────────────────────────────

#[test]
fn environment_can_disable_tools_and_set_output_dir() {
    let dir = TempDir::new().unwrap();
    let parent = dir.path().join("projects");
    std::fs::create_dir(&parent).unwrap();

    kindle(&dir)
        .env("KINDLE_GENERATION__RUN_TOOLS", "false")
        .env("KINDLE_GENERATION__OUTPUT_DIR", &parent)
        .args(["--go", "--name", "svc"])
        .assert()
        .success();

    assert!(parent.join("svc/devbox.json").exists());
    assert!(!parent.join("svc/.git").exists());
}

#[test]
fn missing_explicit_config_exits_four() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["--config", "absent.toml", "presets"])
        .assert()
        .code(4);
}

#[test]
fn init_writes_config_under_xdg_home() {
    let dir = TempDir::new().unwrap();
    kindle(&dir).arg("init").assert().success();

    #[cfg(target_os = "linux")]
    {
        let path = dir.path().join("xdg/kindle/config.toml");
        let text = std::fs::read_to_string(path).unwrap();
        assert!(text.contains("run_tools = true"));
    }
}

// ── Subcommands ───────────────────────────────────────────────────────────────

#[test]
fn presets_json_lists_the_registry() {
    let dir = TempDir::new().unwrap();
    let output = kindle(&dir)
        .args(["presets", "--format", "json"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let presets: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let ids: Vec<_> = presets
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(ids.len(), 12);
    assert!(ids.contains(&"spring-boot".to_string()));
    assert!(ids.contains(&"quarkus".to_string()));
}

#[test]
fn presets_list_format() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["presets", "--format", "list"])
        .assert()
        .success()
        .stdout(predicate::str::starts_with("ts\n"));
}

#[test]
fn generation_flags_conflict_with_subcommands() {
    let dir = TempDir::new().unwrap();
    kindle(&dir).args(["--react", "presets"]).assert().code(2);
}

#[test]
fn completions_for_bash() {
    let dir = TempDir::new().unwrap();
    kindle(&dir)
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("kindle"));
}
