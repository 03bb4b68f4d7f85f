//! `kindle init`: write the default configuration file.

use std::path::Path;

use crate::{
    cli::InitArgs,
    config::AppConfig,
    error::{CliResult, IntoCli},
    output::OutputManager,
};

pub fn execute(args: InitArgs, output: &OutputManager) -> CliResult<()> {
    write_default_config(&AppConfig::config_path(), args.force, output)
}

fn write_default_config(config_path: &Path, force: bool, output: &OutputManager) -> CliResult<()> {
    if config_path.exists() && !force {
        output.warning(&format!(
            "Config already exists at {}  (use --force to overwrite)",
            config_path.display(),
        ))?;
        return Ok(());
    }

    let toml = AppConfig::default_toml()?;

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).with_cli_context(|| {
            format!("Failed to create config directory '{}'", parent.display())
        })?;
    }
    std::fs::write(config_path, &toml)
        .with_cli_context(|| format!("Failed to write config to '{}'", config_path.display()))?;

    output.success(&format!(
        "Configuration created at {}",
        config_path.display(),
    ))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{GlobalArgs, OutputFormat};

    fn quiet() -> OutputManager {
        let args = GlobalArgs {
            quiet: true,
            output_format: OutputFormat::Plain,
            ..Default::default()
        };
        OutputManager::new(&args, &AppConfig::default())
    }

    #[test]
    fn writes_defaults_and_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/config.toml");

        write_default_config(&path, false, &quiet()).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert_eq!(written, AppConfig::default_toml().unwrap());

        std::fs::write(&path, "# mine\n").unwrap();
        write_default_config(&path, false, &quiet()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "# mine\n");

        write_default_config(&path, true, &quiet()).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), written);
    }
}
