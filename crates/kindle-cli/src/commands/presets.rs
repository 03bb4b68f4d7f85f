//! `kindle presets`: print the preset registry.

use serde_json::json;

use kindle_core::domain::{PRESET_REGISTRY, PresetDescriptor};

use crate::{
    cli::{ListFormat, OutputFormat, PresetsArgs},
    error::CliResult,
    output::OutputManager,
};

pub fn execute(args: PresetsArgs, output: &OutputManager) -> CliResult<()> {
    // A global `--output-format json` upgrades the table view.
    let format = if output.format() == OutputFormat::Json {
        ListFormat::Json
    } else {
        args.format
    };

    match format {
        ListFormat::Table => {
            output.header("Workspace presets:")?;
            for preset in PRESET_REGISTRY {
                output.print(&format!(
                    "  {:<12} {:<22} {:<14} {}",
                    preset.id.as_str(),
                    preset.label,
                    preset.language.to_string(),
                    preset.generator.unwrap_or("-"),
                ))?;
            }
        }

        // Written straight to stdout: lists and JSON must stay parseable
        // even under --quiet.
        ListFormat::Json => {
            let presets: Vec<_> = PRESET_REGISTRY.iter().map(preset_json).collect();
            output.json(&serde_json::Value::Array(presets))?;
        }

        ListFormat::List => {
            for preset in PRESET_REGISTRY {
                println!("{}", preset.id);
            }
        }

        ListFormat::Csv => {
            println!("id,label,language,generator,plugins");
            for preset in PRESET_REGISTRY {
                println!(
                    "{},{},{},{},{}",
                    preset.id,
                    preset.label,
                    preset.language,
                    preset.generator.unwrap_or(""),
                    preset.plugins.join(" "),
                );
            }
        }
    }

    Ok(())
}

fn preset_json(preset: &PresetDescriptor) -> serde_json::Value {
    json!({
        "id": preset.id,
        "label": preset.label,
        "language": preset.language.to_string(),
        "plugins": preset.plugins,
        "generator": preset.generator,
        "generator_args": preset.generator_args,
        "docs_url": preset.docs_url,
    })
}
