//! Executable helper scripts under `scripts/`.
//!
//! Every script runs from the project root and calls exactly one of the
//! run's [`ToolchainCommands`](crate::domain::ToolchainCommands), so they
//! never mix orchestrator and raw toolchain invocations.

use crate::{
    domain::{ArtifactBundle, ArtifactRole, ResolvedContext},
    error::KindleResult,
};

pub(crate) const SCRIPT_NAMES: [&str; 4] = ["install-deps", "dev", "build", "test"];

fn script(command: &str, port: Option<u16>) -> String {
    let mut text = String::from(
        "#!/usr/bin/env bash\nset -euo pipefail\ncd \"$(dirname \"$0\")/..\"\n\n",
    );
    if let Some(port) = port {
        text.push_str(&format!("export PORT=\"${{PORT:-{port}}}\"\n"));
    }
    text.push_str(command);
    text.push('\n');
    text
}

pub(super) fn add(ctx: &ResolvedContext, bundle: &mut ArtifactBundle) -> KindleResult<()> {
    let commands = ctx.commands();
    let port = ctx.ports().application;
    let scripts = [
        (SCRIPT_NAMES[0], script(&commands.install, None)),
        (SCRIPT_NAMES[1], script(&commands.dev, Some(port))),
        (SCRIPT_NAMES[2], script(&commands.build, None)),
        (SCRIPT_NAMES[3], script(&commands.test, Some(port))),
    ];
    for (name, body) in scripts {
        bundle.add_executable(&format!("scripts/{name}.sh"), body, ArtifactRole::Standard)?;
    }
    Ok(())
}
