//! Artifact composition.
//!
//! Each submodule is an independent generator that reads the
//! [`ResolvedContext`] and adds files to an [`ArtifactBundle`]. Generators
//! never see raw answers and never recompute ports, names or commands.
//! Composition is pure; writing happens in `GenerateService`.

mod assistant;
mod container;
mod deploy;
mod docs;
mod manifests;
mod scripts;
mod starter;
mod system;
mod workspace;

use std::path::PathBuf;

use chrono::{NaiveDate, Utc};
use serde::Serialize;
use tracing::debug;

use crate::{
    application::ApplicationError,
    domain::{ArtifactBundle, ResolvedContext},
    error::KindleResult,
};

/// Credentials for the generated development database.
pub(crate) const DB_USER: &str = "postgres";
pub(crate) const DB_PASSWORD: &str = "postgres";
pub(crate) const DB_PORT: u16 = 5432;

/// Builds the artifact bundle for one resolved context.
pub struct ArtifactComposer<'a> {
    ctx: &'a ResolvedContext,
    generated_on: NaiveDate,
}

impl<'a> ArtifactComposer<'a> {
    pub fn new(ctx: &'a ResolvedContext) -> Self {
        Self {
            ctx,
            generated_on: Utc::now().date_naive(),
        }
    }

    /// Fix the date stamped into the README.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.generated_on = date;
        self
    }

    pub fn compose(&self, root: impl Into<PathBuf>) -> KindleResult<ArtifactBundle> {
        let ctx = self.ctx;
        let config = ctx.config();
        let mut bundle = ArtifactBundle::new(root);

        workspace::add(ctx, &mut bundle)?;
        manifests::add(ctx, &mut bundle)?;
        system::add(ctx, &mut bundle)?;
        if config.container() {
            container::add(ctx, &mut bundle)?;
        }
        if ctx.deploys_container() {
            deploy::add(ctx, &mut bundle)?;
        }
        if let Some(assistant) = config.assistant() {
            assistant::add(ctx, assistant, &mut bundle)?;
        }
        docs::add(ctx, self.generated_on, &mut bundle)?;
        scripts::add(ctx, &mut bundle)?;
        starter::add(ctx, &mut bundle)?;

        bundle.validate()?;
        debug!(entries = bundle.entry_count(), "bundle composed");
        Ok(bundle)
    }
}

/// Substitute `{{NAME}}` placeholders.
pub(crate) fn render(template: &str, vars: &[(&str, &str)]) -> String {
    vars.iter().fold(template.to_string(), |text, (name, value)| {
        text.replace(&format!("{{{{{name}}}}}"), value)
    })
}

pub(crate) fn to_json(artifact: &str, value: &serde_json::Value) -> KindleResult<String> {
    serde_json::to_string_pretty(value)
        .map(|mut text| {
            text.push('\n');
            text
        })
        .map_err(|e| rendering_failed(artifact, e))
}

pub(crate) fn to_toml<T: Serialize>(artifact: &str, value: &T) -> KindleResult<String> {
    toml::to_string(value).map_err(|e| rendering_failed(artifact, e))
}

pub(crate) fn to_yaml<T: Serialize>(artifact: &str, value: &T) -> KindleResult<String> {
    serde_yaml::to_string(value).map_err(|e| rendering_failed(artifact, e))
}

fn rendering_failed(artifact: &str, err: impl std::fmt::Display) -> crate::error::KindleError {
    ApplicationError::RenderingFailed {
        artifact: artifact.to_string(),
        reason: err.to_string(),
    }
    .into()
}

/// Connection string for the generated database as seen from `host`.
pub(crate) fn database_url(ctx: &ResolvedContext, host: &str) -> String {
    format!(
        "postgres://{DB_USER}:{DB_PASSWORD}@{host}:{DB_PORT}/{}",
        ctx.identity().snake
    )
}
