//! Build lifecycle hooks and the type-generation plugin.
//!
//! A host (the `openapi-fetch` CLI, or any build tool embedding this crate)
//! owns the lifecycle and calls [`BuildHooks::build_start`] once per build.

use std::path::{Path, PathBuf};

use futures_util::future::BoxFuture;
use tracing::{info, warn};

use crate::config::{InputSpec, PluginConfig};
use crate::emitter::{GenerateOptions, generate};
use crate::error::BuildError;
use crate::loader::DocumentLoader;
use crate::overrides::TypeOverrides;
use crate::writer::FileWriter;

/// Name reported by [`OpenApiFetchPlugin`].
pub const PLUGIN_NAME: &str = "openapi-fetch-ts";

/// Named hooks invoked by a build host at fixed points.
pub trait BuildHooks: Send + Sync {
    /// Stable plugin name, used in error reports.
    fn name(&self) -> &'static str;

    /// Runs once when a build starts. An `Err` aborts the build.
    fn build_start(&self) -> BoxFuture<'_, Result<BuildReport, BuildError>>;
}

/// Outcome of one `build_start` run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    /// Files written, in input order.
    pub generated: Vec<PathBuf>,
    /// Inputs that could not be loaded or parsed.
    pub skipped: Vec<String>,
    /// Outputs that could not be written.
    pub failed: Vec<String>,
}

impl BuildReport {
    /// Nothing was skipped and nothing failed.
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty() && self.failed.is_empty()
    }
}

/// Compiles each configured OpenAPI document into a TypeScript declaration file.
#[derive(Debug, Clone)]
pub struct OpenApiFetchPlugin {
    inputs: Vec<InputSpec>,
    options: GenerateOptions,
    loader: DocumentLoader,
    writer: FileWriter,
}

impl OpenApiFetchPlugin {
    /// Plugin whose relative input and output paths resolve against `root`.
    pub fn new(config: PluginConfig, root: &Path) -> Self {
        Self::with_parts(config, DocumentLoader::new(root), FileWriter::new(root))
    }

    /// Plugin with a custom loader and writer.
    pub fn with_parts(config: PluginConfig, loader: DocumentLoader, writer: FileWriter) -> Self {
        Self {
            inputs: config.inputs,
            options: GenerateOptions {
                strict_refs: config.strict_refs,
            },
            loader,
            writer,
        }
    }

    /// Configured inputs, in processing order.
    pub fn inputs(&self) -> &[InputSpec] {
        &self.inputs
    }

    async fn run(&self) -> Result<BuildReport, BuildError> {
        let mut report = BuildReport::default();

        // Inputs run one after another; each gets its own override table.
        for spec in &self.inputs {
            let Some(document) = self.loader.load(&spec.input).await else {
                report.skipped.push(spec.input.clone());
                continue;
            };

            let overrides = TypeOverrides::with_mappings(&spec.mappings);
            let contents =
                generate(&document, &overrides, &self.options).map_err(|err| BuildError::Plugin {
                    plugin: PLUGIN_NAME.to_string(),
                    message: format!("{}: {err}", spec.input),
                })?;

            match self.writer.write(&spec.output, &contents).await {
                Ok(path) => {
                    info!(input = %spec.input, path = %path.display(), "Generated endpoint types.");
                    report.generated.push(path);
                }
                Err(err) => {
                    warn!(output = %spec.output, error = %err, "Failed to write endpoint types.");
                    report.failed.push(spec.output.clone());
                }
            }
        }

        Ok(report)
    }
}

impl BuildHooks for OpenApiFetchPlugin {
    fn name(&self) -> &'static str {
        PLUGIN_NAME
    }

    fn build_start(&self) -> BoxFuture<'_, Result<BuildReport, BuildError>> {
        Box::pin(self.run())
    }
}
