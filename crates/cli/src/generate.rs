//! `openapi-fetch generate`: run the type-generation plugin once.

use clap::Args;
use std::path::{Path, PathBuf};
use tracing::debug;

use openapi_fetch_codegen::config::CONFIG_FILENAME;
use openapi_fetch_codegen::{BuildHooks, InputSpec, OpenApiFetchPlugin, PluginConfig};

use crate::run_cli_async;

#[derive(Args, Debug, Clone)]
pub struct GenerateArgs {
    #[arg(
        long,
        value_name = "PATH",
        help = "Config file. Defaults to openapi-fetch.toml in the root, if present"
    )]
    pub config: Option<PathBuf>,
    #[arg(
        long,
        value_name = "DIR",
        help = "Root for relative inputs and outputs. Defaults to the config file's directory"
    )]
    pub root: Option<PathBuf>,
    #[arg(long, value_name = "SRC", requires = "output", help = "OpenAPI document URL or path")]
    pub input: Option<String>,
    #[arg(long, value_name = "DST", requires = "input", help = "Generated TypeScript file")]
    pub output: Option<String>,
    #[arg(
        long = "map",
        value_name = "NAME=TYPE",
        requires = "input",
        value_parser = parse_mapping,
        help = "Emit schema NAME as the literal TYPE (repeatable)"
    )]
    pub mappings: Vec<(String, String)>,
    #[arg(long = "strict-refs", help = "Fail when a $ref names a missing schema")]
    pub strict_refs: bool,
    #[arg(short, long, help = "Enable debug logging")]
    pub verbose: bool,
}

fn parse_mapping(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, ty)) if !name.trim().is_empty() && !ty.trim().is_empty() => {
            Ok((name.trim().to_string(), ty.trim().to_string()))
        }
        _ => Err(format!("expected NAME=TYPE, got '{raw}'")),
    }
}

/// Run the command and return the process exit code.
pub async fn run(args: GenerateArgs) -> i32 {
    run_cli_async(|| run_inner(args)).await
}

async fn run_inner(args: GenerateArgs) -> Result<(), String> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let (config, root) = resolve_plan(args, &cwd)?;
    debug!(root = %root.display(), inputs = config.inputs.len(), "Resolved build plan.");

    let plugin = OpenApiFetchPlugin::new(config, &root);
    let report = plugin.build_start().await.map_err(|err| err.to_string())?;

    for path in &report.generated {
        println!("generated {}", path.display());
    }
    for input in &report.skipped {
        println!("skipped {input}");
    }
    if report.failed.is_empty() {
        Ok(())
    } else {
        Err(format!("Failed to write: {}", report.failed.join(", ")))
    }
}

/// Merge the config file (explicit or discovered) with command-line inputs
/// and pick the build root.
fn resolve_plan(args: GenerateArgs, cwd: &Path) -> Result<(PluginConfig, PathBuf), String> {
    let explicit_root = args.root.as_ref().map(|root| cwd.join(root));
    let config_path = match &args.config {
        Some(path) => Some(cwd.join(path)),
        None => {
            let candidate = explicit_root.as_deref().unwrap_or(cwd).join(CONFIG_FILENAME);
            candidate.is_file().then_some(candidate)
        }
    };

    let mut config = match &config_path {
        Some(path) => PluginConfig::from_file(path).map_err(|err| err.to_string())?,
        None => PluginConfig::default(),
    };

    let root = match (explicit_root, &config_path) {
        (Some(root), _) => root,
        (None, Some(path)) => path.parent().map_or_else(|| cwd.to_path_buf(), Path::to_path_buf),
        (None, None) => cwd.to_path_buf(),
    };

    if let (Some(input), Some(output)) = (args.input, args.output) {
        let mut spec = InputSpec::new(input, output);
        spec.mappings.extend(args.mappings);
        config.inputs.push(spec);
    }
    config.strict_refs |= args.strict_refs;

    if config.inputs.is_empty() {
        return Err(format!(
            "No inputs configured. Pass --input/--output or create {CONFIG_FILENAME}"
        ));
    }
    Ok((config, root))
}
