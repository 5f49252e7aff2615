//! `openapi-fetch.toml` build configuration.
//!
//! ```toml
//! strict_refs = false
//!
//! [[inputs]]
//! input = "https://petstore.example.com/openapi.json"
//! output = "src/api/petstore.ts"
//!
//! [[inputs]]
//! input = "specs/billing.yaml"
//! output = "src/api/billing.ts"
//! mappings = { Money = "string", Timestamp = "string" }
//! ```

use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::BuildError;

/// Config file looked up in the build root when none is given.
pub const CONFIG_FILENAME: &str = "openapi-fetch.toml";

/// One document to compile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InputSpec {
    /// HTTP(S) URL or path relative to the build root.
    pub input: String,
    /// Destination file, relative to the build root.
    pub output: String,
    /// Extra schema-name overrides for this input only.
    #[serde(default)]
    pub mappings: IndexMap<String, String>,
}

impl InputSpec {
    /// Input without extra mappings.
    pub fn new(input: impl Into<String>, output: impl Into<String>) -> Self {
        Self {
            input: input.into(),
            output: output.into(),
            mappings: IndexMap::new(),
        }
    }
}

/// Plugin configuration, usually read from [`CONFIG_FILENAME`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PluginConfig {
    /// Documents to compile, processed in order.
    #[serde(default)]
    pub inputs: Vec<InputSpec>,
    /// Abort the build on a `$ref` that names a missing component.
    #[serde(default)]
    pub strict_refs: bool,
}

impl PluginConfig {
    /// Parse and validate TOML configuration text.
    pub fn from_toml_str(contents: &str) -> Result<Self, BuildError> {
        let config: Self =
            toml::from_str(contents).map_err(|err| BuildError::Config(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a config file.
    pub fn from_file(path: &Path) -> Result<Self, BuildError> {
        let contents = std::fs::read_to_string(path).map_err(|err| BuildError::io(path, err))?;
        Self::from_toml_str(&contents)
    }

    fn validate(&self) -> Result<(), BuildError> {
        for (index, spec) in self.inputs.iter().enumerate() {
            if spec.input.trim().is_empty() {
                return Err(BuildError::Config(format!("inputs[{index}].input is empty")));
            }
            if spec.output.trim().is_empty() {
                return Err(BuildError::Config(format!("inputs[{index}].output is empty")));
            }
        }
        Ok(())
    }
}
