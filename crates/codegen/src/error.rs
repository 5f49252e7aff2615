//! Build-time errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading, translating or writing a document.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Reading or writing a file failed.
    #[error("failed to access {}: {source}", path.display())]
    Io {
        /// File that could not be accessed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The document is neither valid JSON nor valid YAML.
    #[error("failed to parse OpenAPI document: {0}")]
    Parse(String),

    /// The plugin configuration is malformed.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// A `$ref` names a component the document does not define.
    #[error("unresolved reference '{reference}' in {location}")]
    UnresolvedReference {
        /// The dangling pointer, e.g. `#/components/schemas/Pet`.
        reference: String,
        /// Where it was found.
        location: String,
    },

    /// A build hook aborted the build.
    #[error("plugin '{plugin}' failed: {message}")]
    Plugin {
        /// Name of the failing plugin.
        plugin: String,
        /// Rendered cause.
        message: String,
    },
}

impl BuildError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
