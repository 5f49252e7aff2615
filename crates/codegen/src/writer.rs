//! Output file writing.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::BuildError;

/// Writes generated files, resolving relative paths against `base_dir`.
#[derive(Debug, Clone)]
pub struct FileWriter {
    base_dir: PathBuf,
}

impl FileWriter {
    /// Writer rooted at `base_dir`.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
        }
    }

    /// Directory relative output paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Create missing parent directories, then replace the file's contents.
    /// Returns the resolved path.
    pub async fn write(&self, path: &str, contents: &str) -> Result<PathBuf, BuildError> {
        let target = self.base_dir.join(path);

        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|err| BuildError::io(parent, err))?;
        }

        tokio::fs::write(&target, contents)
            .await
            .map_err(|err| BuildError::io(&target, err))?;

        debug!(
            path = %target.display(),
            len = contents.len(),
            "Wrote generated file."
        );
        Ok(target)
    }
}
