//! Best-effort loading of OpenAPI documents from URLs or local files.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::document::OpenApiDocument;

/// Loads documents for the build, resolving local paths against `base_dir`.
///
/// Every failure (network, file system, parse) is logged and reported as
/// `None` so that one broken input never aborts a multi-input build.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
    base_dir: PathBuf,
    http: reqwest::Client,
}

impl DocumentLoader {
    /// Loader with a default HTTP client.
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self::with_client(base_dir, reqwest::Client::new())
    }

    /// Loader fetching remote documents through `http`.
    pub fn with_client(base_dir: impl Into<PathBuf>, http: reqwest::Client) -> Self {
        Self {
            base_dir: base_dir.into(),
            http,
        }
    }

    /// Directory local paths resolve against.
    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    /// Fetch or read `source` and parse it as JSON or YAML.
    ///
    /// URLs starting with `http://` or `https://` are fetched; anything else is
    /// a file path.
    pub async fn load(&self, source: &str) -> Option<OpenApiDocument> {
        let text = if is_remote(source) {
            self.fetch(source).await?
        } else {
            self.read(source).await?
        };

        match OpenApiDocument::parse(&text) {
            Ok(document) => {
                debug!(source, paths = document.paths.len(), "Loaded OpenAPI document.");
                Some(document)
            }
            Err(err) => {
                warn!(source, error = %err, "Skipping unparseable OpenAPI document.");
                None
            }
        }
    }

    async fn fetch(&self, url: &str) -> Option<String> {
        debug!(%url, "Fetching OpenAPI document.");
        let response = match self.http.get(url).send().await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, error = %err, "Failed to fetch OpenAPI document.");
                return None;
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(%url, status = status.as_u16(), "OpenAPI document request was not successful.");
            return None;
        }

        match response.text().await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(%url, error = %err, "Failed to read OpenAPI document body.");
                None
            }
        }
    }

    async fn read(&self, source: &str) -> Option<String> {
        let path = self.base_dir.join(source);
        debug!(path = %path.display(), "Reading OpenAPI document.");
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "Failed to read OpenAPI document.");
                None
            }
        }
    }
}

fn is_remote(source: &str) -> bool {
    source.starts_with("http://") || source.starts_with("https://")
}
