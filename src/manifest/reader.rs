//! Loads the run summary and the per-package reflection trees from disk.

use super::reflection::RawNode;
use super::summary::{Manifest, PackageManifestEntry};
use crate::error::{EngineError, PackageError};
use futures::future::join_all;
use std::path::{Path, PathBuf};
use std::time::Instant;

/// A package whose reflection file was read and parsed, or the reason it was not.
pub type LoadedPackage = (PackageManifestEntry, Result<RawNode, PackageError>);

/// Reads extractor output from a directory.
#[derive(Debug, Clone)]
pub struct ManifestReader {
    manifest_path: PathBuf,
}

impl ManifestReader {
    pub fn new(manifest_path: impl Into<PathBuf>) -> Self {
        Self {
            manifest_path: manifest_path.into(),
        }
    }

    pub fn manifest_path(&self) -> &Path {
        &self.manifest_path
    }

    /// Directory package output paths are resolved against.
    pub fn base_dir(&self) -> &Path {
        self.manifest_path.parent().unwrap_or_else(|| Path::new("."))
    }

    /// Read and parse the run summary. Failure here is fatal for the whole build.
    pub async fn read_manifest(&self) -> Result<Manifest, EngineError> {
        let content = tokio::fs::read_to_string(&self.manifest_path)
            .await
            .map_err(|source| EngineError::Input {
                path: self.manifest_path.clone(),
                source,
            })?;

        parse_manifest(&content, &self.manifest_path)
    }

    /// Read every package's reflection tree concurrently.
    ///
    /// Results come back in manifest order regardless of completion order. Failures are
    /// package-scoped and returned alongside the entry.
    pub async fn read_packages(&self, manifest: &Manifest) -> Vec<LoadedPackage> {
        let start = Instant::now();
        let base_dir = self.base_dir().to_path_buf();

        let loads = manifest.packages.iter().cloned().map(|entry| {
            let path = entry.resolve_output(&base_dir);
            async move {
                let result = load_package(&entry, &path).await;
                (entry, result)
            }
        });

        let loaded = join_all(loads).await;

        tracing::info!(
            packages = loaded.len(),
            failed = loaded.iter().filter(|(_, r)| r.is_err()).count(),
            elapsed = ?start.elapsed(),
            "Read reflection trees"
        );

        loaded
    }
}

/// Parse run summary content; `path` is only used for error reporting.
pub fn parse_manifest(content: &str, path: &Path) -> Result<Manifest, EngineError> {
    serde_json::from_str(content).map_err(|source| EngineError::InvalidManifest {
        path: path.to_path_buf(),
        source,
    })
}

/// Parse one package's reflection tree content.
pub fn parse_package(entry: &PackageManifestEntry, content: &str) -> Result<RawNode, PackageError> {
    serde_json::from_str(content).map_err(|source| PackageError::Malformed {
        package: entry.name.clone(),
        source,
    })
}

async fn load_package(entry: &PackageManifestEntry, path: &Path) -> Result<RawNode, PackageError> {
    if !entry.success {
        return Err(PackageError::BuildFailed {
            package: entry.name.clone(),
        });
    }

    tracing::debug!(package = %entry.name, path = %path.display(), "Reading reflection tree");

    let content = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| PackageError::Unreadable {
            package: entry.name.clone(),
            path: path.to_path_buf(),
            source,
        })?;

    parse_package(entry, &content)
}
