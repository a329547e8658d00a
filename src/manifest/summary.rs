//! Run summary written by the extractor: one entry per documented package.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Generator metadata recorded in the run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorInfo {
    pub name: String,
    pub version: String,
}

/// Top-level run summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Manifest {
    pub generator: GeneratorInfo,
    pub generated_at: Option<String>,
    /// Package preferred when a symbol is re-exported under several packages.
    pub home_package: Option<String>,
    pub packages: Vec<PackageManifestEntry>,
}

/// One package as reported by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifestEntry {
    pub name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub entry_points: Vec<String>,
    /// Reflection tree location, relative to the run summary's directory.
    pub output_path: PathBuf,
    #[serde(default)]
    pub warnings: Vec<String>,
    #[serde(default)]
    pub errors: Vec<String>,
    #[serde(default = "default_success")]
    pub success: bool,
}

fn default_success() -> bool {
    true
}

impl PackageManifestEntry {
    /// Absolute location of this package's reflection tree.
    pub fn resolve_output(&self, base_dir: &Path) -> PathBuf {
        if self.output_path.is_absolute() {
            self.output_path.clone()
        } else {
            base_dir.join(&self.output_path)
        }
    }

    pub fn warning_count(&self) -> usize {
        self.warnings.len()
    }

    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
