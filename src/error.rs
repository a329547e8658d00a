//! Error handling types and utilities.

use std::path::PathBuf;

/// A specialized Result type for docgraph plumbing (config loading, server startup).
///
/// This is an alias for `anyhow::Result` with context added via `.context()` and
/// `.with_context()` at I/O edges. The pipeline itself uses the typed errors below.
pub type Result<T> = anyhow::Result<T>;

/// Fatal error returned from engine construction.
///
/// The engine cannot exist without a readable run summary, so these abort the build.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// The run summary could not be read from disk.
    #[error("Failed to read run summary at {}: {source}", path.display())]
    Input {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The run summary was read but is not valid JSON for the expected schema.
    #[error("Failed to parse run summary at {}: {source}", path.display())]
    InvalidManifest {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Neither a root directory nor a manifest path was configured.
    #[error("No root directory or manifest path configured")]
    NoInput,
}

/// Package-scoped error: the package is skipped and a warning recorded.
///
/// A malformed node anywhere in a package's tree fails the whole package. Failure is
/// tolerated at package granularity only.
#[derive(Debug, thiserror::Error)]
pub enum PackageError {
    /// The extractor reported that it failed to produce this package.
    #[error("extractor reported failure for '{package}'")]
    BuildFailed { package: String },
    /// The reflection file could not be read.
    #[error("failed to read reflection tree for '{package}' at {}: {source}", path.display())]
    Unreadable {
        package: String,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// The reflection file is not valid JSON for the reflection schema.
    #[error("malformed reflection tree for '{package}': {source}")]
    Malformed {
        package: String,
        #[source]
        source: serde_json::Error,
    },
    /// A node or signature carries a kind code outside the known set.
    #[error("unknown kind code {code} on node {id} ('{name}') in '{package}'")]
    UnknownKind {
        package: String,
        id: u32,
        name: String,
        code: u32,
    },
    /// A declared entry point does not appear in any source location of the tree.
    #[error("entry point '{entry_point}' of '{package}' not found in reflection tree")]
    MissingEntryPoint { package: String, entry_point: String },
    /// An earlier entry of the run summary already built a package with this name.
    #[error("duplicate package name '{package}' in run summary; later entry skipped")]
    DuplicatePackage { package: String },
}

impl PackageError {
    /// Name of the package this error is scoped to.
    pub fn package(&self) -> &str {
        match self {
            Self::BuildFailed { package }
            | Self::Unreadable { package, .. }
            | Self::Malformed { package, .. }
            | Self::UnknownKind { package, .. }
            | Self::MissingEntryPoint { package, .. }
            | Self::DuplicatePackage { package } => package,
        }
    }
}

/// A recorded, non-fatal problem with one package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageWarning {
    pub package: String,
    pub message: String,
}

impl From<&PackageError> for PackageWarning {
    fn from(error: &PackageError) -> Self {
        Self {
            package: error.package().to_string(),
            message: error.to_string(),
        }
    }
}
