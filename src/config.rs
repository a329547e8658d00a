//! Engine configuration.

use crate::error::{EngineError, Result};
use crate::search::DEFAULT_SUMMARY_BUDGET;
use anyhow::Context;
use serde::Deserialize;
use std::borrow::Cow;
use std::path::{Path, PathBuf};

pub const DEFAULT_MANIFEST_FILE_NAME: &str = "manifest.json";

/// Options for building a [`DocsEngine`](crate::DocsEngine).
///
/// Either `root` (a directory holding the run summary) or `manifest_path` must be set;
/// an explicit `manifest_path` wins.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineOptions {
    pub root: Option<PathBuf>,
    pub manifest_path: Option<PathBuf>,
    pub manifest_file_name: String,
    /// Overrides the run summary's home package.
    pub home_package: Option<String>,
    /// Maximum characters kept in a search entry's summary snippet.
    pub summary_budget: usize,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            root: None,
            manifest_path: None,
            manifest_file_name: DEFAULT_MANIFEST_FILE_NAME.to_string(),
            home_package: None,
            summary_budget: DEFAULT_SUMMARY_BUDGET,
        }
    }
}

impl EngineOptions {
    /// Options reading `manifest.json` from `root`.
    pub fn from_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
            ..Self::default()
        }
    }

    pub fn with_home_package(mut self, package: impl Into<String>) -> Self {
        self.home_package = Some(package.into());
        self
    }

    pub fn with_summary_budget(mut self, budget: usize) -> Self {
        self.summary_budget = budget;
        self
    }

    /// Parse options from TOML text, expanding `~` in paths.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let options: Self = toml::from_str(content).context("Failed to parse engine options")?;
        Ok(options.expanded())
    }

    /// Load options from a TOML file, expanding `~` in paths.
    pub fn from_toml_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::from_toml_str(&content)
    }

    fn expanded(mut self) -> Self {
        let expand = |p: PathBuf| PathBuf::from(expand_tilde(&p.to_string_lossy()).into_owned());
        self.root = self.root.map(expand);
        self.manifest_path = self.manifest_path.map(expand);
        self
    }

    /// Location of the run summary.
    pub fn resolved_manifest_path(&self) -> std::result::Result<PathBuf, EngineError> {
        match (&self.manifest_path, &self.root) {
            (Some(path), _) => Ok(path.clone()),
            (None, Some(root)) => Ok(root.join(&self.manifest_file_name)),
            (None, None) => Err(EngineError::NoInput),
        }
    }
}

/// Expands tilde (`~`) in a path to the user's home directory.
///
/// - `~/foo` becomes `/home/user/foo`
/// - `~` becomes `/home/user`
/// - Other paths are returned unchanged
pub fn expand_tilde(path: &str) -> Cow<'_, str> {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return Cow::Owned(home.join(stripped).display().to_string());
        }
    } else if path == "~"
        && let Some(home) = dirs::home_dir()
    {
        return Cow::Owned(home.display().to_string());
    }
    Cow::Borrowed(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};

    #[test]
    fn test_defaults() {
        let options = EngineOptions::default();
        check!(options.manifest_file_name == "manifest.json");
        check!(options.summary_budget == 200);
        let_assert!(Err(EngineError::NoInput) = options.resolved_manifest_path());
    }

    #[test]
    fn test_from_toml() {
        let_assert!(
            Ok(options) = EngineOptions::from_toml_str(
                r#"
                root = "/srv/docs"
                manifest_file_name = "summary.json"
                home_package = "core"
                summary_budget = 80
                "#
            )
        );
        check!(options.home_package.as_deref() == Some("core"));
        check!(options.summary_budget == 80);
        let_assert!(Ok(path) = options.resolved_manifest_path());
        check!(path == PathBuf::from("/srv/docs/summary.json"));
    }

    #[test]
    fn test_explicit_manifest_path_wins() {
        let options = EngineOptions {
            manifest_path: Some("/tmp/run/manifest.json".into()),
            ..EngineOptions::from_root("/elsewhere")
        };
        let_assert!(Ok(path) = options.resolved_manifest_path());
        check!(path == PathBuf::from("/tmp/run/manifest.json"));
    }

    #[test]
    fn test_unknown_keys_rejected() {
        check!(EngineOptions::from_toml_str("colour = \"blue\"").is_err());
    }

    #[test]
    fn test_expand_tilde_leaves_plain_paths() {
        check!(expand_tilde("/abs/path") == "/abs/path");
        check!(expand_tilde("relative") == "relative");
    }
}
