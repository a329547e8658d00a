//! The merged, read-only collection of all built packages.

use super::package::DocPackageModel;
use crate::error::PackageWarning;
use crate::identity::IdentityRegistry;
use crate::manifest::Manifest;
use crate::model::{DocNode, GlobalKey};
use crate::resolve::ExportIndex;
use crate::search::SearchIndex;
use ahash::AHashMap;

/// Every built package plus the global indices.
///
/// Packages keep manifest order; skipped packages are absent and listed in `warnings`.
#[derive(Debug, Clone)]
pub struct DocCollection {
    manifest: Manifest,
    packages: Vec<DocPackageModel>,
    by_name: AHashMap<String, usize>,
    registry: IdentityRegistry,
    by_global_slug: AHashMap<String, GlobalKey>,
    warnings: Vec<PackageWarning>,
    home_package: Option<String>,
    pub(crate) exports: ExportIndex,
    pub(crate) search: SearchIndex,
}

/// `package/slug` key of the global slug index.
pub fn global_slug(package: &str, slug: &str) -> String {
    format!("{package}/{slug}")
}

impl DocCollection {
    /// Assemble built packages and merge their identity registries.
    ///
    /// `home_package` is used only if that package was built; otherwise the first built
    /// package becomes home.
    pub fn new(
        manifest: Manifest,
        packages: Vec<DocPackageModel>,
        registries: Vec<IdentityRegistry>,
        warnings: Vec<PackageWarning>,
        home_package: Option<&str>,
    ) -> Self {
        let mut by_name = AHashMap::with_capacity(packages.len());
        let mut by_global_slug = AHashMap::new();
        for (index, package) in packages.iter().enumerate() {
            by_name.entry(package.name().to_string()).or_insert(index);
            for node in package.nodes() {
                by_global_slug.insert(global_slug(package.name(), &node.slug), node.key.clone());
            }
        }

        let mut registry = IdentityRegistry::new();
        for package_registry in registries {
            registry.merge(package_registry);
        }

        let home_package = home_package
            .filter(|name| by_name.contains_key(*name))
            .map(str::to_string)
            .or_else(|| packages.first().map(|p| p.name().to_string()));

        Self {
            manifest,
            packages,
            by_name,
            registry,
            by_global_slug,
            warnings,
            home_package,
            exports: ExportIndex::default(),
            search: SearchIndex::default(),
        }
    }

    pub fn manifest(&self) -> &Manifest {
        &self.manifest
    }

    pub fn packages(&self) -> &[DocPackageModel] {
        &self.packages
    }

    pub(crate) fn packages_mut(&mut self) -> &mut [DocPackageModel] {
        &mut self.packages
    }

    pub fn package(&self, name: &str) -> Option<&DocPackageModel> {
        self.by_name.get(name).map(|&index| &self.packages[index])
    }

    pub(crate) fn package_mut(&mut self, name: &str) -> Option<&mut DocPackageModel> {
        let index = *self.by_name.get(name)?;
        self.packages.get_mut(index)
    }

    /// Position of a built package in manifest order.
    pub fn package_position(&self, name: &str) -> Option<usize> {
        self.by_name.get(name).copied()
    }

    pub fn package_names(&self) -> impl Iterator<Item = &str> {
        self.packages.iter().map(DocPackageModel::name)
    }

    pub fn node_by_key(&self, key: &GlobalKey) -> Option<&DocNode> {
        let slot = self.registry.get(key)?;
        self.package(&key.package)?.slot(slot)
    }

    pub fn node_by_global_slug(&self, package: &str, slug: &str) -> Option<&DocNode> {
        let key = self.by_global_slug.get(&global_slug(package, slug))?;
        self.node_by_key(key)
    }

    pub fn home_package(&self) -> Option<&str> {
        self.home_package.as_deref()
    }

    pub fn is_home(&self, package: &str) -> bool {
        self.home_package.as_deref() == Some(package)
    }

    pub fn warnings(&self) -> &[PackageWarning] {
        &self.warnings
    }

    pub fn node_count(&self) -> usize {
        self.registry.len()
    }

    pub fn exports(&self) -> &ExportIndex {
        &self.exports
    }

    pub fn search_index(&self) -> &SearchIndex {
        &self.search
    }
}
