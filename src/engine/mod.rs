//! The documentation engine: pipeline and read-only facade.
//!
//! Building runs four stages that never interleave: per-package transformation, then
//! cross-package resolution, then search indexing, then source URL propagation. The
//! result is frozen behind an `Arc` and shared by every clone of the engine.

mod collection;
mod package;

pub use collection::{DocCollection, global_slug};
pub use package::{DocPackageModel, PackageStats};

use crate::config::EngineOptions;
use crate::error::{EngineError, PackageError, PackageWarning};
use crate::identity::IdentityRegistry;
use crate::manifest::{LoadedPackage, Manifest, ManifestReader};
use crate::model::{DocNode, DocReference, GlobalKey, NodeKind};
use crate::propagate::propagate;
use crate::resolve::{ExportIndex, ReferenceResolver, Resolution};
use crate::search::{SearchHit, SearchIndex};
use crate::slug::Slugger;
use crate::transform::transform_package;
use ahash::AHashSet;
use serde::Serialize;
use std::sync::Arc;
use std::time::Instant;

/// Summary of one built package, as listed by [`DocsEngine::list_packages`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageSummary {
    pub name: String,
    pub version: Option<String>,
    pub is_home: bool,
    pub entry_points: Vec<String>,
    pub node_count: usize,
    pub warning_count: usize,
    pub error_count: usize,
}

/// Cheaply clonable handle to a built, immutable documentation collection.
#[derive(Debug, Clone)]
pub struct DocsEngine {
    collection: Arc<DocCollection>,
}

impl DocsEngine {
    /// Read the run summary and every package from disk, then build.
    ///
    /// Only an unreadable or invalid run summary is fatal; package failures become
    /// warnings.
    pub async fn create(options: EngineOptions) -> Result<Self, EngineError> {
        let manifest_path = options.resolved_manifest_path()?;
        tracing::info!("Building documentation graph from {}", manifest_path.display());

        let reader = ManifestReader::new(manifest_path);
        let manifest = reader.read_manifest().await?;
        let loaded = reader.read_packages(&manifest).await;

        Ok(Self::from_sources(manifest, loaded, &options))
    }

    /// Build from an already loaded run summary and package trees.
    pub fn from_sources(manifest: Manifest, loaded: Vec<LoadedPackage>, options: &EngineOptions) -> Self {
        let start = Instant::now();

        // Stage 1: per-package transformation, in manifest order.
        let mut packages = Vec::with_capacity(loaded.len());
        let mut registries = Vec::with_capacity(loaded.len());
        let mut warnings = Vec::new();
        let mut built_names = AHashSet::new();
        for (entry, result) in loaded {
            if built_names.contains(&entry.name) {
                let error = PackageError::DuplicatePackage { package: entry.name };
                record_failure(&error, &mut warnings);
                continue;
            }
            let mut slugger = Slugger::new();
            let mut registry = IdentityRegistry::new();
            let built = result.and_then(|root| transform_package(&entry, &root, &mut slugger, &mut registry));
            match built {
                Ok(nodes) => {
                    built_names.insert(entry.name.clone());
                    packages.push(DocPackageModel::new(entry, nodes));
                    registries.push(registry);
                }
                Err(error) => {
                    record_failure(&error, &mut warnings);
                }
            }
        }

        let home = options
            .home_package
            .as_deref()
            .or(manifest.home_package.as_deref())
            .map(str::to_string);
        let mut collection = DocCollection::new(manifest, packages, registries, warnings, home.as_deref());

        // Stage 2: cross-package resolution index, then one sweep for statistics.
        collection.exports = ExportIndex::build(&collection);
        let counts: Vec<_> = {
            let resolver = ReferenceResolver::new(&collection);
            collection
                .package_names()
                .map(|name| (name.to_string(), resolver.sweep(name)))
                .collect()
        };
        for (name, count) in counts {
            tracing::debug!(
                "Resolved references in '{}': {} internal, {} external, {} unresolved",
                name,
                count.internal,
                count.external,
                count.unresolved
            );
            if let Some(package) = collection.package_mut(&name) {
                package.stats.internal_references = count.internal;
                package.stats.external_references = count.external;
                package.stats.unresolved_references = count.unresolved;
            }
        }

        // Stage 3: search index.
        collection.search = SearchIndex::build(&collection, options.summary_budget);
        let entry_counts: Vec<(String, usize)> = collection
            .package_names()
            .map(|name| (name.to_string(), collection.search.entries_for(name).count()))
            .collect();
        for (name, count) in entry_counts {
            if let Some(package) = collection.package_mut(&name) {
                package.stats.search_entries = count;
            }
        }

        // Stage 4: source URL propagation over the whole forest.
        let filled = propagate(collection.packages_mut());

        tracing::info!(
            "Built documentation graph: {} packages, {} nodes, {} source URLs filled, {} skipped in {:?}",
            collection.packages().len(),
            collection.node_count(),
            filled.nodes_filled + filled.signatures_filled,
            collection.warnings().len(),
            start.elapsed()
        );

        Self {
            collection: Arc::new(collection),
        }
    }

    pub fn collection(&self) -> &DocCollection {
        &self.collection
    }

    pub fn package(&self, name: &str) -> Option<&DocPackageModel> {
        self.collection.package(name)
    }

    pub fn node_by_key(&self, key: &GlobalKey) -> Option<&DocNode> {
        self.collection.node_by_key(key)
    }

    pub fn node_by_slug(&self, package: &str, slug: &str) -> Option<&DocNode> {
        self.collection.package(package)?.node_by_slug(slug)
    }

    /// Slug lookup through the collection-wide `package/slug` index.
    pub fn node_by_global_slug(&self, package: &str, slug: &str) -> Option<&DocNode> {
        self.collection.node_by_global_slug(package, slug)
    }

    pub fn node_by_qualified_name(&self, package: &str, qualified_name: &str) -> Option<&DocNode> {
        self.collection.package(package)?.node_by_qualified_name(qualified_name)
    }

    pub fn nodes_by_kind<'a>(&'a self, package: &str, kind: NodeKind) -> Vec<&'a DocNode> {
        self.collection
            .package(package)
            .map(|p| p.nodes_by_kind(kind).collect())
            .unwrap_or_default()
    }

    /// Children of `node`, in declaration order.
    pub fn children<'a>(&'a self, node: &DocNode) -> Vec<&'a DocNode> {
        self.collection
            .package(&node.key.package)
            .map(|p| node.children.iter().filter_map(|id| p.node(*id)).collect())
            .unwrap_or_default()
    }

    pub fn resolve_reference(&self, package: &str, reference: &DocReference) -> Resolution {
        ReferenceResolver::new(&self.collection).resolve(package, reference)
    }

    pub fn search(&self, query: &str, package_filter: Option<&str>) -> Vec<SearchHit<'_>> {
        self.collection.search.search(query, package_filter)
    }

    pub fn list_packages(&self) -> Vec<PackageSummary> {
        self.collection
            .packages()
            .iter()
            .map(|p| PackageSummary {
                name: p.name().to_string(),
                version: p.version().map(str::to_string),
                is_home: self.collection.is_home(p.name()),
                entry_points: p.entry().entry_points.clone(),
                node_count: p.nodes().len(),
                warning_count: p.entry().warning_count(),
                error_count: p.entry().error_count(),
            })
            .collect()
    }

    pub fn warnings(&self) -> &[PackageWarning] {
        self.collection.warnings()
    }

    pub fn home_package(&self) -> Option<&str> {
        self.collection.home_package()
    }

    pub fn stats(&self, package: &str) -> Option<PackageStats> {
        self.collection.package(package).map(DocPackageModel::stats)
    }
}

fn record_failure(error: &PackageError, warnings: &mut Vec<PackageWarning>) {
    tracing::warn!("Skipping package '{}': {}", error.package(), error);
    warnings.push(PackageWarning::from(error));
}
