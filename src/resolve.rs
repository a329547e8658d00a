//! Reference resolution over the built collection.
//!
//! Resolution is a pure read: it never writes into nodes, so resolving the same
//! reference twice always yields the same answer.

use crate::engine::DocCollection;
use crate::model::{DocNode, DocReference, GlobalKey, NodeKind};
use ahash::AHashMap;
use serde::Serialize;

/// Alias chains longer than this are treated as unresolvable.
const MAX_ALIAS_HOPS: usize = 8;

/// Terminal state of resolving one reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum Resolution {
    Internal {
        package: String,
        slug: String,
        key: GlobalKey,
    },
    External {
        url: String,
    },
    Unresolved {
        name: String,
        qualified_name: Option<String>,
    },
}

impl Resolution {
    pub fn is_internal(&self) -> bool {
        matches!(self, Self::Internal { .. })
    }

    pub fn is_unresolved(&self) -> bool {
        matches!(self, Self::Unresolved { .. })
    }

    pub fn key(&self) -> Option<&GlobalKey> {
        match self {
            Self::Internal { key, .. } => Some(key),
            _ => None,
        }
    }
}

/// A declaration reachable under an exported name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Export {
    /// Package exporting the name (for re-exports, the re-exporting package).
    pub package: String,
    /// Declaration the name refers to.
    pub key: GlobalKey,
}

/// Exported name → declarations, in manifest order.
///
/// Top-level declarations are indexed by bare and qualified name, nested members by
/// qualified name only. Re-export alias nodes contribute their names but point at their
/// alias target.
#[derive(Debug, Clone, Default)]
pub struct ExportIndex {
    names: AHashMap<String, Vec<Export>>,
}

impl ExportIndex {
    pub fn build(collection: &DocCollection) -> Self {
        let resolver = ReferenceResolver::new(collection);
        let mut index = Self::default();

        for package in collection.packages() {
            for node in package.nodes() {
                let Some(parent) = node.parent.and_then(|id| package.node(id)) else {
                    continue;
                };
                // Members are reachable only through their owner, so only their
                // qualified name (`Foo.send`) is exported.
                if !parent.kind.is_container() {
                    if node.kind != NodeKind::Reference {
                        index.insert(&node.qualified_name, package.name(), &node.key);
                    }
                    continue;
                }

                let key = if node.kind == NodeKind::Reference {
                    match resolver.follow_alias(&node.key) {
                        Some(target) if target != node.key => target,
                        _ => continue,
                    }
                } else {
                    node.key.clone()
                };

                index.insert(&node.name, package.name(), &key);
                if node.qualified_name != node.name {
                    index.insert(&node.qualified_name, package.name(), &key);
                }
            }
        }

        tracing::debug!("Built export index: {} names", index.names.len());
        index
    }

    fn insert(&mut self, name: &str, package: &str, key: &GlobalKey) {
        let exports = self.names.entry(name.to_string()).or_default();
        if !exports.iter().any(|e| e.package == package && &e.key == key) {
            exports.push(Export {
                package: package.to_string(),
                key: key.clone(),
            });
        }
    }

    pub fn lookup(&self, name: &str) -> &[Export] {
        self.names.get(name).map_or(&[], Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

/// Reference counts by resolution state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReferenceCounts {
    pub internal: usize,
    pub external: usize,
    pub unresolved: usize,
}

impl ReferenceCounts {
    fn record(&mut self, resolution: &Resolution) {
        match resolution {
            Resolution::Internal { .. } => self.internal += 1,
            Resolution::External { .. } => self.external += 1,
            Resolution::Unresolved { .. } => self.unresolved += 1,
        }
    }
}

/// Resolves references against a frozen [`DocCollection`].
#[derive(Debug, Clone, Copy)]
pub struct ReferenceResolver<'a> {
    collection: &'a DocCollection,
}

impl<'a> ReferenceResolver<'a> {
    pub fn new(collection: &'a DocCollection) -> Self {
        Self { collection }
    }

    /// Resolve `reference` as declared in `package`.
    ///
    /// Tries the embedded key, then a qualified-name lookup in the declaring package,
    /// then the exported-name index, then the external URL hint.
    pub fn resolve(&self, package: &str, reference: &DocReference) -> Resolution {
        if let Some(key) = reference.key()
            && let Some(resolution) = self.internal(key)
        {
            tracing::trace!("Resolved '{}' by key {}", reference.name, key);
            return resolution;
        }

        if let Some(node) = self
            .collection
            .package(package)
            .and_then(|p| p.node_by_qualified_name(reference.lookup_name()))
            && let Some(resolution) = self.internal(&node.key)
        {
            tracing::trace!("Resolved '{}' in declaring package '{}'", reference.name, package);
            return resolution;
        }

        if let Some(key) = self.exported(reference)
            && let Some(resolution) = self.internal(&key)
        {
            tracing::trace!("Resolved '{}' through exports to {}", reference.name, key);
            return resolution;
        }

        if let Some(url) = reference.external_url() {
            return Resolution::External {
                url: url.to_string(),
            };
        }

        tracing::trace!("Unresolved reference '{}'", reference.lookup_name());
        Resolution::Unresolved {
            name: reference.name.clone(),
            qualified_name: reference.qualified_name.clone(),
        }
    }

    /// Follow re-export aliases from `key` to the declaration they name.
    ///
    /// Returns the last node reached, which is `key` itself for non-alias nodes and for
    /// aliases whose target cannot be found.
    pub fn follow_alias(&self, key: &GlobalKey) -> Option<GlobalKey> {
        let mut current = self.collection.node_by_key(key)?;
        for _ in 0..MAX_ALIAS_HOPS {
            let Some(alias) = current.alias_of.as_ref() else {
                return Some(current.key.clone());
            };
            match self.alias_target(current, alias) {
                Some(next) if next.key != current.key => current = next,
                _ => return Some(current.key.clone()),
            }
        }
        Some(current.key.clone())
    }

    fn alias_target(&self, alias_node: &DocNode, alias: &DocReference) -> Option<&'a DocNode> {
        if let Some(key) = alias.key()
            && let Some(node) = self.collection.node_by_key(key)
        {
            return Some(node);
        }

        let lookup = alias.lookup_name();
        let declaring = alias.package.as_deref().unwrap_or(&alias_node.key.package);
        let found_in = |package: &str| {
            self.collection
                .package(package)
                .and_then(|p| p.node_by_qualified_name(lookup))
                .filter(|n| n.key != alias_node.key)
        };

        // Re-exports of another package's symbol often carry no package hint: try the
        // home package, then every package in manifest order.
        found_in(declaring)
            .or_else(|| self.collection.home_package().and_then(found_in))
            .or_else(|| self.collection.package_names().find_map(found_in))
    }

    fn internal(&self, key: &GlobalKey) -> Option<Resolution> {
        let target = self.follow_alias(key)?;
        let node = self.collection.node_by_key(&target)?;
        Some(Resolution::Internal {
            package: node.key.package.clone(),
            slug: node.slug.clone(),
            key: node.key.clone(),
        })
    }

    /// Choose among exporters: the reference's package hint, then home, then manifest order.
    fn exported(&self, reference: &DocReference) -> Option<GlobalKey> {
        let mut candidates = self.collection.exports.lookup(reference.lookup_name());
        if candidates.is_empty() {
            candidates = self.collection.exports.lookup(&reference.name);
        }

        let exported_by = |package: &str| candidates.iter().find(|e| e.package == package);

        reference
            .package
            .as_deref()
            .and_then(exported_by)
            .or_else(|| self.collection.home_package().and_then(exported_by))
            .or_else(|| candidates.first())
            .map(|e| e.key.clone())
    }

    /// Resolve every reference held by `package`'s nodes once and count the outcomes.
    pub fn sweep(&self, package: &str) -> ReferenceCounts {
        let mut counts = ReferenceCounts::default();
        let Some(model) = self.collection.package(package) else {
            return counts;
        };
        for node in model.nodes() {
            for reference in node.references() {
                counts.record(&self.resolve(package, reference));
            }
        }
        counts
    }
}
