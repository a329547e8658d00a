//! One built package: its node arena plus lookup indices.

use crate::manifest::PackageManifestEntry;
use crate::model::{DocNode, NodeKind};
use ahash::AHashMap;
use serde::Serialize;

/// Per-package build counters, filled by the resolution sweep, search indexing and
/// source URL propagation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PackageStats {
    pub nodes: usize,
    pub signatures: usize,
    pub search_entries: usize,
    pub internal_references: usize,
    pub external_references: usize,
    pub unresolved_references: usize,
    pub node_urls_filled: usize,
    pub signature_urls_filled: usize,
}

/// A transformed package. The root node sits at slot 0 of `nodes`.
#[derive(Debug, Clone)]
pub struct DocPackageModel {
    entry: PackageManifestEntry,
    nodes: Vec<DocNode>,
    by_id: AHashMap<u32, usize>,
    by_slug: AHashMap<String, usize>,
    by_qualified_name: AHashMap<String, Vec<usize>>,
    by_kind: AHashMap<NodeKind, Vec<usize>>,
    pub(crate) stats: PackageStats,
}

impl DocPackageModel {
    pub fn new(entry: PackageManifestEntry, nodes: Vec<DocNode>) -> Self {
        let mut by_id = AHashMap::with_capacity(nodes.len());
        let mut by_slug = AHashMap::with_capacity(nodes.len());
        let mut by_qualified_name: AHashMap<String, Vec<usize>> = AHashMap::new();
        let mut by_kind: AHashMap<NodeKind, Vec<usize>> = AHashMap::new();

        for (slot, node) in nodes.iter().enumerate() {
            by_id.insert(node.id, slot);
            by_slug.insert(node.slug.clone(), slot);
            if !node.is_root() {
                by_qualified_name
                    .entry(node.qualified_name.clone())
                    .or_default()
                    .push(slot);
            }
            by_kind.entry(node.kind).or_default().push(slot);
        }

        let stats = PackageStats {
            nodes: nodes.len(),
            signatures: nodes.iter().map(|n| n.signatures.len()).sum(),
            ..PackageStats::default()
        };

        Self {
            entry,
            nodes,
            by_id,
            by_slug,
            by_qualified_name,
            by_kind,
            stats,
        }
    }

    pub fn name(&self) -> &str {
        &self.entry.name
    }

    pub fn version(&self) -> Option<&str> {
        self.entry.version.as_deref()
    }

    pub fn entry(&self) -> &PackageManifestEntry {
        &self.entry
    }

    pub fn root(&self) -> &DocNode {
        &self.nodes[0]
    }

    pub fn nodes(&self) -> &[DocNode] {
        &self.nodes
    }

    pub(crate) fn nodes_mut(&mut self) -> &mut [DocNode] {
        &mut self.nodes
    }

    pub fn slot(&self, slot: usize) -> Option<&DocNode> {
        self.nodes.get(slot)
    }

    pub fn node(&self, id: u32) -> Option<&DocNode> {
        self.by_id.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn node_by_slug(&self, slug: &str) -> Option<&DocNode> {
        self.by_slug.get(slug).map(|&slot| &self.nodes[slot])
    }

    /// First node (in tree order) with this qualified name.
    pub fn node_by_qualified_name(&self, qualified_name: &str) -> Option<&DocNode> {
        self.by_qualified_name
            .get(qualified_name)
            .and_then(|slots| slots.first())
            .map(|&slot| &self.nodes[slot])
    }

    pub fn nodes_by_kind(&self, kind: NodeKind) -> impl Iterator<Item = &DocNode> {
        self.by_kind
            .get(&kind)
            .into_iter()
            .flatten()
            .map(|&slot| &self.nodes[slot])
    }

    pub fn children<'a>(&'a self, node: &'a DocNode) -> impl Iterator<Item = &'a DocNode> {
        node.children.iter().filter_map(|id| self.node(*id))
    }

    pub fn slugs(&self) -> impl Iterator<Item = &str> {
        self.nodes.iter().map(|n| n.slug.as_str())
    }

    pub fn stats(&self) -> PackageStats {
        self.stats
    }
}
