//! Source URL back-fill across structurally duplicate declarations.
//!
//! Runs last, over every package in manifest order. Only empty `source_url` fields are
//! written; existing values are never replaced and no URL is ever made up.

use crate::engine::DocPackageModel;
use crate::model::{DocNode, DocSignature, NodeKind, SignatureKind};
use ahash::AHashMap;
use std::time::Instant;

/// Identity nodes are bucketed by.
///
/// The bare-name fallback can merge unrelated declarations that share a name; it only
/// applies when both the qualified name and path are empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NodeIdentity {
    Qualified(NodeKind, String),
    Path(NodeKind, Vec<String>),
    Name(NodeKind, String),
}

impl NodeIdentity {
    fn of(node: &DocNode) -> Self {
        if !node.qualified_name.is_empty() {
            Self::Qualified(node.kind, node.qualified_name.clone())
        } else if !node.path.is_empty() {
            Self::Path(node.kind, node.path.clone())
        } else {
            Self::Name(node.kind, node.name.clone())
        }
    }
}

/// Identity signatures are bucketed by. Overloads only share a URL when they belong to
/// the same owning declaration.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SignatureIdentity {
    owner: NodeIdentity,
    kind: SignatureKind,
    name: String,
    overload_index: usize,
    type_parameters: Vec<String>,
    parameters: Vec<String>,
}

impl SignatureIdentity {
    fn of(owner: &NodeIdentity, signature: &DocSignature) -> Self {
        Self {
            owner: owner.clone(),
            kind: signature.kind,
            name: signature.name.clone(),
            overload_index: signature.overload_index,
            type_parameters: signature.type_parameter_names().into_iter().map(str::to_string).collect(),
            parameters: signature.parameter_names().into_iter().map(str::to_string).collect(),
        }
    }
}

/// Owner identity for a node's signatures.
///
/// Inherited and overriding members take the identity of the member they come from, so
/// `FooPlugin.send` shares a bucket with `Foo.send`.
fn owner_identity(node: &DocNode) -> NodeIdentity {
    node.inherited_from
        .as_ref()
        .or(node.overrides.as_ref())
        .map(|origin| origin.lookup_name())
        .filter(|name| !name.is_empty())
        .map_or_else(
            || NodeIdentity::of(node),
            |name| NodeIdentity::Qualified(node.kind, name.to_string()),
        )
}

/// Counts of fields filled by one propagation run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropagationStats {
    pub nodes_filled: usize,
    pub signatures_filled: usize,
}

/// Fill empty node and signature source URLs from the first known URL of their group.
pub fn propagate(packages: &mut [DocPackageModel]) -> PropagationStats {
    let start = Instant::now();

    // First URL per group, in manifest order then pre-order.
    let mut node_urls: AHashMap<NodeIdentity, Option<String>> = AHashMap::new();
    let mut signature_urls: AHashMap<SignatureIdentity, Option<String>> = AHashMap::new();
    for package in packages.iter() {
        for node in package.nodes() {
            let slot = node_urls.entry(NodeIdentity::of(node)).or_default();
            if slot.is_none() {
                *slot = node_url(node);
            }
            let owner = owner_identity(node);
            for signature in &node.signatures {
                let slot = signature_urls.entry(SignatureIdentity::of(&owner, signature)).or_default();
                if slot.is_none() {
                    *slot = signature_url(signature);
                }
            }
        }
    }

    let mut stats = PropagationStats::default();
    for package in packages.iter_mut() {
        let mut filled = PropagationStats::default();
        for node in package.nodes_mut() {
            if !node.has_source_url()
                && let Some(Some(url)) = node_urls.get(&NodeIdentity::of(node))
            {
                node.source_url = Some(url.clone());
                filled.nodes_filled += 1;
            }
            let owner = owner_identity(node);
            for signature in &mut node.signatures {
                if !signature.has_source_url()
                    && let Some(Some(url)) = signature_urls.get(&SignatureIdentity::of(&owner, signature))
                {
                    signature.source_url = Some(url.clone());
                    filled.signatures_filled += 1;
                }
            }
        }
        package.stats.node_urls_filled = filled.nodes_filled;
        package.stats.signature_urls_filled = filled.signatures_filled;
        stats.nodes_filled += filled.nodes_filled;
        stats.signatures_filled += filled.signatures_filled;
    }

    tracing::info!(
        "Propagated source URLs: {} nodes, {} signatures filled in {:?}",
        stats.nodes_filled,
        stats.signatures_filled,
        start.elapsed()
    );
    stats
}

/// Node URL lookup order: own URL, own sources, then each signature's URL and sources.
fn node_url(node: &DocNode) -> Option<String> {
    non_empty(node.source_url.as_deref())
        .or_else(|| node.sources.iter().find_map(|s| non_empty(s.url.as_deref())))
        .or_else(|| node.signatures.iter().find_map(signature_url))
}

fn signature_url(signature: &DocSignature) -> Option<String> {
    non_empty(signature.source_url.as_deref())
        .or_else(|| signature.sources.iter().find_map(|s| non_empty(s.url.as_deref())))
}

fn non_empty(url: Option<&str>) -> Option<String> {
    url.filter(|u| !u.is_empty()).map(str::to_string)
}
