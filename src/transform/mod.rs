//! Raw reflection tree → normalized [`DocNode`] arena for one package.
//!
//! The walk is recursive and parent-first: each node is pushed into the arena and
//! registered before its children are visited, so the root always lands in slot 0.

pub mod comment;

use crate::error::PackageError;
use crate::identity::IdentityRegistry;
use crate::manifest::{PackageManifestEntry, RawNode, RawSignature, RawSource, RawType};
use crate::model::kind::GROUP_ORDER;
use crate::model::{
    AccessorShape, DocComment, DocGroup, DocNode, DocReference, DocSignature, GlobalKey,
    NodeFlags, NodeKind, SignatureKind, SourceLocation, Visibility, flatten,
};
use crate::render::{SignatureRenderer, TypeRenderer, reference_from_target};
use crate::slug::{Slugger, sanitize};
use std::time::Instant;

/// Mutable state threaded through one package's transformation.
///
/// The slugger and registry are owned by the caller so their contents outlive the walk.
pub struct TransformContext<'a> {
    pub package: &'a str,
    pub slugger: &'a mut Slugger,
    pub registry: &'a mut IdentityRegistry,
    pub arena: Vec<DocNode>,
    types: TypeRenderer<'a>,
    signatures: SignatureRenderer<'a>,
}

impl<'a> TransformContext<'a> {
    pub fn new(package: &'a str, slugger: &'a mut Slugger, registry: &'a mut IdentityRegistry) -> Self {
        let types = TypeRenderer::new(package);
        Self {
            package,
            slugger,
            registry,
            arena: Vec::new(),
            types,
            signatures: SignatureRenderer::new(types),
        }
    }

    fn key(&self, id: u32) -> GlobalKey {
        GlobalKey::new(self.package, id)
    }
}

/// Transform one package's tree into its node arena.
///
/// Declared entry points are checked against the tree's source files first. Any unknown
/// node or signature kind fails the whole package.
pub fn transform_package(
    entry: &PackageManifestEntry,
    root: &RawNode,
    slugger: &mut Slugger,
    registry: &mut IdentityRegistry,
) -> Result<Vec<DocNode>, PackageError> {
    let start = Instant::now();
    check_entry_points(entry, root)?;

    let mut ctx = TransformContext::new(&entry.name, slugger, registry);
    NodeTransformer::transform(&mut ctx, root, None, &[])?;

    tracing::debug!(
        "Transformed '{}': {} nodes in {:?}",
        entry.name,
        ctx.arena.len(),
        start.elapsed()
    );
    Ok(ctx.arena)
}

/// Every declared entry point must match, by path suffix, some source file in the tree.
fn check_entry_points(entry: &PackageManifestEntry, root: &RawNode) -> Result<(), PackageError> {
    if entry.entry_points.is_empty() {
        return Ok(());
    }

    let files: Vec<String> = root.source_file_names().map(normalize_path).collect();
    for entry_point in &entry.entry_points {
        let wanted = normalize_path(entry_point);
        if !files.iter().any(|file| suffix_match(file, &wanted)) {
            return Err(PackageError::MissingEntryPoint {
                package: entry.name.clone(),
                entry_point: entry_point.clone(),
            });
        }
    }
    Ok(())
}

fn normalize_path(path: &str) -> String {
    let path = path.replace('\\', "/");
    path.trim_start_matches("./").to_string()
}

/// True when the shorter path is a whole-segment suffix of the longer one.
fn suffix_match(a: &str, b: &str) -> bool {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    if short.is_empty() || !long.ends_with(short) {
        return false;
    }
    let boundary = long.len() - short.len();
    boundary == 0 || long.as_bytes()[boundary - 1] == b'/'
}

/// Recursive raw node → [`DocNode`] conversion.
pub struct NodeTransformer;

impl NodeTransformer {
    /// Transform `raw` and its subtree, returning the new node's local id.
    pub fn transform(
        ctx: &mut TransformContext<'_>,
        raw: &RawNode,
        parent: Option<u32>,
        parent_path: &[String],
    ) -> Result<u32, PackageError> {
        let kind = NodeKind::try_from(raw.kind).map_err(|code| PackageError::UnknownKind {
            package: ctx.package.to_string(),
            id: raw.id,
            name: raw.name.clone(),
            code,
        })?;

        let path: Vec<String> = if parent.is_none() {
            Vec::new()
        } else {
            parent_path.iter().cloned().chain([raw.name.clone()]).collect()
        };
        let slug = ctx.slugger.slug(&path);
        let key = ctx.key(raw.id);

        let comment = raw.comment.as_ref().map(|c| comment::convert(ctx.package, c));
        let signatures = Self::signatures(ctx, raw)?;
        let flags = Self::flags(raw, comment.as_ref(), &signatures);
        let sources = convert_sources(&raw.sources);
        let source_url = first_url(&raw.sources);

        let node = DocNode {
            id: raw.id,
            key: key.clone(),
            parent,
            name: raw.name.clone(),
            qualified_name: path.join("."),
            path: path.clone(),
            slug,
            kind,
            flags,
            comment,
            type_parts: ctx.types.render_opt(raw.type_.as_ref()),
            default_value: raw.default_value.clone(),
            type_parameters: ctx.types.type_parameters(&raw.type_parameters),
            signatures,
            children: Vec::new(),
            groups: Vec::new(),
            sources,
            source_url,
            extended_types: type_references(ctx, &raw.extended_types),
            implemented_types: type_references(ctx, &raw.implemented_types),
            extended_by: type_references(ctx, &raw.extended_by),
            implemented_by: type_references(ctx, &raw.implemented_by),
            overrides: raw.overwrites.as_ref().map(|t| type_reference(ctx, t)),
            inherited_from: raw.inherited_from.as_ref().map(|t| type_reference(ctx, t)),
            implementation_of: raw.implementation_of.as_ref().map(|t| type_reference(ctx, t)),
            alias_of: (kind == NodeKind::Reference)
                .then(|| reference_from_target(ctx.package, &raw.name, raw.target.as_ref(), None)),
        };

        let slot = ctx.arena.len();
        ctx.arena.push(node);
        ctx.registry.register(key, slot);

        let mut children = Vec::with_capacity(raw.children.len());
        let mut child_kinds = Vec::with_capacity(raw.children.len());
        for child in &raw.children {
            let id = Self::transform(ctx, child, Some(raw.id), &path)?;
            children.push(id);
            if let Some(child_slot) = ctx.registry.get(&ctx.key(id)) {
                child_kinds.push((id, ctx.arena[child_slot].kind));
            }
        }

        let groups = if raw.groups.is_empty() {
            derive_groups(ctx, &child_kinds)
        } else {
            raw.groups
                .iter()
                .map(|g| DocGroup {
                    title: g.title.clone(),
                    children: g.children.iter().map(|id| ctx.key(*id)).collect(),
                })
                .collect()
        };

        let node = &mut ctx.arena[slot];
        node.children = children;
        node.groups = groups;

        Ok(raw.id)
    }

    fn flags(raw: &RawNode, comment: Option<&DocComment>, signatures: &[DocSignature]) -> NodeFlags {
        let visibility = if raw.flags.is_private {
            Visibility::Private
        } else if raw.flags.is_protected {
            Visibility::Protected
        } else {
            Visibility::Public
        };

        let is_deprecated = comment.is_some_and(DocComment::is_deprecated)
            || (!signatures.is_empty()
                && signatures
                    .iter()
                    .all(|s| s.comment.as_ref().is_some_and(DocComment::is_deprecated)));

        NodeFlags {
            visibility,
            is_static: raw.flags.is_static,
            is_abstract: raw.flags.is_abstract,
            is_readonly: raw.flags.is_readonly || raw.flags.is_const,
            is_optional: raw.flags.is_optional,
            is_deprecated,
            is_inherited: raw.inherited_from.is_some(),
            is_override: raw.overwrites.is_some(),
            is_external: raw.flags.is_external,
            accessor: AccessorShape::from_presence(raw.get_signature.is_some(), raw.set_signature.is_some()),
        }
    }

    /// Call/constructor signatures, then index, get and set, with per-kind overload indices.
    fn signatures(ctx: &TransformContext<'_>, raw: &RawNode) -> Result<Vec<DocSignature>, PackageError> {
        let all = raw
            .signatures
            .iter()
            .chain(&raw.index_signatures)
            .chain(&raw.get_signature)
            .chain(&raw.set_signature);

        let mut counts = [0usize; 5];
        let mut out = Vec::new();
        for signature in all {
            let kind = SignatureKind::try_from(signature.kind).map_err(|code| PackageError::UnknownKind {
                package: ctx.package.to_string(),
                id: signature.id,
                name: signature.name.clone(),
                code,
            })?;
            let counter = &mut counts[kind as usize];
            let overload_index = *counter;
            *counter += 1;

            out.push(Self::signature(ctx, raw, signature, kind, overload_index));
        }
        Ok(out)
    }

    fn signature(
        ctx: &TransformContext<'_>,
        owner: &RawNode,
        raw: &RawSignature,
        kind: SignatureKind,
        overload_index: usize,
    ) -> DocSignature {
        let name = if raw.name.is_empty() { &owner.name } else { &raw.name };
        let mut rendered = ctx.signatures.render(name, kind, raw);
        for (param, raw_param) in rendered.parameters.iter_mut().zip(&raw.parameters) {
            param.summary = raw_param
                .comment
                .as_ref()
                .map(|c| comment::plain_text(&c.summary))
                .filter(|s| !s.is_empty());
        }

        DocSignature {
            id: raw.id,
            kind,
            name: name.clone(),
            overload_index,
            anchor: format!("{}-{}-{}", kind, sanitize(name), overload_index),
            comment: raw.comment.as_ref().map(|c| comment::convert(ctx.package, c)),
            type_parameters: rendered.type_parameters,
            parameters: rendered.parameters,
            return_parts: rendered.return_parts,
            parts: rendered.parts,
            sources: convert_sources(&raw.sources),
            source_url: first_url(&raw.sources),
            overrides: raw.overwrites.as_ref().map(|t| type_reference(ctx, t)),
            inherited_from: raw.inherited_from.as_ref().map(|t| type_reference(ctx, t)),
            implementation_of: raw.implementation_of.as_ref().map(|t| type_reference(ctx, t)),
        }
    }
}

/// Group children by kind in display order when the extractor supplied no groups.
fn derive_groups(ctx: &TransformContext<'_>, children: &[(u32, NodeKind)]) -> Vec<DocGroup> {
    if children.is_empty() {
        return Vec::new();
    }

    let mut groups: Vec<DocGroup> = GROUP_ORDER
        .iter()
        .filter_map(|(kind, title)| {
            let members: Vec<GlobalKey> = children
                .iter()
                .filter(|(_, k)| k == kind)
                .map(|(id, _)| ctx.key(*id))
                .collect();
            (!members.is_empty()).then(|| DocGroup {
                title: (*title).to_string(),
                children: members,
            })
        })
        .collect();

    let other: Vec<GlobalKey> = children
        .iter()
        .filter(|(_, k)| !GROUP_ORDER.iter().any(|(kind, _)| kind == k))
        .map(|(id, _)| ctx.key(*id))
        .collect();
    if !other.is_empty() {
        groups.push(DocGroup {
            title: "Other".to_string(),
            children: other,
        });
    }
    groups
}

/// A type used as an edge (extends, implements, overrides). Non-reference types keep
/// their rendered text as the name and stay unresolved.
fn type_reference(ctx: &TransformContext<'_>, ty: &RawType) -> DocReference {
    match ty {
        RawType::Reference {
            name,
            target,
            package,
            qualified_name,
            external_url,
            ..
        } => {
            let mut reference = reference_from_target(ctx.package, name, target.as_ref(), package.as_deref());
            if reference.qualified_name.is_none()
                && let Some(qualified) = qualified_name
            {
                reference = reference.with_qualified_name(qualified.clone());
            }
            if reference.key().is_none()
                && let Some(url) = external_url
            {
                reference = reference.with_external_url(url.clone());
            }
            reference
        }
        other => DocReference::named(flatten(&ctx.types.render(other))),
    }
}

fn type_references(ctx: &TransformContext<'_>, types: &[RawType]) -> Vec<DocReference> {
    types.iter().map(|t| type_reference(ctx, t)).collect()
}

fn convert_sources(sources: &[RawSource]) -> Vec<SourceLocation> {
    sources
        .iter()
        .map(|s| SourceLocation {
            file_name: s.file_name.clone(),
            line: s.line,
            character: s.character,
            url: s.url.clone().filter(|u| !u.is_empty()),
        })
        .collect()
}

fn first_url(sources: &[RawSource]) -> Option<String> {
    sources
        .iter()
        .find_map(|s| s.url.as_deref().filter(|u| !u.is_empty()))
        .map(str::to_string)
}
