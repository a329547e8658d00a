use super::{not_found, suggestions};
use crate::engine::DocsEngine;
use crate::model::{DocNode, DocReference, NodeFlags, Visibility};
use crate::resolve::Resolution;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Parameters for inspect_node tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct InspectNodeRequest {
    /// Package containing the node
    pub package: String,
    /// Node slug (e.g. "client.send") or qualified name (e.g. "Client.send")
    pub target: String,
    /// Include the direct children listing (default: true)
    #[serde(default = "default_children")]
    pub include_children: bool,
}

fn default_children() -> bool {
    true
}

/// Describe one node: declaration, comment, groups and resolved relationships.
pub fn handle_inspect_node(engine: &DocsEngine, request: &InspectNodeRequest) -> Result<String, String> {
    let Some(package) = engine.package(&request.package) else {
        let names = engine.collection().package_names();
        return Err(not_found("Package", &request.package, &suggestions(&request.package, names)));
    };

    let node = package
        .node_by_slug(&request.target)
        .or_else(|| package.node_by_qualified_name(&request.target))
        .ok_or_else(|| {
            let candidates = package
                .nodes()
                .iter()
                .flat_map(|n| [n.slug.as_str(), n.qualified_name.as_str()]);
            not_found("Node", &request.target, &suggestions(&request.target, candidates))
        })?;

    let mut output = String::new();
    let name = if node.is_root() { package.name() } else { node.qualified_name.as_str() };
    let _ = writeln!(output, "# {} `{}`", node.kind, name);
    let _ = writeln!(output, "Slug: {}/{}", package.name(), node.slug);

    let flags = describe_flags(&node.flags);
    if !flags.is_empty() {
        let _ = writeln!(output, "Flags: {}", flags.join(", "));
    }
    if let Some(url) = node.source_url.as_deref() {
        let _ = writeln!(output, "Source: {url}");
    } else if let Some(source) = node.sources.first() {
        let _ = writeln!(output, "Source: {}:{}", source.file_name, source.line);
    }

    if !node.signatures.is_empty() {
        output.push_str("\n## Signatures\n\n```ts\n");
        for signature in &node.signatures {
            let _ = writeln!(output, "{}", signature.text());
        }
        output.push_str("```\n");
    } else if !node.type_parts.is_empty() {
        let default = node
            .default_value
            .as_deref()
            .map(|v| format!(" = {v}"))
            .unwrap_or_default();
        let _ = writeln!(output, "\nType: `{}`{}", node.type_text(), default);
    }

    if let Some(comment) = node.comment.as_ref().filter(|c| !c.is_empty()) {
        output.push('\n');
        if !comment.summary.is_empty() {
            let _ = writeln!(output, "{}", comment.summary);
        }
        for tag in &comment.block_tags {
            let _ = writeln!(output, "{} {}", tag.tag, tag.text);
        }
    }

    let relationships = [
        ("Extends", node.extended_types.iter().collect::<Vec<_>>()),
        ("Implements", node.implemented_types.iter().collect()),
        ("Extended by", node.extended_by.iter().collect()),
        ("Implemented by", node.implemented_by.iter().collect()),
        ("Overrides", node.overrides.iter().collect()),
        ("Inherited from", node.inherited_from.iter().collect()),
        ("Implementation of", node.implementation_of.iter().collect()),
        ("Alias of", node.alias_of.iter().collect()),
    ];
    let mut wrote_header = false;
    for (label, references) in relationships {
        if references.is_empty() {
            continue;
        }
        if !wrote_header {
            output.push_str("\n## Relationships\n\n");
            wrote_header = true;
        }
        let targets: Vec<String> = references
            .into_iter()
            .map(|r| describe_reference(engine, package.name(), r))
            .collect();
        let _ = writeln!(output, "{label}: {}", targets.join(", "));
    }

    if request.include_children {
        write_groups(engine, node, &mut output);
    }

    Ok(output)
}

fn write_groups(engine: &DocsEngine, node: &DocNode, output: &mut String) {
    for group in &node.groups {
        let _ = writeln!(output, "\n## {} ({})\n", group.title, group.children.len());
        for key in &group.children {
            if let Some(child) = engine.node_by_key(key) {
                let summary = child.summary();
                if summary.is_empty() {
                    let _ = writeln!(output, "• `{}` ({})", child.name, child.slug);
                } else {
                    let first_line = summary.lines().next().unwrap_or_default();
                    let _ = writeln!(output, "• `{}` ({}) - {}", child.name, child.slug, first_line);
                }
            }
        }
    }
}

fn describe_reference(engine: &DocsEngine, package: &str, reference: &DocReference) -> String {
    match engine.resolve_reference(package, reference) {
        Resolution::Internal { package, slug, .. } => format!("`{}` ({package}/{slug})", reference.name),
        Resolution::External { url } => format!("`{}` <{url}>", reference.name),
        Resolution::Unresolved { .. } => format!("`{}` (unresolved)", reference.lookup_name()),
    }
}

fn describe_flags(flags: &NodeFlags) -> Vec<&'static str> {
    let mut out = Vec::new();
    match flags.visibility {
        Visibility::Public => {}
        Visibility::Protected => out.push("protected"),
        Visibility::Private => out.push("private"),
    }
    let named = [
        (flags.is_static, "static"),
        (flags.is_abstract, "abstract"),
        (flags.is_readonly, "readonly"),
        (flags.is_optional, "optional"),
        (flags.is_deprecated, "deprecated"),
        (flags.is_inherited, "inherited"),
        (flags.is_override, "override"),
        (flags.is_external, "external"),
    ];
    out.extend(named.into_iter().filter(|(set, _)| *set).map(|(_, name)| name));
    out
}
