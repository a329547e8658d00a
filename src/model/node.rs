//! Normalized documentation nodes and signatures.

use super::kind::{NodeKind, SignatureKind};
use super::part::{Part, flatten};
use super::reference::{DocReference, GlobalKey};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Private,
}

/// Accessor shape, derived from which accessor signatures are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessorShape {
    GetOnly,
    SetOnly,
    GetSet,
}

impl AccessorShape {
    pub fn from_presence(has_get: bool, has_set: bool) -> Option<Self> {
        match (has_get, has_set) {
            (true, true) => Some(Self::GetSet),
            (true, false) => Some(Self::GetOnly),
            (false, true) => Some(Self::SetOnly),
            (false, false) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeFlags {
    pub visibility: Visibility,
    pub is_static: bool,
    pub is_abstract: bool,
    pub is_readonly: bool,
    pub is_optional: bool,
    pub is_deprecated: bool,
    pub is_inherited: bool,
    pub is_override: bool,
    pub is_external: bool,
    pub accessor: Option<AccessorShape>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocBlockTag {
    /// Tag name including the `@`.
    pub tag: String,
    pub text: String,
}

/// Doc comment with markdown summary text and tags.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocComment {
    pub summary: String,
    pub block_tags: Vec<DocBlockTag>,
    pub modifier_tags: Vec<String>,
    /// Targets of inline `{@link}` tags.
    pub links: Vec<DocReference>,
}

impl DocComment {
    pub fn tag(&self, name: &str) -> Option<&str> {
        self.block_tags
            .iter()
            .find(|t| t.tag == name)
            .map(|t| t.text.as_str())
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.block_tags.iter().any(|t| t.tag == name) || self.modifier_tags.iter().any(|t| t == name)
    }

    pub fn is_deprecated(&self) -> bool {
        self.has_tag("@deprecated")
    }

    /// First paragraph of the summary.
    pub fn first_paragraph(&self) -> &str {
        self.summary
            .split("\n\n")
            .map(str::trim)
            .find(|p| !p.is_empty())
            .unwrap_or("")
    }

    /// Names declared with `@alias` block tags.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.block_tags
            .iter()
            .filter(|t| t.tag == "@alias")
            .map(|t| t.text.trim())
            .filter(|a| !a.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.summary.trim().is_empty() && self.block_tags.is_empty() && self.modifier_tags.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    pub file_name: String,
    pub line: u32,
    pub character: u32,
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocTypeParameter {
    pub name: String,
    pub constraint: Vec<Part>,
    pub default: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocParameter {
    pub name: String,
    pub is_optional: bool,
    pub is_rest: bool,
    pub type_parts: Vec<Part>,
    pub default_value: Option<String>,
    pub summary: Option<String>,
}

/// One call, constructor, index or accessor signature of a node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocSignature {
    pub id: u32,
    pub kind: SignatureKind,
    pub name: String,
    /// Position among this node's signatures of the same kind.
    pub overload_index: usize,
    /// Stable in-page anchor built from kind, name and overload index.
    pub anchor: String,
    pub comment: Option<DocComment>,
    pub type_parameters: Vec<DocTypeParameter>,
    pub parameters: Vec<DocParameter>,
    pub return_parts: Vec<Part>,
    /// The whole rendered signature.
    pub parts: Vec<Part>,
    pub sources: Vec<SourceLocation>,
    pub source_url: Option<String>,
    pub overrides: Option<DocReference>,
    pub inherited_from: Option<DocReference>,
    pub implementation_of: Option<DocReference>,
}

impl DocSignature {
    pub fn text(&self) -> String {
        flatten(&self.parts)
    }

    pub fn type_parameter_names(&self) -> Vec<&str> {
        self.type_parameters.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn parameter_names(&self) -> Vec<&str> {
        self.parameters.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn has_source_url(&self) -> bool {
        self.source_url.as_deref().is_some_and(|u| !u.is_empty())
    }
}

/// One declaration in a package's documentation tree.
///
/// Nodes live in their package's arena; `children` are local ids of owned nodes and
/// `groups` hold global keys of those same children for categorized display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocNode {
    pub id: u32,
    pub key: GlobalKey,
    pub parent: Option<u32>,
    pub name: String,
    /// Name segments from the package root; empty for the root.
    pub path: Vec<String>,
    pub qualified_name: String,
    pub slug: String,
    pub kind: NodeKind,
    pub flags: NodeFlags,
    pub comment: Option<DocComment>,
    /// Declared type (property/variable type, alias target).
    pub type_parts: Vec<Part>,
    pub default_value: Option<String>,
    pub type_parameters: Vec<DocTypeParameter>,
    pub signatures: Vec<DocSignature>,
    pub children: Vec<u32>,
    pub groups: Vec<DocGroup>,
    pub sources: Vec<SourceLocation>,
    pub source_url: Option<String>,
    pub extended_types: Vec<DocReference>,
    pub implemented_types: Vec<DocReference>,
    pub extended_by: Vec<DocReference>,
    pub implemented_by: Vec<DocReference>,
    pub overrides: Option<DocReference>,
    pub inherited_from: Option<DocReference>,
    pub implementation_of: Option<DocReference>,
    /// For re-export nodes: the declaration this name aliases.
    pub alias_of: Option<DocReference>,
}

impl DocNode {
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    pub fn type_text(&self) -> String {
        flatten(&self.type_parts)
    }

    pub fn summary(&self) -> &str {
        self.comment.as_ref().map_or("", DocComment::first_paragraph)
    }

    pub fn has_source_url(&self) -> bool {
        self.source_url.as_deref().is_some_and(|u| !u.is_empty())
    }

    /// Every reference held by this node and its signatures, including type parts.
    pub fn references(&self) -> impl Iterator<Item = &DocReference> {
        let edges = self
            .extended_types
            .iter()
            .chain(&self.implemented_types)
            .chain(&self.extended_by)
            .chain(&self.implemented_by)
            .chain(&self.overrides)
            .chain(&self.inherited_from)
            .chain(&self.implementation_of)
            .chain(&self.alias_of);

        let type_refs = super::part::references(&self.type_parts).chain(
            self.type_parameters
                .iter()
                .flat_map(|t| super::part::references(&t.constraint).chain(super::part::references(&t.default))),
        );

        let signature_refs = self.signatures.iter().flat_map(|s| {
            super::part::references(&s.parts)
                .chain(&s.overrides)
                .chain(&s.inherited_from)
                .chain(&s.implementation_of)
        });

        let comment_refs = self.comment.iter().flat_map(|c| c.links.iter());

        edges.chain(type_refs).chain(signature_refs).chain(comment_refs)
    }
}

/// Named, ordered bucket of child keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocGroup {
    pub title: String,
    pub children: Vec<GlobalKey>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(true, true, Some(AccessorShape::GetSet))]
    #[case(true, false, Some(AccessorShape::GetOnly))]
    #[case(false, true, Some(AccessorShape::SetOnly))]
    #[case(false, false, None)]
    fn test_accessor_shape(
        #[case] get: bool,
        #[case] set: bool,
        #[case] expected: Option<AccessorShape>,
    ) {
        check!(AccessorShape::from_presence(get, set) == expected);
    }

    #[test]
    fn test_comment_helpers() {
        let comment = DocComment {
            summary: "\n\nFirst paragraph\nstill first.\n\nSecond.".into(),
            block_tags: vec![
                DocBlockTag { tag: "@alias".into(), text: " Thing ".into() },
                DocBlockTag { tag: "@deprecated".into(), text: "use Other".into() },
            ],
            modifier_tags: vec!["@beta".into()],
            links: vec![],
        };

        check!(comment.first_paragraph() == "First paragraph\nstill first.");
        check!(comment.is_deprecated());
        check!(comment.has_tag("@beta"));
        check!(comment.tag("@deprecated") == Some("use Other"));
        check!(comment.aliases().collect::<Vec<_>>() == vec!["Thing"]);
    }
}
