//! Raw reflection tree schema, as emitted by the extractor.
//!
//! These types mirror the on-disk JSON one-to-one and carry no derived data. Kind codes
//! stay numeric here; they are validated into closed enums during transformation.

use serde::{Deserialize, Serialize};

/// A declaration in the raw tree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawNode {
    pub id: u32,
    pub name: String,
    pub kind: u32,
    #[serde(default)]
    pub flags: RawFlags,
    #[serde(default)]
    pub comment: Option<RawComment>,
    #[serde(default)]
    pub children: Vec<RawNode>,
    #[serde(default)]
    pub groups: Vec<RawGroup>,
    #[serde(default)]
    pub sources: Vec<RawSource>,
    #[serde(default, rename = "type")]
    pub type_: Option<RawType>,
    #[serde(default, alias = "typeParameter")]
    pub type_parameters: Vec<RawTypeParameter>,
    #[serde(default)]
    pub signatures: Vec<RawSignature>,
    #[serde(default)]
    pub index_signatures: Vec<RawSignature>,
    #[serde(default)]
    pub get_signature: Option<RawSignature>,
    #[serde(default)]
    pub set_signature: Option<RawSignature>,
    #[serde(default)]
    pub extended_types: Vec<RawType>,
    #[serde(default)]
    pub implemented_types: Vec<RawType>,
    #[serde(default)]
    pub extended_by: Vec<RawType>,
    #[serde(default)]
    pub implemented_by: Vec<RawType>,
    #[serde(default)]
    pub overwrites: Option<RawType>,
    #[serde(default)]
    pub inherited_from: Option<RawType>,
    #[serde(default)]
    pub implementation_of: Option<RawType>,
    #[serde(default)]
    pub default_value: Option<String>,
    /// Alias target for re-export nodes.
    #[serde(default)]
    pub target: Option<RawTarget>,
}

/// Modifier flags. Absent flags are false.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawFlags {
    pub is_private: bool,
    pub is_protected: bool,
    pub is_static: bool,
    pub is_external: bool,
    pub is_optional: bool,
    pub is_rest: bool,
    pub is_abstract: bool,
    pub is_const: bool,
    pub is_readonly: bool,
}

/// Named bucket of child ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawGroup {
    pub title: String,
    #[serde(default)]
    pub children: Vec<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSource {
    pub file_name: String,
    #[serde(default)]
    pub line: u32,
    #[serde(default)]
    pub character: u32,
    #[serde(default)]
    pub url: Option<String>,
}

/// A call, constructor, index or accessor signature.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSignature {
    pub id: u32,
    pub name: String,
    pub kind: u32,
    #[serde(default)]
    pub flags: RawFlags,
    #[serde(default)]
    pub comment: Option<RawComment>,
    #[serde(default)]
    pub parameters: Vec<RawParameter>,
    #[serde(default, alias = "typeParameter")]
    pub type_parameters: Vec<RawTypeParameter>,
    #[serde(default, rename = "type")]
    pub type_: Option<RawType>,
    #[serde(default)]
    pub sources: Vec<RawSource>,
    #[serde(default)]
    pub overwrites: Option<RawType>,
    #[serde(default)]
    pub inherited_from: Option<RawType>,
    #[serde(default)]
    pub implementation_of: Option<RawType>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawParameter {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub flags: RawFlags,
    #[serde(default)]
    pub comment: Option<RawComment>,
    #[serde(default, rename = "type")]
    pub type_: Option<RawType>,
    #[serde(default)]
    pub default_value: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTypeParameter {
    #[serde(default)]
    pub id: u32,
    pub name: String,
    /// Constraint (`T extends X`).
    #[serde(default, rename = "type")]
    pub type_: Option<RawType>,
    #[serde(default)]
    pub default: Option<RawType>,
    #[serde(default)]
    pub flags: RawFlags,
}

/// Doc comment as a sequence of display parts plus tags.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawComment {
    pub summary: Vec<RawCommentPart>,
    pub block_tags: Vec<RawBlockTag>,
    pub modifier_tags: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum RawCommentPart {
    #[serde(rename = "text")]
    Text { text: String },
    #[serde(rename = "code")]
    Code { text: String },
    #[serde(rename = "inline-tag")]
    InlineTag {
        tag: String,
        text: String,
        #[serde(default)]
        target: Option<RawTarget>,
    },
    #[serde(rename = "relative-link")]
    RelativeLink { text: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawBlockTag {
    pub tag: String,
    #[serde(default)]
    pub content: Vec<RawCommentPart>,
}

/// Reference target: a local id in the same tree, or a symbol id elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawTarget {
    Id(u32),
    #[serde(rename_all = "camelCase")]
    Symbol {
        source_file_name: String,
        qualified_name: String,
    },
    /// Unresolvable URL string (inline links to external pages).
    Url(String),
}

/// Structured type, tagged by the `type` field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum RawType {
    Intrinsic {
        name: String,
    },
    #[serde(rename_all = "camelCase")]
    Reference {
        name: String,
        #[serde(default)]
        target: Option<RawTarget>,
        #[serde(default)]
        package: Option<String>,
        #[serde(default)]
        qualified_name: Option<String>,
        #[serde(default)]
        type_arguments: Vec<RawType>,
        #[serde(default)]
        external_url: Option<String>,
        #[serde(default)]
        refers_to_type_parameter: bool,
    },
    Union {
        types: Vec<RawType>,
    },
    Intersection {
        types: Vec<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    Array {
        element_type: Box<RawType>,
    },
    Tuple {
        #[serde(default)]
        elements: Vec<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    NamedTupleMember {
        name: String,
        #[serde(default)]
        is_optional: bool,
        element: Box<RawType>,
    },
    Literal {
        value: serde_json::Value,
    },
    Reflection {
        declaration: Box<RawNode>,
    },
    TypeOperator {
        operator: String,
        target: Box<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    IndexedAccess {
        object_type: Box<RawType>,
        index_type: Box<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    Query {
        query_type: Box<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    Conditional {
        check_type: Box<RawType>,
        extends_type: Box<RawType>,
        true_type: Box<RawType>,
        false_type: Box<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    Predicate {
        name: String,
        #[serde(default)]
        asserts: bool,
        #[serde(default)]
        target_type: Option<Box<RawType>>,
    },
    TemplateLiteral {
        head: String,
        #[serde(default)]
        tail: Vec<(RawType, String)>,
    },
    #[serde(rename_all = "camelCase")]
    Mapped {
        parameter: String,
        parameter_type: Box<RawType>,
        template_type: Box<RawType>,
        #[serde(default)]
        readonly_modifier: Option<String>,
        #[serde(default)]
        optional_modifier: Option<String>,
        #[serde(default)]
        name_type: Option<Box<RawType>>,
    },
    #[serde(rename_all = "camelCase")]
    Optional {
        element_type: Box<RawType>,
    },
    #[serde(rename_all = "camelCase")]
    Rest {
        element_type: Box<RawType>,
    },
    Inferred {
        name: String,
        #[serde(default)]
        constraint: Option<Box<RawType>>,
    },
    Unknown {
        name: String,
    },
}

impl RawNode {
    /// Pre-order iterator over this node and all descendants.
    pub fn walk(&self) -> impl Iterator<Item = &RawNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let node = stack.pop()?;
            stack.extend(node.children.iter().rev());
            Some(node)
        })
    }

    /// Every source file name mentioned by this subtree, including signature sources.
    pub fn source_file_names(&self) -> impl Iterator<Item = &str> {
        self.walk().flat_map(|node| {
            let signatures = node
                .signatures
                .iter()
                .chain(node.get_signature.iter())
                .chain(node.set_signature.iter());
            node.sources
                .iter()
                .chain(signatures.flat_map(|s| s.sources.iter()))
                .map(|s| s.file_name.as_str())
        })
    }
}
