//! Closed kind enumerations and their extractor kind codes.

use rmcp::schemars;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Declaration kind of a [`DocNode`](super::DocNode).
///
/// DO NOT add doc comments to individual variants - this causes schemars to generate
/// `oneOf` schemas instead of simple `enum` arrays, breaking MCP client enum handling.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    schemars::JsonSchema,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    Project,
    Module,
    Namespace,
    Enum,
    EnumMember,
    Variable,
    Function,
    Class,
    Interface,
    Constructor,
    Property,
    Method,
    TypeLiteral,
    TypeParameter,
    Accessor,
    TypeAlias,
    Reference,
}

/// Kind of a [`DocSignature`](super::DocSignature).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SignatureKind {
    Call,
    Constructor,
    Index,
    Get,
    Set,
}

/// Kind codes as written by the extractor. Bit flags, one per kind.
pub mod codes {
    pub const PROJECT: u32 = 0x1;
    pub const MODULE: u32 = 0x2;
    pub const NAMESPACE: u32 = 0x4;
    pub const ENUM: u32 = 0x8;
    pub const ENUM_MEMBER: u32 = 0x10;
    pub const VARIABLE: u32 = 0x20;
    pub const FUNCTION: u32 = 0x40;
    pub const CLASS: u32 = 0x80;
    pub const INTERFACE: u32 = 0x100;
    pub const CONSTRUCTOR: u32 = 0x200;
    pub const PROPERTY: u32 = 0x400;
    pub const METHOD: u32 = 0x800;
    pub const CALL_SIGNATURE: u32 = 0x1000;
    pub const INDEX_SIGNATURE: u32 = 0x2000;
    pub const CONSTRUCTOR_SIGNATURE: u32 = 0x4000;
    pub const PARAMETER: u32 = 0x8000;
    pub const TYPE_LITERAL: u32 = 0x1_0000;
    pub const TYPE_PARAMETER: u32 = 0x2_0000;
    pub const ACCESSOR: u32 = 0x4_0000;
    pub const GET_SIGNATURE: u32 = 0x8_0000;
    pub const SET_SIGNATURE: u32 = 0x10_0000;
    pub const TYPE_ALIAS: u32 = 0x20_0000;
    pub const REFERENCE: u32 = 0x40_0000;
}

const NODE_KINDS: &[(u32, NodeKind)] = &[
    (codes::PROJECT, NodeKind::Project),
    (codes::MODULE, NodeKind::Module),
    (codes::NAMESPACE, NodeKind::Namespace),
    (codes::ENUM, NodeKind::Enum),
    (codes::ENUM_MEMBER, NodeKind::EnumMember),
    (codes::VARIABLE, NodeKind::Variable),
    (codes::FUNCTION, NodeKind::Function),
    (codes::CLASS, NodeKind::Class),
    (codes::INTERFACE, NodeKind::Interface),
    (codes::CONSTRUCTOR, NodeKind::Constructor),
    (codes::PROPERTY, NodeKind::Property),
    (codes::METHOD, NodeKind::Method),
    (codes::TYPE_LITERAL, NodeKind::TypeLiteral),
    (codes::TYPE_PARAMETER, NodeKind::TypeParameter),
    (codes::ACCESSOR, NodeKind::Accessor),
    (codes::TYPE_ALIAS, NodeKind::TypeAlias),
    (codes::REFERENCE, NodeKind::Reference),
];

/// Display buckets in rendering order, used when the extractor supplies no groups.
pub(crate) const GROUP_ORDER: &[(NodeKind, &str)] = &[
    (NodeKind::Module, "Modules"),
    (NodeKind::Namespace, "Namespaces"),
    (NodeKind::Enum, "Enumerations"),
    (NodeKind::Class, "Classes"),
    (NodeKind::Interface, "Interfaces"),
    (NodeKind::TypeAlias, "Type Aliases"),
    (NodeKind::Function, "Functions"),
    (NodeKind::Variable, "Variables"),
    (NodeKind::Constructor, "Constructors"),
    (NodeKind::Property, "Properties"),
    (NodeKind::Accessor, "Accessors"),
    (NodeKind::Method, "Methods"),
    (NodeKind::EnumMember, "Enumeration Members"),
    (NodeKind::Reference, "References"),
];

impl TryFrom<u32> for NodeKind {
    type Error = u32;

    /// Rejects unknown codes and codes that describe signatures or parameters.
    fn try_from(code: u32) -> Result<Self, Self::Error> {
        NODE_KINDS
            .iter()
            .find(|(c, _)| *c == code)
            .map(|(_, kind)| *kind)
            .ok_or(code)
    }
}

impl TryFrom<u32> for SignatureKind {
    type Error = u32;

    fn try_from(code: u32) -> Result<Self, Self::Error> {
        match code {
            codes::CALL_SIGNATURE => Ok(Self::Call),
            codes::CONSTRUCTOR_SIGNATURE => Ok(Self::Constructor),
            codes::INDEX_SIGNATURE => Ok(Self::Index),
            codes::GET_SIGNATURE => Ok(Self::Get),
            codes::SET_SIGNATURE => Ok(Self::Set),
            other => Err(other),
        }
    }
}

impl NodeKind {
    pub fn code(self) -> u32 {
        NODE_KINDS
            .iter()
            .find(|(_, kind)| *kind == self)
            .map_or(0, |(code, _)| *code)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Project => "project",
            Self::Module => "module",
            Self::Namespace => "namespace",
            Self::Enum => "enum",
            Self::EnumMember => "enum_member",
            Self::Variable => "variable",
            Self::Function => "function",
            Self::Class => "class",
            Self::Interface => "interface",
            Self::Constructor => "constructor",
            Self::Property => "property",
            Self::Method => "method",
            Self::TypeLiteral => "type_literal",
            Self::TypeParameter => "type_parameter",
            Self::Accessor => "accessor",
            Self::TypeAlias => "type",
            Self::Reference => "reference",
        }
    }

    /// Plural display title for grouped listings.
    pub fn group_title(self) -> &'static str {
        GROUP_ORDER
            .iter()
            .find(|(kind, _)| *kind == self)
            .map_or("Other", |(_, title)| title)
    }

    /// Kinds whose direct children are exported declarations.
    pub fn is_container(self) -> bool {
        matches!(self, Self::Project | Self::Module | Self::Namespace)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl SignatureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Call => "call",
            Self::Constructor => "constructor",
            Self::Index => "index",
            Self::Get => "get",
            Self::Set => "set",
        }
    }
}

impl fmt::Display for SignatureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;
    use rstest::rstest;

    #[rstest]
    #[case(codes::CLASS, NodeKind::Class)]
    #[case(codes::TYPE_ALIAS, NodeKind::TypeAlias)]
    #[case(codes::REFERENCE, NodeKind::Reference)]
    #[case(codes::PROJECT, NodeKind::Project)]
    fn test_known_codes_round_trip(#[case] code: u32, #[case] kind: NodeKind) {
        check!(NodeKind::try_from(code) == Ok(kind));
        check!(kind.code() == code);
    }

    #[rstest]
    #[case(0)]
    #[case(3)]
    #[case(codes::CALL_SIGNATURE)]
    #[case(codes::PARAMETER)]
    #[case(0x80_0000)]
    fn test_unknown_or_non_node_codes_rejected(#[case] code: u32) {
        check!(NodeKind::try_from(code) == Err(code));
    }

    #[test]
    fn test_signature_codes() {
        check!(SignatureKind::try_from(codes::GET_SIGNATURE) == Ok(SignatureKind::Get));
        check!(SignatureKind::try_from(codes::METHOD) == Err(codes::METHOD));
    }

    #[rstest]
    #[case(NodeKind::Property, "Properties")]
    #[case(NodeKind::Reference, "References")]
    #[case(NodeKind::Project, "Other")]
    #[case(NodeKind::TypeLiteral, "Other")]
    #[case(NodeKind::TypeParameter, "Other")]
    fn test_group_titles(#[case] kind: NodeKind, #[case] title: &str) {
        check!(kind.group_title() == title);
    }
}
