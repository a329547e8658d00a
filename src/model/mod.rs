//! Normalized documentation graph types.

pub mod kind;
pub mod node;
pub mod part;
pub mod reference;

pub use kind::{NodeKind, SignatureKind, codes};
pub use node::{
    AccessorShape, DocBlockTag, DocComment, DocGroup, DocNode, DocParameter, DocSignature,
    DocTypeParameter, NodeFlags, SourceLocation, Visibility,
};
pub use part::{Part, flatten, references};
pub use reference::{DocReference, GlobalKey, ParseKeyError, ReferenceTarget};
