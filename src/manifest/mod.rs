//! Extractor input: the run summary and raw per-package reflection trees.

pub mod reader;
pub mod reflection;
pub mod summary;

pub use reader::{LoadedPackage, ManifestReader, parse_manifest, parse_package};
pub use reflection::{
    RawBlockTag, RawComment, RawCommentPart, RawFlags, RawGroup, RawNode, RawParameter,
    RawSignature, RawSource, RawTarget, RawType, RawTypeParameter,
};
pub use summary::{GeneratorInfo, Manifest, PackageManifestEntry};
