pub mod config;
pub mod engine;
pub mod error;
pub mod identity;
pub mod manifest;
pub mod model;
pub mod propagate;
pub mod render;
pub mod resolve;
pub mod search;
pub mod server;
pub mod slug;
pub mod tools;
pub mod tracing;
pub mod transform;

pub use config::EngineOptions;
pub use engine::{DocCollection, DocPackageModel, DocsEngine, PackageStats, PackageSummary};
pub use error::{EngineError, PackageError, PackageWarning};
pub use model::{DocNode, DocReference, DocSignature, GlobalKey, NodeKind, Part};
pub use resolve::Resolution;
pub use search::{DocSearchEntry, MatchTier, SearchHit};
pub use server::DocServer;
