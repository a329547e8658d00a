//! Full-text search over documentation nodes.
//!
//! Entries are built once per collection. Queries are case-insensitive substring
//! matches, ranked by match tier and then by prefix relevance and path length.

pub(crate) mod index;
pub(crate) mod scoring;
pub(crate) mod tokenize;

pub use index::{DEFAULT_SUMMARY_BUDGET, DocSearchEntry, SearchHit, SearchIndex, snippet};
pub use scoring::{MatchTier, PreparedQuery, calculate_relevance};
pub use tokenize::{tokenize, tokenize_all};
