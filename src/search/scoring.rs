//! Search match tiers and relevance scoring.

use super::index::DocSearchEntry;
use super::tokenize::tokenize;
use serde::Serialize;

/// How a query matched an entry. Higher tiers rank first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchTier {
    Summary,
    Token,
    QualifiedName,
    Exact,
}

/// Calculate simple text relevance score.
///
/// Returns a score based on how well the query matches the text:
/// - 100: Exact match
/// - 50: Text starts with query
/// - 10: Text contains query
/// - None: No match
pub fn calculate_relevance(text: &str, query: &str) -> Option<u32> {
    if text == query {
        Some(100)
    } else if text.starts_with(query) {
        Some(50)
    } else if text.contains(query) {
        Some(10)
    } else {
        None
    }
}

/// A query prepared once for matching against many entries.
#[derive(Debug, Clone)]
pub struct PreparedQuery {
    lower: String,
    tokens: Vec<String>,
}

impl PreparedQuery {
    /// Returns `None` for empty or whitespace-only queries.
    pub fn new(query: &str) -> Option<Self> {
        let trimmed = query.trim();
        if trimmed.is_empty() {
            return None;
        }
        Some(Self {
            lower: trimmed.to_lowercase(),
            tokens: tokenize(trimmed),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.lower
    }

    /// Best tier at which this query matches `entry`, if any.
    pub fn tier(&self, entry: &DocSearchEntry) -> Option<MatchTier> {
        let q = self.lower.as_str();
        let name = entry.name.to_lowercase();
        let aliases: Vec<String> = entry.aliases.iter().map(|a| a.to_lowercase()).collect();

        if name == q || aliases.iter().any(|a| a == q) {
            return Some(MatchTier::Exact);
        }
        if name.contains(q)
            || entry.qualified_name.to_lowercase().contains(q)
            || aliases.iter().any(|a| a.contains(q))
        {
            return Some(MatchTier::QualifiedName);
        }
        if entry.tokens.iter().any(|t| t.contains(q)) || self.all_tokens_match(entry) {
            return Some(MatchTier::Token);
        }
        if entry.summary.to_lowercase().contains(q) {
            return Some(MatchTier::Summary);
        }
        None
    }

    /// Multi-word queries match when every query token prefixes some entry token.
    fn all_tokens_match(&self, entry: &DocSearchEntry) -> bool {
        !self.tokens.is_empty()
            && self
                .tokens
                .iter()
                .all(|q| entry.tokens.iter().any(|t| t.starts_with(q.as_str())))
    }

    /// Prefix relevance of the best-matching name, alias or qualified name.
    pub fn relevance(&self, entry: &DocSearchEntry) -> u32 {
        let q = self.lower.as_str();
        std::iter::once(entry.name.as_str())
            .chain(entry.aliases.iter().map(String::as_str))
            .chain(std::iter::once(entry.qualified_name.as_str()))
            .filter_map(|text| calculate_relevance(&text.to_lowercase(), q))
            .max()
            .unwrap_or(0)
    }
}
