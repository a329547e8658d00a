//! Search entries and the ranked substring search over them.

use super::scoring::{MatchTier, PreparedQuery};
use super::tokenize::tokenize_all;
use crate::engine::DocCollection;
use crate::model::{GlobalKey, NodeKind};
use crate::resolve::ReferenceResolver;
use ahash::AHashMap;
use serde::Serialize;
use std::cmp::Reverse;
use std::time::Instant;

/// Default summary snippet length, in characters.
pub const DEFAULT_SUMMARY_BUDGET: usize = 200;

/// One searchable node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DocSearchEntry {
    pub key: GlobalKey,
    pub slug: String,
    pub name: String,
    pub qualified_name: String,
    pub package: String,
    pub package_version: Option<String>,
    pub kind: NodeKind,
    pub summary: String,
    pub aliases: Vec<String>,
    pub tokens: Vec<String>,
    /// Number of path segments; shorter paths rank first among equals.
    #[serde(skip)]
    pub depth: usize,
}

/// A matched entry with its ranking inputs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchHit<'a> {
    pub entry: &'a DocSearchEntry,
    pub tier: MatchTier,
    pub relevance: u32,
}

/// All search entries of a collection, in manifest order then tree order.
#[derive(Debug, Clone, Default)]
pub struct SearchIndex {
    entries: Vec<DocSearchEntry>,
    package_order: AHashMap<String, usize>,
    home_package: Option<String>,
}

impl SearchIndex {
    /// Build entries for every non-root, non-alias node.
    ///
    /// Names of re-export aliases are attached to the entry of the declaration they
    /// resolve to.
    pub fn build(collection: &DocCollection, summary_budget: usize) -> Self {
        let start = Instant::now();
        let resolver = ReferenceResolver::new(collection);

        let mut alias_names: AHashMap<GlobalKey, Vec<String>> = AHashMap::new();
        for package in collection.packages() {
            for alias in package.nodes_by_kind(NodeKind::Reference) {
                if let Some(target) = resolver.follow_alias(&alias.key)
                    && target != alias.key
                {
                    alias_names.entry(target).or_default().push(alias.name.clone());
                }
            }
        }

        let mut entries = Vec::new();
        let mut package_order = AHashMap::new();
        for (position, package) in collection.packages().iter().enumerate() {
            package_order.insert(package.name().to_string(), position);

            for node in package.nodes() {
                if node.is_root() || node.kind == NodeKind::Reference {
                    continue;
                }

                let mut aliases: Vec<String> = Vec::new();
                let declared = node
                    .comment
                    .iter()
                    .flat_map(|c| c.aliases())
                    .map(str::to_string);
                let reexported = alias_names.get(&node.key).into_iter().flatten().cloned();
                for alias in declared.chain(reexported) {
                    if alias != node.name && !aliases.contains(&alias) {
                        aliases.push(alias);
                    }
                }

                let tokens = tokenize_all(
                    [node.name.as_str(), node.qualified_name.as_str()]
                        .into_iter()
                        .chain(aliases.iter().map(String::as_str)),
                );

                entries.push(DocSearchEntry {
                    key: node.key.clone(),
                    slug: node.slug.clone(),
                    name: node.name.clone(),
                    qualified_name: node.qualified_name.clone(),
                    package: package.name().to_string(),
                    package_version: package.version().map(str::to_string),
                    kind: node.kind,
                    summary: snippet(node.summary(), summary_budget),
                    aliases,
                    tokens,
                    depth: node.path.len(),
                });
            }
        }

        tracing::info!(
            "Built search index: {} entries across {} packages in {:?}",
            entries.len(),
            package_order.len(),
            start.elapsed()
        );

        Self {
            entries,
            package_order,
            home_package: collection.home_package().map(str::to_string),
        }
    }

    pub fn entries(&self) -> &[DocSearchEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries_for<'a>(&'a self, package: &'a str) -> impl Iterator<Item = &'a DocSearchEntry> {
        self.entries.iter().filter(move |e| e.package == package)
    }

    /// Case-insensitive ranked search.
    ///
    /// Without a package filter, entries sharing `(slug, kind)` across packages collapse
    /// to the home package's entry, or else the earliest package's.
    pub fn search(&self, query: &str, package_filter: Option<&str>) -> Vec<SearchHit<'_>> {
        let Some(query) = PreparedQuery::new(query) else {
            return Vec::new();
        };

        let mut hits: Vec<SearchHit<'_>> = self
            .entries
            .iter()
            .filter(|e| package_filter.is_none_or(|p| e.package == p))
            .filter_map(|entry| {
                query.tier(entry).map(|tier| SearchHit {
                    entry,
                    tier,
                    relevance: query.relevance(entry),
                })
            })
            .collect();

        if package_filter.is_none() {
            hits = self.dedupe(hits);
        }

        hits.sort_by(|a, b| {
            let rank = |hit: &SearchHit<'_>| {
                (
                    Reverse(hit.tier),
                    Reverse(hit.relevance),
                    hit.entry.depth,
                    !self.is_home(&hit.entry.package),
                    self.position(&hit.entry.package),
                )
            };
            rank(a)
                .cmp(&rank(b))
                .then_with(|| a.entry.slug.cmp(&b.entry.slug))
        });

        tracing::debug!("Search '{}' matched {} entries", query.as_str(), hits.len());
        hits
    }

    fn dedupe<'a>(&self, hits: Vec<SearchHit<'a>>) -> Vec<SearchHit<'a>> {
        let mut kept: Vec<SearchHit<'a>> = Vec::with_capacity(hits.len());
        let mut seen: AHashMap<(&'a str, NodeKind), usize> = AHashMap::new();

        for hit in hits {
            let identity = (hit.entry.slug.as_str(), hit.entry.kind);
            match seen.get(&identity) {
                Some(&index) => {
                    if self.preferred(&hit.entry.package, &kept[index].entry.package) {
                        kept[index] = hit;
                    }
                }
                None => {
                    seen.insert(identity, kept.len());
                    kept.push(hit);
                }
            }
        }
        kept
    }

    /// Whether `candidate`'s entry should replace `current`'s for the same symbol.
    fn preferred(&self, candidate: &str, current: &str) -> bool {
        if self.is_home(current) {
            return false;
        }
        self.is_home(candidate) || self.position(candidate) < self.position(current)
    }

    fn is_home(&self, package: &str) -> bool {
        self.home_package.as_deref() == Some(package)
    }

    fn position(&self, package: &str) -> usize {
        self.package_order.get(package).copied().unwrap_or(usize::MAX)
    }
}

/// First paragraph flattened to one line and capped at `budget` characters.
pub fn snippet(summary: &str, budget: usize) -> String {
    let line = summary.split_whitespace().collect::<Vec<_>>().join(" ");
    match line.char_indices().nth(budget) {
        Some((cut, _)) => format!("{}…", line[..cut].trim_end()),
        None => line,
    }
}
