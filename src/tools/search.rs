//! Ranked search handler.

use super::{not_found, suggestions};
use crate::engine::DocsEngine;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct SearchRequest {
    /// Search query term (case-insensitive substring)
    pub query: String,
    /// Package to search within; omit to search every package
    #[serde(default)]
    pub package: Option<String>,
    /// Maximum number of results to return (default: 10)
    #[serde(default = "default_limit")]
    pub limit: Option<usize>,
}

fn default_limit() -> Option<usize> {
    Some(10)
}

/// Execute a search and format the ranked hits.
pub fn handle_search(engine: &DocsEngine, request: &SearchRequest) -> Result<String, String> {
    if let Some(package) = request.package.as_deref()
        && engine.package(package).is_none()
    {
        let names = engine.collection().package_names();
        return Err(not_found("Package", package, &suggestions(package, names)));
    }

    let hits = engine.search(&request.query, request.package.as_deref());
    let scope = request
        .package
        .as_deref()
        .map(|p| format!(" in '{p}'"))
        .unwrap_or_default();

    if hits.is_empty() {
        let mut msg = format!("No results found for '{}'{}.\n\n", request.query, scope);
        msg.push_str("Search tips:\n");
        msg.push_str("• Try a shorter or more general term\n");
        msg.push_str("• Names split on case: 'server' matches 'HTTPServer'\n");
        msg.push_str("• Omit the package to search all packages\n");
        return Ok(msg);
    }

    let limit = request.limit.unwrap_or(10);
    let mut output = format!("Search results for '{}'{}:\n\n", request.query, scope);
    for (idx, hit) in hits.iter().take(limit).enumerate() {
        let entry = hit.entry;
        let _ = writeln!(
            output,
            "{}. `{}` ({}) - {}/{} [{:?} match]",
            idx + 1,
            entry.qualified_name,
            entry.kind.group_title(),
            entry.package,
            entry.slug,
            hit.tier
        );
        if !entry.aliases.is_empty() {
            let _ = writeln!(output, "   also exported as: {}", entry.aliases.join(", "));
        }
        if !entry.summary.is_empty() {
            let _ = writeln!(output, "   {}", entry.summary);
        }
        output.push('\n');
    }

    if hits.len() > limit {
        let _ = writeln!(output, "... and {} more results", hits.len() - limit);
    }

    Ok(output)
}
