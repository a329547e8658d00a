//! MCP tool handlers. Each handler formats engine results as plain text.

pub mod inspect_node;
pub mod list_packages;
pub mod resolve_reference;
pub mod search;

pub use inspect_node::*;
pub use list_packages::*;
pub use resolve_reference::*;
pub use search::*;

use rapidfuzz::distance::jaro_winkler;
use std::fmt::Write as _;

/// Minimum Jaro-Winkler similarity for a "did you mean" suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Up to five candidates closest to `wanted`, best first.
pub(crate) fn suggestions<'a>(wanted: &str, candidates: impl Iterator<Item = &'a str>) -> Vec<&'a str> {
    let wanted = wanted.to_lowercase();
    let mut scored: Vec<(&str, f64)> = candidates
        .map(|c| (c, jaro_winkler::similarity(wanted.chars(), c.to_lowercase().chars())))
        .filter(|(_, score)| *score > SUGGESTION_THRESHOLD)
        .collect();
    scored.sort_by(|a, b| b.1.total_cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    scored.into_iter().take(5).map(|(c, _)| c).collect()
}

/// "X not found" message with suggestions appended when there are any.
pub(crate) fn not_found(what: &str, wanted: &str, suggestions: &[&str]) -> String {
    let mut message = format!("{what} '{wanted}' not found.");
    if !suggestions.is_empty() {
        message.push_str(" Did you mean one of these?\n\n");
        for suggestion in suggestions {
            let _ = writeln!(message, "• `{suggestion}`");
        }
    }
    message
}
