//! Link-aware display parts for rendered types and signatures.

use super::reference::DocReference;
use serde::{Deserialize, Serialize};

/// One display token. Reference parts become links once resolution has run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Part {
    Text(String),
    Punctuation(String),
    Whitespace(String),
    Reference(DocReference),
}

impl Part {
    pub fn text(&self) -> &str {
        match self {
            Self::Text(s) | Self::Punctuation(s) | Self::Whitespace(s) => s,
            Self::Reference(reference) => &reference.name,
        }
    }

    pub fn as_reference(&self) -> Option<&DocReference> {
        match self {
            Self::Reference(reference) => Some(reference),
            _ => None,
        }
    }
}

/// Join parts into plain text for search tokens and non-interactive contexts.
pub fn flatten(parts: &[Part]) -> String {
    parts.iter().map(Part::text).collect()
}

/// All reference parts, in display order.
pub fn references(parts: &[Part]) -> impl Iterator<Item = &DocReference> {
    parts.iter().filter_map(Part::as_reference)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::check;

    #[test]
    fn test_flatten_uses_reference_names() {
        let parts = vec![
            Part::Reference(DocReference::named("Map")),
            Part::Punctuation("<".into()),
            Part::Text("string".into()),
            Part::Punctuation(",".into()),
            Part::Whitespace(" ".into()),
            Part::Reference(DocReference::named("Foo")),
            Part::Punctuation(">".into()),
        ];

        check!(flatten(&parts) == "Map<string, Foo>");
        check!(references(&parts).count() == 2);
    }
}
