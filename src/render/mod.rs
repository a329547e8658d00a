//! Link-aware rendering of raw types and signatures into [`Part`] sequences.

mod signatures;
mod types;

pub use signatures::{RenderedSignature, SignatureRenderer};
pub use types::TypeRenderer;

use crate::manifest::RawTarget;
use crate::model::{DocReference, GlobalKey, Part};

/// Append-only part buffer shared by the type and signature renderers.
#[derive(Debug, Default, Clone)]
pub struct PartsBuilder {
    parts: Vec<Part>,
}

impl PartsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&mut self, text: impl Into<String>) -> &mut Self {
        let text = text.into();
        if !text.is_empty() {
            self.parts.push(Part::Text(text));
        }
        self
    }

    pub fn punct(&mut self, punct: impl Into<String>) -> &mut Self {
        self.parts.push(Part::Punctuation(punct.into()));
        self
    }

    pub fn space(&mut self) -> &mut Self {
        self.parts.push(Part::Whitespace(" ".into()));
        self
    }

    /// Punctuation padded with single spaces, as in ` | ` or ` => `.
    pub fn spaced(&mut self, punct: &str) -> &mut Self {
        self.space().punct(punct).space()
    }

    /// A keyword followed by a space, as in `keyof ` or `new `.
    pub fn keyword(&mut self, keyword: &str) -> &mut Self {
        self.text(keyword).space()
    }

    pub fn reference(&mut self, reference: DocReference) -> &mut Self {
        self.parts.push(Part::Reference(reference));
        self
    }

    pub fn extend(&mut self, parts: impl IntoIterator<Item = Part>) -> &mut Self {
        self.parts.extend(parts);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn finish(self) -> Vec<Part> {
        self.parts
    }
}

/// Build a reference from an extractor target.
///
/// Numeric ids are keys in the declaring package, symbol ids carry a qualified name for
/// later lookup, and URL targets are external.
pub fn reference_from_target(
    package: &str,
    name: &str,
    target: Option<&RawTarget>,
    package_hint: Option<&str>,
) -> DocReference {
    let mut reference = DocReference::named(name);
    if let Some(hint) = package_hint {
        reference = reference.with_package(hint);
    }

    match target {
        Some(RawTarget::Id(id)) => reference.with_key(GlobalKey::new(package, *id)),
        Some(RawTarget::Symbol { qualified_name, .. }) => {
            reference.with_qualified_name(qualified_name.clone())
        }
        Some(RawTarget::Url(url)) => reference.with_external_url(url.clone()),
        None => reference,
    }
}
