use super::{not_found, suggestions};
use crate::engine::DocsEngine;
use crate::model::{DocReference, GlobalKey};
use crate::resolve::Resolution;
use rmcp::schemars;
use serde::Deserialize;
use std::fmt::Write as _;

/// Parameters for resolve_reference tool
#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ResolveReferenceRequest {
    /// Package the reference is written in
    pub package: String,
    /// Symbol name as written (e.g. "Client")
    pub name: String,
    /// Fully qualified symbol name, if known (e.g. "Client.send")
    #[serde(default)]
    pub qualified_name: Option<String>,
    /// Package the symbol is believed to come from
    #[serde(default)]
    pub package_hint: Option<String>,
    /// Known global key in 'package#id' form
    #[serde(default)]
    pub key: Option<String>,
    /// External documentation URL to fall back to
    #[serde(default)]
    pub external_url: Option<String>,
}

impl ResolveReferenceRequest {
    fn to_reference(&self) -> Result<DocReference, String> {
        let mut reference = DocReference::named(&self.name);
        if let Some(qualified_name) = &self.qualified_name {
            reference = reference.with_qualified_name(qualified_name);
        }
        if let Some(package) = &self.package_hint {
            reference = reference.with_package(package);
        }
        if let Some(key) = &self.key {
            let key: GlobalKey = key.parse().map_err(|e| format!("{e}"))?;
            reference = reference.with_key(key);
        } else if let Some(url) = &self.external_url {
            reference = reference.with_external_url(url);
        }
        Ok(reference)
    }
}

/// Resolve a symbol reference the way rendered links are resolved.
pub fn handle_resolve_reference(engine: &DocsEngine, request: &ResolveReferenceRequest) -> Result<String, String> {
    if engine.package(&request.package).is_none() {
        let names = engine.collection().package_names();
        return Err(not_found("Package", &request.package, &suggestions(&request.package, names)));
    }

    let reference = request.to_reference()?;
    let output = match engine.resolve_reference(&request.package, &reference) {
        Resolution::Internal { package, slug, key } => {
            let kind = engine.node_by_key(&key).map(|n| n.kind.as_str()).unwrap_or("node");
            format!(
                "`{}` resolves to {kind} {package}/{slug} (key {key}).",
                reference.lookup_name()
            )
        }
        Resolution::External { url } => {
            format!("`{}` is external: {url}", reference.lookup_name())
        }
        Resolution::Unresolved { .. } => {
            let mut message = format!(
                "`{}` could not be resolved in any package. It will render as plain text.",
                reference.lookup_name()
            );
            let names = engine.search(&reference.name, None);
            let close: Vec<&str> = names.iter().take(5).map(|h| h.entry.qualified_name.as_str()).collect();
            if !close.is_empty() {
                message.push_str("\n\nSimilar symbols:\n");
                for name in close {
                    let _ = writeln!(message, "• `{name}`");
                }
            }
            message
        }
    };
    Ok(output)
}
