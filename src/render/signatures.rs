//! Raw signature → display parts.

use super::{PartsBuilder, TypeRenderer};
use crate::manifest::RawSignature;
use crate::model::{DocParameter, DocTypeParameter, Part, SignatureKind};

/// Rendered pieces of one signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedSignature {
    pub parts: Vec<Part>,
    pub return_parts: Vec<Part>,
    pub parameters: Vec<DocParameter>,
    pub type_parameters: Vec<DocTypeParameter>,
}

/// Renders call, constructor, index and accessor signatures.
#[derive(Debug, Clone, Copy)]
pub struct SignatureRenderer<'a> {
    types: TypeRenderer<'a>,
}

impl<'a> SignatureRenderer<'a> {
    pub fn new(types: TypeRenderer<'a>) -> Self {
        Self { types }
    }

    /// Render a signature declared under `name`.
    ///
    /// Parameter summaries are left empty; they come from comments, not types.
    pub fn render(&self, name: &str, kind: SignatureKind, signature: &RawSignature) -> RenderedSignature {
        let mut out = PartsBuilder::new();
        match kind {
            SignatureKind::Call => {
                out.text(name);
                self.types.write_call_tail(&mut out, signature, false);
            }
            SignatureKind::Constructor => {
                out.keyword("new").text(name);
                self.types.write_call_tail(&mut out, signature, false);
            }
            SignatureKind::Index => self.types.write_index_signature(&mut out, signature),
            SignatureKind::Get => {
                out.keyword("get").text(name).punct("()");
                if let Some(ty) = &signature.type_ {
                    out.punct(":").space();
                    self.types.write_type(&mut out, ty);
                }
            }
            SignatureKind::Set => {
                out.keyword("set").text(name);
                self.types.write_parameters(&mut out, &signature.parameters);
            }
        }

        let return_parts = match kind {
            SignatureKind::Set => Vec::new(),
            _ => self.types.render_opt(signature.type_.as_ref()),
        };

        RenderedSignature {
            parts: out.finish(),
            return_parts,
            parameters: self.parameters(signature),
            type_parameters: self.types.type_parameters(&signature.type_parameters),
        }
    }

    fn parameters(&self, signature: &RawSignature) -> Vec<DocParameter> {
        signature
            .parameters
            .iter()
            .map(|p| DocParameter {
                name: p.name.clone(),
                is_optional: p.flags.is_optional,
                is_rest: p.flags.is_rest,
                type_parts: self.types.render_opt(p.type_.as_ref()),
                default_value: p.default_value.clone(),
                summary: None,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::flatten;
    use assert2::check;
    use rstest::rstest;
    use serde_json::json;

    fn render(name: &str, kind: SignatureKind, value: serde_json::Value) -> RenderedSignature {
        let signature: RawSignature = serde_json::from_value(value).expect("valid signature json");
        SignatureRenderer::new(TypeRenderer::new("core")).render(name, kind, &signature)
    }

    #[rstest]
    #[case(SignatureKind::Call, json!({
        "id": 1, "name": "send", "kind": 4096,
        "typeParameters": [{"name": "T", "type": {"type": "intrinsic", "name": "object"},
                            "default": {"type": "intrinsic", "name": "unknown"}}],
        "parameters": [
            {"name": "body", "type": {"type": "reference", "name": "T", "refersToTypeParameter": true}},
            {"name": "retries", "flags": {"isOptional": true}, "type": {"type": "intrinsic", "name": "number"}},
            {"name": "mode", "type": {"type": "intrinsic", "name": "string"}, "defaultValue": "\"fast\""},
            {"name": "rest", "flags": {"isRest": true},
             "type": {"type": "array", "elementType": {"type": "intrinsic", "name": "string"}}}
        ],
        "type": {"type": "reference", "name": "Promise", "typeArguments": [{"type": "intrinsic", "name": "void"}]}
    }), "send<T extends object = unknown>(body: T, retries?: number, mode: string = \"fast\", ...rest: string[]): Promise<void>")]
    #[case(SignatureKind::Constructor, json!({
        "id": 2, "name": "Client", "kind": 16384,
        "parameters": [{"name": "url", "type": {"type": "intrinsic", "name": "string"}}],
        "type": {"type": "reference", "name": "Client", "target": 5}
    }), "new Client(url: string): Client")]
    #[case(SignatureKind::Get, json!({
        "id": 3, "name": "size", "kind": 524288, "type": {"type": "intrinsic", "name": "number"}
    }), "get size(): number")]
    #[case(SignatureKind::Set, json!({
        "id": 4, "name": "size", "kind": 1048576,
        "parameters": [{"name": "value", "type": {"type": "intrinsic", "name": "number"}}],
        "type": {"type": "intrinsic", "name": "void"}
    }), "set size(value: number)")]
    #[case(SignatureKind::Index, json!({
        "id": 5, "name": "__index", "kind": 8192,
        "parameters": [{"name": "key", "type": {"type": "intrinsic", "name": "string"}}],
        "type": {"type": "intrinsic", "name": "unknown"}
    }), "[key: string]: unknown")]
    fn test_signature_text(
        #[case] kind: SignatureKind,
        #[case] value: serde_json::Value,
        #[case] expected: &str,
    ) {
        let name = value["name"].as_str().unwrap_or_default().to_string();
        let rendered = render(&name, kind, value);
        check!(flatten(&rendered.parts) == expected);
    }

    #[test]
    fn test_structured_pieces() {
        let rendered = render(
            "parse",
            SignatureKind::Call,
            json!({
                "id": 1, "name": "parse", "kind": 4096,
                "parameters": [{"name": "input", "flags": {"isOptional": true},
                                "type": {"type": "intrinsic", "name": "string"}}],
                "type": {"type": "intrinsic", "name": "boolean"}
            }),
        );

        check!(rendered.parameters.len() == 1);
        check!(rendered.parameters[0].is_optional);
        check!(flatten(&rendered.parameters[0].type_parts) == "string");
        check!(flatten(&rendered.return_parts) == "boolean");
        check!(rendered.type_parameters.is_empty());
    }
}
