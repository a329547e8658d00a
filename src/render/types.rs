//! Raw type → display parts.

use super::{PartsBuilder, reference_from_target};
use crate::manifest::{RawNode, RawParameter, RawSignature, RawType, RawTypeParameter};
use crate::model::{DocTypeParameter, Part, codes};

/// Where a type is written, for deciding on parentheses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Position {
    Top,
    ArrayElement,
    UnionMember,
    IntersectionMember,
    Operand,
}

/// Renders structured types for one declaring package.
///
/// Numeric reference targets are keyed to `package`; everything else is left for the
/// resolver.
#[derive(Debug, Clone, Copy)]
pub struct TypeRenderer<'a> {
    package: &'a str,
}

impl<'a> TypeRenderer<'a> {
    pub fn new(package: &'a str) -> Self {
        Self { package }
    }

    pub fn package(&self) -> &'a str {
        self.package
    }

    /// Render a type into a fresh part sequence.
    pub fn render(&self, ty: &RawType) -> Vec<Part> {
        let mut out = PartsBuilder::new();
        self.write_type(&mut out, ty);
        out.finish()
    }

    /// Render an optional type; absent types render as nothing.
    pub fn render_opt(&self, ty: Option<&RawType>) -> Vec<Part> {
        ty.map(|t| self.render(t)).unwrap_or_default()
    }

    pub fn write_type(&self, out: &mut PartsBuilder, ty: &RawType) {
        self.write_at(out, ty, Position::Top);
    }

    fn write_at(&self, out: &mut PartsBuilder, ty: &RawType, position: Position) {
        if needs_parens(ty, position) {
            out.punct("(");
            self.write_inner(out, ty);
            out.punct(")");
        } else {
            self.write_inner(out, ty);
        }
    }

    fn write_inner(&self, out: &mut PartsBuilder, ty: &RawType) {
        match ty {
            RawType::Intrinsic { name } | RawType::Unknown { name } => {
                out.text(name.as_str());
            }
            RawType::Reference {
                name,
                target,
                package,
                qualified_name,
                type_arguments,
                external_url,
                refers_to_type_parameter,
            } => {
                if *refers_to_type_parameter {
                    out.text(name.as_str());
                } else {
                    let mut reference =
                        reference_from_target(self.package, name, target.as_ref(), package.as_deref());
                    if reference.qualified_name.is_none()
                        && let Some(qualified) = qualified_name
                    {
                        reference = reference.with_qualified_name(qualified.clone());
                    }
                    if reference.key().is_none()
                        && let Some(url) = external_url
                    {
                        reference = reference.with_external_url(url.clone());
                    }
                    out.reference(reference);
                }
                self.write_type_arguments(out, type_arguments);
            }
            RawType::Union { types } => self.write_joined(out, types, "|", Position::UnionMember),
            RawType::Intersection { types } => {
                self.write_joined(out, types, "&", Position::IntersectionMember);
            }
            RawType::Array { element_type } => {
                self.write_at(out, element_type, Position::ArrayElement);
                out.punct("[]");
            }
            RawType::Tuple { elements } => {
                out.punct("[");
                self.write_list(out, elements);
                out.punct("]");
            }
            RawType::NamedTupleMember {
                name,
                is_optional,
                element,
            } => {
                out.text(name.as_str());
                if *is_optional {
                    out.punct("?");
                }
                out.punct(":").space();
                self.write_type(out, element);
            }
            RawType::Literal { value } => {
                out.text(literal_text(value));
            }
            RawType::Reflection { declaration } => self.write_reflection(out, declaration),
            RawType::TypeOperator { operator, target } => {
                out.keyword(operator);
                self.write_at(out, target, Position::Operand);
            }
            RawType::IndexedAccess {
                object_type,
                index_type,
            } => {
                self.write_at(out, object_type, Position::Operand);
                out.punct("[");
                self.write_type(out, index_type);
                out.punct("]");
            }
            RawType::Query { query_type } => {
                out.keyword("typeof");
                self.write_type(out, query_type);
            }
            RawType::Conditional {
                check_type,
                extends_type,
                true_type,
                false_type,
            } => {
                self.write_at(out, check_type, Position::Operand);
                out.space().keyword("extends");
                self.write_type(out, extends_type);
                out.spaced("?");
                self.write_type(out, true_type);
                out.spaced(":");
                self.write_type(out, false_type);
            }
            RawType::Predicate {
                name,
                asserts,
                target_type,
            } => {
                if *asserts {
                    out.keyword("asserts");
                }
                out.text(name.as_str());
                if let Some(target) = target_type {
                    out.space().keyword("is");
                    self.write_type(out, target);
                }
            }
            RawType::TemplateLiteral { head, tail } => {
                out.punct("`").text(head.as_str());
                for (ty, text) in tail {
                    out.punct("${");
                    self.write_type(out, ty);
                    out.punct("}").text(text.as_str());
                }
                out.punct("`");
            }
            RawType::Mapped {
                parameter,
                parameter_type,
                template_type,
                readonly_modifier,
                optional_modifier,
                name_type,
            } => {
                out.punct("{").space();
                match readonly_modifier.as_deref() {
                    Some("+") => {
                        out.keyword("readonly");
                    }
                    Some("-") => {
                        out.punct("-").keyword("readonly");
                    }
                    _ => {}
                }
                out.punct("[").text(parameter.as_str()).space().keyword("in");
                self.write_type(out, parameter_type);
                if let Some(name_type) = name_type {
                    out.space().keyword("as");
                    self.write_type(out, name_type);
                }
                out.punct("]");
                match optional_modifier.as_deref() {
                    Some("+") => {
                        out.punct("?");
                    }
                    Some("-") => {
                        out.punct("-?");
                    }
                    _ => {}
                }
                out.punct(":").space();
                self.write_type(out, template_type);
                out.space().punct("}");
            }
            RawType::Optional { element_type } => {
                self.write_at(out, element_type, Position::ArrayElement);
                out.punct("?");
            }
            RawType::Rest { element_type } => {
                out.punct("...");
                self.write_type(out, element_type);
            }
            RawType::Inferred { name, constraint } => {
                out.keyword("infer").text(name.as_str());
                if let Some(constraint) = constraint {
                    out.space().keyword("extends");
                    self.write_type(out, constraint);
                }
            }
        }
    }

    fn write_joined(&self, out: &mut PartsBuilder, types: &[RawType], sep: &str, position: Position) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                out.spaced(sep);
            }
            self.write_at(out, ty, position);
        }
    }

    fn write_list(&self, out: &mut PartsBuilder, types: &[RawType]) {
        for (i, ty) in types.iter().enumerate() {
            if i > 0 {
                out.punct(",").space();
            }
            self.write_type(out, ty);
        }
    }

    fn write_type_arguments(&self, out: &mut PartsBuilder, args: &[RawType]) {
        if args.is_empty() {
            return;
        }
        out.punct("<");
        self.write_list(out, args);
        out.punct(">");
    }

    /// Write `<T extends C = D, U>`. Writes nothing for an empty list.
    pub fn write_type_parameters(&self, out: &mut PartsBuilder, params: &[RawTypeParameter]) {
        if params.is_empty() {
            return;
        }
        out.punct("<");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.punct(",").space();
            }
            out.text(param.name.as_str());
            if let Some(constraint) = &param.type_ {
                out.space().keyword("extends");
                self.write_type(out, constraint);
            }
            if let Some(default) = &param.default {
                out.spaced("=");
                self.write_type(out, default);
            }
        }
        out.punct(">");
    }

    pub fn type_parameters(&self, params: &[RawTypeParameter]) -> Vec<DocTypeParameter> {
        params
            .iter()
            .map(|p| DocTypeParameter {
                name: p.name.clone(),
                constraint: self.render_opt(p.type_.as_ref()),
                default: self.render_opt(p.default.as_ref()),
            })
            .collect()
    }

    /// Write one parameter: `...name?: T = default`.
    pub fn write_parameter(&self, out: &mut PartsBuilder, param: &RawParameter) {
        if param.flags.is_rest {
            out.punct("...");
        }
        out.text(param.name.as_str());
        if param.flags.is_optional {
            out.punct("?");
        }
        if let Some(ty) = &param.type_ {
            out.punct(":").space();
            self.write_type(out, ty);
        }
        if let Some(default) = &param.default_value {
            out.spaced("=").text(default.as_str());
        }
    }

    /// Write a parenthesized parameter list.
    pub fn write_parameters(&self, out: &mut PartsBuilder, params: &[RawParameter]) {
        out.punct("(");
        for (i, param) in params.iter().enumerate() {
            if i > 0 {
                out.punct(",").space();
            }
            self.write_parameter(out, param);
        }
        out.punct(")");
    }

    /// Write `<T>(params)` followed by `: R`, or `=> R` for function types.
    pub fn write_call_tail(&self, out: &mut PartsBuilder, signature: &RawSignature, arrow: bool) {
        self.write_type_parameters(out, &signature.type_parameters);
        self.write_parameters(out, &signature.parameters);
        if arrow {
            out.spaced("=>");
            match &signature.type_ {
                Some(ty) => self.write_type(out, ty),
                None => {
                    out.text("void");
                }
            }
        } else if let Some(ty) = &signature.type_ {
            out.punct(":").space();
            self.write_type(out, ty);
        }
    }

    /// Write `[key: K]: V`.
    pub fn write_index_signature(&self, out: &mut PartsBuilder, signature: &RawSignature) {
        out.punct("[");
        for (i, param) in signature.parameters.iter().enumerate() {
            if i > 0 {
                out.punct(",").space();
            }
            self.write_parameter(out, param);
        }
        out.punct("]");
        if let Some(ty) = &signature.type_ {
            out.punct(":").space();
            self.write_type(out, ty);
        }
    }

    fn write_reflection(&self, out: &mut PartsBuilder, declaration: &RawNode) {
        if let Some(signature) = function_signature(declaration) {
            if signature.kind == codes::CONSTRUCTOR_SIGNATURE {
                out.keyword("new");
            }
            self.write_call_tail(out, signature, true);
            return;
        }

        let mut members: Vec<PartsBuilder> = Vec::new();
        for signature in &declaration.signatures {
            let mut member = PartsBuilder::new();
            if signature.kind == codes::CONSTRUCTOR_SIGNATURE {
                member.keyword("new");
            }
            self.write_call_tail(&mut member, signature, false);
            members.push(member);
        }
        for signature in &declaration.index_signatures {
            let mut member = PartsBuilder::new();
            self.write_index_signature(&mut member, signature);
            members.push(member);
        }
        for child in &declaration.children {
            self.write_members(&mut members, child);
        }

        if members.is_empty() {
            out.punct("{}");
            return;
        }

        out.punct("{").space();
        for (i, member) in members.into_iter().enumerate() {
            if i > 0 {
                out.punct(";").space();
            }
            out.extend(member.finish());
        }
        out.space().punct("}");
    }

    fn write_members(&self, members: &mut Vec<PartsBuilder>, child: &RawNode) {
        if !child.signatures.is_empty() {
            for signature in &child.signatures {
                let mut member = PartsBuilder::new();
                member.text(child.name.as_str());
                if child.flags.is_optional {
                    member.punct("?");
                }
                self.write_call_tail(&mut member, signature, false);
                members.push(member);
            }
            return;
        }

        let mut member = PartsBuilder::new();
        let accessor_type = child
            .get_signature
            .as_ref()
            .and_then(|s| s.type_.as_ref())
            .or_else(|| {
                child
                    .set_signature
                    .as_ref()
                    .and_then(|s| s.parameters.first())
                    .and_then(|p| p.type_.as_ref())
            });
        let readonly = child.flags.is_readonly || (child.get_signature.is_some() && child.set_signature.is_none());
        if readonly {
            member.keyword("readonly");
        }
        member.text(child.name.as_str());
        if child.flags.is_optional {
            member.punct("?");
        }
        if let Some(ty) = child.type_.as_ref().or(accessor_type) {
            member.punct(":").space();
            self.write_type(&mut member, ty);
        }
        members.push(member);
    }
}

/// The lone call or constructor signature of a reflection that reads as a function type.
fn function_signature(declaration: &RawNode) -> Option<&RawSignature> {
    match declaration.signatures.as_slice() {
        [only] if declaration.children.is_empty() && declaration.index_signatures.is_empty() => Some(only),
        _ => None,
    }
}

fn needs_parens(ty: &RawType, position: Position) -> bool {
    use Position::{ArrayElement, IntersectionMember, Operand, Top, UnionMember};

    if position == Top {
        return false;
    }
    match ty {
        RawType::Union { .. } => matches!(position, ArrayElement | IntersectionMember | Operand),
        RawType::Intersection { .. } => matches!(position, ArrayElement | Operand),
        RawType::Conditional { .. } => true,
        RawType::TypeOperator { .. }
        | RawType::Query { .. }
        | RawType::Inferred { .. }
        | RawType::Predicate { .. } => position == ArrayElement,
        RawType::Reflection { declaration } => function_signature(declaration).is_some(),
        RawType::Rest { .. } => matches!(position, UnionMember | IntersectionMember),
        _ => false,
    }
}

/// Literal text: strings quoted, bigints suffixed with `n`.
fn literal_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => serde_json::to_string(s).unwrap_or_else(|_| format!("\"{s}\"")),
        serde_json::Value::Object(map) => {
            let digits = map.get("value").and_then(|v| v.as_str()).unwrap_or("0");
            let negative = map
                .get("negative")
                .and_then(serde_json::Value::as_bool)
                .unwrap_or(false);
            format!("{}{digits}n", if negative { "-" } else { "" })
        }
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{GlobalKey, flatten, references};
    use assert2::check;
    use rstest::rstest;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> RawType {
        serde_json::from_value(value).expect("valid type json")
    }

    fn text(value: serde_json::Value) -> String {
        flatten(&TypeRenderer::new("core").render(&parse(value)))
    }

    #[rstest]
    #[case(json!({"type": "intrinsic", "name": "string"}), "string")]
    #[case(json!({"type": "union", "types": [
        {"type": "intrinsic", "name": "string"},
        {"type": "literal", "value": null}
    ]}), "string | null")]
    #[case(json!({"type": "array", "elementType": {"type": "union", "types": [
        {"type": "intrinsic", "name": "string"},
        {"type": "intrinsic", "name": "number"}
    ]}}), "(string | number)[]")]
    #[case(json!({"type": "literal", "value": "on"}), "\"on\"")]
    #[case(json!({"type": "literal", "value": {"value": "10", "negative": true}}), "-10n")]
    #[case(json!({"type": "typeOperator", "operator": "keyof",
        "target": {"type": "reference", "name": "T", "refersToTypeParameter": true}}), "keyof T")]
    #[case(json!({"type": "indexedAccess",
        "objectType": {"type": "reference", "name": "T", "refersToTypeParameter": true},
        "indexType": {"type": "literal", "value": "id"}}), "T[\"id\"]")]
    #[case(json!({"type": "query", "queryType": {"type": "reference", "name": "config"}}), "typeof config")]
    #[case(json!({"type": "predicate", "name": "x", "asserts": true,
        "targetType": {"type": "intrinsic", "name": "string"}}), "asserts x is string")]
    #[case(json!({"type": "tuple", "elements": [
        {"type": "namedTupleMember", "name": "a", "isOptional": true, "element": {"type": "intrinsic", "name": "number"}},
        {"type": "rest", "elementType": {"type": "array", "elementType": {"type": "intrinsic", "name": "string"}}}
    ]}), "[a?: number, ...string[]]")]
    #[case(json!({"type": "optional", "elementType": {"type": "intrinsic", "name": "number"}}), "number?")]
    #[case(json!({"type": "conditional",
        "checkType": {"type": "reference", "name": "T", "refersToTypeParameter": true},
        "extendsType": {"type": "array", "elementType": {"type": "inferred", "name": "U"}},
        "trueType": {"type": "reference", "name": "U", "refersToTypeParameter": true},
        "falseType": {"type": "intrinsic", "name": "never"}}), "T extends (infer U)[] ? U : never")]
    #[case(json!({"type": "templateLiteral", "head": "on",
        "tail": [[{"type": "intrinsic", "name": "string"}, "Change"]]}), "`on${string}Change`")]
    #[case(json!({"type": "mapped", "parameter": "K",
        "parameterType": {"type": "typeOperator", "operator": "keyof",
            "target": {"type": "reference", "name": "T", "refersToTypeParameter": true}},
        "templateType": {"type": "intrinsic", "name": "boolean"},
        "readonlyModifier": "+", "optionalModifier": "-"}), "{ readonly [K in keyof T]-?: boolean }")]
    fn test_render_text(#[case] value: serde_json::Value, #[case] expected: &str) {
        check!(text(value) == expected);
    }

    #[test]
    fn test_reference_with_type_arguments_keeps_link() {
        let ty = parse(json!({
            "type": "reference", "name": "Map", "target": 12,
            "typeArguments": [
                {"type": "intrinsic", "name": "string"},
                {"type": "reference", "name": "Foo", "package": "plugins",
                 "target": {"sourceFileName": "src/foo.ts", "qualifiedName": "Foo"}}
            ]
        }));
        let parts = TypeRenderer::new("core").render(&ty);

        check!(flatten(&parts) == "Map<string, Foo>");
        let refs: Vec<_> = references(&parts).collect();
        check!(refs.len() == 2);
        check!(refs[0].key() == Some(&GlobalKey::new("core", 12)));
        check!(refs[1].package.as_deref() == Some("plugins"));
    }

    #[test]
    fn test_reflection_function_and_object_literal() {
        let function = json!({"type": "reflection", "declaration": {
            "id": 1, "name": "__type", "kind": 65536,
            "signatures": [{
                "id": 2, "name": "__type", "kind": 4096,
                "parameters": [{"name": "a", "type": {"type": "intrinsic", "name": "number"}}],
                "type": {"type": "intrinsic", "name": "void"}
            }]
        }});
        check!(text(function.clone()) == "(a: number) => void");

        let union = json!({"type": "union", "types": [function, {"type": "intrinsic", "name": "null"}]});
        check!(text(union) == "((a: number) => void) | null");

        let object = json!({"type": "reflection", "declaration": {
            "id": 1, "name": "__type", "kind": 65536,
            "children": [
                {"id": 3, "name": "a", "kind": 1024, "type": {"type": "intrinsic", "name": "string"}},
                {"id": 4, "name": "b", "kind": 1024, "flags": {"isOptional": true},
                 "type": {"type": "intrinsic", "name": "number"}}
            ]
        }});
        check!(text(object) == "{ a: string; b?: number }");
    }
}
