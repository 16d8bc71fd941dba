//! Interfaces and classes, and their members.
//!
//! Members become functions on an opaque imported type: methods map one to
//! one, properties become a getter and, unless read-only, a setter.

use std::sync::LazyLock;

use regex::Regex;

use crate::context::{NamingPath, Session};
use crate::cursor::{Cursor, Parsed, first_of, group};
use crate::decl::Modifiers;
use crate::decl::function::{FunctionSignature, parse_signature_tail, render_fn, signature_docs};
use crate::docs::{consume_docs, doc_sections};
use crate::emit::{Attr, join_nonempty};
use crate::error::{Error, Result, Unsupported};
use crate::ident::{escape, to_snake};
use crate::scan;
use crate::types::{Ownership, TypeExpr};

static OBJECT_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^ *export (?:declare )?(?P<kind>interface|class) (?P<ident>[\w$]+)\s*",
        r"(?P<generics><[^{]*?>)?\s*",
        r"(?:extends (?P<extends>[\w$.]+(?:\s*,\s*[\w$.]+)*)\s*)?",
        r"(?:implements (?P<implements>[\w$.]+(?:\s*,\s*[\w$.]+)*)\s*)?\{",
    ))
    .unwrap()
});
static METHOD_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^ *(?P<mods>(?:(?:{}) +)*)(?P<ident>[\w$]+)(?P<optional>\?)?\s*(?P<generics><[^(]*>)?\(",
        super::MODIFIERS
    ))
    .unwrap()
});
static PROPERTY_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(
        r"^ *(?P<mods>(?:(?:{}) +)*)(?P<ident>[\w$]+)(?P<optional>\?)?\s*:",
        super::MODIFIERS
    ))
    .unwrap()
});

/// `this: &Class`, or nothing for static members.
fn receiver(class: &str, is_static: bool) -> Option<String> {
    (!is_static).then(|| format!("this: &{class}"))
}

/// `method` or `static_method_of = Class`, leading every member attribute.
fn member_attr(class: &str, is_static: bool) -> Attr {
    if is_static {
        Attr::new().pair("static_method_of", class)
    } else {
        Attr::new().flag("method")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MethodKind {
    Plain,
    Getter,
    Setter,
}

/// `[static] [get|set] name(params): type;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Method {
    pub docs: String,
    pub class: String,
    pub signature: FunctionSignature,
    pub kind: MethodKind,
    pub is_static: bool,
}

impl Method {
    pub fn parse<'a>(input: Cursor<'a>, class: &str) -> Parsed<'a, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume_raw(&METHOD_HEAD)?;
        let ident = group(&caps, "ident").to_string();
        if !group(&caps, "optional").is_empty() {
            return Err(Unsupported::OptionalMethod(ident).into());
        }
        if ident == "constructor" {
            return Err(Unsupported::Constructor(class.to_string()).into());
        }
        if !group(&caps, "generics").is_empty() {
            return Err(Unsupported::GenericDeclaration(ident).into());
        }

        let mut mods = Modifiers::parse(group(&caps, "mods"));
        let is_static = mods.take("static");
        let kind = if mods.take("get") {
            MethodKind::Getter
        } else if mods.take("set") {
            MethodKind::Setter
        } else {
            MethodKind::Plain
        };
        mods.finish(&ident)?;

        let ((params, return_type), rest) = parse_signature_tail(rest)?;
        let method = Self {
            docs,
            class: class.to_string(),
            signature: FunctionSignature {
                ident,
                params,
                return_type,
            },
            kind,
            is_static,
        };
        Ok((method, rest))
    }

    /// Rust name, before keyword escaping.
    fn name(&self) -> String {
        let name = to_snake(&self.signature.ident);
        match self.kind {
            MethodKind::Setter => format!("set_{name}"),
            _ => name,
        }
    }

    pub fn to_rust(&self, path: &NamingPath, session: &mut Session<'_>) -> Result<String> {
        let name = self.name();
        let path = path.push(name.clone());
        let (params, ret) = self.signature.translate(&path, session)?;

        let js_name = &self.signature.ident;
        let mut attr = member_attr(&self.class, self.is_static)
            .flag_if(self.signature.is_variadic(), "variadic")
            .quoted("js_class", &self.class)
            .quoted("js_name", js_name);
        attr = match self.kind {
            MethodKind::Plain => attr,
            MethodKind::Getter => attr.pair("getter", js_name),
            MethodKind::Setter => attr.pair("setter", js_name),
        };

        let docs = signature_docs(&self.docs, &params, ret.as_ref());
        let args: Vec<String> = receiver(&self.class, self.is_static)
            .into_iter()
            .chain(params.iter().map(ToString::to_string))
            .collect();
        Ok(join_nonempty([
            docs,
            attr.render(),
            render_fn(&escape(&name), &args, ret.as_ref()),
        ]))
    }
}

/// `[static] [readonly] name[?]: type;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Property {
    pub docs: String,
    pub class: String,
    pub ident: String,
    pub ty: TypeExpr,
    pub is_static: bool,
    pub readonly: bool,
    pub optional: bool,
}

impl Property {
    pub fn parse<'a>(input: Cursor<'a>, class: &str) -> Parsed<'a, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume_raw(&PROPERTY_HEAD)?;
        let ident = group(&caps, "ident").to_string();

        let mut mods = Modifiers::parse(group(&caps, "mods"));
        let is_static = mods.take("static");
        let readonly = mods.take("readonly");
        mods.finish(&ident)?;

        let (ty, rest) = scan::read_until_terminator(rest.rest(), ';')
            .ok_or_else(|| Error::mismatch("`;` after property type", rest.rest()))?;
        if ty.trim().is_empty() {
            return Err(Error::mismatch("property type", rest));
        }
        let property = Self {
            docs,
            class: class.to_string(),
            ident,
            ty: TypeExpr::new(ty),
            is_static,
            readonly,
            optional: !group(&caps, "optional").is_empty(),
        };
        Ok((property, Cursor::new(rest).skip_non_content()))
    }

    pub fn to_rust(&self, path: &NamingPath, session: &mut Session<'_>) -> Result<String> {
        let name = to_snake(&self.ident);
        let path = path.push(name.clone());
        let receiver = receiver(&self.class, self.is_static);

        let mut getter_ty = self.ty.translate(Ownership::Owned, &path, session)?;
        if self.optional {
            getter_ty = getter_ty.into_optional();
        }
        let type_note =
            getter_ty.note.as_ref().map(|note| format!("Type: {note}")).unwrap_or_default();
        let getter = join_nonempty([
            doc_sections([self.docs.as_str(), type_note.as_str()]),
            self.attr().pair("getter", &self.ident).render(),
            render_fn(&escape(&name), &Vec::from_iter(receiver.clone()), Some(&getter_ty)),
        ]);
        if self.readonly {
            return Ok(getter);
        }

        let mut setter_ty = self.ty.translate(Ownership::Borrowed, &path, session)?;
        if self.optional {
            setter_ty = setter_ty.into_optional();
        }
        let args: Vec<String> = receiver.into_iter().chain([format!("val: {setter_ty}")]).collect();
        let setter = join_nonempty([
            format!("/// Set the `{}` property.", self.ident),
            self.attr().pair("setter", &self.ident).render(),
            render_fn(&format!("set_{name}"), &args, None),
        ]);
        Ok(join_nonempty([getter, setter]))
    }

    fn attr(&self) -> Attr {
        member_attr(&self.class, self.is_static)
            .quoted("js_class", &self.class)
            .quoted("js_name", &self.ident)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Member {
    Method(Method),
    Property(Property),
}

impl Member {
    /// Parse one member of `class`. Methods are tried before properties.
    pub fn parse<'a>(input: Cursor<'a>, class: &str) -> Parsed<'a, Self> {
        first_of(
            input,
            &[
                ("Method", &|input: Cursor<'a>| {
                    Method::parse(input, class).map(|(m, rest)| (Member::Method(m), rest))
                }),
                ("Property", &|input: Cursor<'a>| {
                    Property::parse(input, class).map(|(p, rest)| (Member::Property(p), rest))
                }),
            ],
        )
    }

    pub fn to_rust(&self, path: &NamingPath, session: &mut Session<'_>) -> Result<String> {
        match self {
            Member::Method(method) => method.to_rust(path, session),
            Member::Property(property) => property.to_rust(path, session),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Interface,
    Class,
}

/// `export interface Name { ... }` or `export class Name { ... }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectDecl {
    pub docs: String,
    pub kind: ObjectKind,
    pub ident: String,
    pub extends: Vec<String>,
    pub implements: Vec<String>,
    pub members: Vec<Member>,
}

fn ident_list(text: &str) -> Vec<String> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

impl ObjectDecl {
    pub fn parse(input: Cursor<'_>) -> Parsed<'_, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume(&OBJECT_HEAD)?;
        let ident = group(&caps, "ident").to_string();
        if !group(&caps, "generics").is_empty() {
            return Err(Unsupported::GenericDeclaration(ident).into());
        }
        let kind = match group(&caps, "kind") {
            "class" => ObjectKind::Class,
            _ => ObjectKind::Interface,
        };
        let (body, rest) = scan::read_until_closing(rest.rest(), '{', '}')?;

        let mut members = Vec::new();
        let mut body = Cursor::new(body).skip_non_content();
        while !body.is_empty() {
            let (member, next) = Member::parse(body, &ident)?;
            members.push(member);
            body = next;
        }
        tracing::debug!(ident = %ident, ?kind, members = members.len(), "parsed object");

        let decl = Self {
            docs,
            kind,
            extends: ident_list(group(&caps, "extends")),
            implements: ident_list(group(&caps, "implements")),
            ident,
            members,
        };
        Ok((decl, Cursor::new(rest).skip_non_content()))
    }

    /// Parent types for `extends = ...`. Interfaces always extend `Object`.
    pub fn parents(&self) -> Vec<&str> {
        let root = (self.kind == ObjectKind::Interface).then_some("Object");
        root.into_iter()
            .chain(self.extends.iter().map(String::as_str))
            .chain(self.implements.iter().map(String::as_str))
            .collect()
    }

    pub fn to_rust(&self, path: &NamingPath, session: &mut Session<'_>) -> Result<String> {
        let path = path.push(self.ident.clone());
        let attr = self
            .parents()
            .into_iter()
            .fold(Attr::new(), |attr, parent| attr.pair("extends", parent));
        let mut chunks = vec![
            doc_sections([self.docs.as_str()]),
            "#[derive(Debug)]".to_string(),
            if attr.is_empty() { String::new() } else { attr.render() },
            format!("pub type {};", self.ident),
        ];
        for member in &self.members {
            chunks.push(member.to_rust(&path, session)?);
        }
        Ok(join_nonempty(chunks))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> ObjectDecl {
        let (decl, rest) = ObjectDecl::parse(Cursor::new(input)).unwrap();
        assert!(rest.is_empty(), "unconsumed: {:?}", rest.rest());
        decl
    }

    fn member(input: &str) -> Result<Member> {
        Member::parse(Cursor::new(input), "Editor").map(|(member, _)| member)
    }

    fn render_member(input: &str) -> String {
        member(input)
            .unwrap()
            .to_rust(&NamingPath::root().push("Editor"), &mut Session::default())
            .unwrap()
    }

    #[test]
    fn methods_before_properties() {
        assert!(matches!(member("focus(): void;\n"), Ok(Member::Method(_))));
        assert!(matches!(member("onDidFocus: (e: Event) => void;\n"), Ok(Member::Property(_))));
        assert!(matches!(member("get: () => string;\n"), Ok(Member::Property(_))));
    }

    #[test]
    fn unparseable_member_chains_both_attempts() {
        let err = member("[key: string]: any;\n").unwrap_err();
        assert_eq!(err.causes().len(), 2);
        assert!(err.report().contains("`Method` | `Property`"));
    }

    #[test]
    fn rejected_members() {
        assert!(matches!(
            member("constructor(value: string);\n"),
            Err(Error::Unsupported(Unsupported::Constructor(_)))
        ));
        assert!(matches!(
            member("dispose?(): void;\n"),
            Err(Error::Unsupported(Unsupported::OptionalMethod(_)))
        ));
        assert!(matches!(
            member("private secret: string;\n"),
            Err(Error::Unsupported(Unsupported::Modifiers { .. }))
        ));
    }

    #[test]
    fn plain_method() {
        assert_eq!(
            render_member("/** Focus the editor. */\nfocus(): void;\n"),
            "/// Focus the editor.\n#[wasm_bindgen(method, js_class = \"Editor\", js_name = \"focus\")]\npub fn focus(this: &Editor);"
        );
    }

    #[test]
    fn static_variadic_method() {
        assert_eq!(
            render_member("static create(...parts: any[]): Editor;\n"),
            "#[wasm_bindgen(static_method_of = Editor, variadic, js_class = \"Editor\", js_name = \"create\")]\npub fn create(parts: &[JsValue]) -> Editor;"
        );
    }

    #[test]
    fn accessor_methods() {
        assert_eq!(
            render_member("get value(): string;\n"),
            "#[wasm_bindgen(method, js_class = \"Editor\", js_name = \"value\", getter = value)]\npub fn value(this: &Editor) -> String;"
        );
        assert_eq!(
            render_member("set value(v: string);\n"),
            "#[wasm_bindgen(method, js_class = \"Editor\", js_name = \"value\", setter = value)]\npub fn set_value(this: &Editor, v: &str);"
        );
    }

    #[test]
    fn readonly_property_has_no_setter() {
        assert_eq!(
            render_member("readonly id: string;\n"),
            "#[wasm_bindgen(method, js_class = \"Editor\", js_name = \"id\", getter = id)]\npub fn id(this: &Editor) -> String;"
        );
    }

    #[test]
    fn mutable_property_has_setter() {
        assert_eq!(
            render_member("/** Tab width. */\ntabSize?: number;\n"),
            "/// Tab width.\n#[wasm_bindgen(method, js_class = \"Editor\", js_name = \"tabSize\", getter = tabSize)]\npub fn tab_size(this: &Editor) -> Option<f64>;\n/// Set the `tabSize` property.\n#[wasm_bindgen(method, js_class = \"Editor\", js_name = \"tabSize\", setter = tabSize)]\npub fn set_tab_size(this: &Editor, val: Option<f64>);"
        );
    }

    #[test]
    fn static_property_with_type_note() {
        assert_eq!(
            render_member("static defaults: { tabSize: number };\n"),
            "/// Type: `{ tabSize: number }`\n#[wasm_bindgen(static_method_of = Editor, js_class = \"Editor\", js_name = \"defaults\", getter = defaults)]\npub fn defaults() -> Object;\n/// Set the `defaults` property.\n#[wasm_bindgen(static_method_of = Editor, js_class = \"Editor\", js_name = \"defaults\", setter = defaults)]\npub fn set_defaults(val: &Object);"
        );
    }

    #[test]
    fn keyword_property_names_are_escaped() {
        let rendered = render_member("type: string;\n");
        assert!(rendered.contains("pub fn r#type(this: &Editor) -> String;"));
        assert!(rendered.contains("pub fn set_type(this: &Editor, val: &str);"));
    }

    #[test]
    fn literal_property_shares_helper_between_accessors() {
        let mut session = Session::default();
        let rendered = member("kind: \"circle\" | \"square\";\n")
            .unwrap()
            .to_rust(&NamingPath::root().push("Shape"), &mut session)
            .unwrap();
        assert!(rendered.contains("pub fn kind(this: &Editor) -> ShapeKind;"));
        assert!(rendered.contains("pub fn set_kind(this: &Editor, val: ShapeKind);"));
        assert_eq!(session.helpers().len(), 1);
    }

    #[test]
    fn mixed_literal_union_keeps_every_literal() {
        let decl = parse("export interface Shape {\n    kind: \"a\" | \"b\" | Foo;\n}\n");
        let mut session = Session::default();
        let rendered = decl.to_rust(&NamingPath::root(), &mut session).unwrap();
        assert!(rendered.contains("pub fn kind(this: &Shape) -> ShapeKind | Foo;"));
        let helpers = session.into_helpers();
        assert_eq!(helpers.len(), 1);
        assert_eq!(helpers[0].variants, ["a", "b"]);
    }

    #[test]
    fn parameter_does_not_borrow_unrelated_helper() {
        let decl = parse(
            "export interface S {\n    setKind: \"x\" | \"y\";\n    set(kind: \"p\" | \"q\"): void;\n}\n",
        );
        let mut session = Session::default();
        let rendered = decl.to_rust(&NamingPath::root(), &mut session).unwrap();
        assert!(rendered.contains("pub fn set(this: &S, kind: \"p\" | \"q\");"));
        assert!(!rendered.contains("kind: SSetKind"));
        assert_eq!(session.helpers().get("SSetKind").map(|h| h.variants.len()), Some(2));
    }

    #[test]
    fn interface_layout() {
        let decl = parse(
            "/**\n * A text model.\n */\nexport interface ITextModel extends IDisposable {\n    readonly uri: Uri;\n\n    // Full text.\n    getValue(): string;\n}\n",
        );
        assert_eq!(decl.kind, ObjectKind::Interface);
        assert_eq!(decl.parents(), ["Object", "IDisposable"]);
        assert_eq!(
            decl.to_rust(&NamingPath::root(), &mut Session::default()).unwrap(),
            "/// A text model.\n#[derive(Debug)]\n#[wasm_bindgen(extends = Object, extends = IDisposable)]\npub type ITextModel;\n#[wasm_bindgen(method, js_class = \"ITextModel\", js_name = \"uri\", getter = uri)]\npub fn uri(this: &ITextModel) -> Uri;\n#[wasm_bindgen(method, js_class = \"ITextModel\", js_name = \"getValue\")]\npub fn get_value(this: &ITextModel) -> String;"
        );
    }

    #[test]
    fn class_without_parents() {
        let decl = parse("export class Emitter {\n}\n");
        assert_eq!(decl.kind, ObjectKind::Class);
        assert!(decl.members.is_empty());
        assert_eq!(
            decl.to_rust(&NamingPath::root(), &mut Session::default()).unwrap(),
            "#[derive(Debug)]\npub type Emitter;"
        );
    }

    #[test]
    fn class_implements() {
        let decl = parse("export declare class Range implements IRange, IDisposable {}\n");
        assert_eq!(decl.parents(), ["IRange", "IDisposable"]);
    }

    #[test]
    fn unclosed_body_is_structural() {
        let err =
            ObjectDecl::parse(Cursor::new("export interface A {\n    x: number;\n")).unwrap_err();
        assert!(matches!(err, Error::Structural { close: '}', .. }));
    }
}
