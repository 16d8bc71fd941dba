//! Type expressions and their translation to binding types.
//!
//! Each position a type appears in is either owned (return values, getters)
//! or borrowed (parameters, setters). Primitive and value types read the
//! same in both; handles and named types gain a `&` when borrowed.
//!
//! | Source                 | Owned           | Borrowed        |
//! |------------------------|-----------------|-----------------|
//! | `number`               | `f64`           | `f64`           |
//! | `boolean`, `x is T`    | `bool`          | `bool`          |
//! | `string`               | `String`        | `&str`          |
//! | `{ ... }`              | `Object`        | `&Object`       |
//! | `number[]`             | `Vec<f64>`      | `&[f64]`        |
//! | `any[]`                | `Vec<JsValue>`  | `&[JsValue]`    |
//! | other `T[]`            | `Array`         | `&Array`        |
//! | `any`                  | `JsValue`       | `JsValue`       |
//! | `(...) => T`           | `Function`      | `Function`      |
//! | `"a" \| "b"`           | helper enum     | helper enum     |
//! | `A \| null`            | `Option<A>`     | `Option<&A>`    |
//! | `Name`                 | `Name`          | `&Name`         |
//!
//! Names the session reports as copy types are passed by value in both.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::{NamingPath, Session};
use crate::decl::enumeration::StringEnum;
use crate::docs::code_note;
use crate::error::{Result, Unsupported};
use crate::scan;

static TYPE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z_$][\w$]*(?:\.[A-Za-z_$][\w$]*)*$").unwrap());

/// Names that are valid identifiers but do not denote a usable type on
/// their own.
const NON_TYPES: &[&str] = &["null", "undefined", "void", "never"];

/// Whether a translated type is taken by value or by reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owned,
    Borrowed,
}

/// A type expression as written in the declaration, trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeExpr(String);

impl TypeExpr {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_void(&self) -> bool {
        self.0 == "void"
    }

    pub fn kind(&self) -> TypeKind<'_> {
        classify(&self.0)
    }

    /// Translate this expression for use in the given position.
    ///
    /// `path` names the position, for helper enums synthesized from
    /// string-literal unions.
    pub fn translate(
        &self,
        ownership: Ownership,
        path: &NamingPath,
        session: &mut Session<'_>,
    ) -> Result<TranslatedType> {
        translate_raw(&self.0, ownership, path, session)
    }
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    Number,
    Boolean,
}

impl Primitive {
    pub fn rust_name(self) -> &'static str {
        match self {
            Primitive::Number => "f64",
            Primitive::Boolean => "bool",
        }
    }
}

/// Classification of a type expression, in priority order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind<'t> {
    Primitive(Primitive),
    String,
    /// An inline object type literal.
    Object,
    /// Only quoted literals; holds the literals with their quotes.
    LiteralUnion(Vec<&'t str>),
    /// Two or more alternatives.
    Union(Vec<&'t str>),
    /// `T[]`; holds `T`.
    Array(&'t str),
    /// A type predicate, `x is T`.
    TypeAssertion,
    Any,
    Function,
    /// Anything else, taken as a type name.
    Ident(&'t str),
}

/// Classify a trimmed type expression.
pub fn classify(raw: &str) -> TypeKind<'_> {
    let raw = raw.trim();
    if let Some(inner) = parenthesized(raw) {
        return classify(inner);
    }
    match raw {
        "number" => return TypeKind::Primitive(Primitive::Number),
        "boolean" => return TypeKind::Primitive(Primitive::Boolean),
        "string" => return TypeKind::String,
        _ => {}
    }
    if raw.starts_with('{') && raw.ends_with('}') {
        return TypeKind::Object;
    }
    if is_arrow_function(raw) {
        return TypeKind::Function;
    }
    let alternatives: Vec<&str> = scan::split_top_level(raw, '|')
        .into_iter()
        .map(str::trim)
        .filter(|alt| !alt.is_empty())
        .collect();
    if !alternatives.is_empty() && alternatives.iter().all(|alt| is_string_literal(alt)) {
        return TypeKind::LiteralUnion(alternatives);
    }
    if alternatives.len() > 1 {
        return TypeKind::Union(alternatives);
    }
    if let Some(item) = raw.strip_suffix("[]") {
        return TypeKind::Array(item.trim());
    }
    if raw.contains(" is ") {
        return TypeKind::TypeAssertion;
    }
    if raw == "any" {
        return TypeKind::Any;
    }
    if raw.contains("=>") {
        return TypeKind::Function;
    }
    TypeKind::Ident(raw)
}

/// The inside of `( ... )` when the parentheses enclose the whole text.
fn parenthesized(raw: &str) -> Option<&str> {
    let body = raw.strip_prefix('(')?;
    match scan::read_until_closing(body, '(', ')') {
        Ok((inner, "")) => Some(inner),
        _ => None,
    }
}

/// `(params) => ret` at the top level, as opposed to a union or array
/// that merely contains one.
fn is_arrow_function(raw: &str) -> bool {
    let Some(body) = raw.strip_prefix("new ").unwrap_or(raw).strip_prefix('(') else {
        return false;
    };
    matches!(
        scan::read_until_closing(body, '(', ')'),
        Ok((_, rest)) if rest.trim_start().starts_with("=>")
    )
}

pub(crate) fn is_string_literal(text: &str) -> bool {
    text.len() >= 2
        && ((text.starts_with('"') && text.ends_with('"'))
            || (text.starts_with('\'') && text.ends_with('\'')))
}

/// A quoted literal without its quotes.
pub(crate) fn unquote(literal: &str) -> &str {
    if is_string_literal(literal) {
        &literal[1..literal.len() - 1]
    } else {
        literal
    }
}

fn is_none(text: &str) -> bool {
    matches!(text, "null" | "undefined")
}

/// The result of translating a type expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedType {
    /// Rust type text.
    pub text: String,
    /// Whether `text` is taken by value.
    pub owned: bool,
    /// The source type, for docs, when `text` loses information.
    pub note: Option<String>,
}

impl TranslatedType {
    fn new(text: impl Into<String>, owned: bool) -> Self {
        Self {
            text: text.into(),
            owned,
            note: None,
        }
    }

    fn with_note(mut self, source: &str) -> Self {
        self.note = Some(code_note(source));
        self
    }

    /// Reference or value form of a handle type.
    fn handle(name: &str, ownership: Ownership) -> Self {
        match ownership {
            Ownership::Owned => Self::new(name, true),
            Ownership::Borrowed => Self::new(format!("&{name}"), false),
        }
    }

    pub fn is_optional(&self) -> bool {
        self.text.starts_with("Option<") && self.text.ends_with('>')
    }

    /// Wrap in `Option<...>` unless already optional.
    pub fn into_optional(mut self) -> Self {
        if !self.is_optional() {
            self.text = format!("Option<{}>", self.text);
        }
        self
    }
}

impl fmt::Display for TranslatedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn translate_raw(
    raw: &str,
    ownership: Ownership,
    path: &NamingPath,
    session: &mut Session<'_>,
) -> Result<TranslatedType> {
    let translated = match classify(raw) {
        TypeKind::Primitive(primitive) => TranslatedType::new(primitive.rust_name(), true),
        TypeKind::String => match ownership {
            Ownership::Owned => TranslatedType::new("String", true),
            Ownership::Borrowed => TranslatedType::new("&str", false),
        },
        TypeKind::Object => TranslatedType::handle("Object", ownership).with_note(raw),
        TypeKind::LiteralUnion(literals) => {
            string_enum(raw, &literals, ownership, path, session)?
        }
        TypeKind::Union(alternatives) => union(raw, alternatives, ownership, path, session)?,
        TypeKind::Array(item) => array(item, ownership),
        TypeKind::TypeAssertion => TranslatedType::new("bool", true),
        TypeKind::Any => TranslatedType::new("JsValue", true),
        TypeKind::Function => TranslatedType::new("Function", true).with_note(raw),
        TypeKind::Ident(name) => {
            if !TYPE_NAME.is_match(name) || NON_TYPES.contains(&name) {
                return Err(Unsupported::TypeExpression(raw.to_string()).into());
            }
            if ownership == Ownership::Owned || session.is_copy_type(name) {
                TranslatedType::new(name, true)
            } else {
                TranslatedType::new(format!("&{name}"), false)
            }
        }
    };
    Ok(translated)
}

fn array(item: &str, ownership: Ownership) -> TranslatedType {
    let element = match item {
        "number" => "f64",
        "any" => "JsValue",
        _ => return TranslatedType::handle("Array", ownership).with_note(&format!("{item}[]")),
    };
    match ownership {
        Ownership::Owned => TranslatedType::new(format!("Vec<{element}>"), true),
        Ownership::Borrowed => TranslatedType::new(format!("&[{element}]"), false),
    }
}

fn union(
    raw: &str,
    alternatives: Vec<&str>,
    ownership: Ownership,
    path: &NamingPath,
    session: &mut Session<'_>,
) -> Result<TranslatedType> {
    let (nones, rest): (Vec<&str>, Vec<&str>) =
        alternatives.into_iter().partition(|alt| is_none(alt));
    if rest.is_empty() {
        return Err(Unsupported::TypeExpression(raw.to_string()).into());
    }

    // Literals share one helper; every other alternative stands alone.
    let (literals, others): (Vec<&str>, Vec<&str>) =
        rest.into_iter().partition(|alt| is_string_literal(alt));
    let mut branches = Vec::with_capacity(others.len() + 1);
    if !literals.is_empty() {
        let source = literals.join(" | ");
        branches.push(string_enum(&source, &literals, ownership, path, session)?);
    }
    for alt in others {
        branches.push(translate_raw(alt, ownership, path, session)?);
    }

    let mut translated = TranslatedType::new(
        branches.iter().map(|b| b.text.as_str()).collect::<Vec<_>>().join(" | "),
        branches.iter().all(|b| b.owned),
    );
    if branches.iter().any(|b| b.note.is_some()) {
        translated = translated.with_note(raw);
    }
    Ok(if nones.is_empty() { translated } else { translated.into_optional() })
}

/// Name a string-literal union after `path`.
///
/// In owned positions the helper enum is registered with the session. In
/// borrowed positions a helper already registered under the same name with
/// the same values is reused; otherwise the literals are kept inline and the
/// type is noted in the docs.
fn string_enum(
    raw: &str,
    literals: &[&str],
    ownership: Ownership,
    path: &NamingPath,
    session: &mut Session<'_>,
) -> Result<TranslatedType> {
    let ident = path.build_ident();
    if !ident.is_empty() {
        let helper = StringEnum::new(ident.clone(), literals.iter().map(|l| unquote(l)))?;
        match ownership {
            Ownership::Owned => {
                session.helpers_mut().register(helper);
                return Ok(TranslatedType::new(ident, true));
            }
            Ownership::Borrowed => {
                let registered = session.helpers().get(&ident);
                if registered.is_some_and(|known| known.variants == helper.variants) {
                    return Ok(TranslatedType::new(ident, true));
                }
            }
        }
    }
    tracing::warn!(
        ty = raw,
        path = %ident,
        "string-literal union in borrowed position has no helper enum; keeping literals inline"
    );
    Ok(TranslatedType::new(literals.join(" | "), true).with_note(raw))
}
