//! Enumerations: declared `enum`s and string enums synthesized from
//! literal unions.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::cursor::{Cursor, Parsed, group};
use crate::docs::{consume_docs, doc_comment};
use crate::emit::{indent, join_nonempty};
use crate::error::{Result, Unsupported};
use crate::ident::to_upper_camel;
use crate::scan;

static ENUM_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ *export (?:declare )?(?:const )?enum (?P<ident>[\w$]+)\s*\{").unwrap()
});
static VARIANT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r#"^ *(?P<ident>[\w$]+) *= *(?P<value>"(?:[^"\\\n]|\\.)*"|[^,\n]*?) *,?[ \t]*(?:\n|$)"#,
    )
    .unwrap()
});
/// Integer literal in any base, with optional sign and `_` separators.
static INTEGER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^-?(?:0[xX][0-9a-fA-F][0-9a-fA-F_]*|0[oO][0-7][0-7_]*|0[bB][01][01_]*|[0-9][0-9_]*)$",
    )
    .unwrap()
});

/// Kind of value an enum's variants carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    Numeric,
    String,
}

impl ValueKind {
    fn of(value: &str) -> Option<Self> {
        if value.starts_with('"') {
            Some(ValueKind::String)
        } else if INTEGER.is_match(value) {
            Some(ValueKind::Numeric)
        } else {
            None
        }
    }

    fn macro_name(self) -> &'static str {
        match self {
            ValueKind::Numeric => "int_enum",
            ValueKind::String => "str_enum",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    pub docs: String,
    pub ident: String,
    /// Value text as written, quotes included for strings.
    pub value: String,
}

impl EnumVariant {
    pub fn parse(input: Cursor<'_>) -> Parsed<'_, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume(&VARIANT)?;
        let variant = Self {
            docs,
            ident: group(&caps, "ident").to_string(),
            value: group(&caps, "value").to_string(),
        };
        Ok((variant, rest))
    }

    fn to_rust(&self) -> String {
        join_nonempty([
            doc_comment(&self.docs),
            format!("{} = {},", to_upper_camel(&self.ident), self.value),
        ])
    }
}

/// `export enum Name { A = 1, B = 2 }`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    pub docs: String,
    pub ident: String,
    pub variants: Vec<EnumVariant>,
    pub kind: ValueKind,
}

impl EnumDecl {
    pub fn parse(input: Cursor<'_>) -> Parsed<'_, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume(&ENUM_HEAD)?;
        let ident = group(&caps, "ident").to_string();
        let (body, rest) = scan::read_until_closing(rest.rest(), '{', '}')?;

        let mut variants = Vec::new();
        let mut body = Cursor::new(body).skip_non_content();
        while !body.is_empty() {
            let (variant, next) = EnumVariant::parse(body)?;
            variants.push(variant);
            body = next;
        }
        let kind = infer_kind(&ident, &variants)?;
        tracing::debug!(ident = %ident, variants = variants.len(), ?kind, "parsed enum");

        let decl = Self {
            docs,
            ident,
            variants,
            kind,
        };
        Ok((decl, Cursor::new(rest).skip_non_content()))
    }

    pub fn to_rust(&self) -> String {
        let variants = self.variants.iter().map(EnumVariant::to_rust);
        render_enum(self.kind, &self.docs, &self.ident, variants)
    }
}

fn infer_kind(ident: &str, variants: &[EnumVariant]) -> Result<ValueKind> {
    let mut kind = None;
    for variant in variants {
        let Some(this) = ValueKind::of(&variant.value) else {
            return Err(Unsupported::EnumValue {
                variant: variant.ident.clone(),
                value: variant.value.clone(),
            }
            .into());
        };
        match kind {
            Some(previous) if previous != this => {
                return Err(Unsupported::ConflictingEnumValues(ident.to_string()).into());
            }
            _ => kind = Some(this),
        }
    }
    kind.ok_or_else(|| Unsupported::EmptyEnum(ident.to_string()).into())
}

fn render_enum(
    kind: ValueKind,
    docs: &str,
    ident: &str,
    variants: impl IntoIterator<Item = String>,
) -> String {
    let variants = variants.into_iter().collect::<Vec<_>>().join("\n");
    let body = join_nonempty([
        doc_comment(docs),
        format!("pub enum {ident} {{\n{}\n}}", indent(&variants)),
    ]);
    format!("{}! {{\n{}\n}}", kind.macro_name(), indent(&body))
}

/// An enum of string values, from a type alias or an anonymous literal
/// union.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StringEnum {
    pub ident: String,
    pub docs: String,
    /// Literal values without quotes.
    pub variants: Vec<String>,
}

impl StringEnum {
    /// Fails when a value yields no variant name, or two values yield the
    /// same one.
    pub fn new<S: Into<String>>(
        ident: impl Into<String>,
        values: impl IntoIterator<Item = S>,
    ) -> Result<Self> {
        let ident = ident.into();
        let mut names = HashSet::new();
        let mut variants = Vec::new();
        for value in values {
            let value: String = value.into();
            let name = to_upper_camel(&value);
            if name.is_empty() {
                return Err(Unsupported::LiteralVariant { ident, value }.into());
            }
            if !names.insert(name.clone()) {
                return Err(Unsupported::DuplicateVariant { ident, variant: name }.into());
            }
            variants.push(value);
        }
        Ok(Self {
            ident,
            docs: String::new(),
            variants,
        })
    }

    pub fn with_docs(mut self, docs: impl Into<String>) -> Self {
        self.docs = docs.into();
        self
    }

    pub fn to_rust(&self) -> String {
        let variants = self
            .variants
            .iter()
            .map(|value| format!("{} = {value:?},", to_upper_camel(value)));
        render_enum(ValueKind::String, &self.docs, &self.ident, variants)
    }
}
