//! Type aliases. Only string-literal unions have a binding.

use std::sync::LazyLock;

use regex::Regex;

use crate::cursor::{Cursor, Parsed, group};
use crate::decl::enumeration::StringEnum;
use crate::docs::consume_docs;
use crate::error::{Error, Result, Unsupported};
use crate::scan;
use crate::types::{TypeExpr, TypeKind, unquote};

static ALIAS_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ *export (?:declare )?type (?P<ident>[\w$]+)\s*(?P<generics><[^=]*>)?\s*=")
        .unwrap()
});

/// `export type Name = ...;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeAliasDecl {
    pub docs: String,
    pub ident: String,
    pub ty: TypeExpr,
}

impl TypeAliasDecl {
    pub fn parse(input: Cursor<'_>) -> Parsed<'_, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume_raw(&ALIAS_HEAD)?;
        let ident = group(&caps, "ident").to_string();
        if !group(&caps, "generics").is_empty() {
            return Err(Unsupported::GenericDeclaration(ident).into());
        }
        let (ty, rest) = scan::read_until_terminator(rest.rest(), ';')
            .ok_or_else(|| Error::mismatch("`;` after type alias", rest.rest()))?;
        let decl = Self {
            docs,
            ident,
            ty: TypeExpr::new(ty),
        };
        Ok((decl, Cursor::new(rest).skip_non_content()))
    }

    /// Whether this alias names a union of string literals.
    pub fn is_string_enum(&self) -> bool {
        matches!(self.ty.kind(), TypeKind::LiteralUnion(_))
    }

    pub fn to_string_enum(&self) -> Result<StringEnum> {
        match self.ty.kind() {
            TypeKind::LiteralUnion(literals) => {
                Ok(StringEnum::new(self.ident.clone(), literals.into_iter().map(unquote))?
                    .with_docs(self.docs.clone()))
            }
            _ => Err(Unsupported::TypeAlias {
                ident: self.ident.clone(),
                ty: self.ty.to_string(),
            }
            .into()),
        }
    }

    pub fn to_rust(&self) -> Result<String> {
        Ok(self.to_string_enum()?.to_rust())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> TypeAliasDecl {
        let (decl, rest) = TypeAliasDecl::parse(Cursor::new(input)).unwrap();
        assert!(rest.is_empty());
        decl
    }

    #[test]
    fn multiline_literal_union() {
        let decl = parse(
            "/** When to close brackets. */\nexport type AutoClosing =\n    | \"always\"\n    | \"languageDefined\"\n    | \"never\";\n",
        );
        assert!(decl.is_string_enum());
        assert_eq!(
            decl.to_rust().unwrap(),
            "str_enum! {\n    /// When to close brackets.\n    pub enum AutoClosing {\n        Always = \"always\",\n        LanguageDefined = \"languageDefined\",\n        Never = \"never\",\n    }\n}"
        );
    }

    #[test]
    fn other_aliases_are_unsupported() {
        let decl = parse("export type Listener = (e: Event) => void;\n");
        assert!(!decl.is_string_enum());
        let err = decl.to_rust().unwrap_err();
        assert!(matches!(err, Error::Unsupported(Unsupported::TypeAlias { .. })));
    }

    #[test]
    fn generic_aliases_are_unsupported() {
        let err = TypeAliasDecl::parse(Cursor::new("export type Thenable<T> = PromiseLike<T>;\n"))
            .unwrap_err();
        assert!(matches!(err, Error::Unsupported(Unsupported::GenericDeclaration(_))));
    }
}
