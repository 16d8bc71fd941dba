//! `declare namespace` blocks: parsing members and assembling the binding
//! unit for each namespace.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::{NamingPath, Session};
use crate::cursor::{Cursor, Parsed, first_of, group};
use crate::decl::alias::TypeAliasDecl;
use crate::decl::enumeration::EnumDecl;
use crate::decl::function::FunctionDecl;
use crate::decl::object::{ObjectDecl, ObjectKind};
use crate::docs::consume_docs;
use crate::emit::extern_block;
use crate::error::Result;
use crate::options::BindgenOptions;
use crate::scan;

static NAMESPACE_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ *(?:export )?declare namespace (?P<name>[\w$]+(?:\.[\w$]+)*)\s*\{").unwrap()
});

/// A declaration directly inside a namespace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceMember {
    Enum(EnumDecl),
    Function(FunctionDecl),
    Object(ObjectDecl),
    TypeAlias(TypeAliasDecl),
}

impl NamespaceMember {
    pub fn parse<'a>(input: Cursor<'a>) -> Parsed<'a, Self> {
        first_of(
            input,
            &[
                ("EnumDecl", &|input: Cursor<'a>| {
                    EnumDecl::parse(input).map(|(d, rest)| (NamespaceMember::Enum(d), rest))
                }),
                ("FunctionDecl", &|input: Cursor<'a>| {
                    FunctionDecl::parse(input).map(|(d, rest)| (NamespaceMember::Function(d), rest))
                }),
                ("ObjectDecl", &|input: Cursor<'a>| {
                    ObjectDecl::parse(input).map(|(d, rest)| (NamespaceMember::Object(d), rest))
                }),
                ("TypeAliasDecl", &|input: Cursor<'a>| {
                    TypeAliasDecl::parse(input)
                        .map(|(d, rest)| (NamespaceMember::TypeAlias(d), rest))
                }),
            ],
        )
    }
}

/// A namespace with its members partitioned by kind, each in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Namespace {
    pub name: String,
    pub enums: Vec<EnumDecl>,
    pub functions: Vec<FunctionDecl>,
    pub objects: Vec<ObjectDecl>,
    pub aliases: Vec<TypeAliasDecl>,
}

impl Namespace {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn push(&mut self, member: NamespaceMember) {
        match member {
            NamespaceMember::Enum(decl) => self.enums.push(decl),
            NamespaceMember::Function(decl) => self.functions.push(decl),
            NamespaceMember::Object(decl) => self.objects.push(decl),
            NamespaceMember::TypeAlias(decl) => self.aliases.push(decl),
        }
    }

    pub fn parse(input: Cursor<'_>) -> Parsed<'_, Self> {
        let (_, input) = consume_docs(input);
        let (caps, rest) = input.consume(&NAMESPACE_HEAD)?;
        let mut namespace = Self::new(group(&caps, "name"));
        let (body, rest) = scan::read_until_closing(rest.rest(), '{', '}')?;

        let mut body = Cursor::new(body).skip_non_content();
        while !body.is_empty() {
            let (member, next) = NamespaceMember::parse(body)?;
            namespace.push(member);
            body = next;
        }
        tracing::debug!(
            name = %namespace.name,
            enums = namespace.enums.len(),
            functions = namespace.functions.len(),
            objects = namespace.objects.len(),
            aliases = namespace.aliases.len(),
            "parsed namespace"
        );
        Ok((namespace, Cursor::new(rest).skip_non_content()))
    }

    /// Names passed by value: enums, string-literal aliases and the
    /// configured extras.
    pub fn copy_types(&self, options: &BindgenOptions) -> HashSet<String> {
        let enums = self.enums.iter().map(|e| e.ident.clone());
        let aliases = self
            .aliases
            .iter()
            .filter(|a| a.is_string_enum())
            .map(|a| a.ident.clone());
        enums
            .chain(aliases)
            .chain(options.copy_types.iter().cloned())
            .collect()
    }

    /// Render the binding unit.
    ///
    /// Classes and functions form one `extern "C"` block of imports.
    /// Enums, aliases, interfaces and the helper enums synthesized while
    /// translating follow as local declarations.
    pub fn to_rust(&self, options: &BindgenOptions) -> Result<String> {
        let _span = tracing::debug_span!("namespace", name = %self.name).entered();
        let copy_types = self.copy_types(options);
        let mut session = Session::new(|ident: &str| copy_types.contains(ident));
        let path = NamingPath::root();

        let mut imports = Vec::new();
        let mut locals = Vec::new();
        for decl in &self.enums {
            locals.push(decl.to_rust());
        }
        for decl in &self.aliases {
            locals.push(decl.to_rust()?);
        }
        for decl in &self.functions {
            imports.push(decl.to_rust(&path, &mut session)?);
        }
        for decl in &self.objects {
            let code = decl.to_rust(&path, &mut session)?;
            match decl.kind {
                ObjectKind::Class => imports.push(code),
                ObjectKind::Interface => locals.push(extern_block(&code)),
            }
        }
        let helpers = session.into_helpers();
        tracing::debug!(helpers = helpers.len(), "flushed helper enums");
        locals.extend(helpers.iter().map(|helper| helper.to_rust()));

        let mut sections = Vec::new();
        if !imports.is_empty() {
            sections.push(extern_block(&imports.join("\n\n")));
        }
        if !locals.is_empty() {
            sections.push(locals.join("\n\n"));
        }
        Ok(sections.join("\n\n"))
    }
}

/// Parse every namespace in a declaration file.
pub fn parse_document(source: &str) -> Result<Vec<Namespace>> {
    let mut input = Cursor::new(source).skip_non_content();
    let mut namespaces = Vec::new();
    while !input.is_empty() {
        let (namespace, rest) = Namespace::parse(input)?;
        namespaces.push(namespace);
        input = rest;
    }
    Ok(namespaces)
}
