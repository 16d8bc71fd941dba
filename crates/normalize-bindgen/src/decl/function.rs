//! Free functions, and the signature handling shared with methods.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use crate::context::{NamingPath, Session};
use crate::cursor::{Cursor, Parsed, group};
use crate::docs::{consume_docs, doc_sections};
use crate::emit::{Attr, join_nonempty};
use crate::error::{Error, Result, Unsupported};
use crate::ident::{escape, to_snake};
use crate::scan;
use crate::types::{Ownership, TranslatedType, TypeExpr};

static FUNCTION_HEAD: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^ *export (?:declare )?function (?P<ident>[\w$]+)\s*(?P<generics><[^(]*>)?\(")
        .unwrap()
});
static PARAMETER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?s)^\s*(?P<variadic>\.\.\.)?(?P<ident>[\w$]+)(?P<optional>\?)?\s*:\s*(?P<ty>.+?)\s*$",
    )
    .unwrap()
});

/// A declared parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Parameter {
    pub ident: String,
    pub ty: TypeExpr,
    pub variadic: bool,
    pub optional: bool,
}

impl Parameter {
    pub fn parse(text: &str) -> Result<Self> {
        let caps = PARAMETER
            .captures(text)
            .ok_or_else(|| Error::mismatch("parameter `name: type`", text))?;
        Ok(Self {
            ident: group(&caps, "ident").to_string(),
            ty: TypeExpr::new(group(&caps, "ty")),
            variadic: !group(&caps, "variadic").is_empty(),
            optional: !group(&caps, "optional").is_empty(),
        })
    }

    /// Parse a comma-separated parameter list, allowing a trailing comma.
    pub fn parse_list(text: &str) -> Result<Vec<Self>> {
        scan::split_top_level(text, ',')
            .into_iter()
            .filter(|part| !part.trim().is_empty())
            .map(Self::parse)
            .collect()
    }

    pub fn to_rust(&self, path: &NamingPath, session: &mut Session<'_>) -> Result<RustParam> {
        let name = to_snake(&self.ident);
        let path = path.push(name.clone());
        let mut ty = self.ty.translate(Ownership::Borrowed, &path, session)?;
        if self.optional {
            ty = ty.into_optional();
        }
        Ok(RustParam {
            name: escape(&name),
            ty,
        })
    }
}

/// A translated parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RustParam {
    pub name: String,
    pub ty: TranslatedType,
}

impl fmt::Display for RustParam {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.name, self.ty)
    }
}

/// Name, parameters and return type of a function or method.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionSignature {
    pub ident: String,
    pub params: Vec<Parameter>,
    /// `None` for `void`.
    pub return_type: Option<TypeExpr>,
}

impl FunctionSignature {
    pub fn is_variadic(&self) -> bool {
        self.params.iter().any(|p| p.variadic)
    }

    /// Translate parameters, then the return type, at `path`.
    pub fn translate(
        &self,
        path: &NamingPath,
        session: &mut Session<'_>,
    ) -> Result<(Vec<RustParam>, Option<TranslatedType>)> {
        let params = self
            .params
            .iter()
            .map(|p| p.to_rust(path, session))
            .collect::<Result<Vec<_>>>()?;
        let ret = match &self.return_type {
            Some(ty) => Some(ty.translate(Ownership::Owned, path, session)?),
            None => None,
        };
        Ok((params, ret))
    }
}

/// Parse `params) [: type];` into parameters and return type.
///
/// `input` starts just after the opening parenthesis.
pub(crate) fn parse_signature_tail(
    input: Cursor<'_>,
) -> Parsed<'_, (Vec<Parameter>, Option<TypeExpr>)> {
    let (params, rest) = scan::read_until_closing(input.rest(), '(', ')')?;
    let params = Parameter::parse_list(params)?;
    let rest = rest.trim_start_matches([' ', '\t']);
    let (return_type, rest) = if let Some(after) = rest.strip_prefix(':') {
        let (ty, rest) = scan::read_until_terminator(after, ';')
            .ok_or_else(|| Error::mismatch("`;` after return type", rest))?;
        (Some(TypeExpr::new(ty)).filter(|ty| !ty.is_void()), rest)
    } else if let Some(rest) = rest.strip_prefix(';') {
        (None, rest)
    } else {
        return Err(Error::mismatch("`:` or `;` after parameter list", rest));
    };
    Ok(((params, return_type), Cursor::new(rest).skip_non_content()))
}

/// Doc comment for a callable: its own docs plus notes on parameters and
/// the return type whose Rust form loses information.
pub(crate) fn signature_docs(
    docs: &str,
    params: &[RustParam],
    ret: Option<&TranslatedType>,
) -> String {
    let arguments: Vec<String> = params
        .iter()
        .filter_map(|p| p.ty.note.as_ref().map(|note| format!("* `{}` - {note}", p.name)))
        .collect();
    let arguments = if arguments.is_empty() {
        String::new()
    } else {
        format!("# Arguments\n\n{}", arguments.join("\n"))
    };
    let returns = ret
        .and_then(|r| r.note.as_ref())
        .map(|note| format!("# Returns\n\n{note}"))
        .unwrap_or_default();
    doc_sections([docs, arguments.as_str(), returns.as_str()])
}

/// `pub fn ident(params) -> ret;`
pub(crate) fn render_fn(ident: &str, params: &[String], ret: Option<&TranslatedType>) -> String {
    let mut sig = format!("pub fn {ident}({})", params.join(", "));
    if let Some(ret) = ret {
        sig.push_str(" -> ");
        sig.push_str(&ret.text);
    }
    sig.push(';');
    sig
}

/// `export function name(params): type;`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionDecl {
    pub docs: String,
    pub signature: FunctionSignature,
}

impl FunctionDecl {
    pub fn parse(input: Cursor<'_>) -> Parsed<'_, Self> {
        let (docs, input) = consume_docs(input);
        let (caps, rest) = input.consume_raw(&FUNCTION_HEAD)?;
        let ident = group(&caps, "ident").to_string();
        if !group(&caps, "generics").is_empty() {
            return Err(Unsupported::GenericDeclaration(ident).into());
        }
        let ((params, return_type), rest) = parse_signature_tail(rest)?;
        let signature = FunctionSignature {
            ident,
            params,
            return_type,
        };
        Ok((Self { docs, signature }, rest))
    }

    pub fn to_rust(&self, path: &NamingPath, session: &mut Session<'_>) -> Result<String> {
        let name = to_snake(&self.signature.ident);
        let path = path.push(name.clone());
        let (params, ret) = self.signature.translate(&path, session)?;
        let attr = Attr::new()
            .flag_if(self.signature.is_variadic(), "variadic")
            .quoted("js_name", &self.signature.ident);
        let docs = signature_docs(&self.docs, &params, ret.as_ref());
        let params: Vec<String> = params.iter().map(ToString::to_string).collect();
        Ok(join_nonempty([
            docs,
            attr.render(),
            render_fn(&escape(&name), &params, ret.as_ref()),
        ]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(input: &str) -> FunctionDecl {
        let (decl, rest) = FunctionDecl::parse(Cursor::new(input)).unwrap();
        assert!(rest.is_empty(), "unconsumed: {:?}", rest.rest());
        decl
    }

    fn render(input: &str) -> String {
        parse(input)
            .to_rust(&NamingPath::root(), &mut Session::default())
            .unwrap()
    }

    #[test]
    fn parses_parameters() {
        let decl = parse("export function f(a: number, b?: string, ...rest: any[]): void;\n");
        let params = &decl.signature.params;
        assert_eq!(params.len(), 3);
        assert!(params[1].optional);
        assert!(params[2].variadic);
        assert_eq!(params[2].ty.as_str(), "any[]");
        assert_eq!(decl.signature.return_type, None);
    }

    #[test]
    fn nested_parameter_types() {
        let decl = parse(
            "export function on(listener: (e: { a: number, b: string }) => void,): IDisposable;\n",
        );
        assert_eq!(decl.signature.params.len(), 1);
        assert_eq!(
            decl.signature.return_type.as_ref().map(TypeExpr::as_str),
            Some("IDisposable")
        );
    }

    #[test]
    fn missing_terminator_is_a_mismatch() {
        let err = FunctionDecl::parse(Cursor::new("export function f(): void\n")).unwrap_err();
        assert!(err.is_mismatch());
    }

    #[test]
    fn generic_functions_are_unsupported() {
        let err = FunctionDecl::parse(Cursor::new("export function f<T>(x: T): T;\n")).unwrap_err();
        assert!(matches!(err, Error::Unsupported(Unsupported::GenericDeclaration(_))));
    }

    #[test]
    fn renders_free_function() {
        let source = "/** Create a model. */\nexport function createModel(value: string, language?: string, uri?: Uri): ITextModel;\n";
        assert_eq!(
            render(source),
            "/// Create a model.\n#[wasm_bindgen(js_name = \"createModel\")]\npub fn create_model(value: &str, language: Option<&str>, uri: Option<&Uri>) -> ITextModel;"
        );
    }

    #[test]
    fn unsupported_parameter_type_fails() {
        let decl = parse("export function f(x: Promise<string>): void;\n");
        let err = decl.to_rust(&NamingPath::root(), &mut Session::default()).unwrap_err();
        assert!(matches!(err, Error::Unsupported(Unsupported::TypeExpression(_))));
    }

    #[test]
    fn renders_variadic_function() {
        assert_eq!(
            render("export function log(...values: any[]): void;\n"),
            "#[wasm_bindgen(variadic, js_name = \"log\")]\npub fn log(values: &[JsValue]);"
        );
    }

    #[test]
    fn renders_argument_notes() {
        let source =
            "/**\n * Set the theme.\n */\nexport function setTheme(theme: { base: string }): void;\n";
        assert_eq!(
            render(source),
            "/// Set the theme.\n///\n/// # Arguments\n///\n/// * `theme` - `{ base: string }`\n#[wasm_bindgen(js_name = \"setTheme\")]\npub fn set_theme(theme: &Object);"
        );
    }

    #[test]
    fn renders_return_notes() {
        assert_eq!(
            render("export function getModels(): ITextModel[];\n"),
            "/// # Returns\n///\n/// `ITextModel[]`\n#[wasm_bindgen(js_name = \"getModels\")]\npub fn get_models() -> Array;"
        );
    }
}
