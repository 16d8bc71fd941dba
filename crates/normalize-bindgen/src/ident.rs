//! Case conversion and Rust identifier escaping.

use heck::{ToSnakeCase, ToUpperCamelCase};

/// Keywords that may be used as raw identifiers.
const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe",
    "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const RESERVED: &[&str] = &["crate", "self", "Self", "super"];

/// `camelCase` or `PascalCase` to `snake_case`.
pub fn to_snake(ident: &str) -> String {
    ident.to_snake_case()
}

/// Any casing to `UpperCamelCase`, prefixed with `_` if it would start
/// with a digit.
pub fn to_upper_camel(text: &str) -> String {
    let camel = text.to_upper_camel_case();
    if camel.starts_with(|c: char| c.is_ascii_digit()) {
        format!("_{camel}")
    } else {
        camel
    }
}

/// Make `ident` usable as a Rust identifier.
pub fn escape(ident: &str) -> String {
    if RESERVED.contains(&ident) {
        format!("{ident}_")
    } else if KEYWORDS.contains(&ident) {
        format!("r#{ident}")
    } else {
        ident.to_string()
    }
}

/// `snake_case` form of a JavaScript name, escaped for Rust.
pub fn rust_fn_ident(js_name: &str) -> String {
    escape(&to_snake(js_name))
}
