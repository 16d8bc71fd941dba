//! Error types for declaration parsing and translation.

use std::fmt::Write;

/// Number of input lines shown in a mismatch preview.
const PREVIEW_LINES: usize = 8;

/// Errors raised while reading declarations or generating bindings.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// No production matched at the current position.
    ///
    /// `causes` holds the failures of every alternative that was tried, in
    /// the order they were attempted.
    #[error("failed to parse: expected {expected}\n{preview}")]
    GrammarMismatch {
        expected: String,
        preview: String,
        causes: Vec<Error>,
    },

    /// The input was recognized but uses a construct that has no binding.
    #[error("unsupported construct: {0}")]
    Unsupported(#[from] Unsupported),

    /// Input ended while a delimiter was still open.
    #[error("missing closing `{close}` ({depth} still open)")]
    Structural { close: char, depth: usize },
}

/// Constructs that are recognized and deliberately rejected.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Unsupported {
    #[error("optional method `{0}`")]
    OptionalMethod(String),
    #[error("constructor of `{0}`")]
    Constructor(String),
    #[error("generic declaration `{0}`")]
    GenericDeclaration(String),
    #[error("unhandled modifiers on `{ident}`: {modifiers}")]
    Modifiers { ident: String, modifiers: String },
    #[error("can't infer value type for empty enum `{0}`")]
    EmptyEnum(String),
    #[error("enum `{0}` mixes numeric and string values")]
    ConflictingEnumValues(String),
    #[error("can't infer value type of `{variant} = {value}`")]
    EnumValue { variant: String, value: String },
    #[error("string literal {value:?} in `{ident}` has no usable variant name")]
    LiteralVariant { ident: String, value: String },
    #[error("`{ident}` has more than one variant named `{variant}`")]
    DuplicateVariant { ident: String, variant: String },
    #[error("type alias `{ident}` is not a string-literal union: `{ty}`")]
    TypeAlias { ident: String, ty: String },
    #[error("type expression `{0}`")]
    TypeExpression(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// A mismatch for a single production, previewing `input`.
    pub fn mismatch(expected: impl Into<String>, input: &str) -> Self {
        Error::GrammarMismatch {
            expected: expected.into(),
            preview: preview(input),
            causes: Vec::new(),
        }
    }

    pub fn is_mismatch(&self) -> bool {
        matches!(self, Error::GrammarMismatch { .. })
    }

    pub fn causes(&self) -> &[Error] {
        match self {
            Error::GrammarMismatch { causes, .. } => causes,
            _ => &[],
        }
    }

    /// Render this error and its chain of causes as an indented tree.
    ///
    /// The root error is printed in full; causes print only their first
    /// line since their previews mostly repeat the root's.
    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "{self}");
        for cause in self.causes() {
            cause.write_cause(&mut out, 1);
        }
        out
    }

    fn write_cause(&self, out: &mut String, depth: usize) {
        let message = self.to_string();
        let headline = message.lines().next().unwrap_or_default();
        let _ = writeln!(out, "{}caused by: {headline}", "  ".repeat(depth));
        for cause in self.causes() {
            cause.write_cause(out, depth + 1);
        }
    }
}

/// The first lines of `input` framed by rules, for error messages.
pub(crate) fn preview(input: &str) -> String {
    let rule = "=".repeat(80);
    let mut lines: Vec<&str> = input.lines().take(PREVIEW_LINES + 1).collect();
    if lines.len() > PREVIEW_LINES {
        lines.truncate(PREVIEW_LINES);
        lines.push("... TRUNCATED");
    }
    format!("{rule}\n{}\n{rule}", lines.join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preview_truncates_long_input() {
        let input: String = (0..20).map(|i| format!("line {i}\n")).collect();
        let preview = preview(&input);
        assert!(preview.contains("line 7"));
        assert!(!preview.contains("line 8"));
        assert!(preview.contains("... TRUNCATED"));
    }

    #[test]
    fn preview_keeps_short_input() {
        let preview = preview("a\nb\n");
        assert!(preview.contains("a\nb"));
        assert!(!preview.contains("TRUNCATED"));
    }

    #[test]
    fn report_lists_causes() {
        let err = Error::GrammarMismatch {
            expected: "`A` | `B`".into(),
            preview: preview("x"),
            causes: vec![Error::mismatch("a", "x"), Error::mismatch("b", "x")],
        };
        let report = err.report();
        assert!(report.starts_with("failed to parse: expected `A` | `B`"));
        assert!(report.contains("  caused by: failed to parse: expected a"));
        assert!(report.contains("  caused by: failed to parse: expected b"));
    }

    #[test]
    fn unsupported_is_not_a_mismatch() {
        let err = Error::from(Unsupported::Constructor("Foo".into()));
        assert!(!err.is_mismatch());
        assert_eq!(err.to_string(), "unsupported construct: constructor of `Foo`");
    }
}
