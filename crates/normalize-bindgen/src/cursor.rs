//! Anchored matching over the unconsumed part of the input.
//!
//! Parsers take a [`Cursor`] by value and return the parsed value together
//! with a new cursor. The original cursor is untouched, so a failed
//! alternative leaves the caller free to try the next one.

use regex::{Captures, Regex};

use crate::error::{Error, Result, preview};

/// A parsed value and the input that follows it.
pub type Parsed<'a, T> = Result<(T, Cursor<'a>)>;

/// A named alternative for [`first_of`].
pub type Production<'p, 'a, T> = (&'static str, &'p dyn Fn(Cursor<'a>) -> Parsed<'a, T>);

/// The remaining input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cursor<'a> {
    rest: &'a str,
}

impl<'a> Cursor<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    pub fn rest(&self) -> &'a str {
        self.rest
    }

    pub fn is_empty(&self) -> bool {
        self.rest.is_empty()
    }

    /// Match `pattern` at the current position, then skip blank lines and
    /// line comments.
    pub fn consume(self, pattern: &Regex) -> Parsed<'a, Captures<'a>> {
        let (caps, rest) = self.consume_raw(pattern)?;
        Ok((caps, rest.skip_non_content()))
    }

    /// Match `pattern` at the current position without skipping anything
    /// after it.
    pub fn consume_raw(self, pattern: &Regex) -> Parsed<'a, Captures<'a>> {
        let Some(caps) = pattern.captures(self.rest) else {
            return Err(Error::mismatch(format!("/{}/", pattern.as_str()), self.rest));
        };
        let end = match caps.get(0) {
            Some(m) if m.start() == 0 => m.end(),
            _ => return Err(Error::mismatch(format!("/{}/", pattern.as_str()), self.rest)),
        };
        Ok((caps, Cursor::new(&self.rest[end..])))
    }

    /// Drop leading blank lines and `//` comment lines.
    pub fn skip_non_content(self) -> Self {
        let mut rest = self.rest;
        while !rest.is_empty() {
            let (line, next) = match rest.find('\n') {
                Some(i) => (&rest[..i], &rest[i + 1..]),
                None => (rest, ""),
            };
            let line = line.trim();
            if !line.is_empty() && !line.starts_with("//") {
                break;
            }
            rest = next;
        }
        Cursor::new(rest)
    }
}

/// Text of a named group, or `""` when it did not participate.
pub(crate) fn group<'a>(caps: &Captures<'a>, name: &str) -> &'a str {
    caps.name(name).map_or("", |m| m.as_str())
}

/// Try each production in order and return the first success.
///
/// Only grammar mismatches fall through to the next alternative; every
/// other error is returned as-is. When nothing matches, the mismatch lists
/// the failures of all alternatives as its causes.
pub fn first_of<'a, T>(input: Cursor<'a>, productions: &[Production<'_, 'a, T>]) -> Parsed<'a, T> {
    let mut causes = Vec::new();
    for (name, production) in productions {
        match production(input) {
            Ok(parsed) => return Ok(parsed),
            Err(err) if err.is_mismatch() => {
                tracing::trace!(production = name, "alternative did not match");
                causes.push(err);
            }
            Err(err) => return Err(err),
        }
    }
    let expected = productions
        .iter()
        .map(|(name, _)| format!("`{name}`"))
        .collect::<Vec<_>>()
        .join(" | ");
    Err(Error::GrammarMismatch {
        expected,
        preview: preview(input.rest()),
        causes,
    })
}
