//! Declarations found inside a namespace.
//!
//! Every declaration parses from a [`Cursor`](crate::cursor::Cursor)
//! positioned at its optional doc comment and renders to binding text
//! through a `to_rust` method.

pub mod alias;
pub mod enumeration;
pub mod function;
pub mod object;

use crate::error::{Result, Unsupported};

/// Words that may precede a member name.
pub(crate) const MODIFIERS: &str =
    "static|readonly|get|set|public|private|protected|abstract|declare|async";

/// Modifier keywords written before a member, consumed as they are handled.
#[derive(Debug, Default)]
pub(crate) struct Modifiers<'a> {
    words: Vec<&'a str>,
}

impl<'a> Modifiers<'a> {
    pub fn parse(text: &'a str) -> Self {
        Self {
            words: text.split_whitespace().collect(),
        }
    }

    /// Remove `word` if present, returning whether it was.
    pub fn take(&mut self, word: &str) -> bool {
        let before = self.words.len();
        self.words.retain(|w| *w != word);
        self.words.len() != before
    }

    /// Fail if any modifier was left unhandled.
    pub fn finish(self, ident: &str) -> Result<()> {
        if self.words.is_empty() {
            return Ok(());
        }
        Err(Unsupported::Modifiers {
            ident: ident.to_string(),
            modifiers: self.words.join(" "),
        }
        .into())
    }
}
