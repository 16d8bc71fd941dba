//! JSDoc blocks: extraction from declarations and rendering as `///` lines.

use std::sync::LazyLock;

use regex::Regex;

use crate::cursor::{Cursor, group};

static DOC_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ */\*\*\n(?: *\*(?: .*)?\n)+ */\*/\n").unwrap());
static DOC_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^ */\*\*(?P<text>.*?)\*/ *\n").unwrap());

/// Consume a leading doc comment, if there is one.
///
/// Returns the comment text with its delimiters and `*` leaders removed, or
/// an empty string, along with the input after the comment.
pub fn consume_docs(input: Cursor<'_>) -> (String, Cursor<'_>) {
    if let Ok((caps, rest)) = input.consume(&DOC_BLOCK) {
        let block = caps.get(0).map_or("", |m| m.as_str());
        return (strip_block(block), rest);
    }
    if let Ok((caps, rest)) = input.consume(&DOC_LINE) {
        return (group(&caps, "text").trim().to_string(), rest);
    }
    (String::new(), input)
}

fn strip_block(block: &str) -> String {
    let lines: Vec<&str> = block.lines().collect();
    let inner = lines.get(1..lines.len().saturating_sub(1)).unwrap_or_default();
    inner
        .iter()
        .map(|line| {
            let line = line.trim_start();
            let line = line.strip_prefix('*').unwrap_or(line);
            line.strip_prefix(' ').unwrap_or(line).trim_end()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render `text` as Rust doc comment lines.
pub fn doc_comment(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                "///".to_string()
            } else {
                format!("/// {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Join non-empty doc sections with a blank line and render them.
pub fn doc_sections<'s>(sections: impl IntoIterator<Item = &'s str>) -> String {
    let text = sections
        .into_iter()
        .filter(|section| !section.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n");
    doc_comment(&text)
}

/// Wrap type text for use in docs, collapsing internal whitespace.
pub fn code_note(text: &str) -> String {
    format!("`{}`", text.split_whitespace().collect::<Vec<_>>().join(" "))
}
