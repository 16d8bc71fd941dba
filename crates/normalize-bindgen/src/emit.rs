//! Text assembly helpers shared by the declaration writers.

use std::fmt::Display;

const INDENT: &str = "    ";

/// Indent every non-blank line by one level.
pub fn indent(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                String::new()
            } else {
                format!("{INDENT}{line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Trim each chunk, drop the empty ones and join the rest with newlines.
pub fn join_nonempty<S: AsRef<str>>(chunks: impl IntoIterator<Item = S>) -> String {
    chunks
        .into_iter()
        .filter_map(|chunk| {
            let chunk = chunk.as_ref().trim();
            (!chunk.is_empty()).then(|| chunk.to_string())
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Wrap declarations in an `extern "C"` block.
pub fn extern_block(body: &str) -> String {
    format!("#[wasm_bindgen]\nextern \"C\" {{\n{}\n}}", indent(body))
}

/// Builder for a `#[wasm_bindgen(...)]` attribute.
#[derive(Debug, Default, Clone)]
pub struct Attr {
    args: Vec<String>,
}

impl Attr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn flag(mut self, name: &str) -> Self {
        self.args.push(name.to_string());
        self
    }

    pub fn flag_if(self, cond: bool, name: &str) -> Self {
        if cond { self.flag(name) } else { self }
    }

    pub fn pair(mut self, key: &str, value: impl Display) -> Self {
        self.args.push(format!("{key} = {value}"));
        self
    }

    pub fn quoted(mut self, key: &str, value: impl Display) -> Self {
        self.args.push(format!("{key} = \"{value}\""));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    pub fn render(&self) -> String {
        if self.args.is_empty() {
            "#[wasm_bindgen]".to_string()
        } else {
            format!("#[wasm_bindgen({})]", self.args.join(", "))
        }
    }
}
