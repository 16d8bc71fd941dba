//! Bracket-aware scanning.
//!
//! Delimiters inside string literals or comments are counted like any
//! other; declaration files rarely put unbalanced brackets in either.

use crate::error::{Error, Result};

/// Read up to the delimiter that closes an already-open block.
///
/// `input` starts just after the opening delimiter. Returns the block body,
/// without the closing delimiter, and the text after it.
pub fn read_until_closing(input: &str, open: char, close: char) -> Result<(&str, &str)> {
    let mut depth = 1usize;
    for (i, ch) in input.char_indices() {
        if ch == open {
            depth += 1;
        } else if ch == close {
            depth -= 1;
            if depth == 0 {
                return Ok((&input[..i], &input[i + ch.len_utf8()..]));
            }
        }
    }
    Err(Error::Structural { close, depth })
}

/// Split `input` on `sep` wherever it is not nested in brackets.
///
/// Angle brackets count as nesting, except for the `>` of an arrow.
pub fn split_top_level(input: &str, sep: char) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut depth = 0usize;
    let mut prev = None;
    for (i, ch) in input.char_indices() {
        match ch {
            '(' | '[' | '{' | '<' => depth += 1,
            '>' if prev == Some('=') => {}
            ')' | ']' | '}' | '>' => depth = depth.saturating_sub(1),
            _ if ch == sep && depth == 0 => {
                parts.push(&input[start..i]);
                start = i + ch.len_utf8();
            }
            _ => {}
        }
        prev = Some(ch);
    }
    parts.push(&input[start..]);
    parts
}

/// Read up to the first top-level `terminator`.
///
/// Returns the text before it and the text after it, or `None` if the input
/// has no such terminator.
pub fn read_until_terminator(input: &str, terminator: char) -> Option<(&str, &str)> {
    let mut parts = split_top_level(input, terminator).into_iter();
    let head = parts.next()?;
    parts.next()?;
    Some((head, &input[head.len() + terminator.len_utf8()..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closing_brace_respects_nesting() {
        let (body, rest) = read_until_closing("a { b } c } tail", '{', '}').unwrap();
        assert_eq!(body, "a { b } c ");
        assert_eq!(rest, " tail");
    }

    #[test]
    fn unbalanced_input_is_structural() {
        let err = read_until_closing("a { b ", '{', '}').unwrap_err();
        assert!(matches!(err, Error::Structural { close: '}', depth: 2 }));
    }

    #[test]
    fn parentheses_scan() {
        let (params, rest) =
            read_until_closing("cb: (x: number) => void): void;", '(', ')').unwrap();
        assert_eq!(params, "cb: (x: number) => void");
        assert_eq!(rest, ": void;");
    }

    #[test]
    fn split_ignores_nested_separators() {
        assert_eq!(
            split_top_level("a: (x: number, y: number) => void, b: { c: string, d: number }", ','),
            vec!["a: (x: number, y: number) => void", " b: { c: string, d: number }"]
        );
    }

    #[test]
    fn split_handles_arrows() {
        assert_eq!(
            split_top_level("(() => void) | null", '|'),
            vec!["(() => void) ", " null"]
        );
        assert_eq!(split_top_level("() => A | B", '|'), vec!["() => A ", " B"]);
    }

    #[test]
    fn terminator_at_top_level() {
        assert_eq!(
            read_until_terminator(" { a: string; b: number };\nnext", ';'),
            Some((" { a: string; b: number }", "\nnext"))
        );
        assert_eq!(read_until_terminator("no terminator", ';'), None);
    }
}
