//! Markup `class=` → `className=` rewriting.
//!
//! A `<` in live code followed by an ASCII letter or `_` is taken to open a
//! tag. This is a syntactic heuristic: nothing checks that the surrounding
//! code is really markup, and a comparison such as `a <b` opens a "tag" that
//! runs to the next unquoted, unbraced `>`. That is harmless because the only
//! rewrite inside a tag is the `class=` attribute name.
//!
//! Attribute values in braces are code and are skipped with the shared lexer.

use nh_lexer::{is_ident_continue, Lexer, ScanState};
use nh_syntax::{CLASS_ATTR, HOST_CLASS_ATTR};

use crate::edit::{EditBuffer, Pass};

pub(super) fn rewrite_class_attributes(source: &str, edits: &mut EditBuffer<'_>) {
    let src = source.as_bytes();
    let mut lexer = Lexer::new(source);

    while let Some(at) = lexer.next_code() {
        let opens_tag = src[at] == b'<'
            && src
                .get(at + 1)
                .is_some_and(|&b| b.is_ascii_alphabetic() || b == b'_');
        if !opens_tag {
            continue;
        }
        let end = scan_tag(source, at + 1, |attr| {
            edits.replace(Pass::Markup, attr, attr + CLASS_ATTR.len(), HOST_CLASS_ATTR);
        });
        lexer.seek(end);
    }
}

/// Walk a tag body from `start` to just past its closing `>`, reporting each
/// `class=` that sits at attribute-name position.
fn scan_tag(source: &str, start: usize, mut on_class: impl FnMut(usize)) -> usize {
    let src = source.as_bytes();
    let mut j = start;
    let mut quote: Option<u8> = None;

    while j < src.len() {
        let c = src[j];

        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            j += 1;
            continue;
        }

        match c {
            b'>' => return j + 1,
            b'{' => {
                j = expression_end(source, j);
                continue;
            }
            b'"' | b'\'' => quote = Some(c),
            _ if is_class_attr(src, j) => {
                on_class(j);
                j += CLASS_ATTR.len();
                continue;
            }
            _ => {}
        }
        j += 1;
    }

    src.len()
}

/// Just past the `}` matching the `{` at `open`. The expression is ordinary
/// code, so strings, templates and comments inside it come from the lexer.
fn expression_end(source: &str, open: usize) -> usize {
    let src = source.as_bytes();
    let mut lexer = Lexer::new(source);
    lexer.seek(open + 1);
    let mut depth = 1u32;

    while let Some(at) = lexer.next_code() {
        if lexer.state() != ScanState::Normal {
            continue;
        }
        match src[at] {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return at + 1;
                }
            }
            _ => {}
        }
    }

    src.len()
}

/// `class=` as a whole attribute name, not the tail of `data-class=`.
fn is_class_attr(src: &[u8], j: usize) -> bool {
    src[j..].starts_with(CLASS_ATTR.as_bytes()) && {
        let prev = src[j - 1];
        !is_ident_continue(prev) && prev != b'-' && prev != b':'
    }
}
