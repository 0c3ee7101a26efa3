//! Import line rewriting.
//!
//! Two line-oriented forms become host imports:
//! - `le 'mod' se;`          → `import 'mod';`
//! - `le React, { x } se 'mod';` → `import React, { x } from 'mod';`
//!
//! Only the markers are rewritten. The binding list and the quoted module
//! specifier stay in place, so other passes remain free to act inside them.
//! A line only qualifies when its first token is `le` in top-level code;
//! comment and string state comes from the shared lexer, not from the line.

use nh_lexer::{at_line_start, is_ident_continue, is_ident_start, word_end, Lexer, ScanState};
use nh_syntax::{FROM_MARKER, IMPORT_MARKER};

use crate::edit::{EditBuffer, Pass};

enum ImportLine {
    /// `le 'mod' se`: the span from the closing quote through `se` is dropped.
    SideEffect { quote_end: usize, marker_end: usize, terminated: bool },
    /// `le bindings se 'mod'`.
    Bindings { marker: (usize, usize), quote_end: usize, terminated: bool },
}

pub(super) fn rewrite_imports(source: &str, edits: &mut EditBuffer<'_>) {
    let src = source.as_bytes();
    let mut lexer = Lexer::new(source);

    while let Some(at) = lexer.next_code() {
        if !is_ident_continue(src[at]) {
            continue;
        }
        let end = word_end(src, at);
        lexer.seek(end);

        if lexer.state() != ScanState::Normal
            || &src[at..end] != IMPORT_MARKER.as_bytes()
            || !at_line_start(src, at)
        {
            continue;
        }

        let Some(line) = match_import_line(src, at) else {
            continue;
        };
        edits.replace(Pass::Import, at, end, "import");
        let (stmt_end, terminated) = match line {
            ImportLine::SideEffect { quote_end, marker_end, terminated } => {
                edits.replace(Pass::Import, quote_end, marker_end, "");
                (marker_end, terminated)
            }
            ImportLine::Bindings { marker, quote_end, terminated } => {
                edits.replace(Pass::Import, marker.0, marker.1, "from");
                (quote_end, terminated)
            }
        };
        if !terminated {
            edits.insert(Pass::Import, stmt_end, ";");
        }
    }
}

fn match_import_line(src: &[u8], at: usize) -> Option<ImportLine> {
    let line_end = src[at..]
        .iter()
        .position(|&b| b == b'\n' || b == b'\r')
        .map_or(src.len(), |n| at + n);
    let line = &src[..line_end];

    let after_marker = at + IMPORT_MARKER.len();
    let start = skip_blank(line, after_marker);
    if start == after_marker {
        return None;
    }

    if let Some(quote_end) = quoted(line, start) {
        let marker = skip_blank(line, quote_end);
        if marker > quote_end && word_at(line, marker, FROM_MARKER) {
            let marker_end = marker + FROM_MARKER.len();
            if let Some(terminated) = statement_tail(line, marker_end) {
                return Some(ImportLine::SideEffect { quote_end, marker_end, terminated });
            }
        }
    }

    // Bindings are free-form; take the first `se` that is followed by a
    // quoted specifier and a clean end of statement.
    for k in start + 1..line_end {
        if !is_blank(line[k]) {
            continue;
        }
        let marker = skip_blank(line, k);
        if !word_at(line, marker, FROM_MARKER) {
            continue;
        }
        let marker_end = marker + FROM_MARKER.len();
        let spec = skip_blank(line, marker_end);
        if spec == marker_end {
            continue;
        }
        if let Some(quote_end) = quoted(line, spec) {
            if let Some(terminated) = statement_tail(line, quote_end) {
                return Some(ImportLine::Bindings {
                    marker: (marker, marker_end),
                    quote_end,
                    terminated,
                });
            }
        }
    }

    None
}

fn is_blank(b: u8) -> bool {
    b == b' ' || b == b'\t'
}

fn skip_blank(line: &[u8], i: usize) -> usize {
    let mut j = i;
    while j < line.len() && is_blank(line[j]) {
        j += 1;
    }
    j
}

fn word_at(line: &[u8], i: usize, word: &str) -> bool {
    line[i..].starts_with(word.as_bytes())
        && line.get(i + word.len()).map_or(true, |&b| !is_ident_continue(b))
        && (i == 0 || !is_ident_start(line[i - 1]))
}

/// End of a non-empty single- or double-quoted module specifier at `i`.
fn quoted(line: &[u8], i: usize) -> Option<usize> {
    let quote = *line.get(i)?;
    if quote != b'"' && quote != b'\'' {
        return None;
    }
    let mut j = i + 1;
    while j < line.len() && line[j] != quote {
        if line[j] == b'"' || line[j] == b'\'' {
            return None;
        }
        j += 1;
    }
    if j == line.len() || j == i + 1 {
        return None;
    }
    Some(j + 1)
}

/// What may follow the module specifier: `;` (then anything), or nothing but
/// blanks and an optional comment. Returns whether a `;` was present.
fn statement_tail(line: &[u8], i: usize) -> Option<bool> {
    let j = skip_blank(line, i);
    match line.get(j) {
        Some(b';') => Some(true),
        None => Some(false),
        Some(b'/') if matches!(line.get(j + 1), Some(b'/' | b'*')) => Some(false),
        Some(_) => None,
    }
}
