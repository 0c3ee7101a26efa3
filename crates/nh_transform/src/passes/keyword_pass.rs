//! Keyword substitution.
//!
//! Each identifier run in live code is classified, first match wins:
//! 1. `warna` followed (across whitespace) by `agar` → one `else if` edit
//! 2. `async_kaam` → `async function` before `name(`, otherwise `async`
//! 3. Extended identifiers in call position, outside member access
//! 4. Plain keywords
//!
//! Anything else is left alone.

use nh_lexer::{
    follows_member_dot, is_ident_continue, is_ident_start, skip_whitespace, word_end, Lexer,
};
use nh_syntax::{
    extended_identifier, keyword, ASYNC, ASYNC_FUNCTION, ASYNC_MARKER, ELSE, ELSE_IF, IF,
};

use crate::edit::{EditBuffer, Pass};

pub(super) fn rewrite_keywords(source: &str, edits: &mut EditBuffer<'_>) {
    let src = source.as_bytes();
    let mut lexer = Lexer::new(source);

    while let Some(at) = lexer.next_code() {
        // Digit-led runs are numeric literals; skip them whole so `0xde`
        // never yields a `de`.
        if !is_ident_continue(src[at]) {
            continue;
        }
        let end = word_end(src, at);
        lexer.seek(end);
        if !is_ident_start(src[at]) {
            continue;
        }

        if let Some((span_end, host)) = classify(source, at, end) {
            edits.replace(Pass::Keyword, at, span_end, host);
            lexer.seek(span_end);
        }
    }
}

/// Decide the replacement for the word at `start..end`, returning the end of
/// the span it covers (beyond `end` when two words fuse).
fn classify(source: &str, start: usize, end: usize) -> Option<(usize, &'static str)> {
    let src = source.as_bytes();
    let word = &source[start..end];

    if word == ELSE {
        let next = skip_whitespace(src, end);
        if src.get(next).is_some_and(|&b| is_ident_start(b)) {
            let next_end = word_end(src, next);
            if &src[next..next_end] == IF.as_bytes() {
                return Some((next_end, ELSE_IF));
            }
        }
    }

    if word == ASYNC_MARKER {
        return Some((end, async_expansion(src, end)));
    }

    if let Some(host) = extended_identifier(word) {
        if !follows_member_dot(src, start) && src.get(skip_whitespace(src, end)) == Some(&b'(') {
            return Some((end, host));
        }
    }

    keyword(word).map(|host| (end, host))
}

fn async_expansion(src: &[u8], end: usize) -> &'static str {
    let next = skip_whitespace(src, end);
    match src.get(next) {
        Some(b'(') => ASYNC,
        Some(&b) if is_ident_start(b) => {
            let after = skip_whitespace(src, word_end(src, next));
            if src.get(after) == Some(&b'(') {
                ASYNC_FUNCTION
            } else {
                ASYNC
            }
        }
        _ => ASYNC,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::apply;
    use pretty_assertions::assert_eq;

    fn rewrite(source: &str) -> String {
        apply(rewrite_keywords, source)
    }

    #[test]
    fn keyword_for_keyword() {
        assert_eq!(rewrite("rakh x tay = sach;"), "let x const = true;");
        assert_eq!(
            rewrite("jab_tak (ye.ok) { tod; } liye (;;) { chhodo; }"),
            "while (this.ok) { break; } for (;;) { continue; }"
        );
    }

    #[test]
    fn else_if_fuses() {
        assert_eq!(rewrite("warna agar (x) { de jhoot; }"), "else if (x) { return false; }");
        assert_eq!(rewrite("} warna\n    agar (y) {"), "} else if (y) {");
    }

    #[test]
    fn lone_else() {
        assert_eq!(rewrite("warna { de; }"), "else { return; }");
        assert_eq!(rewrite("warna agarwal"), "else agarwal");
        assert_eq!(rewrite("warna /* c */ agar"), "else /* c */ if");
    }

    #[test]
    fn async_marker_before_arrow() {
        assert_eq!(rewrite("async_kaam (x) => x"), "async (x) => x");
        assert_eq!(rewrite("async_kaam x => x"), "async x => x");
    }

    #[test]
    fn async_marker_before_named_function() {
        assert_eq!(rewrite("async_kaam load() {}"), "async function load() {}");
        assert_eq!(rewrite("async_kaam load (a) {}"), "async function load (a) {}");
        assert_eq!(rewrite("async_kaam kaam load() {}"), "async function load() {}");
    }

    #[test]
    fn async_marker_defaults_to_async() {
        assert_eq!(rewrite("async_kaam"), "async");
        assert_eq!(rewrite("tay f = async_kaam;"), "const f = async;");
    }

    #[test]
    fn extended_identifiers_only_in_call_position() {
        assert_eq!(rewrite("dikha('hi')"), "console.log('hi')");
        assert_eq!(rewrite("keys (o)"), "Object.keys (o)");
        assert_eq!(rewrite("rakh f = dikha;"), "let f = dikha;");
        assert_eq!(rewrite("obj.dikha(1)"), "obj.dikha(1)");
        assert_eq!(rewrite("obj.\n  query(1)"), "obj.\n  query(1)");
        assert_eq!(rewrite("f(...values(o))"), "f(...Object.values(o))");
    }

    #[test]
    fn strings_and_comments_are_inert() {
        let source = "'de' \"de\" `de` // de\n/* de */ de";
        assert_eq!(rewrite(source), "'de' \"de\" `de` // de\n/* de */ return");
    }

    #[test]
    fn escaped_quote_keeps_string_open() {
        assert_eq!(rewrite(r"'a\' de' de"), r"'a\' de' return");
        assert_eq!(rewrite(r#""a\" de" de"#), r#""a\" de" return"#);
    }

    #[test]
    fn template_hole_is_live_code() {
        assert_eq!(rewrite("`sach ${ sach } sach`"), "`sach ${ true } sach`");
        assert_eq!(
            rewrite("`${ naya Map({ a: `x ${ye}` }) } de`"),
            "`${ new Map({ a: `x ${this}` }) } de`"
        );
    }

    #[test]
    fn partial_words_are_untouched() {
        let source = "rakhna deh _de de2 $de 0xde 1de";
        assert_eq!(rewrite(source), source);
    }

    #[test]
    fn quote_in_regex_literal_opens_a_string() {
        assert_eq!(rewrite("tay r = /'/; de x;\nde y;"), "const r = /'/; de x;\nreturn y;");
    }

    #[test]
    fn unterminated_string_stops_substitution() {
        assert_eq!(rewrite("de `de ${"), "return `de ${");
        assert_eq!(rewrite("de /* de"), "return /* de");
    }
}
