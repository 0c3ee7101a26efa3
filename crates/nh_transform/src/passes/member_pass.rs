//! Member alias rewriting: `.ghatevent` → `.addEventListener` and friends.
//!
//! Unlike extended identifiers, aliases apply to reads as well as calls. Only
//! the property name is replaced; the dot stays.

use nh_lexer::{is_ident_continue, is_ident_start, is_member_dot, word_end, Lexer};
use nh_syntax::member_alias;

use crate::edit::{EditBuffer, Pass};

pub(super) fn rewrite_member_aliases(source: &str, edits: &mut EditBuffer<'_>) {
    let src = source.as_bytes();
    let mut lexer = Lexer::new(source);

    while let Some(at) = lexer.next_code() {
        if is_ident_continue(src[at]) {
            lexer.seek(word_end(src, at));
            continue;
        }
        if !is_member_dot(src, at) {
            continue;
        }

        let start = at + 1;
        if !src.get(start).is_some_and(|&b| is_ident_start(b)) {
            continue;
        }
        let end = word_end(src, start);
        lexer.seek(end);
        if let Some(host) = member_alias(&source[start..end]) {
            edits.replace(Pass::Member, start, end, host);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::passes::apply;
    use pretty_assertions::assert_eq;

    fn rewrite(source: &str) -> String {
        apply(rewrite_member_aliases, source)
    }

    #[test]
    fn rewrites_calls_and_reads() {
        assert_eq!(
            rewrite("btn.ghatevent('click', f)"),
            "btn.addEventListener('click', f)"
        );
        assert_eq!(rewrite("tay q = document.query;"), "tay q = document.querySelector;");
        assert_eq!(rewrite("el?.hatevent(x)"), "el?.removeEventListener(x)");
        assert_eq!(
            rewrite("doc.queryAll('a').query"),
            "doc.querySelectorAll('a').querySelector"
        );
    }

    #[test]
    fn non_members_are_untouched() {
        for source in [
            "query(x)",
            "'a.query'",
            "// a.query",
            "obj.keys(o)",
            "[...query]",
            "obj. query",
            "obj.querying",
            "1.5",
        ] {
            assert_eq!(rewrite(source), source);
        }
    }

    #[test]
    fn member_inside_template_hole() {
        assert_eq!(
            rewrite("`${el.query('p')} .query`"),
            "`${el.querySelector('p')} .query`"
        );
    }
}
