//! The four rewrite passes, run in a fixed order over the original source.
//!
//! Processing order:
//! 1. Import lines (`le x se 'mod'`)
//! 2. Keywords, `warna agar`, `async_kaam`, and call-position identifiers
//! 3. Markup `class=` attributes
//! 4. Member aliases (`.ghatevent`)
//!
//! Every pass reads the same untouched text and records edits against it.
//! The passes act on disjoint token classes (import markers, identifier runs
//! that are not markers, attribute names inside tags, properties after a
//! dot), so their edits never overlap.

use crate::edit::{EditBuffer, Pass};

mod import_pass;
mod keyword_pass;
mod markup_pass;
mod member_pass;

pub(crate) fn collect_edits(source: &str, edits: &mut EditBuffer<'_>) {
    run(Pass::Import, source, edits, import_pass::rewrite_imports);
    run(Pass::Keyword, source, edits, keyword_pass::rewrite_keywords);
    run(Pass::Markup, source, edits, markup_pass::rewrite_class_attributes);
    run(Pass::Member, source, edits, member_pass::rewrite_member_aliases);
}

fn run(
    pass: Pass,
    source: &str,
    edits: &mut EditBuffer<'_>,
    rewrite: fn(&str, &mut EditBuffer<'_>),
) {
    let before = edits.len();
    rewrite(source, edits);
    tracing::debug!(%pass, edits = edits.len() - before, "pass complete");
}

/// Run a single pass and render its result.
#[cfg(test)]
pub(super) fn apply(rewrite: fn(&str, &mut EditBuffer<'_>), source: &str) -> String {
    let mut edits = EditBuffer::new(source);
    rewrite(source, &mut edits);
    edits.finish().expect("single pass produced overlapping edits").code
}
