//! Neha → TSX source transformation.
//!
//! Neha shares almost every token with TSX. The engine rewrites the few that
//! differ without building a syntax tree:
//!
//! - Import lines (`le x se 'mod'`)
//! - Keywords and the context-sensitive `warna agar` / `async_kaam` forms
//! - Call-position identifiers (`dikha(...)` → `console.log(...)`)
//! - Markup `class=` attributes
//! - Member aliases (`el.ghatevent`)
//!
//! Each pass records edits against the original text; the edits are applied
//! once, producing the output, a [`PositionMap`], and a v3 source map.
//!
//! # Example
//!
//! ```
//! use nh_syntax::TransformOptions;
//! use nh_transform::transform;
//!
//! let out = transform("warna agar (x) { de jhoot; }", &TransformOptions::default()).unwrap();
//! assert_eq!(out.code, "else if (x) { return false; }");
//! ```

pub mod edit;
pub mod error;
pub mod position;
pub mod source_map;

mod passes;

pub use edit::{Edit, EditBuffer, Pass, Rendered};
pub use error::{EditSite, TransformError};
pub use position::{LineIndex, Location, PositionMap, Segment};
pub use source_map::RawSourceMap;

use nh_syntax::TransformOptions;

/// Result of transforming one file.
#[derive(Debug, Clone)]
pub struct TransformOutput {
    /// TSX text, with the inline map trailer if requested.
    pub code: String,
    pub map: RawSourceMap,
    /// Offset-level mapping for `code` (excluding any trailer).
    pub positions: PositionMap,
}

/// Rewrite one Neha source into TSX.
///
/// Pure: no I/O and no state shared between calls. Malformed input (an
/// unterminated string, comment, template or tag) never fails; the output is
/// best effort. An error means the engine itself produced conflicting edits.
#[tracing::instrument(level = "debug", skip_all, fields(filename = options.filename()))]
pub fn transform(
    source: &str,
    options: &TransformOptions,
) -> Result<TransformOutput, TransformError> {
    let mut edits = EditBuffer::new(source);
    passes::collect_edits(source, &mut edits);

    let Rendered { mut code, positions } = edits.finish()?;
    let map = source_map::build_source_map(options.filename(), source, &code, &positions)?;

    if options.inline_source_map {
        code.push_str(&map.inline_comment()?);
    }

    Ok(TransformOutput { code, map, positions })
}

/// Whether the text looks like it contains markup: a `<` directly followed by
/// a letter and an identifier-like run. Used to pick `.tsx` over `.ts`.
pub fn looks_like_tsx(code: &str) -> bool {
    let src = code.as_bytes();
    src.windows(2).any(|w| w[0] == b'<' && w[1].is_ascii_alphabetic())
}
