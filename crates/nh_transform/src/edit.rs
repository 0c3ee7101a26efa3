//! Non-destructive edit list over the original source.
//!
//! Passes never modify text. Each records `(start, end, replacement)` spans
//! against the untouched original, and [`EditBuffer::finish`] materializes
//! the output and its [`PositionMap`] in one sweep.

use std::fmt;

use crate::error::{EditSite, TransformError};
use crate::position::{LineIndex, PositionMap, Segment};

/// The rewrite pass that produced an edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Pass {
    Import,
    Keyword,
    Markup,
    Member,
}

impl fmt::Display for Pass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Pass::Import => write!(f, "import"),
            Pass::Keyword => write!(f, "keyword"),
            Pass::Markup => write!(f, "markup-attribute"),
            Pass::Member => write!(f, "member-alias"),
        }
    }
}

/// One substitution. `start == end` is a pure insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Edit {
    pub pass: Pass,
    pub start: usize,
    pub end: usize,
    pub replacement: String,
}

/// Output text and its position map.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub code: String,
    pub positions: PositionMap,
}

pub struct EditBuffer<'a> {
    source: &'a str,
    edits: Vec<Edit>,
}

impl<'a> EditBuffer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source,
            edits: Vec::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.edits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edits.is_empty()
    }

    pub fn replace(&mut self, pass: Pass, start: usize, end: usize, replacement: &str) {
        debug_assert!(start <= end && end <= self.source.len());
        debug_assert!(self.source.is_char_boundary(start) && self.source.is_char_boundary(end));
        self.edits.push(Edit {
            pass,
            start,
            end,
            replacement: replacement.to_string(),
        });
    }

    pub fn insert(&mut self, pass: Pass, at: usize, text: &str) {
        self.replace(pass, at, at, text);
    }

    /// Apply every edit and build the position map.
    ///
    /// Fails if any two edits overlap. Insertions at the boundary of a
    /// replacement do not overlap it; several insertions at one offset are
    /// emitted in the order they were recorded.
    pub fn finish(mut self) -> Result<Rendered, TransformError> {
        // Stable sort: equal spans keep pass order.
        self.edits.sort_by_key(|e| (e.start, e.end));

        for pair in self.edits.windows(2) {
            if pair[1].start < pair[0].end {
                let lines = LineIndex::new(self.source);
                return Err(TransformError::OverlappingEdits {
                    first: self.site(&lines, &pair[0]),
                    second: self.site(&lines, &pair[1]),
                });
            }
        }

        let mut code = String::with_capacity(self.source.len());
        let mut segments = Vec::with_capacity(self.edits.len() * 2 + 1);
        let mut cursor = 0;

        for edit in &self.edits {
            if edit.start > cursor {
                let verbatim = cursor..edit.start;
                push_segment(&mut code, &mut segments, verbatim.clone(), &self.source[verbatim], true);
            }
            let replaced = edit.start..edit.end;
            push_segment(&mut code, &mut segments, replaced, &edit.replacement, false);
            cursor = edit.end;
        }
        if cursor < self.source.len() {
            let tail = cursor..self.source.len();
            push_segment(&mut code, &mut segments, tail, &self.source[cursor..], true);
        }

        let positions = PositionMap::new(segments, self.source, code.len());
        Ok(Rendered { code, positions })
    }

    fn site(&self, lines: &LineIndex, edit: &Edit) -> EditSite {
        let loc = lines.locate(edit.start);
        EditSite {
            pass: edit.pass,
            start: edit.start,
            end: edit.end,
            line: loc.line + 1,
            column: loc.column + 1,
        }
    }
}

fn push_segment(
    code: &mut String,
    segments: &mut Vec<Segment>,
    original: std::ops::Range<usize>,
    text: &str,
    verbatim: bool,
) {
    let start = code.len();
    code.push_str(text);
    segments.push(Segment {
        output: start..code.len(),
        original,
        verbatim,
    });
}
