use std::fmt;

use thiserror::Error;

use crate::edit::Pass;

/// Where an edit came from, for reporting engine bugs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditSite {
    pub pass: Pass,
    pub start: usize,
    pub end: usize,
    /// One-based line of `start` in the original source.
    pub line: usize,
    /// One-based byte column of `start` in the original source.
    pub column: usize,
}

impl fmt::Display for EditSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} pass {}..{} ({}:{})",
            self.pass, self.start, self.end, self.line, self.column
        )
    }
}

#[derive(Debug, Error)]
pub enum TransformError {
    /// Two passes claimed the same source range. Always an engine bug.
    #[error("overlapping edits: {first} and {second}")]
    OverlappingEdits { first: EditSite, second: EditSite },

    #[error("failed to serialize source map: {0}")]
    SourceMap(String),

    #[error("invalid source map JSON: {0}")]
    Json(#[from] serde_json::Error),
}
