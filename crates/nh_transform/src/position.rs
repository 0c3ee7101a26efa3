//! Mapping between output offsets and original offsets.

use std::ops::Range;

/// Zero-based line and byte column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Location {
    pub line: usize,
    pub column: usize,
}

/// Line start offsets of a text.
#[derive(Debug, Clone)]
pub struct LineIndex {
    starts: Vec<usize>,
}

impl LineIndex {
    pub fn new(text: &str) -> Self {
        let mut starts = vec![0];
        starts.extend(
            text.bytes()
                .enumerate()
                .filter(|&(_, b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self { starts }
    }

    pub fn locate(&self, offset: usize) -> Location {
        let line = self.starts.partition_point(|&s| s <= offset) - 1;
        Location {
            line,
            column: offset - self.starts[line],
        }
    }
}

/// A contiguous piece of output and the original range it came from.
///
/// Verbatim segments map byte-for-byte. Replaced segments map every output
/// offset to the start of the original range, and every original offset to
/// the start of the output range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    pub output: Range<usize>,
    pub original: Range<usize>,
    pub verbatim: bool,
}

#[derive(Debug, Clone)]
pub struct PositionMap {
    segments: Vec<Segment>,
    output_len: usize,
    original_len: usize,
    original_lines: LineIndex,
}

impl PositionMap {
    pub(crate) fn new(segments: Vec<Segment>, original: &str, output_len: usize) -> Self {
        Self {
            segments,
            output_len,
            original_len: original.len(),
            original_lines: LineIndex::new(original),
        }
    }

    /// Segments in output order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Original offset that produced the output byte at `output`.
    pub fn original_offset(&self, output: usize) -> Option<usize> {
        if output > self.output_len {
            return None;
        }
        if output == self.output_len {
            return Some(self.original_len);
        }
        let idx = self.segments.partition_point(|s| s.output.start <= output);
        let seg = &self.segments[idx.checked_sub(1)?];
        Some(if seg.verbatim {
            seg.original.start + (output - seg.output.start)
        } else {
            seg.original.start
        })
    }

    /// Line and column in the original source for an output offset.
    pub fn original_location(&self, output: usize) -> Option<Location> {
        self.original_offset(output)
            .map(|offset| self.original_lines.locate(offset))
    }

    /// Output offset that the original byte at `original` ended up at.
    pub fn output_offset(&self, original: usize) -> Option<usize> {
        if original > self.original_len {
            return None;
        }
        if original == self.original_len {
            return Some(self.output_len);
        }
        let idx = self.segments.partition_point(|s| s.original.start <= original);
        let seg = &self.segments[idx.checked_sub(1)?];
        Some(if seg.verbatim {
            seg.output.start + (original - seg.original.start)
        } else {
            seg.output.start
        })
    }
}
