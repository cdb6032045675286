//! Newline index with LF/CRLF-robust line/byte mapping.
//!
//! Goals
//! - Single pass over bytes to record '\n' positions.
//! - 1-based external line numbers (matches `str::lines` enumeration).
//! - O(1) line→byte start/end via the index.
//! - Whole-line splice spans include the trailing '\n' so edits never
//!   orphan a terminator.
//!
//! Notes
//! - An empty buffer has 0 lines.
//! - A non-empty buffer without '\n' has 1 line.
//! - For spans, end is exclusive (Rust slicing convention).

use std::cmp;
use std::ops::Range;

#[derive(Debug, Clone)]
pub struct LineIndex {
    /// Byte positions of every '\n' in the buffer.
    nl_positions: Vec<usize>,
    /// Total byte length of the buffer.
    len: usize,
}

impl LineIndex {
    /// Build an index recording positions of '\n'.
    pub fn build(text: &str) -> Self {
        let bytes = text.as_bytes();
        let mut nl_positions = Vec::with_capacity(bytes.len() / 48);
        let mut i = 0usize;

        // Single pass; record every '\n' offset.
        while let Some(pos) = memchr::memchr(b'\n', &bytes[i..]) {
            let abs = i + pos;
            nl_positions.push(abs);
            i = abs + 1;
        }

        Self {
            nl_positions,
            len: bytes.len(),
        }
    }

    /// Total number of logical lines.
    /// Empty buffer => 0 lines; else (#'\n' + 1), counting a trailing
    /// newline's empty remainder as a line of its own.
    pub fn line_count(&self) -> usize {
        if self.len == 0 {
            0
        } else {
            self.nl_positions.len() + 1
        }
    }

    /// Start byte (inclusive) of a 1-based line.
    /// Returns None if line is out of range.
    pub fn start_of_line(&self, line1: usize) -> Option<usize> {
        let total = self.line_count();
        if line1 == 0 || line1 > total {
            return None;
        }
        if line1 == 1 {
            return Some(0);
        }
        // For line L>1, start is one past the previous '\n'.
        self.nl_positions.get(line1 - 2).map(|&prev_nl| prev_nl + 1)
    }

    /// End byte (exclusive) of a 1-based line, without its terminator.
    /// For CRLF, excludes the trailing '\r' before '\n'.
    pub fn end_of_line(&self, line1: usize, text: &str) -> Option<usize> {
        let total = self.line_count();
        if line1 == 0 || line1 > total {
            return None;
        }

        let bytes = text.as_bytes();
        if line1 <= self.nl_positions.len() {
            let nl = self.nl_positions[line1 - 1];
            if nl > 0 && bytes.get(nl - 1) == Some(&b'\r') {
                return Some(nl - 1);
            }
            return Some(nl);
        }

        // Last line without trailing '\n' ends at EOF.
        Some(self.len)
    }

    /// Byte span for an inclusive 1-based line range, including the
    /// final line's terminator when present. Replacing such a span with
    /// newline-terminated text keeps the buffer line-aligned.
    pub fn span_of_lines(&self, start_line1: usize, end_line1: usize) -> Option<Range<usize>> {
        if start_line1 == 0 || start_line1 > end_line1 {
            return None;
        }
        let total = self.line_count();
        if total == 0 {
            return None;
        }

        let s = self.start_of_line(start_line1)?;
        let end = cmp::min(end_line1, total);
        let e = if end <= self.nl_positions.len() {
            self.nl_positions[end - 1] + 1
        } else {
            self.len
        };

        (s <= e && e <= self.len).then_some(s..e)
    }

    /// 1-based line number covering the given byte offset.
    /// Offsets at '\n' belong to the *next* line.
    /// Returns 0 for empty buffers.
    pub fn line_of_byte(&self, byte: usize) -> usize {
        if self.len == 0 {
            return 0;
        }
        // Count how many '\n' are strictly before `byte`.
        let idx = match self.nl_positions.binary_search(&byte) {
            Ok(pos) => pos + 1, // at NL → next line
            Err(pos) => pos,    // number of NLs before `byte`
        };
        idx + 1
    }
}

/// Pure span replacement: `text` with `span` swapped for `replacement`.
/// All router-file edits go through this so mutations stay scoped and
/// unit-testable without a filesystem.
pub fn splice(text: &str, span: Range<usize>, replacement: &str) -> String {
    let mut out = String::with_capacity(text.len() + replacement.len());
    out.push_str(&text[..span.start]);
    out.push_str(replacement);
    out.push_str(&text[span.end..]);
    out
}
