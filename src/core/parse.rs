//! Heuristic scan of router-file text.
//!
//! Not a general parser: the file is produced by this same tool, so a
//! fixed shape is assumed. The scan yields the non-framework import
//! lines and the byte span of the top-level `children: [...]` array.
//! Hand-edited files get best effort only; a missing span is reported
//! to the caller, never guessed around.

use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

use crate::infra::lines::LineIndex;

/// Head of the first (root) children array in generated output.
static CHILDREN_HEAD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"children:\s*\[").expect("children head pattern"));

/// Text span of the top-level `children: [...]` literal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChildrenSpan {
    /// 1-based line holding `children: [`
    pub open_line: usize,
    /// 1-based line holding the matching `]`
    pub close_line: usize,
    /// Byte range from the opening `[` to the matching `]` (inclusive bounds as span)
    pub bytes: Range<usize>,
}

/// Transient scan result; recomputed on every invocation, never cached.
#[derive(Debug)]
pub struct RouterFileState {
    pub text: String,
    /// Import lines excluding the router-framework and root-layout imports
    pub existing_imports: Vec<String>,
    /// Span of the single top-level children array, when the shape held
    pub children_span: Option<ChildrenSpan>,
}

pub fn parse_router_file(text: &str) -> RouterFileState {
    let existing_imports = text
        .lines()
        .filter(|line| {
            let trimmed = line.trim_start();
            trimmed.starts_with("import ")
                && !trimmed.contains("react-router-dom")
                && !trimmed.contains("RootLayout")
        })
        .map(|line| line.to_string())
        .collect();

    RouterFileState {
        text: text.to_string(),
        existing_imports,
        children_span: find_children_span(text),
    }
}

/// Locate the root `children: [` and bracket-balance to its `]`.
/// The root array is the first occurrence in the file because the root
/// route object opens before any nested route it contains.
fn find_children_span(text: &str) -> Option<ChildrenSpan> {
    let head = CHILDREN_HEAD.find(text)?;
    let open = head.end() - 1; // byte offset of '['

    let mut depth = 0i32;
    let mut close = None;
    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'[' => depth += 1,
            b']' => {
                depth -= 1;
                if depth == 0 {
                    close = Some(open + offset);
                    break;
                }
            }
            _ => {}
        }
    }
    let close = close?;

    let index = LineIndex::build(text);
    Some(ChildrenSpan {
        open_line: index.line_of_byte(open),
        close_line: index.line_of_byte(close),
        bytes: open..close + 1,
    })
}
