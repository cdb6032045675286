//! Brace-balanced location of a parent route's text block.
//!
//! Line-oriented scan, no parsing. Finds the route object whose `path`
//! matches the parent route, either exactly or in the legacy
//! duplicate-folder form (`path: '/mohab/mohab'`) that flat routes were
//! generated with before they had children. The legacy form flags the
//! block for flat→nested transformation.

use tracing::debug;

/// Text block of one route object inside the router file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteBlock {
    /// 1-based first line of the object (the line opening its `{`)
    pub start_line: usize,
    /// 1-based line where the brace counter returns to zero
    pub end_line: usize,
    /// Lines `start_line..=end_line`, newline-joined, no trailing newline
    pub raw_text: String,
    /// Legacy duplicate-folder path matched; strip it before nesting
    pub needs_transformation: bool,
}

/// Locate the block for `parent_route_path` (e.g. `/mohab`).
///
/// Returns `None` when neither the exact path nor the duplicate-folder
/// pattern occurs; the caller then degrades to a flat insertion.
pub fn find_parent_block(text: &str, parent_route_path: &str) -> Option<RouteBlock> {
    let lines: Vec<&str> = text.lines().collect();

    let exact = format!("path: '{parent_route_path}'");
    let legacy = parent_route_path
        .rsplit('/')
        .next()
        .filter(|folder| !folder.is_empty())
        .map(|folder| format!("path: '{parent_route_path}/{folder}'"));

    let (match_idx, needs_transformation) = match position_containing(&lines, &exact) {
        Some(idx) => (idx, false),
        None => {
            let needle = legacy?;
            let idx = position_containing(&lines, &needle)?;
            debug!(pattern = %needle, "matched legacy duplicate-folder route");
            (idx, true)
        }
    };

    let start_idx = block_start(&lines, match_idx)?;
    let end_idx = block_end(&lines, start_idx)?;

    Some(RouteBlock {
        start_line: start_idx + 1,
        end_line: end_idx + 1,
        raw_text: lines[start_idx..=end_idx].join("\n"),
        needs_transformation,
    })
}

fn position_containing(lines: &[&str], needle: &str) -> Option<usize> {
    lines.iter().position(|line| line.contains(needle))
}

/// First line of the object containing `match_idx`. One-line entries
/// open their own brace; otherwise walk backward to the nearest line
/// ending in `{`.
fn block_start(lines: &[&str], match_idx: usize) -> Option<usize> {
    let line = lines[match_idx];
    if let (Some(open), Some(path_at)) = (line.find('{'), line.find("path:"))
        && open < path_at
    {
        return Some(match_idx);
    }

    (0..match_idx)
        .rev()
        .find(|&i| lines[i].trim_end().ends_with('{'))
}

/// Scan forward keeping a signed brace counter; the line where it
/// returns to zero closes the block. Counts every brace on a line, so
/// one-line entries terminate on their own line.
fn block_end(lines: &[&str], start_idx: usize) -> Option<usize> {
    let mut depth = 0i32;
    for (offset, line) in lines[start_idx..].iter().enumerate() {
        for byte in line.bytes() {
            match byte {
                b'{' => depth += 1,
                b'}' => depth -= 1,
                _ => {}
            }
        }
        if depth == 0 && (offset > 0 || line.contains('}')) {
            return Some(start_idx + offset);
        }
    }
    None
}
