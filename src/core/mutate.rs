//! Idempotent insertion of one route into the router file.
//!
//! The planner is pure: it turns file text plus a descriptor into a
//! list of non-overlapping span edits, so every branch is testable on
//! strings. Disk I/O is confined to [`register_route`], which performs
//! the single read-modify-write cycle per invocation (whole-file
//! overwrite, last write wins across concurrent runs).
//!
//! Guarantees: existing routes are never deleted, imports are never
//! duplicated, and structural edits are always scoped to a matched text
//! span, never applied as global replacements.

use std::fs;
use std::ops::Range;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use camino::Utf8Path;
use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};

use crate::core::block::{RouteBlock, find_parent_block};
use crate::core::entry::{flat_relative_path, import_statement, route_entry};
use crate::core::locate::{PLACEHOLDER, ROOT_LAYOUT_ANCHOR};
use crate::core::parse::{ChildrenSpan, parse_router_file};
use crate::core::resolve::RouteDescriptor;
use crate::infra::lines::{LineIndex, splice};

/// One-line flat route entry, as generated by this tool.
static FLAT_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<ind>\s*)\{\s*path:\s*'(?P<path>[^']*)',\s*element:\s*(?P<el><[^>]*/>)\s*\}(?P<comma>,?)\s*$",
    )
    .expect("flat entry pattern")
});

/// Terminal outcome classification for one mutation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MutationReason {
    /// Route inserted where the descriptor asked for it
    Registered,
    /// Import already present verbatim; nothing written
    Duplicate,
    /// Root-layout import (or the children array) missing; nothing written
    AnchorNotFound,
    /// Parent block absent; route inserted flat at the top level
    ParentNotFound,
    /// Parent block found but not in a convertible shape; inserted flat
    TransformationFailed,
}

/// `{success, reason, message}` result surfaced to the page command.
/// Nothing from the engine escapes as an unhandled error.
#[derive(Debug, Clone, Serialize)]
pub struct MutationReport {
    pub success: bool,
    pub reason: MutationReason,
    pub message: String,
}

/// Aborting conditions: no write happens for these.
#[derive(Debug, thiserror::Error)]
enum MutateAbort {
    #[error("{0} is already registered in the router")]
    Duplicate(String),
    #[error("{0}; register the route manually")]
    AnchorNotFound(String),
}

/// A scoped text replacement, applied via `infra::lines::splice`.
type Edit = (Range<usize>, String);

/// Apply one route to router-file text. Returns the mutated text when
/// a write is needed, plus the report for the caller to surface.
pub fn apply_route(text: &str, desc: &RouteDescriptor) -> (Option<String>, MutationReport) {
    match plan(text, desc) {
        Ok((edits, report)) => (Some(apply_edits(text, edits)), report),
        Err(abort) => {
            let reason = match abort {
                MutateAbort::Duplicate(_) => MutationReason::Duplicate,
                MutateAbort::AnchorNotFound(_) => MutationReason::AnchorNotFound,
            };
            (
                None,
                MutationReport {
                    success: false,
                    reason,
                    message: abort.to_string(),
                },
            )
        }
    }
}

/// Read-modify-write against the router file on disk.
pub fn register_route(router_file: &Utf8Path, desc: &RouteDescriptor) -> Result<MutationReport> {
    let text = fs::read_to_string(router_file)
        .with_context(|| format!("reading router file {router_file}"))?;

    let (mutated, report) = apply_route(&text, desc);

    if let Some(mutated) = mutated {
        fs::write(router_file, mutated)
            .with_context(|| format!("writing router file {router_file}"))?;
        debug!(route = %desc.route_path, reason = ?report.reason, "router file updated");
    }

    Ok(report)
}

/// Pure planning: decide the edits and the outcome without touching text.
fn plan(text: &str, desc: &RouteDescriptor) -> Result<(Vec<Edit>, MutationReport), MutateAbort> {
    let import = import_statement(desc);

    // 1. Idempotency: the exact import line doubles as the marker.
    if text.lines().any(|line| line.trim() == import) {
        return Err(MutateAbort::Duplicate(desc.page_name.clone()));
    }

    // 2. Anchor for the import insertion.
    let lines: Vec<&str> = text.lines().collect();
    let anchor_line = lines
        .iter()
        .position(|line| line.trim_start().starts_with(ROOT_LAYOUT_ANCHOR))
        .map(|idx| idx + 1)
        .ok_or_else(|| {
            MutateAbort::AnchorNotFound("root layout import not found in router file".to_string())
        })?;

    let state = parse_router_file(text);
    debug!(
        imports = state.existing_imports.len(),
        "scanned router file state"
    );
    let children = state.children_span.ok_or_else(|| {
        MutateAbort::AnchorNotFound("top-level children array not found in router file".to_string())
    })?;

    let index = LineIndex::build(text);

    // 3. Route insertion, nested when possible.
    let (mut edits, report) = route_edits(text, &index, &lines, &children, desc);

    // Import goes immediately after the anchor; applied last since it
    // sits earlier in the file than any children-array edit.
    edits.push(insert_after_line(text, &index, anchor_line, &import));

    Ok((edits, report))
}

fn route_edits(
    text: &str,
    index: &LineIndex,
    lines: &[&str],
    children: &ChildrenSpan,
    desc: &RouteDescriptor,
) -> (Vec<Edit>, MutationReport) {
    let parent = desc.parent_route_path.as_deref();

    if let (true, Some(parent)) = (desc.is_nested, parent) {
        match find_parent_block(text, parent) {
            Some(block) => match nested_edit(index, &block, desc) {
                Ok(edit) => {
                    return (
                        vec![edit],
                        MutationReport {
                            success: true,
                            reason: MutationReason::Registered,
                            message: format!(
                                "registered route '{}' under '{parent}'",
                                desc.route_path
                            ),
                        },
                    );
                }
                Err(detail) => {
                    warn!(parent, detail, "flat→nested conversion failed; inserting flat");
                    let entry = flat_entry_text(desc);
                    return (
                        top_level_edits(index, lines, children, &entry),
                        MutationReport {
                            success: true,
                            reason: MutationReason::TransformationFailed,
                            message: format!(
                                "could not convert parent '{parent}' into a nested branch; \
                                 registered '{}' at the top level",
                                desc.route_path
                            ),
                        },
                    );
                }
            },
            None => {
                warn!(parent, "parent route not found; inserting flat");
                let entry = flat_entry_text(desc);
                return (
                    top_level_edits(index, lines, children, &entry),
                    MutationReport {
                        success: true,
                        reason: MutationReason::ParentNotFound,
                        message: format!(
                            "parent route '{parent}' not found; registered '{}' at the top level",
                            desc.route_path
                        ),
                    },
                );
            }
        }
    }

    let entry = route_entry(desc);
    (
        top_level_edits(index, lines, children, &entry),
        MutationReport {
            success: true,
            reason: MutationReason::Registered,
            message: format!("registered route '{}'", desc.route_path),
        },
    )
}

/// Entry text for a nested descriptor demoted to a top-level insertion.
fn flat_entry_text(desc: &RouteDescriptor) -> String {
    let component = crate::core::entry::component_identifier(&desc.page_name);
    format!(
        "{{ path: '{}', element: <{component} /> }}",
        flat_relative_path(desc)
    )
}

/// Splice `entry` into the root children array: replace the placeholder
/// comment on first use, else append after the last existing entry.
fn top_level_edits(
    index: &LineIndex,
    lines: &[&str],
    children: &ChildrenSpan,
    entry: &str,
) -> Vec<Edit> {
    let indent = format!("{}  ", leading_whitespace(lines[children.open_line - 1]));
    let entry_line = format!("{indent}{entry},\n");

    // First use: the placeholder comment line becomes the entry.
    for line1 in children.open_line + 1..children.close_line {
        if lines[line1 - 1].contains(PLACEHOLDER)
            && let Some(span) = index.span_of_lines(line1, line1)
        {
            return vec![(span, entry_line)];
        }
    }

    let mut edits = Vec::with_capacity(2);

    // Preserve trailing commas: the previous last entry must keep one.
    if let Some(prev) = last_content_line(lines, children.open_line + 1, children.close_line) {
        let trimmed = lines[prev - 1].trim_end();
        if !trimmed.ends_with(',') && !trimmed.ends_with('[') {
            let end = index.start_of_line(prev).unwrap_or(0) + trimmed.len();
            edits.push((end..end, ",".to_string()));
        }
    }

    let at = index.start_of_line(children.close_line).unwrap_or(0);
    edits.push((at..at, entry_line));
    edits
}

/// Rewrite the parent block so it carries the new child, returning one
/// scoped edit covering exactly the block's lines. `Err` carries the
/// shape mismatch detail and triggers the flat fallback.
fn nested_edit(
    index: &LineIndex,
    block: &RouteBlock,
    desc: &RouteDescriptor,
) -> Result<Edit, &'static str> {
    let parent = desc
        .parent_route_path
        .as_deref()
        .ok_or("descriptor has no parent route")?;
    let entry = route_entry(desc);

    let mut body = block.raw_text.clone();

    // Legacy flat routes duplicate their folder name; strip exactly the
    // matched occurrence inside this block, never globally.
    if block.needs_transformation {
        let folder = parent.rsplit('/').next().unwrap_or_default();
        let legacy = format!("path: '{parent}/{folder}'");
        let exact = format!("path: '{parent}'");
        if !body.contains(&legacy) {
            return Err("legacy duplicate-folder path not present in block");
        }
        body = body.replacen(&legacy, &exact, 1);
    }

    let rebuilt = if !body.contains('\n') {
        expand_one_line_block(&body, &entry)?
    } else if body.contains("children:") {
        splice_into_block_children(&body, &entry)?
    } else {
        inject_children_after_element(&body, &entry)?
    };

    let span = index
        .span_of_lines(block.start_line, block.end_line)
        .ok_or("block span out of range")?;
    Ok((span, format!("{rebuilt}\n")))
}

/// `{ path: 'x', element: <X /> }` → multi-line block with a children
/// array holding the new entry.
fn expand_one_line_block(line: &str, entry: &str) -> Result<String, &'static str> {
    let caps = FLAT_ENTRY.captures(line).ok_or("flat entry shape mismatch")?;
    let ind = &caps["ind"];
    let path = &caps["path"];
    let el = &caps["el"];
    let comma = &caps["comma"];

    Ok(format!(
        "{ind}{{\n\
         {ind}  path: '{path}',\n\
         {ind}  element: {el},\n\
         {ind}  children: [\n\
         {ind}    {entry},\n\
         {ind}  ],\n\
         {ind}}}{comma}"
    ))
}

/// Parent already has a children array: append before its `]`.
fn splice_into_block_children(body: &str, entry: &str) -> Result<String, &'static str> {
    let mut lines: Vec<String> = body.lines().map(|l| l.to_string()).collect();

    let open = lines
        .iter()
        .position(|l| l.contains("children:") && l.contains('['))
        .ok_or("children array head not found in block")?;

    // Bracket-balance from the head to the array's closing line.
    let mut depth = 0i32;
    let mut close = None;
    for (idx, line) in lines.iter().enumerate().skip(open) {
        for byte in line.bytes() {
            match byte {
                b'[' => depth += 1,
                b']' => depth -= 1,
                _ => {}
            }
        }
        if depth == 0 {
            close = Some(idx);
            break;
        }
    }
    let close = close.ok_or("children array not terminated in block")?;

    // Single-line array (`children: []`, or with inline entries): the
    // between-lines insert slot does not exist, so rewrite the line
    // into the multi-line shape with the entry inside.
    if close == open {
        let line = lines[open].clone();
        let open_at = line.find('[').ok_or("children array head not found in block")?;
        let close_at = line.rfind(']').ok_or("children array not terminated in block")?;

        let inner = line[open_at + 1..close_at].trim().trim_end_matches(',');
        let base = leading_whitespace(&line).to_string();
        let tail = line[close_at..].trim_end().to_string();

        let mut rebuilt = vec![line[..open_at + 1].to_string()];
        if !inner.is_empty() {
            rebuilt.push(format!("{base}  {inner},"));
        }
        rebuilt.push(format!("{base}  {entry},"));
        rebuilt.push(format!("{base}{tail}"));

        lines.splice(open..open + 1, rebuilt);
        return Ok(lines.join("\n"));
    }

    let indent = format!("{}  ", leading_whitespace(&lines[open]));

    // Keep the previous entry's trailing comma intact.
    if let Some(prev) = (open + 1..close).rev().find(|&i| !lines[i].trim().is_empty()) {
        let trimmed = lines[prev].trim_end().to_string();
        if !trimmed.ends_with(',') && !trimmed.ends_with('[') {
            lines[prev] = format!("{trimmed},");
        }
    }

    lines.insert(close, format!("{indent}{entry},"));
    Ok(lines.join("\n"))
}

/// Leaf parent without children: inject `children: [ entry ]` directly
/// after its `element:` assignment, turning the leaf into a branch.
fn inject_children_after_element(body: &str, entry: &str) -> Result<String, &'static str> {
    let mut lines: Vec<String> = body.lines().map(|l| l.to_string()).collect();

    let el = lines
        .iter()
        .position(|l| l.contains("element:"))
        .ok_or("element assignment not found in block")?;

    let indent = leading_whitespace(&lines[el]).to_string();
    let trimmed = lines[el].trim_end().to_string();
    if !trimmed.ends_with(',') {
        lines[el] = format!("{trimmed},");
    }

    lines.splice(
        el + 1..el + 1,
        [
            format!("{indent}children: ["),
            format!("{indent}  {entry},"),
            format!("{indent}],"),
        ],
    );
    Ok(lines.join("\n"))
}

/// Insertion edit placing `line` (newline-terminated) after `line1`.
fn insert_after_line(text: &str, index: &LineIndex, line1: usize, line: &str) -> Edit {
    match index.start_of_line(line1 + 1) {
        Some(at) => (at..at, format!("{line}\n")),
        // Anchor is the last line; keep the file newline-terminated.
        None if text.ends_with('\n') => (text.len()..text.len(), format!("{line}\n")),
        None => (text.len()..text.len(), format!("\n{line}\n")),
    }
}

/// Last non-blank line strictly inside `(from1, to1)`, 1-based.
fn last_content_line(lines: &[&str], from1: usize, to1: usize) -> Option<usize> {
    (from1..to1)
        .rev()
        .find(|&line1| !lines[line1 - 1].trim().is_empty())
}

fn leading_whitespace(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}

/// Apply non-overlapping edits back-to-front so earlier spans stay valid.
fn apply_edits(text: &str, mut edits: Vec<Edit>) -> String {
    edits.sort_by(|a, b| b.0.start.cmp(&a.0.start));
    let mut out = text.to_string();
    for (span, replacement) in edits {
        out = splice(&out, span, &replacement);
    }
    out
}
