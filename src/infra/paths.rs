//! POSIX-style relative path math for generated import statements.
//!
//! Import paths in the router file are always '/'-separated and
//! extension-free regardless of host platform, so the helpers here
//! produce plain strings instead of platform paths.

use camino::Utf8Path;

/// Module path of `to` relative to `from_dir`, '/'-separated and
/// prefixed with `./` unless it already walks upward with `../`.
/// Both inputs must share a root (the caller resolves them against
/// the same project base first).
pub fn relative_import(from_dir: &Utf8Path, to: &Utf8Path) -> String {
    let from: Vec<&str> = normal_components(from_dir);
    let target: Vec<&str> = normal_components(to);

    // Longest shared prefix of components
    let common = from
        .iter()
        .zip(target.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut parts: Vec<&str> = Vec::with_capacity(from.len() - common + target.len() - common);
    for _ in common..from.len() {
        parts.push("..");
    }
    parts.extend(&target[common..]);

    let joined = parts.join("/");
    if joined.starts_with("../") {
        joined
    } else {
        format!("./{joined}")
    }
}

/// Components without `.` noise; root and prefix components keep their
/// string form so absolute inputs compare correctly.
fn normal_components(path: &Utf8Path) -> Vec<&str> {
    path.components()
        .map(|c| c.as_str())
        .filter(|s| *s != ".")
        .collect()
}
