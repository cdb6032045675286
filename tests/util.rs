//! Shared test utilities for integration tests
//!
//! Provides common fixture creation and helper functions
//! used across multiple test files.

use assert_fs::prelude::*;
use pagewright::core::locate::router_skeleton;

/// Create a minimal React project root with an existing router file at
/// the conventional `routes/routes.tsx` location.
pub fn make_project_fixture() -> assert_fs::TempDir {
    let tmp = assert_fs::TempDir::new().expect("tempdir");

    tmp.child("routes/routes.tsx")
        .write_str(&router_skeleton())
        .expect("write router skeleton");

    tmp.child("layouts/RootLayout.tsx")
        .write_str("const RootLayout = () => <Outlet />;\n\nexport default RootLayout;\n")
        .expect("write root layout");

    tmp
}

/// Count import lines that belong to registered pages (framework and
/// layout imports excluded).
pub fn page_import_count(text: &str) -> usize {
    text.lines()
        .filter(|line| {
            line.starts_with("import ")
                && !line.contains("react-router-dom")
                && !line.contains("RootLayout")
        })
        .count()
}

/// Count route entries reachable from the root children array: every
/// `element:` occurrence except the root layout's own.
pub fn route_entry_count(text: &str) -> usize {
    text.matches("element: <").count().saturating_sub(1)
}
