//! Literal text fragments for one route registration.
//!
//! Pure functions from a [`RouteDescriptor`] to the exact import line
//! and route-entry object the router file will carry. The mutation
//! engine compares these strings verbatim for idempotency, so any
//! format change here is a contract change.

use crate::core::resolve::{RouteDescriptor, RouteSegment};

/// `import <Component> from '<importPath>';`
pub fn import_statement(desc: &RouteDescriptor) -> String {
    format!(
        "import {} from '{}';",
        component_identifier(&desc.page_name),
        desc.import_path
    )
}

/// Route entry object, one line, no indentation or trailing comma.
///
/// Index pages become `{ index: true, ... }`; everything else carries a
/// path relative to its insertion point: the parent prefix is stripped
/// for nested entries (the nested router composes parent + child), the
/// leading `/` for entries under the root route.
pub fn route_entry(desc: &RouteDescriptor) -> String {
    let component = component_identifier(&desc.page_name);

    if desc.route_path == "/" || desc.page_name.to_lowercase() == "index" {
        return format!("{{ index: true, element: <{component} /> }}");
    }

    format!(
        "{{ path: '{}', element: <{component} /> }}",
        relative_path(desc)
    )
}

/// Entry path used when a nested insertion fell back to the top level:
/// the absolute route minus its leading slash.
pub fn flat_relative_path(desc: &RouteDescriptor) -> String {
    desc.route_path.trim_start_matches('/').to_string()
}

fn relative_path(desc: &RouteDescriptor) -> String {
    if desc.is_nested
        && let Some(parent) = &desc.parent_route_path
        && let Some(rest) = desc.route_path.strip_prefix(parent.as_str())
    {
        return rest.trim_start_matches('/').to_string();
    }
    flat_relative_path(desc)
}

/// JSX identifier for the page component; delegates the bracket
/// decoding to the segment boundary in `resolve`.
pub fn component_identifier(page_name: &str) -> String {
    RouteSegment::parse(page_name).component_ident()
}
