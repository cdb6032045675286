//! Directory location → route descriptor.
//!
//! Pure functions only: validation happens in the page command and all
//! filesystem knowledge arrives as arguments, so every rule here is
//! testable without touching disk.
//!
//! The `_[param]` directory encoding is decoded exactly once, in
//! [`RouteSegment::parse`]; everything downstream works with the variant
//! instead of raw bracket strings.

use camino::Utf8Path;

use crate::infra::paths::relative_import;

/// One URL path segment as resolved from a page name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteSegment {
    /// Literal segment, matched case-insensitively by lowercasing
    Static(String),
    /// URL parameter captured at this position (`:param`)
    Dynamic(String),
}

impl RouteSegment {
    /// Decode the filesystem-safe page-name encoding. `_[productId]`
    /// becomes `Dynamic("productId")`; anything else is `Static`.
    pub fn parse(raw: &str) -> Self {
        if let Some(param) = raw
            .strip_prefix("_[")
            .and_then(|rest| rest.strip_suffix(']'))
            && !param.is_empty()
        {
            return RouteSegment::Dynamic(param.to_string());
        }
        RouteSegment::Static(raw.to_string())
    }

    /// Rendering inside a route path: lowercased literal or `:param`.
    pub fn as_url(&self) -> String {
        match self {
            RouteSegment::Static(name) => name.to_lowercase(),
            RouteSegment::Dynamic(param) => format!(":{param}"),
        }
    }

    /// Legal JSX identifier for the page component. Bracket syntax is
    /// not a valid identifier, so `_[productId]` → `DynamicProductId`.
    pub fn component_ident(&self) -> String {
        match self {
            RouteSegment::Static(name) => name.clone(),
            RouteSegment::Dynamic(param) => format!("Dynamic{}", pascal_case(param)),
        }
    }

    pub fn is_dynamic(&self) -> bool {
        matches!(self, RouteSegment::Dynamic(_))
    }
}

/// Structured representation of a page's URL route and its association
/// to the component on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteDescriptor {
    /// Original page name (PascalCase or `_[param]` marker)
    pub page_name: String,
    /// Absolute URL path, lowercase except `:param` segments
    pub route_path: String,
    pub is_nested: bool,
    pub is_dynamic: bool,
    /// Enclosing feature route; strict prefix of `route_path` when set
    pub parent_route_path: Option<String>,
    /// POSIX-style, extension-free module path from the router file's dir
    pub import_path: String,
}

/// Compute the route descriptor for a page at `target_dir`.
///
/// `router_dir` is the directory holding the router file; the import
/// path is computed relative to it. A literal `pages` directory segment
/// is dropped from the URL (legacy layout convention), so
/// `<base>/pages/Shop/Cart` and `<base>/src/pages/Shop/Cart` resolve to
/// the same route.
pub fn resolve_route(
    page_name: &str,
    target_dir: &Utf8Path,
    base_dir: &Utf8Path,
    router_dir: &Utf8Path,
) -> RouteDescriptor {
    let relative = target_dir.strip_prefix(base_dir).unwrap_or(target_dir);

    let segments: Vec<String> = relative
        .components()
        .map(|c| c.as_str())
        .filter(|s| !s.is_empty() && *s != "." && *s != "pages")
        .map(|s| s.to_string())
        .collect();

    let page = RouteSegment::parse(page_name);
    let is_dynamic = page.is_dynamic();
    let page_lower = page_name.to_lowercase();
    let is_nested = segments.len() >= 2;

    let (route_path, parent_route_path) = if is_nested {
        let parent = format!("/{}", segments[0].to_lowercase());

        let mut all: Vec<String> = segments.iter().map(|s| s.to_lowercase()).collect();
        // The page usually names its own directory; only append when it
        // adds a segment, and never for index pages.
        let last = all.last().cloned().unwrap_or_default();
        if page_lower != last && page_lower != "index" {
            all.push(page_lower.clone());
        }

        (format!("/{}", all.join("/")), Some(parent))
    } else if page_lower == "index" {
        ("/".to_string(), None)
    } else {
        (format!("/{}", page_lower), None)
    };

    // Dynamic pages replace the trailing segment with the `:param` form.
    let route_path = if is_dynamic {
        replace_trailing_segment(&route_path, &page.as_url())
    } else {
        route_path
    };

    let page_file = target_dir.join(page_name);
    let import_path = relative_import(router_dir, &page_file);

    RouteDescriptor {
        page_name: page_name.to_string(),
        route_path,
        is_nested,
        is_dynamic,
        parent_route_path,
        import_path,
    }
}

/// Swap the last path segment of an absolute route for `segment`.
fn replace_trailing_segment(route_path: &str, segment: &str) -> String {
    match route_path.rfind('/') {
        Some(idx) => format!("{}/{}", &route_path[..idx], segment),
        None => format!("/{segment}"),
    }
}

/// Uppercase the first character (`productId` → `ProductId`).
fn pascal_case(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
