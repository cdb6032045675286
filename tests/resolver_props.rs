//! Property tests for the route resolver.

use camino::Utf8PathBuf;
use pagewright::core::resolve::resolve_route;
use proptest::prelude::*;

proptest! {
    /// Any PascalCase page directly under <base>/pages resolves to
    /// "/" + lowercase(name), except Index which maps to the root.
    #[test]
    fn root_level_pages_lowercase_their_name(name in "[A-Z][a-zA-Z0-9]{0,11}") {
        let base = Utf8PathBuf::from("/app");
        let target = base.join("pages").join(&name);
        let desc = resolve_route(&name, &target, &base, &base.join("routes"));

        let expected = if name.to_lowercase() == "index" {
            "/".to_string()
        } else {
            format!("/{}", name.to_lowercase())
        };
        prop_assert_eq!(&desc.route_path, &expected);
        prop_assert!(!desc.is_nested);
        prop_assert_eq!(desc.parent_route_path, None);
    }

    /// Nested pages keep the parent as a strict prefix of the route.
    #[test]
    fn nested_parent_is_strict_prefix(
        feature in "[A-Z][a-zA-Z0-9]{0,8}",
        name in "[A-Z][a-zA-Z0-9]{0,8}",
    ) {
        prop_assume!(name.to_lowercase() != "index");

        let base = Utf8PathBuf::from("/app");
        let target = base.join("pages").join(&feature).join(&name);
        let desc = resolve_route(&name, &target, &base, &base.join("routes"));

        prop_assert!(desc.is_nested);
        let parent = desc.parent_route_path.expect("nested routes carry a parent");
        prop_assert!(desc.route_path.starts_with(&parent));
        prop_assert_ne!(&desc.route_path, &parent);
        prop_assert_eq!(parent, format!("/{}", feature.to_lowercase()));
    }

    /// Route paths stay lowercase outside dynamic segments.
    #[test]
    fn static_route_paths_are_lowercase(name in "[A-Z][a-zA-Z0-9]{0,11}") {
        let base = Utf8PathBuf::from("/app");
        let target = base.join("pages").join(&name);
        let desc = resolve_route(&name, &target, &base, &base.join("routes"));

        prop_assert_eq!(desc.route_path.to_lowercase(), desc.route_path);
    }
}
