// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Site Mutations
//!
//! Proves the invariants of the site entity under arbitrary binding and
//! virtual path mutation sequences: binding keys stay unique per site type,
//! and full replacement leaves exactly the replacement mapping.

use proptest::prelude::*;
use std::collections::HashSet;

use site_management::domain::{
    Binding, PhysicalPath, Scheme, Site, SiteName, SiteType, VirtualPath, VirtualPathMap,
};

fn arb_site_type() -> impl Strategy<Value = SiteType> {
    prop_oneof![Just(SiteType::Live), Just(SiteType::Service)]
}

fn arb_binding() -> impl Strategy<Value = Binding> {
    (
        prop_oneof![Just(Scheme::Http), Just(Scheme::Https)],
        1u16..=9999,
        "[a-z]{1,6}",
        arb_site_type(),
    )
        .prop_map(|(scheme, port, host, site_type)| {
            Binding::new(scheme, "0.0.0.0".parse().unwrap(), port, host, site_type).unwrap()
        })
}

fn arb_mapping() -> impl Strategy<Value = VirtualPathMap> {
    prop::collection::btree_map(
        "/[a-z]{1,6}".prop_map(|p| VirtualPath::new(p).unwrap()),
        "[a-z]{1,8}".prop_map(|p| PhysicalPath::new(p).unwrap()),
        0..6,
    )
}

proptest! {
    /// After any sequence of binding additions, `(key, site type)` pairs
    /// are unique within the site
    #[test]
    fn binding_keys_stay_unique(bindings in prop::collection::vec(arb_binding(), 0..20)) {
        let mut site = Site::new(SiteName::new("demo").unwrap());
        for binding in bindings {
            site.add_binding(binding);
        }

        let mut seen = HashSet::new();
        for binding in site.bindings() {
            prop_assert!(seen.insert((binding.key(), binding.site_type())));
        }
    }

    /// Adding then removing a binding restores the previous binding set
    #[test]
    fn add_then_remove_binding_round_trips(
        existing in prop::collection::vec(arb_binding(), 0..8),
        candidate in arb_binding(),
    ) {
        let mut site = Site::new(SiteName::new("demo").unwrap());
        for binding in existing {
            site.add_binding(binding);
        }
        let before = site.bindings().to_vec();

        if site.add_binding(candidate.clone()) {
            prop_assert!(site.remove_binding(&candidate.key(), candidate.site_type()));
        }
        prop_assert_eq!(site.bindings(), before.as_slice());
    }

    /// Full replacement leaves exactly the replacement mapping, regardless
    /// of what was mapped before
    #[test]
    fn set_virtual_paths_is_exact(before in arb_mapping(), after in arb_mapping()) {
        let mut site = Site::new(SiteName::new("demo").unwrap());
        site.set_virtual_paths(before);
        site.set_virtual_paths(after.clone());
        prop_assert_eq!(site.virtual_paths(), &after);
    }

    /// Incremental add never overwrites an existing mapping
    #[test]
    fn add_virtual_path_never_overwrites(
        mapping in arb_mapping(),
        physical in "[a-z]{1,8}".prop_map(|p| PhysicalPath::new(p).unwrap()),
    ) {
        let mut site = Site::new(SiteName::new("demo").unwrap());
        site.set_virtual_paths(mapping.clone());

        for (path, original) in &mapping {
            prop_assert!(!site.add_virtual_path(path.clone(), physical.clone()));
            prop_assert_eq!(site.virtual_paths().get(path), Some(original));
        }
    }
}
