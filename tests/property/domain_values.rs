// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for Domain Value Objects
//!
//! Proves the validation and canonicalization properties of site names,
//! ports, and virtual paths for all inputs in their valid ranges.

use proptest::prelude::*;

use site_management::domain::{Port, SiteName, VirtualPath};

/// Strategy producing valid site names (DNS label rules)
fn valid_site_name() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9]([a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?"
}

proptest! {
    /// Every valid site name constructs, and construction preserves the
    /// original casing
    #[test]
    fn site_name_accepts_valid_labels(raw in valid_site_name()) {
        let name = SiteName::new(raw.clone()).unwrap();
        prop_assert_eq!(name.as_str(), raw.as_str());
    }

    /// Identity is case-insensitive: any casing variant of a name is equal
    /// to it and hashes the same way
    #[test]
    fn site_name_identity_ignores_case(raw in valid_site_name()) {
        let original = SiteName::new(raw.clone()).unwrap();
        let upper = SiteName::new(raw.to_ascii_uppercase()).unwrap();
        let lower = SiteName::new(raw.to_ascii_lowercase()).unwrap();

        prop_assert_eq!(&original, &upper);
        prop_assert_eq!(&original, &lower);
        prop_assert_eq!(upper.canonical(), lower.canonical());
    }

    /// Canonicalization is idempotent
    #[test]
    fn site_name_canonical_is_idempotent(raw in valid_site_name()) {
        let canonical = SiteName::new(raw).unwrap().canonical();
        let again = SiteName::new(canonical.clone()).unwrap().canonical();
        prop_assert_eq!(canonical, again);
    }

    /// Names containing a character outside the DNS label alphabet never
    /// construct
    #[test]
    fn site_name_rejects_invalid_characters(
        prefix in "[a-z]{1,8}",
        bad in "[^a-zA-Z0-9-]",
        suffix in "[a-z]{1,8}",
    ) {
        let raw = format!("{prefix}{bad}{suffix}");
        prop_assert!(SiteName::new(raw).is_err());
    }

    /// All non-zero ports construct; zero never does
    #[test]
    fn port_accepts_full_nonzero_range(value in 1u16..=u16::MAX) {
        prop_assert_eq!(Port::new(value).unwrap().get(), value);
    }

    /// Virtual path normalization is idempotent: re-parsing a canonical
    /// path yields the same canonical path
    #[test]
    fn virtual_path_normalization_idempotent(segments in prop::collection::vec("[a-z0-9]{1,8}", 1..5)) {
        let raw = format!("/{}", segments.join("/"));
        let once = VirtualPath::new(format!("{raw}/")).unwrap();
        let twice = VirtualPath::new(once.as_str()).unwrap();
        prop_assert_eq!(once, twice);
    }

    /// Unrooted paths never construct
    #[test]
    fn virtual_path_requires_root(raw in "[a-z][a-z0-9/]{0,16}") {
        prop_assert!(VirtualPath::new(raw).is_err());
    }
}

#[test]
fn port_zero_is_rejected() {
    assert!(Port::new(0).is_err());
}
