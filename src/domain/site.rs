// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Entity and Application Projection
//!
//! [`Site`] is the mutable entity owned by the site store; it is only ever
//! mutated through the site manager. [`Application`] is the immutable
//! snapshot handed upward to the control layer - a copy taken at read time,
//! never a live reference into the store.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

use super::{Binding, BindingKey, PhysicalPath, SiteName, SiteType, VirtualPath, VirtualPathMap};

/// Site entity
///
/// A named, independently deployable hosted application with its own bindings
/// and content root.
///
/// # Invariants
/// - Identified uniquely by name (case-insensitive) across the store
/// - Bindings are unique by `(key, site type)` within the site
/// - Virtual path keys are unique within the site
/// - A site with zero Live bindings is valid (decommissioned state)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Site {
    /// Stable internal identity (survives renames of host resources)
    pub id: Uuid,

    /// Unique site name
    pub name: SiteName,

    /// Network bindings, in insertion order
    bindings: Vec<Binding>,

    /// Virtual path → physical path mapping
    virtual_paths: VirtualPathMap,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl Site {
    /// Create a new site with no bindings or virtual paths
    pub fn new(name: SiteName) -> Self {
        Self {
            id: Uuid::now_v7(),
            name,
            bindings: Vec::new(),
            virtual_paths: VirtualPathMap::new(),
            created_at: Utc::now(),
        }
    }

    /// All bindings in insertion order
    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    /// Bindings of the given site type, in insertion order
    pub fn bindings_of(&self, site_type: SiteType) -> impl Iterator<Item = &Binding> {
        self.bindings
            .iter()
            .filter(move |b| b.site_type() == site_type)
    }

    /// Whether a binding with this key and site type exists
    pub fn has_binding(&self, key: &BindingKey, site_type: SiteType) -> bool {
        self.bindings
            .iter()
            .any(|b| b.site_type() == site_type && &b.key() == key)
    }

    /// Add a binding
    ///
    /// Returns `false` without mutating if a binding with the same key and
    /// site type already exists.
    pub fn add_binding(&mut self, binding: Binding) -> bool {
        if self.has_binding(&binding.key(), binding.site_type()) {
            return false;
        }
        self.bindings.push(binding);
        true
    }

    /// Remove the binding with this key and site type
    ///
    /// Returns `false` if no such binding exists.
    pub fn remove_binding(&mut self, key: &BindingKey, site_type: SiteType) -> bool {
        let before = self.bindings.len();
        self.bindings
            .retain(|b| !(b.site_type() == site_type && &b.key() == key));
        self.bindings.len() < before
    }

    /// URLs of the public (Live) surface, in binding order
    pub fn site_urls(&self) -> Vec<String> {
        self.bindings_of(SiteType::Live).map(Binding::url).collect()
    }

    /// URLs of the management (Service) surface, in binding order
    pub fn service_urls(&self) -> Vec<String> {
        self.bindings_of(SiteType::Service)
            .map(Binding::url)
            .collect()
    }

    /// Whether the site has no public surface left
    pub fn is_decommissioned(&self) -> bool {
        self.bindings_of(SiteType::Live).next().is_none()
    }

    /// Current virtual path mapping
    pub fn virtual_paths(&self) -> &VirtualPathMap {
        &self.virtual_paths
    }

    /// Whether a virtual path is mapped
    pub fn has_virtual_path(&self, path: &VirtualPath) -> bool {
        self.virtual_paths.contains_key(path)
    }

    /// Map a virtual path
    ///
    /// Returns `false` without mutating if the path is already mapped; use
    /// [`Site::set_virtual_paths`] to replace an existing mapping.
    pub fn add_virtual_path(&mut self, path: VirtualPath, physical: PhysicalPath) -> bool {
        if self.virtual_paths.contains_key(&path) {
            return false;
        }
        self.virtual_paths.insert(path, physical);
        true
    }

    /// Atomically replace the whole virtual path mapping
    pub fn set_virtual_paths(&mut self, mapping: VirtualPathMap) {
        self.virtual_paths = mapping;
    }

    /// Unmap a virtual path
    ///
    /// Returns `false` if the path was not mapped.
    pub fn remove_virtual_path(&mut self, path: &VirtualPath) -> bool {
        self.virtual_paths.remove(path).is_some()
    }
}

/// Read-only application snapshot
///
/// The projection of a [`Site`] returned to the control layer. It is a value
/// copied out of the site at read time; mutating the store afterwards never
/// affects a snapshot already handed out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    /// Site name, original casing
    pub name: String,

    /// URLs of the public (Live) surface
    pub site_urls: Vec<String>,

    /// URLs of the management (Service) surface
    pub service_urls: Vec<String>,

    /// Virtual path → physical path mapping
    pub virtual_paths: BTreeMap<String, String>,
}

impl Application {
    /// Project a snapshot out of a site
    pub fn from_site(site: &Site) -> Self {
        Self {
            name: site.name.as_str().to_string(),
            site_urls: site.site_urls(),
            service_urls: site.service_urls(),
            virtual_paths: site
                .virtual_paths()
                .iter()
                .map(|(vp, pp)| (vp.as_str().to_string(), pp.as_str().to_string()))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Scheme;
    use pretty_assertions::assert_eq;

    fn live_binding(port: u16, host: &str) -> Binding {
        Binding::new(
            Scheme::Http,
            "0.0.0.0".parse().unwrap(),
            port,
            host,
            SiteType::Live,
        )
        .unwrap()
    }

    fn service_binding(host: &str) -> Binding {
        Binding::new(
            Scheme::Http,
            "127.0.0.1".parse().unwrap(),
            80,
            host,
            SiteType::Service,
        )
        .unwrap()
    }

    fn demo_site() -> Site {
        Site::new(SiteName::new("demo").unwrap())
    }

    #[test]
    fn test_new_site_is_empty() {
        let site = demo_site();
        assert!(site.bindings().is_empty());
        assert!(site.virtual_paths().is_empty());
        assert!(site.is_decommissioned());
    }

    #[test]
    fn test_add_binding_rejects_duplicate_key() {
        let mut site = demo_site();

        assert!(site.add_binding(live_binding(80, "demo.local")));
        assert!(!site.add_binding(live_binding(80, "demo.local")));
        assert_eq!(site.bindings().len(), 1);

        // Same key under a different site type is a distinct binding
        let service = Binding::new(
            Scheme::Http,
            "0.0.0.0".parse().unwrap(),
            80,
            "demo.local",
            SiteType::Service,
        )
        .unwrap();
        assert!(site.add_binding(service));
        assert_eq!(site.bindings().len(), 2);
    }

    #[test]
    fn test_remove_binding() {
        let mut site = demo_site();
        let binding = live_binding(80, "demo.local");
        let key = binding.key();
        site.add_binding(binding);

        assert!(site.remove_binding(&key, SiteType::Live));
        assert!(!site.remove_binding(&key, SiteType::Live));
        assert!(site.is_decommissioned());
    }

    #[test]
    fn test_url_derivation_preserves_binding_order() {
        let mut site = demo_site();
        site.add_binding(live_binding(80, "demo.local"));
        site.add_binding(live_binding(8080, "alt.demo.local"));
        site.add_binding(service_binding("demo.scm.local"));

        assert_eq!(
            site.site_urls(),
            vec!["http://demo.local:80/", "http://alt.demo.local:8080/"]
        );
        assert_eq!(site.service_urls(), vec!["http://demo.scm.local:80/"]);
    }

    #[test]
    fn test_virtual_path_add_keeps_first_mapping() {
        let mut site = demo_site();
        let api = VirtualPath::new("/api").unwrap();

        assert!(site.add_virtual_path(api.clone(), PhysicalPath::new("site/api").unwrap()));
        assert!(!site.add_virtual_path(api.clone(), PhysicalPath::new("site/other").unwrap()));
        assert_eq!(site.virtual_paths().get(&api).unwrap().as_str(), "site/api");
    }

    #[test]
    fn test_set_virtual_paths_replaces_fully() {
        let mut site = demo_site();
        site.add_virtual_path(
            VirtualPath::new("/old").unwrap(),
            PhysicalPath::new("site/old").unwrap(),
        );

        let mut replacement = VirtualPathMap::new();
        replacement.insert(
            VirtualPath::new("/new").unwrap(),
            PhysicalPath::new("site/new").unwrap(),
        );
        site.set_virtual_paths(replacement.clone());

        assert_eq!(site.virtual_paths(), &replacement);
        assert!(!site.has_virtual_path(&VirtualPath::new("/old").unwrap()));
    }

    #[test]
    fn test_application_projection_is_a_copy() {
        let mut site = demo_site();
        site.add_binding(live_binding(80, "demo.local"));
        site.add_virtual_path(
            VirtualPath::new("/api").unwrap(),
            PhysicalPath::new("site/api").unwrap(),
        );

        let snapshot = Application::from_site(&site);

        // Mutating the site afterwards does not affect the snapshot
        site.remove_binding(
            &live_binding(80, "demo.local").key(),
            SiteType::Live,
        );
        site.remove_virtual_path(&VirtualPath::new("/api").unwrap());

        assert_eq!(snapshot.name, "demo");
        assert_eq!(snapshot.site_urls, vec!["http://demo.local:80/"]);
        assert_eq!(
            snapshot.virtual_paths.get("/api").map(String::as_str),
            Some("site/api")
        );
    }
}
