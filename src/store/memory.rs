// Copyright (c) 2025 - Cowboy AI, Inc.
//! In-Memory Site Store

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::{SiteStore, StoreResult};
use crate::domain::{Site, SiteName};

/// In-memory site store
///
/// Keeps site records in a `HashMap` keyed by [`SiteName`], whose hash and
/// equality are case-insensitive, so `"Demo"` and `"demo"` resolve to the
/// same record. Reads hand out clones of the stored record.
#[derive(Debug, Default)]
pub struct MemorySiteStore {
    sites: RwLock<HashMap<SiteName, Site>>,
}

impl MemorySiteStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of sites currently stored
    pub async fn len(&self) -> usize {
        self.sites.read().await.len()
    }

    /// Whether the store holds no sites
    pub async fn is_empty(&self) -> bool {
        self.sites.read().await.is_empty()
    }
}

#[async_trait]
impl SiteStore for MemorySiteStore {
    async fn list_sites(&self) -> StoreResult<Vec<SiteName>> {
        let sites = self.sites.read().await;
        let mut names: Vec<SiteName> = sites.keys().cloned().collect();
        names.sort();
        Ok(names)
    }

    async fn get_site(&self, name: &SiteName) -> StoreResult<Option<Site>> {
        let sites = self.sites.read().await;
        Ok(sites.get(name).cloned())
    }

    async fn put_site(&self, site: Site) -> StoreResult<()> {
        let mut sites = self.sites.write().await;
        sites.insert(site.name.clone(), site);
        Ok(())
    }

    async fn remove_site(&self, name: &SiteName) -> StoreResult<bool> {
        let mut sites = self.sites.write().await;
        Ok(sites.remove(name).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn name(s: &str) -> SiteName {
        SiteName::new(s).unwrap()
    }

    #[tokio::test]
    async fn test_put_get_remove() {
        let store = MemorySiteStore::new();
        assert!(store.is_empty().await);

        store.put_site(Site::new(name("demo"))).await.unwrap();
        assert_eq!(store.len().await, 1);

        let site = store.get_site(&name("demo")).await.unwrap();
        assert_eq!(site.unwrap().name, name("demo"));

        assert!(store.remove_site(&name("demo")).await.unwrap());
        assert!(!store.remove_site(&name("demo")).await.unwrap());
        assert!(store.get_site(&name("demo")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_case_insensitive_resolution() {
        let store = MemorySiteStore::new();
        store.put_site(Site::new(name("Demo"))).await.unwrap();

        let site = store.get_site(&name("DEMO")).await.unwrap().unwrap();
        // Original casing preserved
        assert_eq!(site.name.as_str(), "Demo");

        // Replacing under different casing keeps a single record
        store.put_site(Site::new(name("demo"))).await.unwrap();
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_canonical_name() {
        let store = MemorySiteStore::new();
        for n in ["Charlie", "alpha", "BRAVO"] {
            store.put_site(Site::new(name(n))).await.unwrap();
        }

        let listed: Vec<String> = store
            .list_sites()
            .await
            .unwrap()
            .into_iter()
            .map(|n| n.canonical())
            .collect();
        assert_eq!(listed, vec!["alpha", "bravo", "charlie"]);
    }

    #[tokio::test]
    async fn test_get_returns_a_copy() {
        use crate::domain::{PhysicalPath, VirtualPath};

        let store = MemorySiteStore::new();
        let mut site = Site::new(name("demo"));
        site.add_virtual_path(
            VirtualPath::new("/api").unwrap(),
            PhysicalPath::new("site/api").unwrap(),
        );
        store.put_site(site).await.unwrap();

        let mut copy = store.get_site(&name("demo")).await.unwrap().unwrap();
        copy.remove_virtual_path(&VirtualPath::new("/api").unwrap());

        // Store unaffected by mutating the copy
        let fresh = store.get_site(&name("demo")).await.unwrap().unwrap();
        assert!(fresh.has_virtual_path(&VirtualPath::new("/api").unwrap()));
    }
}
