// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Store Abstraction
//!
//! The store resolves site identities by name and persists site records. The
//! backing persistence (filesystem, host configuration registry) is an
//! external concern behind the [`SiteStore`] trait; [`MemorySiteStore`] is
//! the in-process implementation used as the default and in tests.
//!
//! Reads return copies, never live references: callers can hold a [`Site`]
//! across awaits without aliasing the store's state. Absence is `None`, not
//! an error - callers must handle both branches.

pub mod memory;

pub use memory::MemorySiteStore;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{Site, SiteName};

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by a store backend
#[derive(Debug, Error)]
pub enum StoreError {
    /// Backend failure (I/O, corrupt configuration, ...)
    #[error("Store backend error: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Site identity resolution and persistence
///
/// Mutations flow exclusively through the site manager, which serializes them
/// per name; implementations only need to be internally consistent per call.
#[async_trait]
pub trait SiteStore: Send + Sync {
    /// Names of all sites, reflecting the backing state at call time
    ///
    /// Iteration order is stable (canonical name order) but otherwise
    /// unspecified.
    async fn list_sites(&self) -> StoreResult<Vec<SiteName>>;

    /// Resolve a site by name
    ///
    /// Returns a copy of the site record, or `None` if absent. No side
    /// effects.
    async fn get_site(&self, name: &SiteName) -> StoreResult<Option<Site>>;

    /// Insert or replace a site record
    async fn put_site(&self, site: Site) -> StoreResult<()>;

    /// Remove a site record
    ///
    /// Returns `false` if no site with that name existed.
    async fn remove_site(&self, name: &SiteName) -> StoreResult<bool>;
}
