// Copyright (c) 2025 - Cowboy AI, Inc.
//! Application Service Façade
//!
//! Mediates between the control layer and the site manager. Existence checks
//! here are advisory - the authoritative create-if-absent check happens in
//! the manager under the per-name lock - but they let the façade answer
//! cheaply without touching the host, and they pin down the error contract
//! the control layer programs against.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::debug;

use crate::domain::{
    Application, Binding, BindingKey, PhysicalPath, SiteName, SiteType, VirtualPath,
    VirtualPathMap,
};
use crate::errors::{SiteError, SiteResult};
use crate::manager::SiteManager;
use crate::store::SiteStore;

/// Application-level operations exposed to the control layer
#[async_trait]
pub trait ApplicationService: Send + Sync {
    /// Create a new application
    ///
    /// Fails with [`SiteError::AlreadyExists`] if the name is already
    /// present among current site names.
    async fn add_application(&self, name: &SiteName) -> SiteResult<()>;

    /// Delete an application
    ///
    /// Returns `Ok(false)` without error if the application is absent;
    /// `Ok(true)` once it existed and has been deleted.
    async fn delete_application(&self, name: &SiteName) -> SiteResult<bool>;

    /// Names of all applications
    async fn get_applications(&self) -> SiteResult<Vec<SiteName>>;

    /// Snapshot of one application
    ///
    /// Fails with [`SiteError::NotFound`] if absent - a hard failure by
    /// design. Callers checking for existence should use
    /// [`ApplicationService::get_applications`] instead.
    async fn get_application(&self, name: &SiteName) -> SiteResult<Application>;

    /// Clear an application's deployed content
    ///
    /// Returns `Ok(false)` if the application is absent.
    async fn reset_application_content(&self, name: &SiteName) -> SiteResult<bool>;

    /// Add a binding to an application
    async fn add_site_binding(&self, name: &SiteName, binding: Binding) -> SiteResult<bool>;

    /// Remove a Live binding by key
    async fn remove_live_site_binding(&self, name: &SiteName, key: &BindingKey)
        -> SiteResult<bool>;

    /// Remove a Service binding by key
    async fn remove_service_site_binding(
        &self,
        name: &SiteName,
        key: &BindingKey,
    ) -> SiteResult<bool>;

    /// Map a virtual path
    async fn add_virtual_application(
        &self,
        name: &SiteName,
        path: VirtualPath,
        physical: PhysicalPath,
    ) -> SiteResult<bool>;

    /// Atomically replace the whole virtual path mapping
    async fn set_virtual_application(
        &self,
        name: &SiteName,
        mapping: VirtualPathMap,
    ) -> SiteResult<bool>;

    /// Unmap a virtual path
    async fn remove_virtual_application(
        &self,
        name: &SiteName,
        path: &VirtualPath,
    ) -> SiteResult<bool>;
}

/// Default [`ApplicationService`] over a site store and site manager
pub struct SiteApplicationService {
    store: Arc<dyn SiteStore>,
    manager: Arc<dyn SiteManager>,
}

impl SiteApplicationService {
    /// Create the façade over the given store and manager
    pub fn new(store: Arc<dyn SiteStore>, manager: Arc<dyn SiteManager>) -> Self {
        Self { store, manager }
    }

    /// Whether an application with this name currently exists
    async fn exists(&self, name: &SiteName) -> SiteResult<bool> {
        Ok(self.store.get_site(name).await?.is_some())
    }

    /// Map a lost not-found race to the boolean no-op channel
    fn absorb_not_found(result: SiteResult<bool>) -> SiteResult<bool> {
        match result {
            Err(SiteError::NotFound(_)) => Ok(false),
            other => other,
        }
    }
}

#[async_trait]
impl ApplicationService for SiteApplicationService {
    async fn add_application(&self, name: &SiteName) -> SiteResult<()> {
        // Advisory check; the manager re-checks under the per-name lock
        if self.exists(name).await? {
            return Err(SiteError::AlreadyExists(name.clone()));
        }
        self.manager.create_site(name).await?;
        Ok(())
    }

    async fn delete_application(&self, name: &SiteName) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        match self.manager.delete_site(name).await {
            Ok(()) => Ok(true),
            // Deleted concurrently between check and delegate
            Err(SiteError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn get_applications(&self) -> SiteResult<Vec<SiteName>> {
        self.store.list_sites().await.map_err(SiteError::from)
    }

    async fn get_application(&self, name: &SiteName) -> SiteResult<Application> {
        match self.store.get_site(name).await? {
            Some(site) => Ok(Application::from_site(&site)),
            None => Err(SiteError::NotFound(name.clone())),
        }
    }

    async fn reset_application_content(&self, name: &SiteName) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        match self.manager.reset_site_content(name).await {
            Ok(()) => Ok(true),
            Err(SiteError::NotFound(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }

    async fn add_site_binding(&self, name: &SiteName, binding: Binding) -> SiteResult<bool> {
        if !self.exists(name).await? {
            debug!("Application {} absent, binding not added", name);
            return Ok(false);
        }
        Self::absorb_not_found(self.manager.add_binding(name, binding).await)
    }

    async fn remove_live_site_binding(
        &self,
        name: &SiteName,
        key: &BindingKey,
    ) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        Self::absorb_not_found(self.manager.remove_binding(name, key, SiteType::Live).await)
    }

    async fn remove_service_site_binding(
        &self,
        name: &SiteName,
        key: &BindingKey,
    ) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        Self::absorb_not_found(
            self.manager
                .remove_binding(name, key, SiteType::Service)
                .await,
        )
    }

    async fn add_virtual_application(
        &self,
        name: &SiteName,
        path: VirtualPath,
        physical: PhysicalPath,
    ) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        Self::absorb_not_found(
            self.manager
                .add_virtual_application(name, path, physical)
                .await,
        )
    }

    async fn set_virtual_application(
        &self,
        name: &SiteName,
        mapping: VirtualPathMap,
    ) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        Self::absorb_not_found(self.manager.set_virtual_application(name, mapping).await)
    }

    async fn remove_virtual_application(
        &self,
        name: &SiteName,
        path: &VirtualPath,
    ) -> SiteResult<bool> {
        if !self.exists(name).await? {
            return Ok(false);
        }
        Self::absorb_not_found(self.manager.remove_virtual_application(name, path).await)
    }
}
