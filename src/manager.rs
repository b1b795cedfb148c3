// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Manager
//!
//! Owns site lifecycle operations (create, delete, reset content) and
//! binding/virtual path mutation. Enforces domain invariants, gates
//! operations through the site lifecycle state machine, and translates
//! host-specific errors into domain errors.
//!
//! # Concurrency Contract
//!
//! Callers may invoke operations on *different* site names concurrently with
//! no coordination. Operations on the *same* name serialize through a
//! name-keyed async lock held for the duration of the operation, so
//! create-if-absent is atomic and delete-during-create races cannot occur.
//! Reads through the store remain unsynchronized snapshots.
//!
//! # Rollback Contract
//!
//! If provisioning fails partway, the manager unprovisions whatever the host
//! already created (full rollback, best effort - rollback failures are
//! logged and swallowed) and surfaces [`SiteError::ProvisioningFailed`]. No
//! orphaned half-created sites remain in the store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info, warn};

use crate::domain::{
    invariants, Binding, BindingKey, PhysicalPath, Site, SiteName, SiteType, VirtualPath,
    VirtualPathMap,
};
use crate::errors::{SiteError, SiteResult};
use crate::host::HostBackend;
use crate::state_machine::{LifecycleCommand, SiteState, StateMachine};
use crate::store::SiteStore;

/// Site lifecycle and binding management operations
///
/// Identity-level failures (absent site on delete/reset/create collision)
/// are typed errors; binding and virtual path mutations report "no effect"
/// as `Ok(false)`. The asymmetry is deliberate - callers branch on the two
/// channels differently.
#[async_trait]
pub trait SiteManager: Send + Sync {
    /// Create a new site and provision its host resources
    ///
    /// Fails with [`SiteError::AlreadyExists`] if the name is taken and
    /// [`SiteError::ProvisioningFailed`] (after rollback) on host failure.
    async fn create_site(&self, name: &SiteName) -> SiteResult<Site>;

    /// Delete a site, releasing all bindings and host resources
    ///
    /// Fails with [`SiteError::NotFound`] if no such site exists.
    async fn delete_site(&self, name: &SiteName) -> SiteResult<()>;

    /// Clear deployed content without deleting the site or its bindings
    ///
    /// Fails with [`SiteError::NotFound`] if no such site exists.
    async fn reset_site_content(&self, name: &SiteName) -> SiteResult<()>;

    /// Add a binding to a site
    ///
    /// Returns `Ok(false)` on duplicate bindings and host-level rejections
    /// (e.g. endpoint conflict); the site is unchanged in both cases.
    async fn add_binding(&self, name: &SiteName, binding: Binding) -> SiteResult<bool>;

    /// Remove the binding with this key and site type
    ///
    /// Returns `Ok(false)` if the site has no such binding.
    async fn remove_binding(
        &self,
        name: &SiteName,
        key: &BindingKey,
        site_type: SiteType,
    ) -> SiteResult<bool>;

    /// Map a virtual path
    ///
    /// Returns `Ok(false)` if the path is already mapped; use
    /// [`SiteManager::set_virtual_application`] to replace mappings.
    async fn add_virtual_application(
        &self,
        name: &SiteName,
        path: VirtualPath,
        physical: PhysicalPath,
    ) -> SiteResult<bool>;

    /// Atomically replace the whole virtual path mapping
    ///
    /// On rejection the prior mapping remains intact - no half-applied
    /// state.
    async fn set_virtual_application(
        &self,
        name: &SiteName,
        mapping: VirtualPathMap,
    ) -> SiteResult<bool>;

    /// Unmap a virtual path
    ///
    /// Returns `Ok(false)` if the path is not mapped.
    async fn remove_virtual_application(
        &self,
        name: &SiteName,
        path: &VirtualPath,
    ) -> SiteResult<bool>;
}

/// Name-keyed async locks
///
/// One lock per site name (case-insensitive). Lock entries are retained for
/// the life of the manager; the population is bounded by the number of
/// distinct names ever touched.
#[derive(Debug, Default)]
struct NameLocks {
    inner: Mutex<HashMap<SiteName, Arc<Mutex<()>>>>,
}

impl NameLocks {
    /// Acquire the lock for a name, waiting for any in-flight operation
    async fn acquire(&self, name: &SiteName) -> OwnedMutexGuard<()> {
        let lock = {
            let mut locks = self.inner.lock().await;
            Arc::clone(locks.entry(name.clone()).or_default())
        };
        lock.lock_owned().await
    }
}

/// Default [`SiteManager`] implementation over a store and a host backend
pub struct DefaultSiteManager {
    store: Arc<dyn SiteStore>,
    host: Arc<dyn HostBackend>,
    locks: NameLocks,
}

impl DefaultSiteManager {
    /// Create a manager over the given store and host backend
    pub fn new(store: Arc<dyn SiteStore>, host: Arc<dyn HostBackend>) -> Self {
        Self {
            store,
            host,
            locks: NameLocks::default(),
        }
    }

    /// Lifecycle state of a name, derived from store presence
    ///
    /// Transient states (Provisioning, Deleting) are never observed here:
    /// they only exist while the per-name lock is held by the operation that
    /// entered them.
    async fn state_of(&self, name: &SiteName) -> SiteResult<SiteState> {
        Ok(match self.store.get_site(name).await? {
            Some(_) => SiteState::Active,
            None => SiteState::NonExistent,
        })
    }

    /// Gate an operation through the lifecycle state machine
    ///
    /// Invalid transitions map to the identity errors callers expect:
    /// provisioning an existing name is [`SiteError::AlreadyExists`], any
    /// other command against an absent name is [`SiteError::NotFound`].
    fn gate(
        name: &SiteName,
        state: SiteState,
        command: LifecycleCommand,
    ) -> SiteResult<SiteState> {
        match state.transition(&command) {
            Ok((next, output)) => {
                for warning in output.warnings {
                    warn!("Site {}: {}", name, warning);
                }
                Ok(next)
            }
            Err(_) if command == LifecycleCommand::BeginProvisioning => {
                Err(SiteError::AlreadyExists(name.clone()))
            }
            Err(_) => Err(SiteError::NotFound(name.clone())),
        }
    }

    /// Resolve a site for a mutation, gating through the state machine
    async fn site_for_mutation(&self, name: &SiteName) -> SiteResult<Site> {
        let site = self.store.get_site(name).await?;
        let state = match site {
            Some(_) => SiteState::Active,
            None => SiteState::NonExistent,
        };
        Self::gate(name, state, LifecycleCommand::MutateBindings)?;
        site.ok_or_else(|| SiteError::NotFound(name.clone()))
    }
}

#[async_trait]
impl SiteManager for DefaultSiteManager {
    async fn create_site(&self, name: &SiteName) -> SiteResult<Site> {
        let _guard = self.locks.acquire(name).await;

        let current = self.state_of(name).await?;
        let state = Self::gate(name, current, LifecycleCommand::BeginProvisioning)?;
        debug!("Site {}: state {}", name, state);

        let mut site = Site::new(name.clone());
        let provisioned = match self.host.provision(name, site.id).await {
            Ok(provisioned) => provisioned,
            Err(source) => {
                // Full rollback, best effort: release whatever the host
                // already created before failing
                if let Err(rollback) = self.host.unprovision(name).await {
                    warn!("Site {}: rollback after failed provisioning also failed: {}", name, rollback);
                }
                Self::gate(name, state, LifecycleCommand::FailProvisioning)?;
                return Err(SiteError::ProvisioningFailed {
                    name: name.clone(),
                    source,
                });
            }
        };

        for binding in provisioned.bindings {
            site.add_binding(binding);
        }
        self.store.put_site(site.clone()).await?;
        Self::gate(name, state, LifecycleCommand::CompleteProvisioning)?;

        info!("Site {} created with {} default bindings", name, site.bindings().len());
        Ok(site)
    }

    async fn delete_site(&self, name: &SiteName) -> SiteResult<()> {
        let _guard = self.locks.acquire(name).await;

        let current = self.state_of(name).await?;
        let state = Self::gate(name, current, LifecycleCommand::BeginDeleting)?;

        self.host.unprovision(name).await?;
        self.store.remove_site(name).await?;
        Self::gate(name, state, LifecycleCommand::CompleteDeleting)?;

        info!("Site {} deleted", name);
        Ok(())
    }

    async fn reset_site_content(&self, name: &SiteName) -> SiteResult<()> {
        let _guard = self.locks.acquire(name).await;

        let current = self.state_of(name).await?;
        Self::gate(name, current, LifecycleCommand::ResetContent)?;

        self.host.clear_content(name).await?;
        info!("Site {} content reset", name);
        Ok(())
    }

    async fn add_binding(&self, name: &SiteName, binding: Binding) -> SiteResult<bool> {
        let _guard = self.locks.acquire(name).await;
        let mut site = self.site_for_mutation(name).await?;

        // Duplicates and rule violations are no-ops, not failures
        if let Err(rejection) = invariants::validate_binding_addition(&site, &binding) {
            debug!("Site {}: binding rejected: {}", name, rejection);
            return Ok(false);
        }

        if !self.host.bind(name, &binding).await? {
            debug!("Site {}: host rejected binding {}", name, binding);
            return Ok(false);
        }

        info!("Site {}: added binding {}", name, binding);
        site.add_binding(binding);
        self.store.put_site(site).await?;
        Ok(true)
    }

    async fn remove_binding(
        &self,
        name: &SiteName,
        key: &BindingKey,
        site_type: SiteType,
    ) -> SiteResult<bool> {
        let _guard = self.locks.acquire(name).await;
        let mut site = self.site_for_mutation(name).await?;

        if !site.has_binding(key, site_type) {
            return Ok(false);
        }

        // A host that disagrees about the binding does not fail the site;
        // the store record is still cleaned up
        if !self.host.unbind(name, key, site_type).await? {
            warn!("Site {}: host had no binding {}, removing from store anyway", name, key);
        }

        site.remove_binding(key, site_type);
        self.store.put_site(site).await?;
        info!("Site {}: removed binding {}", name, key);
        Ok(true)
    }

    async fn add_virtual_application(
        &self,
        name: &SiteName,
        path: VirtualPath,
        physical: PhysicalPath,
    ) -> SiteResult<bool> {
        let _guard = self.locks.acquire(name).await;
        let mut site = self.site_for_mutation(name).await?;

        if let Err(rejection) = invariants::validate_virtual_path_addition(&site, &path) {
            debug!("Site {}: virtual path rejected: {}", name, rejection);
            return Ok(false);
        }

        let mut mapping = site.virtual_paths().clone();
        mapping.insert(path.clone(), physical.clone());
        if !self.host.apply_virtual_paths(name, &mapping).await? {
            return Ok(false);
        }

        site.add_virtual_path(path.clone(), physical);
        self.store.put_site(site).await?;
        info!("Site {}: mapped virtual path {}", name, path);
        Ok(true)
    }

    async fn set_virtual_application(
        &self,
        name: &SiteName,
        mapping: VirtualPathMap,
    ) -> SiteResult<bool> {
        let _guard = self.locks.acquire(name).await;
        let mut site = self.site_for_mutation(name).await?;

        invariants::validate_virtual_path_replacement(&mapping)?;

        // Host applies the full replacement first; on rejection the prior
        // mapping stays intact
        if !self.host.apply_virtual_paths(name, &mapping).await? {
            debug!("Site {}: host rejected virtual path replacement", name);
            return Ok(false);
        }

        site.set_virtual_paths(mapping);
        self.store.put_site(site).await?;
        info!("Site {}: virtual path mapping replaced", name);
        Ok(true)
    }

    async fn remove_virtual_application(
        &self,
        name: &SiteName,
        path: &VirtualPath,
    ) -> SiteResult<bool> {
        let _guard = self.locks.acquire(name).await;
        let mut site = self.site_for_mutation(name).await?;

        if !site.has_virtual_path(path) {
            return Ok(false);
        }

        let mut mapping = site.virtual_paths().clone();
        mapping.remove(path);
        if !self.host.apply_virtual_paths(name, &mapping).await? {
            return Ok(false);
        }

        site.remove_virtual_path(path);
        self.store.put_site(site).await?;
        info!("Site {}: unmapped virtual path {}", name, path);
        Ok(true)
    }
}
