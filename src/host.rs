// Copyright (c) 2025 - Cowboy AI, Inc.
//! Host Mechanism Contract
//!
//! The host mechanism is the external server/OS facility actually serving
//! bindings and content. The core only defines the contract; host-specific
//! mechanics live behind the [`HostBackend`] trait.
//!
//! # Failure Semantics
//!
//! Two distinct failure channels, matching how callers branch:
//! - `Ok(false)` - the host *rejected* the request (port conflict, unknown
//!   binding); the operation had no effect and the caller treats it as
//!   informational.
//! - `Err(HostError)` - the host *failed*; the manager translates this into
//!   a domain error and, during provisioning, rolls back.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use thiserror::Error;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::domain::{Binding, BindingKey, Scheme, SiteName, SiteType, VirtualPathMap};

/// Errors raised by the host mechanism
#[derive(Debug, Error)]
pub enum HostError {
    /// Host mechanism is not reachable or not running
    #[error("Host mechanism unavailable: {0}")]
    Unavailable(String),

    /// Host-level operation failed (resource creation, configuration write)
    #[error("Host operation failed: {0}")]
    Backend(#[from] anyhow::Error),
}

/// Host resources created for a new site
#[derive(Debug, Clone)]
pub struct ProvisionedSite {
    /// Default bindings the host set up (always includes a Service binding)
    pub bindings: Vec<Binding>,
}

/// Contract between the site manager and the host mechanism
///
/// All operations are potentially blocking I/O on the host side and are
/// therefore async. The manager serializes calls per site name; a backend
/// never sees two concurrent lifecycle operations for the same name.
#[async_trait]
pub trait HostBackend: Send + Sync {
    /// Create host resources for a new site
    ///
    /// Returns the default bindings (at minimum the Service/deployment
    /// endpoint). On error the manager calls [`HostBackend::unprovision`] to
    /// roll back whatever was partially created.
    async fn provision(&self, name: &SiteName, site_id: Uuid) -> Result<ProvisionedSite, HostError>;

    /// Release all host resources of a site
    ///
    /// Must tolerate partially provisioned sites (used for rollback).
    async fn unprovision(&self, name: &SiteName) -> Result<(), HostError>;

    /// Clear deployed content, keeping the site and its bindings
    async fn clear_content(&self, name: &SiteName) -> Result<(), HostError>;

    /// Attach a binding to a site
    ///
    /// Returns `false` if the host rejects the binding (endpoint already
    /// claimed by another site).
    async fn bind(&self, name: &SiteName, binding: &Binding) -> Result<bool, HostError>;

    /// Detach a binding from a site
    ///
    /// Returns `false` if the host has no such binding.
    async fn unbind(
        &self,
        name: &SiteName,
        key: &BindingKey,
        site_type: SiteType,
    ) -> Result<bool, HostError>;

    /// Apply the full virtual path mapping for a site
    ///
    /// The mapping replaces whatever the host had; returning `false` means
    /// the host rejected the mapping and kept its previous state.
    async fn apply_virtual_paths(
        &self,
        name: &SiteName,
        mapping: &VirtualPathMap,
    ) -> Result<bool, HostError>;
}

/// In-process host backend
///
/// Emulates the host mechanism's endpoint bookkeeping without serving
/// anything: endpoints (`scheme://ip:port:host`) are claimed globally, so two
/// sites binding the same endpoint produce the same rejection a real host
/// would. Used as the default backend and in tests.
#[derive(Debug, Default)]
pub struct MemoryHostBackend {
    /// Endpoint claims across all sites, keyed by canonical site name
    claims: Mutex<HashMap<String, HashSet<BindingKey>>>,
}

impl MemoryHostBackend {
    /// Create a backend with no claimed endpoints
    pub fn new() -> Self {
        Self::default()
    }

    /// Default service (deployment) binding for a site
    fn service_binding(name: &SiteName) -> Binding {
        // Host-header routing on the loopback interface; infallible because
        // the site name is a valid DNS label.
        Binding::new(
            Scheme::Http,
            std::net::IpAddr::from([127, 0, 0, 1]),
            80,
            format!("{}.scm.localhost", name.canonical()),
            SiteType::Service,
        )
        .unwrap_or_else(|_| unreachable!("site name is a valid DNS label"))
    }

    /// Default live binding for a site
    fn live_binding(name: &SiteName) -> Binding {
        Binding::new(
            Scheme::Http,
            std::net::IpAddr::from([127, 0, 0, 1]),
            80,
            format!("{}.localhost", name.canonical()),
            SiteType::Live,
        )
        .unwrap_or_else(|_| unreachable!("site name is a valid DNS label"))
    }

    /// Whether any other site already claims this endpoint
    fn endpoint_taken(
        claims: &HashMap<String, HashSet<BindingKey>>,
        site: &str,
        key: &BindingKey,
    ) -> bool {
        claims
            .iter()
            .any(|(owner, keys)| owner != site && keys.contains(key))
    }
}

#[async_trait]
impl HostBackend for MemoryHostBackend {
    async fn provision(&self, name: &SiteName, _site_id: Uuid) -> Result<ProvisionedSite, HostError> {
        let service = Self::service_binding(name);
        let live = Self::live_binding(name);

        let mut claims = self.claims.lock().await;
        let entry = claims.entry(name.canonical()).or_default();
        entry.insert(service.key());
        entry.insert(live.key());

        Ok(ProvisionedSite {
            bindings: vec![service, live],
        })
    }

    async fn unprovision(&self, name: &SiteName) -> Result<(), HostError> {
        let mut claims = self.claims.lock().await;
        claims.remove(&name.canonical());
        Ok(())
    }

    async fn clear_content(&self, _name: &SiteName) -> Result<(), HostError> {
        // No content is materialized in-process
        Ok(())
    }

    async fn bind(&self, name: &SiteName, binding: &Binding) -> Result<bool, HostError> {
        let mut claims = self.claims.lock().await;
        let site = name.canonical();

        if Self::endpoint_taken(&claims, &site, &binding.key()) {
            return Ok(false);
        }

        claims.entry(site).or_default().insert(binding.key());
        Ok(true)
    }

    async fn unbind(
        &self,
        name: &SiteName,
        key: &BindingKey,
        _site_type: SiteType,
    ) -> Result<bool, HostError> {
        let mut claims = self.claims.lock().await;
        Ok(claims
            .get_mut(&name.canonical())
            .map(|keys| keys.remove(key))
            .unwrap_or(false))
    }

    async fn apply_virtual_paths(
        &self,
        _name: &SiteName,
        _mapping: &VirtualPathMap,
    ) -> Result<bool, HostError> {
        // Path resolution under the content root is not emulated in-process
        Ok(true)
    }
}
