// Copyright (c) 2025 - Cowboy AI, Inc.
//! Shared test fixtures
//!
//! A scriptable host backend that records every call it receives, plus
//! builders wiring up a manager and service over the in-memory store.

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use site_management::domain::{
    Binding, BindingKey, PhysicalPath, Scheme, SiteName, SiteType, VirtualPath, VirtualPathMap,
};
use site_management::host::{HostBackend, HostError, ProvisionedSite};
use site_management::manager::DefaultSiteManager;
use site_management::service::SiteApplicationService;
use site_management::store::MemorySiteStore;
use uuid::Uuid;

/// Calls observed by the scripted host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    Provision(String),
    Unprovision(String),
    ClearContent(String),
    Bind(String, BindingKey),
    Unbind(String, BindingKey),
    ApplyVirtualPaths(String, usize),
}

/// Scriptable host backend
///
/// Accepts everything by default; individual operations can be scripted to
/// fail (`Err`) or reject (`Ok(false)`). Every call is recorded.
#[derive(Debug, Default)]
pub struct ScriptedHost {
    calls: std::sync::Mutex<Vec<HostCall>>,
    pub fail_provision: AtomicBool,
    pub fail_unprovision: AtomicBool,
    pub reject_bind: AtomicBool,
    pub reject_virtual_paths: AtomicBool,
    pub provision_count: AtomicUsize,
    pub unprovision_count: AtomicUsize,
}

impl ScriptedHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl HostBackend for ScriptedHost {
    async fn provision(
        &self,
        name: &SiteName,
        _site_id: Uuid,
    ) -> Result<ProvisionedSite, HostError> {
        self.record(HostCall::Provision(name.canonical()));
        self.provision_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_provision.load(Ordering::SeqCst) {
            return Err(HostError::Backend(anyhow::anyhow!(
                "disk full while creating site root"
            )));
        }

        Ok(ProvisionedSite {
            bindings: vec![service_binding(name), live_binding(name)],
        })
    }

    async fn unprovision(&self, name: &SiteName) -> Result<(), HostError> {
        self.record(HostCall::Unprovision(name.canonical()));
        self.unprovision_count.fetch_add(1, Ordering::SeqCst);

        if self.fail_unprovision.load(Ordering::SeqCst) {
            return Err(HostError::Unavailable("host service stopped".to_string()));
        }
        Ok(())
    }

    async fn clear_content(&self, name: &SiteName) -> Result<(), HostError> {
        self.record(HostCall::ClearContent(name.canonical()));
        Ok(())
    }

    async fn bind(&self, name: &SiteName, binding: &Binding) -> Result<bool, HostError> {
        self.record(HostCall::Bind(name.canonical(), binding.key()));
        Ok(!self.reject_bind.load(Ordering::SeqCst))
    }

    async fn unbind(
        &self,
        name: &SiteName,
        key: &BindingKey,
        _site_type: SiteType,
    ) -> Result<bool, HostError> {
        self.record(HostCall::Unbind(name.canonical(), key.clone()));
        Ok(true)
    }

    async fn apply_virtual_paths(
        &self,
        name: &SiteName,
        mapping: &VirtualPathMap,
    ) -> Result<bool, HostError> {
        self.record(HostCall::ApplyVirtualPaths(name.canonical(), mapping.len()));
        Ok(!self.reject_virtual_paths.load(Ordering::SeqCst))
    }
}

/// Default service binding the scripted host provisions
pub fn service_binding(name: &SiteName) -> Binding {
    Binding::new(
        Scheme::Http,
        "127.0.0.1".parse().unwrap(),
        80,
        format!("{}.scm.localhost", name.canonical()),
        SiteType::Service,
    )
    .unwrap()
}

/// Default live binding the scripted host provisions
pub fn live_binding(name: &SiteName) -> Binding {
    Binding::new(
        Scheme::Http,
        "127.0.0.1".parse().unwrap(),
        80,
        format!("{}.localhost", name.canonical()),
        SiteType::Live,
    )
    .unwrap()
}

/// Wired-up manager over the in-memory store and a scripted host
pub fn manager() -> (
    Arc<DefaultSiteManager>,
    Arc<MemorySiteStore>,
    Arc<ScriptedHost>,
) {
    let store = Arc::new(MemorySiteStore::new());
    let host = Arc::new(ScriptedHost::new());
    let manager = Arc::new(DefaultSiteManager::new(store.clone(), host.clone()));
    (manager, store, host)
}

/// Wired-up application service over the in-memory store and a scripted host
pub fn service() -> (
    Arc<SiteApplicationService>,
    Arc<MemorySiteStore>,
    Arc<ScriptedHost>,
) {
    let (manager, store, host) = manager();
    let service = Arc::new(SiteApplicationService::new(store.clone(), manager));
    (service, store, host)
}

/// Shorthand for a validated site name
pub fn name(s: &str) -> SiteName {
    SiteName::new(s).unwrap()
}

/// Shorthand for a validated virtual path
pub fn vpath(s: &str) -> VirtualPath {
    VirtualPath::new(s).unwrap()
}

/// Shorthand for a validated physical path
pub fn ppath(s: &str) -> PhysicalPath {
    PhysicalPath::new(s).unwrap()
}
