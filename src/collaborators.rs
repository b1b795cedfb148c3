// Copyright (c) 2025 - Cowboy AI, Inc.
//! External Collaborator Contracts
//!
//! Narrow contracts for subsystems the core depends on but does not own:
//! credential issuance, certificate discovery, and repository metadata.
//! The core passes their data through without further validation - their
//! failure handling is the delegate's problem, except where noted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Deployment credentials issued by an external provider
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Certificate known to an external certificate store
///
/// Used only to populate choices presented upward; the core never resolves
/// or validates certificate references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CertificateDescriptor {
    /// Human-readable name for selection lists
    pub friendly_name: String,

    /// Opaque reference usable in a binding's certificate field
    pub thumbprint: String,

    /// Expiry, when the store exposes it
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub expires: Option<DateTime<Utc>>,
}

/// Source repository metadata for a deployed application
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepositoryInfo {
    /// Clone URL of the deployment repository
    pub git_url: String,
}

/// Issues deployment credentials
///
/// Synchronous by contract; no failure mode is modeled here.
pub trait CredentialProvider: Send + Sync {
    fn get_credentials(&self) -> Credentials;
}

/// Enumerates certificates available to bindings
pub trait CertificateSearch: Send + Sync {
    fn find_all(&self) -> Vec<CertificateDescriptor>;
}

/// Looks up repository metadata for an application
///
/// Lookup failures surface as `None` rather than propagating.
#[async_trait]
pub trait RepositoryInfoLookup: Send + Sync {
    async fn get_repository_info(&self, credentials: &Credentials) -> Option<RepositoryInfo>;
}
