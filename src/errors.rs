//! Error types for site management operations

use thiserror::Error;

use crate::domain::{
    BindingError, SiteName, SiteNameError, ValidationError, VirtualPathError,
};
use crate::host::HostError;
use crate::store::StoreError;

/// Errors that can occur in site management operations
///
/// The taxonomy callers branch on:
/// - [`SiteError::AlreadyExists`] - name collision on create
/// - [`SiteError::NotFound`] - operation targets an absent site
/// - [`SiteError::Validation`] - malformed binding or path input
/// - [`SiteError::ProvisioningFailed`] - host-level failure during create,
///   after rollback of partially created resources
///
/// Binding and virtual path mutations signal "no effect" as `Ok(false)`, not
/// as an error; only structural absence and host failures surface here.
#[derive(Debug, Error)]
pub enum SiteError {
    /// A site with this name already exists
    #[error("Site already exists: {0}")]
    AlreadyExists(SiteName),

    /// No site with this name exists
    #[error("Site not found: {0}")]
    NotFound(SiteName),

    /// Input validation failed
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// Host-level resource failure during create; partially created
    /// resources have been rolled back
    #[error("Provisioning failed for site {name}: {source}")]
    ProvisioningFailed {
        name: SiteName,
        #[source]
        source: HostError,
    },

    /// Host mechanism failure outside of provisioning
    #[error("Host error: {0}")]
    Host(#[from] HostError),

    /// Store backend failure
    #[error("Store error: {0}")]
    Store(#[from] StoreError),
}

impl SiteError {
    /// Whether this error means the target site does not exist
    pub fn is_not_found(&self) -> bool {
        matches!(self, SiteError::NotFound(_))
    }

    /// Whether this error means the name is already taken
    pub fn is_already_exists(&self) -> bool {
        matches!(self, SiteError::AlreadyExists(_))
    }
}

impl From<SiteNameError> for SiteError {
    fn from(err: SiteNameError) -> Self {
        SiteError::Validation(err.into())
    }
}

impl From<BindingError> for SiteError {
    fn from(err: BindingError) -> Self {
        SiteError::Validation(err.into())
    }
}

impl From<VirtualPathError> for SiteError {
    fn from(err: VirtualPathError) -> Self {
        SiteError::Validation(err.into())
    }
}

/// Result type for site management operations
pub type SiteResult<T> = Result<T, SiteError>;
