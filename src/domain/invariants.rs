// Copyright (c) 2025 - Cowboy AI, Inc.
//! Pure Validation Functions - Domain Invariants
//!
//! Business rule validation for site mutations. All functions are pure (no
//! I/O, no mutation, deterministic) and return detailed validation results.
//! The site manager calls them defensively before delegating to the host
//! mechanism, so no half-validated mutation ever reaches the host.

use super::{
    Binding, BindingError, BindingKey, Scheme, Site, SiteNameError, VirtualPath, VirtualPathError,
    VirtualPathMap,
};

/// Validation result with detailed error information
pub type ValidationResult = Result<(), ValidationError>;

/// Validation error with context
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Site name validation failed
    #[error("Invalid site name: {0}")]
    InvalidSiteName(#[from] SiteNameError),

    /// Binding field validation failed
    #[error("Invalid binding: {0}")]
    InvalidBinding(#[from] BindingError),

    /// Virtual path validation failed
    #[error("Invalid virtual path: {0}")]
    InvalidVirtualPath(#[from] VirtualPathError),

    /// Binding already present on the site
    #[error("Duplicate binding: {0}")]
    DuplicateBinding(BindingKey),

    /// Virtual path already mapped on the site
    #[error("Duplicate virtual path: {0}")]
    DuplicateVirtualPath(String),

    /// Business rule violation
    #[error("Business rule violated: {0}")]
    BusinessRule(String),
}

/// Validate binding fields
///
/// # Rules
/// - SNI requires the https scheme
/// - SNI requires a non-empty host
///
/// The [`Binding`] constructor enforces all of these (deserialization routes
/// through it too); this recheck keeps mutation validation total over any
/// `Binding` value.
pub fn validate_binding(binding: &Binding) -> ValidationResult {
    if binding.sni() {
        if binding.scheme() != Scheme::Https {
            return Err(BindingError::SniRequiresHttps.into());
        }
        if binding.host().is_empty() {
            return Err(BindingError::SniRequiresHost.into());
        }
    }
    Ok(())
}

/// Validate that a binding can be added to a site
///
/// # Rules
/// - Binding fields must be valid
/// - No binding with the same `(key, site type)` may already exist
pub fn validate_binding_addition(site: &Site, binding: &Binding) -> ValidationResult {
    validate_binding(binding)?;
    if site.has_binding(&binding.key(), binding.site_type()) {
        return Err(ValidationError::DuplicateBinding(binding.key()));
    }
    Ok(())
}

/// Validate that a virtual path can be added to a site
///
/// # Rules
/// - The path must not already be mapped (full replacement goes through
///   `set_virtual_application` instead)
pub fn validate_virtual_path_addition(site: &Site, path: &VirtualPath) -> ValidationResult {
    if site.has_virtual_path(path) {
        return Err(ValidationError::DuplicateVirtualPath(
            path.as_str().to_string(),
        ));
    }
    Ok(())
}

/// Validate a full virtual path replacement
///
/// Path and physical path values are validated at construction and map keys
/// are unique by construction, so the full replacement is always structurally
/// valid - including the empty map, which clears all mappings.
pub fn validate_virtual_path_replacement(_mapping: &VirtualPathMap) -> ValidationResult {
    Ok(())
}
