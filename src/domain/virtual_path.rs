// Copyright (c) 2025 - Cowboy AI, Inc.
//! Virtual Application Path Value Objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use thiserror::Error;

/// Virtual path validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum VirtualPathError {
    #[error("Virtual path is empty")]
    Empty,

    #[error("Virtual path must start with '/': {0}")]
    NotRooted(String),

    #[error("Virtual path contains a parent-directory segment: {0}")]
    Traversal(String),

    #[error("Physical path is empty")]
    EmptyPhysicalPath,
}

/// Virtual path value object
///
/// A virtual path names a sub-path of a site's public surface. Invariants:
/// - Non-empty and rooted (`/` prefix)
/// - No `..` segments
/// - Canonical form: trailing slash stripped except for the root path
///
/// Comparison is byte-wise on the canonical form.
///
/// # Examples
///
/// ```rust
/// use site_management::domain::VirtualPath;
///
/// let path = VirtualPath::new("/api/").unwrap();
/// assert_eq!(path.as_str(), "/api");
///
/// assert!(VirtualPath::new("api").is_err());
/// assert!(VirtualPath::new("/api/../etc").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VirtualPath(String);

impl VirtualPath {
    /// Create a new virtual path with validation and normalization
    pub fn new(path: impl Into<String>) -> Result<Self, VirtualPathError> {
        let path = path.into();

        if path.is_empty() {
            return Err(VirtualPathError::Empty);
        }

        if !path.starts_with('/') {
            return Err(VirtualPathError::NotRooted(path));
        }

        if path.split('/').any(|segment| segment == "..") {
            return Err(VirtualPathError::Traversal(path));
        }

        // Canonical form: no trailing slash except for the root itself
        let canonical = if path.len() > 1 {
            path.trim_end_matches('/').to_string()
        } else {
            path
        };

        Ok(Self(canonical))
    }

    /// Root virtual path (`/`)
    pub fn root() -> Self {
        Self("/".to_string())
    }

    /// Get the canonical path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this is the root path
    pub fn is_root(&self) -> bool {
        self.0 == "/"
    }
}

impl fmt::Display for VirtualPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<VirtualPath> for String {
    fn from(path: VirtualPath) -> Self {
        path.0
    }
}

impl TryFrom<String> for VirtualPath {
    type Error = VirtualPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for VirtualPath {
    type Error = VirtualPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Physical content path value object
///
/// The core only rejects empty paths; resolving the path under the site's
/// content root is a host mechanism responsibility.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PhysicalPath(String);

impl PhysicalPath {
    /// Create a new physical path with validation
    pub fn new(path: impl Into<String>) -> Result<Self, VirtualPathError> {
        let path = path.into();
        if path.is_empty() {
            return Err(VirtualPathError::EmptyPhysicalPath);
        }
        Ok(Self(path))
    }

    /// Get the path as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PhysicalPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<PhysicalPath> for String {
    fn from(path: PhysicalPath) -> Self {
        path.0
    }
}

impl TryFrom<String> for PhysicalPath {
    type Error = VirtualPathError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for PhysicalPath {
    type Error = VirtualPathError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Virtual path mapping for one site
///
/// Keys are unique by construction; iteration order is the path order, which
/// keeps host application deterministic.
pub type VirtualPathMap = BTreeMap<VirtualPath, PhysicalPath>;
