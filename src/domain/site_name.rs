// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Name Value Object with Case-Insensitive Identity

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Site name validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SiteNameError {
    #[error("Site name is empty")]
    Empty,

    #[error("Site name exceeds maximum length of 63 characters: {0}")]
    TooLong(usize),

    #[error("Invalid character in site name: {0}")]
    InvalidCharacter(char),

    #[error("Site name cannot start or end with hyphen: {0}")]
    InvalidHyphen(String),
}

/// Site name value object
///
/// A site name is the unique identity of a hosted site. It follows DNS label
/// rules (RFC 1123) because host mechanisms commonly derive hostnames and
/// directory names from it:
/// - Non-empty, at most 63 characters
/// - ASCII alphanumeric and hyphens only
/// - Cannot start or end with a hyphen
///
/// # Identity
///
/// Site names compare **case-insensitively**: `"Demo"` and `"demo"` are the
/// same site. The original casing is preserved for display; `canonical()`
/// yields the ASCII-lowercase form. `PartialEq`, `Hash`, and `Ord` all agree
/// on the canonical form.
///
/// # Examples
///
/// ```rust
/// use site_management::domain::SiteName;
///
/// let a = SiteName::new("Demo").unwrap();
/// let b = SiteName::new("demo").unwrap();
/// assert_eq!(a, b);
/// assert_eq!(a.as_str(), "Demo");
/// assert_eq!(a.canonical(), "demo");
///
/// assert!(SiteName::new("").is_err());
/// assert!(SiteName::new("-demo").is_err());
/// assert!(SiteName::new("de mo").is_err());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SiteName(String);

impl SiteName {
    /// Maximum length for a site name (DNS label limit)
    pub const MAX_LENGTH: usize = 63;

    /// Create a new site name with validation
    ///
    /// # Invariants
    /// - Non-empty
    /// - At most 63 characters
    /// - ASCII alphanumeric and hyphens only
    /// - No leading or trailing hyphen
    pub fn new(name: impl Into<String>) -> Result<Self, SiteNameError> {
        let name = name.into();

        if name.is_empty() {
            return Err(SiteNameError::Empty);
        }

        if name.len() > Self::MAX_LENGTH {
            return Err(SiteNameError::TooLong(name.len()));
        }

        for ch in name.chars() {
            if !ch.is_ascii_alphanumeric() && ch != '-' {
                return Err(SiteNameError::InvalidCharacter(ch));
            }
        }

        if name.starts_with('-') || name.ends_with('-') {
            return Err(SiteNameError::InvalidHyphen(name));
        }

        Ok(Self(name))
    }

    /// Get the site name as entered (original casing)
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Get the canonical (ASCII-lowercase) form used for identity
    pub fn canonical(&self) -> String {
        self.0.to_ascii_lowercase()
    }
}

impl PartialEq for SiteName {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq_ignore_ascii_case(&other.0)
    }
}

impl Eq for SiteName {}

impl Hash for SiteName {
    fn hash<H: Hasher>(&self, state: &mut H) {
        for byte in self.0.bytes() {
            state.write_u8(byte.to_ascii_lowercase());
        }
    }
}

impl PartialOrd for SiteName {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for SiteName {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0
            .bytes()
            .map(|b| b.to_ascii_lowercase())
            .cmp(other.0.bytes().map(|b| b.to_ascii_lowercase()))
    }
}

impl fmt::Display for SiteName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for SiteName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<SiteName> for String {
    fn from(name: SiteName) -> Self {
        name.0
    }
}

impl TryFrom<String> for SiteName {
    type Error = SiteNameError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl TryFrom<&str> for SiteName {
    type Error = SiteNameError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
