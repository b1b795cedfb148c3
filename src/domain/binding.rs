// Copyright (c) 2025 - Cowboy AI, Inc.
//! Binding Value Objects with Validation Invariants

use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;
use thiserror::Error;

/// Binding validation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BindingError {
    #[error("Invalid port: {0} (must be 1-65535)")]
    InvalidPort(u16),

    #[error("Invalid host name: {0}")]
    InvalidHost(String),

    #[error("SNI binding requires a non-empty host name")]
    SniRequiresHost,

    #[error("SNI binding requires the https scheme")]
    SniRequiresHttps,
}

/// URL scheme of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    /// Scheme as it appears in URLs
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }

    /// Conventional default port for the scheme
    pub fn default_port(&self) -> u16 {
        match self {
            Scheme::Http => 80,
            Scheme::Https => 443,
        }
    }
}

impl fmt::Display for Scheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classification of a binding within a site
///
/// - `Live`: the public surface of the site
/// - `Service`: the management/deployment surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SiteType {
    Live,
    Service,
}

impl fmt::Display for SiteType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteType::Live => write!(f, "live"),
            SiteType::Service => write!(f, "service"),
        }
    }
}

/// TCP port value object (1-65535)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct Port(u16);

impl Port {
    /// Create a new port with validation
    ///
    /// # Invariants
    /// - Must be in range 1-65535 (port 0 is not bindable)
    pub fn new(port: u16) -> Result<Self, BindingError> {
        if port == 0 {
            return Err(BindingError::InvalidPort(port));
        }
        Ok(Self(port))
    }

    /// Get the numeric port value
    pub fn get(&self) -> u16 {
        self.0
    }
}

impl fmt::Display for Port {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<u16> for Port {
    type Error = BindingError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Port> for u16 {
    fn from(port: Port) -> u16 {
        port.0
    }
}

/// Key identifying a binding within a site
///
/// Bindings are uniquely identified by `(scheme, ip, port, host)` for removal
/// purposes. The host component is kept in lowercase canonical form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BindingKey {
    pub scheme: Scheme,
    pub ip: IpAddr,
    pub port: Port,
    pub host: String,
}

impl fmt::Display for BindingKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}://{}:{}:{}", self.scheme, self.ip, self.port, self.host)
    }
}

/// Network binding value object
///
/// A binding describes one network endpoint through which a site is reachable.
/// Invariants enforced at construction, and deserialization routes through
/// the same validation, so every `Binding` value upholds them:
/// - Port in range 1-65535
/// - Host, when present, is a valid hostname (lowercased canonical form)
/// - SNI requires https and a non-empty host
///
/// Certificate references are passed through unvalidated; resolving them is
/// the concern of an external certificate store.
///
/// # Examples
///
/// ```rust
/// use site_management::domain::{Binding, Scheme, SiteType};
///
/// let binding = Binding::new(
///     Scheme::Http,
///     "0.0.0.0".parse().unwrap(),
///     80,
///     "demo.local",
///     SiteType::Live,
/// )
/// .unwrap();
///
/// assert_eq!(binding.url(), "http://demo.local:80/");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBinding")]
pub struct Binding {
    scheme: Scheme,
    ip: IpAddr,
    port: Port,
    /// Host header to match; empty matches any host
    host: String,
    /// Whether the binding uses Server Name Indication
    sni: bool,
    /// Opaque reference into an external certificate store
    #[serde(skip_serializing_if = "Option::is_none", default)]
    certificate: Option<String>,
    site_type: SiteType,
}

impl Binding {
    /// Create a new binding with validation
    pub fn new(
        scheme: Scheme,
        ip: IpAddr,
        port: u16,
        host: impl Into<String>,
        site_type: SiteType,
    ) -> Result<Self, BindingError> {
        let host = Self::canonical_host(host.into())?;

        Ok(Self {
            scheme,
            ip,
            port: Port::new(port)?,
            host,
            sni: false,
            certificate: None,
            site_type,
        })
    }

    /// Enable or disable SNI, revalidating the cross-field invariants
    pub fn with_sni(mut self, sni: bool) -> Result<Self, BindingError> {
        if sni {
            if self.host.is_empty() {
                return Err(BindingError::SniRequiresHost);
            }
            if self.scheme != Scheme::Https {
                return Err(BindingError::SniRequiresHttps);
            }
        }
        self.sni = sni;
        Ok(self)
    }

    /// Attach a certificate reference
    pub fn with_certificate(mut self, certificate: impl Into<String>) -> Self {
        self.certificate = Some(certificate.into());
        self
    }

    /// Validate and lowercase a host name
    fn canonical_host(host: String) -> Result<String, BindingError> {
        if host.is_empty() {
            return Ok(host);
        }

        for label in host.split('.') {
            let valid = !label.is_empty()
                && label.len() <= 63
                && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
                && !label.starts_with('-')
                && !label.ends_with('-');
            if !valid {
                return Err(BindingError::InvalidHost(host));
            }
        }

        Ok(host.to_ascii_lowercase())
    }

    pub fn scheme(&self) -> Scheme {
        self.scheme
    }

    pub fn ip(&self) -> IpAddr {
        self.ip
    }

    pub fn port(&self) -> Port {
        self.port
    }

    /// Host header, empty if the binding matches any host
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn sni(&self) -> bool {
        self.sni
    }

    pub fn certificate(&self) -> Option<&str> {
        self.certificate.as_deref()
    }

    pub fn site_type(&self) -> SiteType {
        self.site_type
    }

    /// Key identifying this binding within a site
    pub fn key(&self) -> BindingKey {
        BindingKey {
            scheme: self.scheme,
            ip: self.ip,
            port: self.port,
            host: self.host.clone(),
        }
    }

    /// URL through which this binding is reachable
    ///
    /// Prefers the host header over the listen address when present.
    pub fn url(&self) -> String {
        let authority = if self.host.is_empty() {
            self.ip.to_string()
        } else {
            self.host.clone()
        };
        format!("{}://{}:{}/", self.scheme, authority, self.port)
    }
}

impl fmt::Display for Binding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} [{}]", self.key(), self.site_type)
    }
}

/// Wire form of [`Binding`]
///
/// Deserialization builds the binding through [`Binding::new`] and
/// [`Binding::with_sni`], so values coming off the wire are held to the same
/// invariants as constructed ones.
#[derive(Deserialize)]
struct RawBinding {
    scheme: Scheme,
    ip: IpAddr,
    port: u16,
    host: String,
    sni: bool,
    #[serde(default)]
    certificate: Option<String>,
    site_type: SiteType,
}

impl TryFrom<RawBinding> for Binding {
    type Error = BindingError;

    fn try_from(raw: RawBinding) -> Result<Self, Self::Error> {
        let binding = Binding::new(raw.scheme, raw.ip, raw.port, raw.host, raw.site_type)?
            .with_sni(raw.sni)?;
        Ok(match raw.certificate {
            Some(certificate) => binding.with_certificate(certificate),
            None => binding,
        })
    }
}
