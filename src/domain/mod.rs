// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Management Domain Models
//!
//! Core domain concepts for site lifecycle and binding management: value
//! objects with validation invariants, the mutable [`Site`] entity, and the
//! read-only [`Application`] projection handed to the control layer.
//!
//! # Value Objects with Invariants
//!
//! - [`SiteName`] - case-insensitive site identity (DNS label rules)
//! - [`Binding`] / [`BindingKey`] - network endpoints (scheme/ip/port/host/SNI)
//! - [`Port`] - TCP port (1-65535)
//! - [`VirtualPath`] / [`PhysicalPath`] - virtual application mappings
//!
//! # Entities and Projections
//!
//! - [`Site`] - mutable entity owned by the site store
//! - [`Application`] - immutable snapshot copied out at read time

pub mod binding;
pub mod invariants;
pub mod site;
pub mod site_name;
pub mod virtual_path;

// Re-export value objects
pub use binding::{Binding, BindingError, BindingKey, Port, Scheme, SiteType};
pub use invariants::{ValidationError, ValidationResult};
pub use site::{Application, Site};
pub use site_name::{SiteName, SiteNameError};
pub use virtual_path::{PhysicalPath, VirtualPath, VirtualPathError, VirtualPathMap};
