//! Site lifecycle and binding management for hosted web applications
//!
//! This crate provides the core abstraction between a web-facing control
//! surface and the underlying host's site-hosting mechanism: site creation,
//! deletion, content reset, and configuration of network bindings and
//! virtual path mappings.
//!
//! # Layers
//!
//! - [`domain`] - validated value objects, the [`domain::Site`] entity, and
//!   the [`domain::Application`] snapshot projection
//! - [`store`] - site identity resolution and persistence behind
//!   [`store::SiteStore`]
//! - [`manager`] - lifecycle and mutation operations with per-name
//!   serialization and provisioning rollback
//! - [`service`] - the [`service::ApplicationService`] façade exposed to the
//!   control layer
//! - [`host`] - the [`host::HostBackend`] contract for the external host
//!   mechanism
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use site_management::domain::SiteName;
//! use site_management::host::MemoryHostBackend;
//! use site_management::manager::DefaultSiteManager;
//! use site_management::service::{ApplicationService, SiteApplicationService};
//! use site_management::store::MemorySiteStore;
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() -> site_management::SiteResult<()> {
//! let store = Arc::new(MemorySiteStore::new());
//! let manager = Arc::new(DefaultSiteManager::new(
//!     store.clone(),
//!     Arc::new(MemoryHostBackend::new()),
//! ));
//! let service = SiteApplicationService::new(store, manager);
//!
//! service.add_application(&SiteName::new("demo")?).await?;
//! let app = service.get_application(&SiteName::new("demo")?).await?;
//! assert_eq!(app.name, "demo");
//! # Ok(())
//! # }
//! ```

pub mod collaborators;
pub mod domain;
pub mod errors;
pub mod host;
pub mod manager;
pub mod service;
pub mod state_machine;
pub mod store;

// Re-export commonly used types
pub use domain::{Application, Binding, BindingKey, Site, SiteName, SiteType};
pub use errors::{SiteError, SiteResult};
pub use host::{HostBackend, MemoryHostBackend};
pub use manager::{DefaultSiteManager, SiteManager};
pub use service::{ApplicationService, SiteApplicationService};
pub use store::{MemorySiteStore, SiteStore};
