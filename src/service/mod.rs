// Copyright (c) 2025 - Cowboy AI, Inc.
//! Service Layer for Site Management
//!
//! The application service layer exposed to the control surface. It is a
//! name-uniqueness and existence-checking façade over the site manager.
//!
//! # Architecture
//!
//! ```text
//! Control layer (routing, views, JSON - out of scope)
//!     ↓
//! Application Service (this module)
//!     ↓
//! Site Manager → Site Store
//!     ↓
//! Host mechanism (external)
//! ```
//!
//! # Failure Channels
//!
//! The façade keeps the two channels distinct on purpose:
//! - **Identity lookups** (`get_application`) fail hard with
//!   [`crate::SiteError::NotFound`] - "lookup for display" callers expect
//!   the site to exist.
//! - **Mutations on an absent site** are a boolean no-op (`Ok(false)`) -
//!   "mutation had no effect" is informational, not exceptional.

pub mod application;

pub use application::{ApplicationService, SiteApplicationService};
