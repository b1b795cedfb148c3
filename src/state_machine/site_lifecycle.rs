// Copyright (c) 2025 - Cowboy AI, Inc.
//! Site Lifecycle State Machine
//!
//! Formal FSM for the site lifecycle, used by the site manager to gate
//! lifecycle operations while it holds the per-name lock.
//!
//! # States
//!
//! - NonExistent: no site with this name
//! - Provisioning: host resources being created
//! - Active: operational (content reset and binding mutations keep it here)
//! - Deleting: host resources being released
//!
//! # Inputs (Lifecycle Commands)
//!
//! - BeginProvisioning: NonExistent → Provisioning
//! - CompleteProvisioning: Provisioning → Active
//! - FailProvisioning: Provisioning → NonExistent (rollback)
//! - BeginDeleting: Active → Deleting
//! - CompleteDeleting: Deleting → NonExistent
//! - ResetContent, MutateBindings: Active → Active
//!
//! No state permits concurrent provisioning and deleting of the same name;
//! the per-name lock in the manager guarantees only one in-flight command.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{StateMachine, TransitionError, TransitionResult};

/// Lifecycle state of a site name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteState {
    /// No site with this name exists
    NonExistent,

    /// Host resources are being created
    Provisioning,

    /// Site is operational
    Active,

    /// Host resources are being released
    Deleting,
}

impl fmt::Display for SiteState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SiteState::NonExistent => "non-existent",
            SiteState::Provisioning => "provisioning",
            SiteState::Active => "active",
            SiteState::Deleting => "deleting",
        };
        write!(f, "{}", name)
    }
}

/// Lifecycle command (FSM input)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleCommand {
    /// Start provisioning a new site
    BeginProvisioning,

    /// Provisioning finished, site becomes active
    CompleteProvisioning,

    /// Provisioning failed, host resources rolled back
    FailProvisioning,

    /// Start deleting an active site
    BeginDeleting,

    /// Deletion finished, name becomes free
    CompleteDeleting,

    /// Clear deployed content, site stays active
    ResetContent,

    /// Binding or virtual path mutation, site stays active
    MutateBindings,
}

impl fmt::Display for LifecycleCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LifecycleCommand::BeginProvisioning => "begin-provisioning",
            LifecycleCommand::CompleteProvisioning => "complete-provisioning",
            LifecycleCommand::FailProvisioning => "fail-provisioning",
            LifecycleCommand::BeginDeleting => "begin-deleting",
            LifecycleCommand::CompleteDeleting => "complete-deleting",
            LifecycleCommand::ResetContent => "reset-content",
            LifecycleCommand::MutateBindings => "mutate-bindings",
        };
        write!(f, "{}", name)
    }
}

/// Transition output with metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionOutput {
    /// Warnings generated during transition
    pub warnings: Vec<String>,
}

impl TransitionOutput {
    /// Create output with no warnings
    pub fn ok() -> Self {
        Self {
            warnings: Vec::new(),
        }
    }

    /// Create output with warnings
    pub fn with_warnings(warnings: Vec<String>) -> Self {
        Self { warnings }
    }
}

impl StateMachine for SiteState {
    type Input = LifecycleCommand;
    type Output = TransitionOutput;

    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)> {
        use LifecycleCommand::*;
        use SiteState::*;

        match (self, input) {
            (NonExistent, BeginProvisioning) => Ok((Provisioning, TransitionOutput::ok())),

            (Provisioning, CompleteProvisioning) => Ok((Active, TransitionOutput::ok())),
            (Provisioning, FailProvisioning) => Ok((
                NonExistent,
                TransitionOutput::with_warnings(vec![
                    "provisioning failed, host resources rolled back".to_string(),
                ]),
            )),

            (Active, BeginDeleting) => Ok((Deleting, TransitionOutput::ok())),
            (Active, ResetContent) => Ok((Active, TransitionOutput::ok())),
            (Active, MutateBindings) => Ok((Active, TransitionOutput::ok())),

            (Deleting, CompleteDeleting) => Ok((NonExistent, TransitionOutput::ok())),

            (from, input) => Err(TransitionError::InvalidTransition {
                from: from.to_string(),
                input: input.to_string(),
            }),
        }
    }
}
