// Copyright (c) 2025 - Cowboy AI, Inc.
//! Finite State Machine Abstractions
//!
//! Generic, reusable state machine types for modeling domain lifecycles. All
//! state machines are pure functional - transitions are deterministic
//! functions with no side effects.
//!
//! # Design Principles
//!
//! 1. **Type Safety**: States are strongly typed enums
//! 2. **Pure Functions**: All transitions are pure
//! 3. **Explicit**: All transitions explicitly defined
//!
//! # Example
//!
//! ```rust
//! use site_management::state_machine::{SiteState, LifecycleCommand, StateMachine};
//!
//! let (state, _) = SiteState::NonExistent
//!     .transition(&LifecycleCommand::BeginProvisioning)
//!     .unwrap();
//! assert_eq!(state, SiteState::Provisioning);
//! ```

pub mod site_lifecycle;

pub use site_lifecycle::{LifecycleCommand, SiteState, TransitionOutput};

/// Result of a state transition
pub type TransitionResult<S> = Result<S, TransitionError>;

/// Errors that can occur during state transitions
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// Transition from current state on this input is not allowed
    #[error("Invalid transition from {from} on {input}")]
    InvalidTransition { from: String, input: String },

    /// Precondition not met for transition
    #[error("Precondition failed: {0}")]
    PreconditionFailed(String),
}

/// Trait for finite state machines
///
/// Implement this trait to define a state machine with typed states, inputs,
/// and outputs.
pub trait StateMachine: Sized + Clone {
    /// Input type that triggers transitions
    type Input;

    /// Output type produced by transitions (use () if none)
    type Output;

    /// Attempt to transition to a new state given an input
    ///
    /// # Returns
    /// - `Ok((new_state, output))` if the transition is valid
    /// - `Err(TransitionError)` if the transition is invalid
    fn transition(&self, input: &Self::Input) -> TransitionResult<(Self, Self::Output)>;

    /// Check if a transition is valid without performing it
    fn can_transition(&self, input: &Self::Input) -> bool {
        self.transition(input).is_ok()
    }
}
