//! Builder API for declarative machine construction.
//!
//! This module provides fluent builders and macros for describing a
//! machine's states, actions and transitions up front and assembling the
//! wired [`Fsm`](crate::fsm::Fsm) in a single validated step.

pub mod error;
pub mod machine;
pub mod macros;
pub mod state;

pub use error::BuildError;
pub use machine::FsmBuilder;
pub use state::StateBuilder;
