//! Runtime errors raised by the state machine.

use thiserror::Error;

/// Errors that can occur while driving a state machine.
///
/// All of these are configuration bugs in the host: they are surfaced
/// to the caller and never retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FsmError {
    #[error("State '{id}' is not registered on this machine")]
    UnknownState { id: String },

    #[error("State '{id}' is already registered on this machine")]
    DuplicateState { id: String },

    #[error("Transitions requested on enter chained past {limit} hops, last from state '{from}'")]
    TransitionLoop { from: String, limit: usize },
}
