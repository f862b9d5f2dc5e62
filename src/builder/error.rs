//! Build errors for machine and state builders.

use crate::config::ConfigError;
use crate::fsm::FsmError;
use thiserror::Error;

/// Errors that can occur when building a state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Owner not specified. Call .owner(owner) before .build()")]
    MissingOwner,

    #[error("State '{id}' is declared more than once")]
    DuplicateState { id: String },

    #[error("Default state '{id}' is not declared")]
    UnknownDefaultState { id: String },

    #[error("Transition '{transition}' of state '{state}' targets undeclared state '{target}'")]
    UnknownTransitionTarget {
        state: String,
        transition: String,
        target: String,
    },

    #[error(transparent)]
    InvalidConfig(#[from] ConfigError),

    #[error(transparent)]
    Fsm(#[from] FsmError),
}
