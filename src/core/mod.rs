//! Core value types shared by the state machine runtime.
//!
//! This module contains the plain data the runtime is built from:
//! - State identifiers via the `StateId` trait
//! - Named transition edges
//! - Bounded history of state changes
//!
//! Nothing in this module runs actions or owns states.

mod history;
mod id;
mod transition;

pub use history::{ChangeCause, StateChange, StateHistory, DEFAULT_HISTORY_LIMIT};
pub use id::StateId;
pub use transition::Transition;
