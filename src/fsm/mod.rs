//! State machine runtime.
//!
//! This module owns the stateful half of the library:
//! - `State`: ordered actions plus named transitions
//! - `Fsm`: current/default state tracking, tick/reset/exit
//! - `ExitEvent`: the exit-notification channel
//!
//! Everything here is single-threaded and synchronous. Every lifecycle
//! hook has finished by the time the call that triggered it returns.

mod error;
mod event;
mod machine;
mod state;

pub use error::FsmError;
pub use event::{ExitEvent, ExitReport, ListenerError, ListenerId};
pub use machine::{Fsm, FsmStatus};
pub use state::State;
