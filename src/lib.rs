//! Statecraft: tick-driven finite state machines for runtime entities
//!
//! An entity (the *owner*) holds one [`Fsm`]. The machine is made of named
//! states; each state runs an ordered list of actions and declares named
//! transitions to other states. The host drives the machine by calling
//! [`Fsm::tick`] once per frame.
//!
//! # Core Concepts
//!
//! - **Action**: four-phase behavior unit (init once, enter, update, exit)
//! - **State**: ordered actions plus a name-to-target transition table
//! - **Fsm**: current/default state tracking, tick, reset and exit
//! - **FsmBuilder**: declarative two-phase assembly of a whole machine
//!
//! Everything is synchronous and single-threaded: every hook has run by
//! the time the call that triggered it returns.
//!
//! # Example
//!
//! ```rust
//! use statecraft::{state_id, FsmBuilder};
//! use std::cell::Cell;
//!
//! state_id! {
//!     enum Guard {
//!         Idle,
//!         Moving,
//!     }
//! }
//!
//! let mut fsm = FsmBuilder::new()
//!     .owner(Cell::new(0_u32))
//!     .default_state(Guard::Idle)
//!     .state(Guard::Idle, |s| {
//!         s.update(|ctx| {
//!             ctx.transition("start");
//!         })
//!         .transition("start", Guard::Moving)
//!     })
//!     .state(Guard::Moving, |s| {
//!         s.update(|ctx| ctx.owner().set(ctx.owner().get() + 1))
//!             .transition("stop", Guard::Idle)
//!     })
//!     .build()
//!     .unwrap();
//!
//! fsm.tick().unwrap(); // enters Idle, whose update requests "start"
//! assert_eq!(fsm.current_id(), Some(&Guard::Moving));
//!
//! fsm.tick().unwrap();
//! assert_eq!(fsm.owner().get(), 1);
//!
//! fsm.exit();
//! assert!(fsm.current_id().is_none());
//! ```

pub mod action;
pub mod builder;
pub mod checkpoint;
pub mod config;
pub mod core;
pub mod fsm;

// Re-export commonly used types
pub use action::{Action, ActionContext, ActionError, FnAction};
pub use builder::{BuildError, FsmBuilder, StateBuilder};
pub use checkpoint::{CheckpointError, FsmSnapshot};
pub use config::{ConfigError, FsmConfig};
pub use self::core::{StateId, Transition};
pub use fsm::{ExitReport, Fsm, FsmError, FsmStatus, State};
