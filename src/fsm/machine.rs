//! The state machine proper.

use crate::checkpoint::{CheckpointError, FsmSnapshot, CHECKPOINT_VERSION};
use crate::config::FsmConfig;
use crate::core::{ChangeCause, StateChange, StateHistory, StateId};
use crate::fsm::error::FsmError;
use crate::fsm::event::{ExitEvent, ExitReport, ListenerError, ListenerId};
use crate::fsm::state::State;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

/// Lifecycle of the machine itself.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FsmStatus {
    /// No state has been entered yet
    Uninitialized,
    /// A state is current
    Active,
    /// `exit` was called; ticks are ignored until `reset` or `set_state`
    Exited,
}

/// A finite state machine attached to an owner.
///
/// The machine owns its states, tracks the current and default state, and
/// drives the action lifecycle:
///
/// - `set_state` exits the current state (if any) and enters the target,
///   even when the target is already current
/// - `tick` enters the default state if nothing is current, then updates
///   the current state
/// - `reset` re-enters the default state
/// - `exit` leaves the current state and notifies exit listeners
///
/// Transitions requested by actions are applied after the pass that
/// requested them finishes, and are resolved against the state that ran
/// the pass.
///
/// # Example
///
/// ```rust
/// use statecraft::action::FnAction;
/// use statecraft::core::Transition;
/// use statecraft::fsm::{Fsm, State};
///
/// let mut idle = State::new("Idle");
/// idle.add_action(FnAction::update(|ctx| {
///     ctx.transition("start");
/// }));
/// idle.add_transition(Transition::new("start", "Moving"));
///
/// let mut fsm = Fsm::new(());
/// fsm.add_state(idle).unwrap();
/// fsm.add_state(State::new("Moving")).unwrap();
/// fsm.set_default_state("Idle").unwrap();
///
/// fsm.tick().unwrap();
/// assert_eq!(fsm.current_id(), Some(&"Moving"));
/// ```
pub struct Fsm<Id: StateId, O = ()> {
    id: Uuid,
    owner: O,
    states: HashMap<Id, State<Id, O>>,
    current: Option<Id>,
    default: Option<Id>,
    status: FsmStatus,
    exit_event: ExitEvent,
    history: StateHistory<Id>,
    ticks: u64,
    config: FsmConfig,
}

impl<Id: StateId, O> Fsm<Id, O> {
    /// Create an empty machine with the default configuration.
    pub fn new(owner: O) -> Self {
        Self::with_config(owner, FsmConfig::default())
    }

    pub fn with_config(owner: O, config: FsmConfig) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            states: HashMap::new(),
            current: None,
            default: None,
            status: FsmStatus::Uninitialized,
            exit_event: ExitEvent::new(),
            history: StateHistory::with_limit(config.history_limit),
            ticks: 0,
            config,
        }
    }

    /// Unique id of this machine instance, used in logs and snapshots.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn owner(&self) -> &O {
        &self.owner
    }

    pub fn owner_mut(&mut self) -> &mut O {
        &mut self.owner
    }

    pub fn config(&self) -> &FsmConfig {
        &self.config
    }

    pub fn status(&self) -> FsmStatus {
        self.status
    }

    /// Number of ticks that updated a state.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn history(&self) -> &StateHistory<Id> {
        &self.history
    }

    /// Register a state. Identifiers must be unique.
    pub fn add_state(&mut self, state: State<Id, O>) -> Result<(), FsmError> {
        if self.states.contains_key(state.id()) {
            return Err(FsmError::DuplicateState {
                id: state.name().to_string(),
            });
        }
        self.states.insert(state.id().clone(), state);
        Ok(())
    }

    pub fn get_state(&self, id: &Id) -> Option<&State<Id, O>> {
        self.states.get(id)
    }

    pub fn get_state_mut(&mut self, id: &Id) -> Option<&mut State<Id, O>> {
        self.states.get_mut(id)
    }

    pub fn contains_state(&self, id: &Id) -> bool {
        self.states.contains_key(id)
    }

    pub fn state_ids(&self) -> impl Iterator<Item = &Id> {
        self.states.keys()
    }

    pub fn current_id(&self) -> Option<&Id> {
        self.current.as_ref()
    }

    pub fn current_state(&self) -> Option<&State<Id, O>> {
        self.current.as_ref().and_then(|id| self.states.get(id))
    }

    pub fn default_id(&self) -> Option<&Id> {
        self.default.as_ref()
    }

    pub fn default_state(&self) -> Option<&State<Id, O>> {
        self.default.as_ref().and_then(|id| self.states.get(id))
    }

    /// Designate the state entered by the first tick and by `reset`.
    pub fn set_default_state(&mut self, id: Id) -> Result<(), FsmError> {
        self.require_registered(&id)?;
        self.default = Some(id);
        Ok(())
    }

    pub fn clear_default_state(&mut self) {
        self.default = None;
    }

    /// Make `id` the current state.
    ///
    /// The current state (if any) is exited first. Setting the state that
    /// is already current still runs a full exit/enter cycle. An unknown
    /// id fails without touching the current state.
    pub fn set_state(&mut self, id: Id) -> Result<(), FsmError> {
        self.change_state(id, ChangeCause::SetState)
    }

    /// Follow the transition named `name` on the current state.
    ///
    /// Returns `Ok(false)` without side effects when nothing is current or
    /// the current state has no transition with that name.
    pub fn transition(&mut self, name: &str) -> Result<bool, FsmError> {
        let Some(current) = self.current.clone() else {
            tracing::trace!(fsm = %self.id, transition = name, "no current state, transition ignored");
            return Ok(false);
        };
        let Some(target) = self.resolve(&current, name) else {
            return Ok(false);
        };
        self.change_state(target, ChangeCause::Transition(name.to_string()))?;
        Ok(true)
    }

    /// Advance the machine by one step.
    ///
    /// Enters the default state first when nothing is current. Does
    /// nothing when there is neither a current nor a default state, or
    /// after `exit`.
    pub fn tick(&mut self) -> Result<(), FsmError> {
        if self.status == FsmStatus::Exited {
            tracing::trace!(fsm = %self.id, "machine exited, tick ignored");
            return Ok(());
        }
        if self.current.is_none() {
            let Some(default) = self.default.clone() else {
                return Ok(());
            };
            self.change_state(default, ChangeCause::Default)?;
        }
        let Some(current) = self.current.clone() else {
            return Ok(());
        };

        self.ticks += 1;
        tracing::trace!(fsm = %self.id, state = current.name(), tick = self.ticks, "tick");

        let request = match self.states.get_mut(&current) {
            Some(state) => state.update(&self.owner),
            None => None,
        };
        if let Some(name) = request {
            if let Some(target) = self.resolve(&current, &name) {
                self.change_state(target, ChangeCause::Transition(name))?;
            }
        }
        Ok(())
    }

    /// Re-enter the default state, running a full exit/enter cycle even if
    /// it is already current. Does nothing without a default state.
    pub fn reset(&mut self) -> Result<(), FsmError> {
        let Some(default) = self.default.clone() else {
            tracing::debug!(fsm = %self.id, "reset without default state");
            return Ok(());
        };
        self.change_state(default, ChangeCause::Reset)
    }

    /// Leave the current state and notify exit listeners.
    ///
    /// Listeners fire on every call, whether or not a state was current.
    pub fn exit(&mut self) -> ExitReport {
        if let Some(current) = self.current.take() {
            if let Some(state) = self.states.get_mut(&current) {
                state.exit(&self.owner);
            }
            tracing::debug!(fsm = %self.id, from = current.name(), "machine exited");
            self.history.record(StateChange {
                from: Some(current),
                to: None,
                cause: ChangeCause::Exit,
                timestamp: Utc::now(),
            });
        }
        self.status = FsmStatus::Exited;
        self.exit_event.emit()
    }

    /// Subscribe to exit notifications.
    pub fn on_exit<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        self.exit_event.subscribe(listener)
    }

    pub fn on_exit_fallible<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() -> Result<(), ListenerError> + 'static,
    {
        self.exit_event.subscribe_fallible(listener)
    }

    pub fn exit_event(&mut self) -> &mut ExitEvent {
        &mut self.exit_event
    }

    /// Capture the machine's position for later [`restore`](Self::restore).
    pub fn snapshot(&self) -> FsmSnapshot<Id> {
        FsmSnapshot {
            version: CHECKPOINT_VERSION,
            fsm_id: self.id,
            timestamp: Utc::now(),
            status: self.status,
            current: self.current.clone(),
            default: self.default.clone(),
            ticks: self.ticks,
            history: self.history.clone(),
        }
    }

    /// Move the machine to the position recorded in `snapshot`.
    ///
    /// The current state is exited (without notifying exit listeners) and
    /// the snapshot's current state, if any, is entered. Data held inside
    /// actions is not part of a snapshot.
    pub fn restore(&mut self, snapshot: FsmSnapshot<Id>) -> Result<(), CheckpointError> {
        snapshot.validate()?;
        for id in snapshot.current.iter().chain(snapshot.default.iter()) {
            if !self.states.contains_key(id) {
                return Err(CheckpointError::ValidationFailed(format!(
                    "state '{}' is not registered on this machine",
                    id.name()
                )));
            }
        }

        if let Some(current) = self.current.take() {
            if let Some(state) = self.states.get_mut(&current) {
                state.exit(&self.owner);
            }
        }
        self.default = snapshot.default;
        self.ticks = snapshot.ticks;
        self.history.adopt(snapshot.history);
        self.status = snapshot.status;

        if let Some(current) = snapshot.current {
            self.change_state(current, ChangeCause::Restore)?;
        }
        tracing::debug!(fsm = %self.id, source = %snapshot.fsm_id, "snapshot restored");
        Ok(())
    }

    fn require_registered(&self, id: &Id) -> Result<(), FsmError> {
        if self.states.contains_key(id) {
            Ok(())
        } else {
            Err(FsmError::UnknownState {
                id: id.name().to_string(),
            })
        }
    }

    /// Look up `name` in the transitions of state `from` only.
    fn resolve(&self, from: &Id, name: &str) -> Option<Id> {
        let target = self
            .states
            .get(from)
            .and_then(|state| state.transition_target(name))
            .cloned();
        if target.is_none() {
            tracing::debug!(
                fsm = %self.id,
                state = from.name(),
                transition = name,
                "no such transition, ignoring"
            );
        }
        target
    }

    /// Switch to `target`, then follow transitions requested while
    /// entering, up to the configured chain limit.
    fn change_state(&mut self, target: Id, cause: ChangeCause) -> Result<(), FsmError> {
        self.require_registered(&target)?;

        let mut next = target;
        let mut cause = cause;
        let mut hops = 0;
        loop {
            let Some(name) = self.swap_to(next.clone(), cause) else {
                return Ok(());
            };
            let Some(target) = self.resolve(&next, &name) else {
                return Ok(());
            };
            hops += 1;
            if hops > self.config.max_chained_transitions {
                return Err(FsmError::TransitionLoop {
                    from: next.name().to_string(),
                    limit: self.config.max_chained_transitions,
                });
            }
            self.require_registered(&target)?;
            next = target;
            cause = ChangeCause::Transition(name);
        }
    }

    /// Exit the current state, enter `next`, and return the first
    /// transition requested while entering.
    fn swap_to(&mut self, next: Id, cause: ChangeCause) -> Option<String> {
        let previous = self.current.take();
        if let Some(prev) = &previous {
            if let Some(state) = self.states.get_mut(prev) {
                state.exit(&self.owner);
            }
        }

        tracing::debug!(
            fsm = %self.id,
            from = ?previous.as_ref().map(|id| id.name()),
            to = next.name(),
            cause = %cause,
            "state change"
        );
        self.history.record(StateChange {
            from: previous,
            to: Some(next.clone()),
            cause,
            timestamp: Utc::now(),
        });

        self.current = Some(next.clone());
        self.status = FsmStatus::Active;
        match self.states.get_mut(&next) {
            Some(state) => state.enter(&self.owner),
            None => None,
        }
    }
}

impl<Id: StateId, O> fmt::Debug for Fsm<Id, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Fsm")
            .field("id", &self.id)
            .field("states", &self.states.len())
            .field("current", &self.current)
            .field("default", &self.default)
            .field("status", &self.status)
            .field("ticks", &self.ticks)
            .finish()
    }
}
