//! Builder for constructing whole state machines.

use crate::builder::error::BuildError;
use crate::builder::state::StateBuilder;
use crate::config::FsmConfig;
use crate::core::StateId;
use crate::fsm::{Fsm, State};
use std::collections::HashSet;

type StateCallback<Id, O> = Box<dyn FnOnce(StateBuilder<Id, O>) -> StateBuilder<Id, O>>;

/// Declarative, two-phase machine assembly.
///
/// `state` only records the identifier and its configuration callback;
/// nothing is constructed until `build`, which runs every callback once,
/// in declaration order, and validates the resulting graph.
///
/// # Example
///
/// ```rust
/// use statecraft::builder::FsmBuilder;
/// use statecraft::state_id;
///
/// state_id! {
///     pub enum Door {
///         Open,
///         Closed,
///     }
/// }
///
/// let mut fsm = FsmBuilder::new()
///     .owner(())
///     .default_state(Door::Closed)
///     .state(Door::Closed, |s| s.transition("push", Door::Open))
///     .state(Door::Open, |s| s.transition("pull", Door::Closed))
///     .build()
///     .unwrap();
///
/// fsm.tick().unwrap();
/// assert!(fsm.transition("push").unwrap());
/// assert_eq!(fsm.current_id(), Some(&Door::Open));
/// ```
pub struct FsmBuilder<Id: StateId, O> {
    owner: Option<O>,
    default: Option<Id>,
    config: FsmConfig,
    states: Vec<(Id, StateCallback<Id, O>)>,
}

impl<Id: StateId + 'static, O: 'static> FsmBuilder<Id, O> {
    pub fn new() -> Self {
        Self {
            owner: None,
            default: None,
            config: FsmConfig::default(),
            states: Vec::new(),
        }
    }

    /// Set the entity the machine is attached to (required).
    pub fn owner(mut self, owner: O) -> Self {
        self.owner = Some(owner);
        self
    }

    /// Set the state entered by the first tick and by `reset`.
    pub fn default_state(mut self, id: Id) -> Self {
        self.default = Some(id);
        self
    }

    pub fn config(mut self, config: FsmConfig) -> Self {
        self.config = config;
        self
    }

    /// Declare a state and the callback that configures it.
    pub fn state<F>(mut self, id: Id, configure: F) -> Self
    where
        F: FnOnce(StateBuilder<Id, O>) -> StateBuilder<Id, O> + 'static,
    {
        self.states.push((id, Box::new(configure)));
        self
    }

    /// Build the machine.
    ///
    /// Fails on a missing owner, an invalid configuration, a state
    /// declared twice, a transition to an undeclared state, or an
    /// undeclared default state.
    pub fn build(self) -> Result<Fsm<Id, O>, BuildError> {
        let owner = self.owner.ok_or(BuildError::MissingOwner)?;
        self.config.validate()?;

        let mut declared = HashSet::new();
        let mut states: Vec<State<Id, O>> = Vec::with_capacity(self.states.len());
        for (id, configure) in self.states {
            if !declared.insert(id.clone()) {
                return Err(BuildError::DuplicateState {
                    id: id.name().to_string(),
                });
            }
            states.push(configure(StateBuilder::new(id)).build());
        }

        for state in &states {
            for transition in state.transitions() {
                if !declared.contains(transition.target()) {
                    return Err(BuildError::UnknownTransitionTarget {
                        state: state.name().to_string(),
                        transition: transition.name().to_string(),
                        target: transition.target().name().to_string(),
                    });
                }
            }
        }

        let mut fsm = Fsm::with_config(owner, self.config);
        for state in states {
            fsm.add_state(state)?;
        }

        if let Some(default) = self.default {
            if !declared.contains(&default) {
                return Err(BuildError::UnknownDefaultState {
                    id: default.name().to_string(),
                });
            }
            fsm.set_default_state(default)?;
        }

        tracing::debug!(
            fsm = %fsm.id(),
            states = declared.len(),
            default = ?fsm.default_id().map(|id| id.name()),
            "machine built"
        );
        Ok(fsm)
    }
}

impl<Id: StateId + 'static, O: 'static> Default for FsmBuilder<Id, O> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;
    use crate::state_id;
    use std::cell::RefCell;
    use std::rc::Rc;

    state_id! {
        enum TestId {
            Idle,
            Moving,
            Missing,
        }
    }

    #[test]
    fn builder_validates_owner() {
        let result = FsmBuilder::<TestId, ()>::new()
            .state(TestId::Idle, |s| s)
            .build();

        assert!(matches!(result, Err(BuildError::MissingOwner)));
    }

    #[test]
    fn duplicate_state_fails_build() {
        let result = FsmBuilder::<TestId, ()>::new()
            .owner(())
            .state(TestId::Idle, |s| s)
            .state(TestId::Idle, |s| s)
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::DuplicateState {
                id: "Idle".to_string()
            })
        );
    }

    #[test]
    fn unknown_default_fails_build() {
        let result = FsmBuilder::<TestId, ()>::new()
            .owner(())
            .default_state(TestId::Missing)
            .state(TestId::Idle, |s| s)
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::UnknownDefaultState {
                id: "Missing".to_string()
            })
        );
    }

    #[test]
    fn unknown_transition_target_fails_build() {
        let result = FsmBuilder::<TestId, ()>::new()
            .owner(())
            .state(TestId::Idle, |s| s.transition("vanish", TestId::Missing))
            .build();

        assert_eq!(
            result.err(),
            Some(BuildError::UnknownTransitionTarget {
                state: "Idle".to_string(),
                transition: "vanish".to_string(),
                target: "Missing".to_string(),
            })
        );
    }

    #[test]
    fn invalid_config_fails_build() {
        let result = FsmBuilder::<TestId, ()>::new()
            .owner(())
            .config(FsmConfig::default().with_max_chained_transitions(0))
            .build();

        assert!(matches!(
            result,
            Err(BuildError::InvalidConfig(ConfigError::Invalid(_)))
        ));
    }

    #[test]
    fn callbacks_run_once_at_build_in_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let (first, second) = (Rc::clone(&order), Rc::clone(&order));

        let builder = FsmBuilder::<TestId, ()>::new()
            .owner(())
            .state(TestId::Idle, move |s| {
                first.borrow_mut().push("Idle");
                s
            })
            .state(TestId::Moving, move |s| {
                second.borrow_mut().push("Moving");
                s
            });
        assert!(order.borrow().is_empty());

        builder.build().unwrap();
        assert_eq!(*order.borrow(), vec!["Idle", "Moving"]);
    }

    #[test]
    fn fluent_api_builds_machine() {
        let fsm = FsmBuilder::new()
            .owner(7_u32)
            .default_state(TestId::Idle)
            .state(TestId::Idle, |s| {
                s.enter(|_| {}).transition("start", TestId::Moving)
            })
            .state(TestId::Moving, |s| s.transition("stop", TestId::Idle))
            .build()
            .unwrap();

        assert_eq!(*fsm.owner(), 7);
        assert_eq!(fsm.default_id(), Some(&TestId::Idle));
        assert!(fsm.current_id().is_none());
        assert_eq!(
            fsm.get_state(&TestId::Idle)
                .unwrap()
                .transition_target("start"),
            Some(&TestId::Moving)
        );
    }
}
