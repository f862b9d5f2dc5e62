//! Builder for a single state.

use crate::action::{Action, ActionContext, FnAction};
use crate::core::{StateId, Transition};
use crate::fsm::State;

/// Fluent description of one state's actions and transitions.
///
/// Handed to the callback passed to
/// [`FsmBuilder::state`](crate::builder::FsmBuilder::state); the callback
/// returns it once configured. It cannot be constructed on its own:
///
/// ```compile_fail
/// use statecraft::builder::StateBuilder;
///
/// let _ = StateBuilder::<&str, ()>::new("Idle");
/// ```
pub struct StateBuilder<Id, O> {
    id: Id,
    actions: Vec<Box<dyn Action<O>>>,
    transitions: Vec<Transition<Id>>,
}

impl<Id: StateId, O: 'static> StateBuilder<Id, O> {
    pub(crate) fn new(id: Id) -> Self {
        Self {
            id,
            actions: Vec::new(),
            transitions: Vec::new(),
        }
    }

    /// Identifier of the state being described.
    pub fn id(&self) -> &Id {
        &self.id
    }

    /// Append an action.
    pub fn action(mut self, action: impl Action<O> + 'static) -> Self {
        self.actions.push(Box::new(action));
        self
    }

    /// Append an action that only runs `f` on enter.
    pub fn enter<F>(self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        self.action(FnAction::enter(f))
    }

    /// Append an action that only runs `f` on update.
    pub fn update<F>(self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        self.action(FnAction::update(f))
    }

    /// Append an action that only runs `f` on exit.
    pub fn exit<F>(self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        self.action(FnAction::exit(f))
    }

    /// Add a transition named `name` leading to `target`.
    pub fn transition(mut self, name: impl Into<String>, target: Id) -> Self {
        self.transitions.push(Transition::new(name, target));
        self
    }

    /// Add a transition named after its target.
    pub fn transition_to(mut self, target: Id) -> Self {
        self.transitions.push(Transition::to(target));
        self
    }

    pub(crate) fn build(self) -> State<Id, O> {
        let mut state = State::new(self.id);
        for action in self.actions {
            state.add_boxed_action(action);
        }
        for transition in self.transitions {
            state.add_transition(transition);
        }
        state
    }
}
