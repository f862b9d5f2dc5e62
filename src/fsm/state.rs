//! States: ordered actions plus named transitions.

use crate::action::{Action, ActionContext, ActionSlot, Phase};
use crate::core::{StateId, Transition};
use std::collections::HashMap;
use std::fmt;

/// A named collection of actions and outgoing transitions.
///
/// Actions run in insertion order for every phase. Transitions are keyed
/// by name; registering a second transition with the same name replaces
/// the first.
///
/// States are driven by their [`Fsm`](crate::fsm::Fsm); on their own they
/// only describe behavior and resolve transition names.
///
/// # Example
///
/// ```rust
/// use statecraft::action::FnAction;
/// use statecraft::core::Transition;
/// use statecraft::fsm::State;
///
/// let mut idle: State<&str, ()> = State::new("Idle");
/// idle.add_action(FnAction::update(|ctx| {
///     ctx.transition("start");
/// }));
/// idle.add_transition(Transition::new("start", "Moving"));
///
/// assert_eq!(idle.transition_target("start"), Some(&"Moving"));
/// assert_eq!(idle.transition_target("jump"), None);
/// ```
pub struct State<Id, O> {
    id: Id,
    actions: Vec<ActionSlot<O>>,
    transitions: HashMap<String, Transition<Id>>,
}

impl<Id: StateId, O> State<Id, O> {
    pub fn new(id: Id) -> Self {
        Self {
            id,
            actions: Vec::new(),
            transitions: HashMap::new(),
        }
    }

    pub fn id(&self) -> &Id {
        &self.id
    }

    pub fn name(&self) -> &str {
        self.id.name()
    }

    /// Append an action; it runs after every action added before it.
    pub fn add_action(&mut self, action: impl Action<O> + 'static) {
        self.actions.push(ActionSlot::new(action));
    }

    pub fn add_boxed_action(&mut self, action: Box<dyn Action<O>>) {
        self.actions.push(ActionSlot::from_boxed(action));
    }

    /// Register a transition, replacing any transition with the same name.
    pub fn add_transition(&mut self, transition: Transition<Id>) {
        let name = transition.name().to_string();
        if let Some(previous) = self.transitions.insert(name, transition) {
            tracing::debug!(
                state = self.id.name(),
                transition = previous.name(),
                replaced = previous.target().name(),
                "transition overwritten"
            );
        }
    }

    /// Target of the transition registered under `name`, if any.
    pub fn transition_target(&self, name: &str) -> Option<&Id> {
        self.transitions.get(name).map(Transition::target)
    }

    pub fn transitions(&self) -> impl Iterator<Item = &Transition<Id>> {
        self.transitions.values()
    }

    pub fn actions(&self) -> &[ActionSlot<O>] {
        &self.actions
    }

    /// Run the enter phase on every action.
    ///
    /// Returns the first transition requested during the pass.
    pub(crate) fn enter(&mut self, owner: &O) -> Option<String> {
        let mut ctx = ActionContext::new(owner, self.id.name(), Phase::Enter);
        for action in &mut self.actions {
            action.enter(&mut ctx);
        }
        ctx.into_request()
    }

    /// Run the update phase on every action.
    ///
    /// A transition requested mid-pass does not cut the pass short: the
    /// remaining actions still update against this state.
    pub(crate) fn update(&mut self, owner: &O) -> Option<String> {
        let mut ctx = ActionContext::new(owner, self.id.name(), Phase::Update);
        for action in &mut self.actions {
            action.update(&mut ctx);
        }
        ctx.into_request()
    }

    pub(crate) fn exit(&mut self, owner: &O) {
        let mut ctx = ActionContext::new(owner, self.id.name(), Phase::Exit);
        for action in &mut self.actions {
            action.exit(&mut ctx);
        }
    }
}

impl<Id: StateId, O> fmt::Debug for State<Id, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("State")
            .field("id", &self.id)
            .field("actions", &self.actions)
            .field("transitions", &self.transitions)
            .finish()
    }
}
