//! Per-pass context handed to every action phase.

use std::fmt;

/// Lifecycle phase an action is currently running.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    Init,
    Enter,
    Update,
    Exit,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Init => "init",
            Self::Enter => "enter",
            Self::Update => "update",
            Self::Exit => "exit",
        };
        f.write_str(name)
    }
}

/// Context shared by all actions of a state during one phase pass.
///
/// Actions read the owner through it and request named transitions on
/// their state. Requests are queued: the pass finishes for every action
/// of the state before the machine resolves the first request. Requests
/// made while exiting are ignored.
pub struct ActionContext<'a, O> {
    owner: &'a O,
    state: &'a str,
    phase: Phase,
    request: Option<String>,
}

impl<'a, O> ActionContext<'a, O> {
    pub(crate) fn new(owner: &'a O, state: &'a str, phase: Phase) -> Self {
        Self {
            owner,
            state,
            phase,
            request: None,
        }
    }

    /// The entity the machine is attached to.
    pub fn owner(&self) -> &'a O {
        self.owner
    }

    /// Display name of the state running this pass.
    pub fn state_name(&self) -> &str {
        self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub(crate) fn set_phase(&mut self, phase: Phase) {
        self.phase = phase;
    }

    /// Request the transition named `name` on the owning state.
    ///
    /// Returns `true` if the request was queued. Only the first request of
    /// a pass is kept, and nothing is queued during the exit phase.
    pub fn transition(&mut self, name: impl Into<String>) -> bool {
        let name = name.into();
        if self.phase == Phase::Exit {
            tracing::trace!(
                state = self.state,
                transition = %name,
                "ignoring transition requested while exiting"
            );
            return false;
        }
        if let Some(queued) = &self.request {
            tracing::debug!(
                state = self.state,
                queued = %queued,
                ignored = %name,
                "transition already requested this pass"
            );
            return false;
        }
        self.request = Some(name);
        true
    }

    /// The transition queued so far in this pass, if any.
    pub fn requested(&self) -> Option<&str> {
        self.request.as_deref()
    }

    pub(crate) fn into_request(self) -> Option<String> {
        self.request
    }
}

impl<O> fmt::Debug for ActionContext<'_, O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionContext")
            .field("state", &self.state)
            .field("phase", &self.phase)
            .field("request", &self.request)
            .finish()
    }
}
