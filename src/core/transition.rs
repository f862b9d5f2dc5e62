//! Named transition edges.

use super::id::StateId;
use serde::{Deserialize, Serialize};

/// An immutable named edge from a state to a target state identifier.
///
/// Transitions are looked up by name on the state that owns them. Two
/// transitions registered under the same name on one state overwrite each
/// other; the last registration wins.
///
/// # Example
///
/// ```rust
/// use statecraft::core::Transition;
///
/// let explicit = Transition::new("start", "Moving");
/// assert_eq!(explicit.name(), "start");
/// assert_eq!(explicit.target(), &"Moving");
///
/// let derived = Transition::to("Idle");
/// assert_eq!(derived.name(), "Idle");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition<Id> {
    name: String,
    target: Id,
}

impl<Id: StateId> Transition<Id> {
    /// Create a transition with an explicit name.
    pub fn new(name: impl Into<String>, target: Id) -> Self {
        Self {
            name: name.into(),
            target,
        }
    }

    /// Create a transition named after its target's display form.
    pub fn to(target: Id) -> Self {
        Self {
            name: target.name().to_string(),
            target,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn target(&self) -> &Id {
        &self.target
    }
}
