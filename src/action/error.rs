//! Action setup errors.

use thiserror::Error;

/// Errors an action may report from its one-time initialization.
///
/// An action whose `init` fails becomes inert: none of its later phases
/// run, but the rest of the state and the machine keep working.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ActionError {
    /// A collaborator the action needs could not be resolved on the owner
    #[error("Action '{action}' could not resolve collaborator '{collaborator}' on its owner")]
    MissingCollaborator {
        action: String,
        collaborator: String,
    },

    /// Any other setup failure
    #[error("Action setup failed: {0}")]
    Setup(String),
}

impl ActionError {
    pub fn missing(action: impl Into<String>, collaborator: impl Into<String>) -> Self {
        Self::MissingCollaborator {
            action: action.into(),
            collaborator: collaborator.into(),
        }
    }
}
