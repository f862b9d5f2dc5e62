//! Symbolic state identifiers.
//!
//! Every state registered on an [`Fsm`](crate::fsm::Fsm) is keyed by a
//! value implementing [`StateId`]. Identity is the value itself; the name
//! is only used for diagnostics and for deriving transition names.

use std::fmt::Debug;
use std::hash::Hash;

/// Trait for state identifiers.
///
/// Identifiers are usually fieldless enums supplied by the host
/// application (see [`state_id!`](crate::state_id)), but any hashable
/// value with equality works.
///
/// # Required Traits
///
/// - `Clone`: identifiers are copied into transitions and history
/// - `Eq` + `Hash`: identifiers key the state map
/// - `Debug`: identifiers appear in diagnostics
///
/// # Example
///
/// ```rust
/// use statecraft::core::StateId;
///
/// #[derive(Clone, PartialEq, Eq, Hash, Debug)]
/// enum Door {
///     Open,
///     Closed,
/// }
///
/// impl StateId for Door {
///     fn name(&self) -> &str {
///         match self {
///             Self::Open => "Open",
///             Self::Closed => "Closed",
///         }
///     }
/// }
///
/// assert_eq!(Door::Open.name(), "Open");
/// ```
pub trait StateId: Clone + Eq + Hash + Debug {
    /// Display name of the identifier, used for logging, errors and
    /// default transition names.
    fn name(&self) -> &str;
}

impl StateId for &'static str {
    fn name(&self) -> &str {
        self
    }
}

impl StateId for String {
    fn name(&self) -> &str {
        self.as_str()
    }
}
