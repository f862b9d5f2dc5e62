//! State change history tracking.
//!
//! Every change of the current state on an [`Fsm`](crate::fsm::Fsm) is
//! recorded as a [`StateChange`]. The history is bounded: once the limit
//! is reached the oldest entry is dropped.

use super::id::StateId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use std::time::Duration;

/// Why the current state changed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChangeCause {
    /// Explicit `set_state` call by the host
    SetState,
    /// Named transition requested by an action or the host
    Transition(String),
    /// First tick entered the default state
    Default,
    /// `reset` re-entered the default state
    Reset,
    /// `exit` cleared the current state
    Exit,
    /// A snapshot was restored
    Restore,
}

impl fmt::Display for ChangeCause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetState => write!(f, "set_state"),
            Self::Transition(name) => write!(f, "transition '{name}'"),
            Self::Default => write!(f, "default"),
            Self::Reset => write!(f, "reset"),
            Self::Exit => write!(f, "exit"),
            Self::Restore => write!(f, "restore"),
        }
    }
}

/// Record of a single change of the current state.
///
/// `from` is `None` when no state was active (first entry, or re-entry
/// after an exit). `to` is `None` when the machine exited.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{ChangeCause, StateChange};
/// use chrono::Utc;
///
/// let change = StateChange {
///     from: Some("Idle"),
///     to: Some("Moving"),
///     cause: ChangeCause::Transition("start".into()),
///     timestamp: Utc::now(),
/// };
/// assert_eq!(change.cause.to_string(), "transition 'start'");
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateChange<Id> {
    /// The state that was current before the change
    pub from: Option<Id>,
    /// The state that is current after the change
    pub to: Option<Id>,
    /// What triggered the change
    pub cause: ChangeCause,
    /// When the change occurred
    pub timestamp: DateTime<Utc>,
}

/// Bounded, ordered history of state changes.
///
/// A limit of zero disables recording entirely.
///
/// # Example
///
/// ```rust
/// use statecraft::core::{ChangeCause, StateChange, StateHistory};
/// use chrono::Utc;
///
/// let mut history = StateHistory::with_limit(8);
/// history.record(StateChange {
///     from: None,
///     to: Some("Idle"),
///     cause: ChangeCause::Default,
///     timestamp: Utc::now(),
/// });
/// history.record(StateChange {
///     from: Some("Idle"),
///     to: Some("Moving"),
///     cause: ChangeCause::Transition("start".into()),
///     timestamp: Utc::now(),
/// });
///
/// let path = history.get_path();
/// assert_eq!(path, vec![&"Idle", &"Moving"]);
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StateHistory<Id> {
    changes: VecDeque<StateChange<Id>>,
    limit: usize,
}

/// Default number of changes kept by a history.
pub const DEFAULT_HISTORY_LIMIT: usize = 64;

impl<Id: StateId> Default for StateHistory<Id> {
    fn default() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }
}

impl<Id: StateId> StateHistory<Id> {
    /// Create an empty history holding at most `limit` changes.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            changes: VecDeque::with_capacity(limit.min(DEFAULT_HISTORY_LIMIT)),
            limit,
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Record a change, evicting the oldest entry when full.
    pub fn record(&mut self, change: StateChange<Id>) {
        if self.limit == 0 {
            return;
        }
        while self.changes.len() >= self.limit {
            self.changes.pop_front();
        }
        self.changes.push_back(change);
    }

    /// Iterate over the recorded changes, oldest first.
    pub fn changes(&self) -> impl Iterator<Item = &StateChange<Id>> {
        self.changes.iter()
    }

    /// Most recent change, if any.
    pub fn last(&self) -> Option<&StateChange<Id>> {
        self.changes.back()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Get the sequence of states that were entered.
    ///
    /// Exits (changes with no target) are skipped, so the path lists
    /// every state in the order it became current.
    pub fn get_path(&self) -> Vec<&Id> {
        self.changes.iter().filter_map(|c| c.to.as_ref()).collect()
    }

    /// Time between the oldest and the newest recorded change.
    ///
    /// Returns `None` if nothing was recorded.
    pub fn duration(&self) -> Option<Duration> {
        let (first, last) = (self.changes.front()?, self.changes.back()?);
        last.timestamp
            .signed_duration_since(first.timestamp)
            .to_std()
            .ok()
    }

    /// Replace the recorded entries, keeping this history's limit.
    pub(crate) fn adopt(&mut self, other: StateHistory<Id>) {
        self.changes.clear();
        for change in other.changes {
            self.record(change);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
    enum TestId {
        Idle,
        Moving,
        Jumping,
    }

    impl StateId for TestId {
        fn name(&self) -> &str {
            match self {
                Self::Idle => "Idle",
                Self::Moving => "Moving",
                Self::Jumping => "Jumping",
            }
        }
    }

    fn change(from: Option<TestId>, to: Option<TestId>) -> StateChange<TestId> {
        StateChange {
            from,
            to,
            cause: ChangeCause::SetState,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn new_history_is_empty() {
        let history: StateHistory<TestId> = StateHistory::default();
        assert!(history.is_empty());
        assert!(history.get_path().is_empty());
        assert!(history.duration().is_none());
        assert_eq!(history.limit(), DEFAULT_HISTORY_LIMIT);
    }

    #[test]
    fn record_adds_change() {
        let mut history = StateHistory::default();
        history.record(change(None, Some(TestId::Idle)));

        assert_eq!(history.len(), 1);
        assert_eq!(history.last().unwrap().to, Some(TestId::Idle));
    }

    #[test]
    fn get_path_skips_exits() {
        let mut history = StateHistory::default();
        history.record(change(None, Some(TestId::Idle)));
        history.record(change(Some(TestId::Idle), Some(TestId::Moving)));
        history.record(change(Some(TestId::Moving), None));
        history.record(change(None, Some(TestId::Jumping)));

        let path = history.get_path();
        assert_eq!(path, vec![&TestId::Idle, &TestId::Moving, &TestId::Jumping]);
    }

    #[test]
    fn limit_evicts_oldest() {
        let mut history = StateHistory::with_limit(2);
        history.record(change(None, Some(TestId::Idle)));
        history.record(change(Some(TestId::Idle), Some(TestId::Moving)));
        history.record(change(Some(TestId::Moving), Some(TestId::Jumping)));

        assert_eq!(history.len(), 2);
        assert_eq!(history.get_path(), vec![&TestId::Moving, &TestId::Jumping]);
    }

    #[test]
    fn changes_iterate_oldest_first() {
        let mut history = StateHistory::default();
        history.record(change(None, Some(TestId::Idle)));
        history.record(change(Some(TestId::Idle), None));

        let froms: Vec<_> = history.changes().map(|c| c.from.clone()).collect();
        assert_eq!(froms, vec![None, Some(TestId::Idle)]);
    }

    #[test]
    fn zero_limit_disables_recording() {
        let mut history = StateHistory::with_limit(0);
        history.record(change(None, Some(TestId::Idle)));

        assert!(history.is_empty());
    }

    #[test]
    fn duration_calculates_elapsed_time() {
        let mut history = StateHistory::default();
        history.record(change(None, Some(TestId::Idle)));

        std::thread::sleep(Duration::from_millis(10));

        history.record(change(Some(TestId::Idle), Some(TestId::Moving)));

        let duration = history.duration().unwrap();
        assert!(duration >= Duration::from_millis(10));
    }

    #[test]
    fn single_change_has_duration_zero() {
        let mut history = StateHistory::default();
        history.record(change(None, Some(TestId::Idle)));

        assert_eq!(history.duration(), Some(Duration::from_secs(0)));
    }

    #[test]
    fn adopt_respects_own_limit() {
        let mut source = StateHistory::with_limit(10);
        source.record(change(None, Some(TestId::Idle)));
        source.record(change(Some(TestId::Idle), Some(TestId::Moving)));
        source.record(change(Some(TestId::Moving), Some(TestId::Jumping)));

        let mut target = StateHistory::with_limit(2);
        target.adopt(source);

        assert_eq!(target.len(), 2);
        assert_eq!(target.get_path(), vec![&TestId::Moving, &TestId::Jumping]);
    }

    #[test]
    fn history_serializes_correctly() {
        let mut history = StateHistory::default();
        history.record(StateChange {
            from: Some(TestId::Idle),
            to: Some(TestId::Moving),
            cause: ChangeCause::Transition("start".into()),
            timestamp: Utc::now(),
        });

        let json = serde_json::to_string(&history).unwrap();
        let deserialized: StateHistory<TestId> = serde_json::from_str(&json).unwrap();

        assert_eq!(history.len(), deserialized.len());
        assert_eq!(
            deserialized.last().unwrap().cause,
            ChangeCause::Transition("start".into())
        );
    }

    #[test]
    fn cause_display_names_transition() {
        assert_eq!(ChangeCause::Reset.to_string(), "reset");
        assert_eq!(
            ChangeCause::Transition("stop".into()).to_string(),
            "transition 'stop'"
        );
    }
}
