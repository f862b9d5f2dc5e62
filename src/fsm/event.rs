//! Exit-notification channel.
//!
//! A multicast, zero-argument event fired once per `Fsm::exit` call.
//! Listeners run synchronously in subscription order, and a failing
//! listener never prevents the others from running.

use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use thiserror::Error;

/// Failure reported by a single exit listener.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ListenerError {
    #[error("Listener failed: {0}")]
    Failed(String),

    #[error("Listener panicked: {0}")]
    Panicked(String),
}

/// Handle returned by [`ExitEvent::subscribe`], used to unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Listener = Box<dyn FnMut() -> Result<(), ListenerError>>;

/// Outcome of one exit notification.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ExitReport {
    /// Number of listeners invoked
    pub notified: usize,
    /// Listeners that failed, in invocation order
    pub failures: Vec<(ListenerId, ListenerError)>,
}

impl ExitReport {
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Ordered set of exit listeners.
#[derive(Default)]
pub struct ExitEvent {
    listeners: Vec<(ListenerId, Listener)>,
    next_id: u64,
}

impl ExitEvent {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a listener that cannot fail (other than by panicking).
    pub fn subscribe<F>(&mut self, mut listener: F) -> ListenerId
    where
        F: FnMut() + 'static,
    {
        self.subscribe_fallible(move || {
            listener();
            Ok(())
        })
    }

    /// Add a listener that may report a failure.
    pub fn subscribe_fallible<F>(&mut self, listener: F) -> ListenerId
    where
        F: FnMut() -> Result<(), ListenerError> + 'static,
    {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Remove a listener. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(listener_id, _)| *listener_id != id);
        self.listeners.len() != before
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    /// Invoke every listener once, in subscription order.
    pub fn emit(&mut self) -> ExitReport {
        let mut report = ExitReport::default();
        for (id, listener) in self.listeners.iter_mut() {
            report.notified += 1;
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| listener()))
                .unwrap_or_else(|payload| Err(ListenerError::Panicked(panic_message(&*payload))));
            if let Err(err) = outcome {
                tracing::warn!(listener = ?id, error = %err, "exit listener failed");
                report.failures.push((*id, err));
            }
        }
        report
    }
}

impl fmt::Debug for ExitEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExitEvent")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
