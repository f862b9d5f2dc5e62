//! Shared helpers for integration tests.

#![allow(dead_code)]

use statecraft::action::{Action, ActionContext, ActionError};
use statecraft::state_id;
use std::cell::RefCell;
use std::rc::Rc;

state_id! {
    pub enum StateKey {
        A,
        B,
        Idle,
        Moving,
        Unregistered,
    }
}

pub type Log = Rc<RefCell<Vec<String>>>;

pub fn new_log() -> Log {
    Rc::new(RefCell::new(Vec::new()))
}

pub fn events(log: &Log) -> Vec<String> {
    log.borrow().clone()
}

pub fn count(log: &Log, event: &str) -> usize {
    log.borrow().iter().filter(|e| *e == event).count()
}

/// Action that records every phase it runs as `"{label}.{phase}"`.
pub struct Recorder {
    label: String,
    log: Log,
    request_on_enter: Option<String>,
    request_on_update: Option<String>,
}

impl Recorder {
    pub fn new(label: impl Into<String>, log: &Log) -> Self {
        Self {
            label: label.into(),
            log: Rc::clone(log),
            request_on_enter: None,
            request_on_update: None,
        }
    }

    pub fn requesting_on_enter(mut self, transition: &str) -> Self {
        self.request_on_enter = Some(transition.to_string());
        self
    }

    pub fn requesting_on_update(mut self, transition: &str) -> Self {
        self.request_on_update = Some(transition.to_string());
        self
    }

    fn push(&self, phase: &str) {
        self.log.borrow_mut().push(format!("{}.{}", self.label, phase));
    }
}

impl<O> Action<O> for Recorder {
    fn name(&self) -> &str {
        &self.label
    }

    fn init(&mut self, _ctx: &mut ActionContext<'_, O>) -> Result<(), ActionError> {
        self.push("init");
        Ok(())
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_, O>) {
        self.push("enter");
        if let Some(name) = &self.request_on_enter {
            ctx.transition(name.clone());
        }
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, O>) {
        self.push("update");
        if let Some(name) = &self.request_on_update {
            ctx.transition(name.clone());
        }
    }

    fn exit(&mut self, _ctx: &mut ActionContext<'_, O>) {
        self.push("exit");
    }
}
