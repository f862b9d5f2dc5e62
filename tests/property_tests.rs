//! Property-based tests for machine lifecycle invariants.
//!
//! These tests use proptest to drive a machine through random operation
//! sequences and check that the lifecycle bookkeeping never drifts.

mod common;

use common::{count, new_log, Log, Recorder, StateKey};
use proptest::prelude::*;
use statecraft::core::StateId;
use statecraft::{Fsm, FsmBuilder, FsmConfig, FsmError};
use std::cell::Cell;
use std::rc::Rc;

const REGISTERED: [StateKey; 4] = [StateKey::A, StateKey::B, StateKey::Idle, StateKey::Moving];

#[derive(Clone, Debug)]
enum Op {
    SetState(StateKey),
    Transition(&'static str),
    Tick,
    Reset,
    Exit,
}

fn arbitrary_key() -> impl Strategy<Value = StateKey> {
    prop_oneof![
        Just(StateKey::A),
        Just(StateKey::B),
        Just(StateKey::Idle),
        Just(StateKey::Moving),
        Just(StateKey::Unregistered),
    ]
}

fn arbitrary_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        arbitrary_key().prop_map(Op::SetState),
        prop_oneof![Just("go"), Just("back"), Just("start"), Just("missing")]
            .prop_map(Op::Transition),
        Just(Op::Tick),
        Just(Op::Tick),
        Just(Op::Reset),
        Just(Op::Exit),
    ]
}

fn machine(log: &Log, history_limit: usize) -> Fsm<StateKey> {
    let (a, b, idle, moving) = (
        Rc::clone(log),
        Rc::clone(log),
        Rc::clone(log),
        Rc::clone(log),
    );
    FsmBuilder::new()
        .owner(())
        .default_state(StateKey::A)
        .config(FsmConfig::default().with_history_limit(history_limit))
        .state(StateKey::A, move |s| {
            s.action(Recorder::new("A", &a))
                .transition("go", StateKey::B)
        })
        .state(StateKey::B, move |s| {
            s.action(Recorder::new("B", &b))
                .transition("back", StateKey::A)
                .transition("start", StateKey::Idle)
        })
        .state(StateKey::Idle, move |s| {
            s.action(Recorder::new("Idle", &idle).requesting_on_update("start"))
                .transition("start", StateKey::Moving)
        })
        .state(StateKey::Moving, move |s| {
            s.action(Recorder::new("Moving", &moving))
                .transition("back", StateKey::A)
        })
        .build()
        .unwrap()
}

fn apply(fsm: &mut Fsm<StateKey>, op: &Op) -> Result<(), FsmError> {
    match op {
        Op::SetState(id) => fsm.set_state(*id),
        Op::Transition(name) => fsm.transition(name).map(|_| ()),
        Op::Tick => fsm.tick(),
        Op::Reset => fsm.reset(),
        Op::Exit => {
            fsm.exit();
            Ok(())
        }
    }
}

proptest! {
    #[test]
    fn at_most_one_state_is_entered(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let log = new_log();
        let mut fsm = machine(&log, 16);

        for op in &ops {
            let _ = apply(&mut fsm, op);

            let mut open = Vec::new();
            for key in REGISTERED {
                let entered = count(&log, &format!("{}.enter", key.name()));
                let exited = count(&log, &format!("{}.exit", key.name()));
                prop_assert!(entered == exited || entered == exited + 1);
                if entered > exited {
                    open.push(key);
                }
            }
            prop_assert!(open.len() <= 1);
            prop_assert_eq!(open.first(), fsm.current_id());
        }
    }

    #[test]
    fn actions_initialize_at_most_once(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let log = new_log();
        let mut fsm = machine(&log, 16);

        for op in &ops {
            let _ = apply(&mut fsm, op);
        }

        for key in REGISTERED {
            let inits = count(&log, &format!("{}.init", key.name()));
            let enters = count(&log, &format!("{}.enter", key.name()));
            prop_assert!(inits <= 1);
            prop_assert_eq!(inits == 1, enters > 0);
        }
    }

    #[test]
    fn exit_listeners_fire_once_per_exit(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let log = new_log();
        let mut fsm = machine(&log, 16);
        let fired = Rc::new(Cell::new(0_usize));
        let counter = Rc::clone(&fired);
        fsm.on_exit(move || counter.set(counter.get() + 1));

        let exits = ops.iter().filter(|op| matches!(op, Op::Exit)).count();
        for op in &ops {
            let _ = apply(&mut fsm, op);
        }

        prop_assert_eq!(fired.get(), exits);
    }

    #[test]
    fn unknown_state_never_changes_position(ops in prop::collection::vec(arbitrary_op(), 0..40)) {
        let log = new_log();
        let mut fsm = machine(&log, 16);

        for op in &ops {
            let before = fsm.current_id().copied();
            let events_before = log.borrow().len();
            let result = apply(&mut fsm, op);

            if let Op::SetState(StateKey::Unregistered) = op {
                prop_assert_eq!(
                    result,
                    Err(FsmError::UnknownState { id: "Unregistered".to_string() })
                );
                prop_assert_eq!(fsm.current_id().copied(), before);
                prop_assert_eq!(log.borrow().len(), events_before);
            } else {
                prop_assert!(result.is_ok());
            }
        }
    }

    #[test]
    fn history_respects_limit(
        limit in 1usize..8,
        ops in prop::collection::vec(arbitrary_op(), 0..60)
    ) {
        let log = new_log();
        let mut fsm = machine(&log, limit);

        for op in &ops {
            let _ = apply(&mut fsm, op);
            prop_assert!(fsm.history().len() <= limit);
        }

        if let Some(last) = fsm.history().last() {
            prop_assert_eq!(last.to.as_ref(), fsm.current_id());
        }
    }
}
