//! Patrol Guard State Machine
//!
//! This example demonstrates a game entity whose actions resolve
//! collaborators on their owner during one-time initialization.
//!
//! Key concepts:
//! - `init` looking up an optional component on the owner
//! - Actions that fail `init` going inert instead of aborting the machine
//! - Transitions requested while entering (Alert -> Chase)
//! - Loading `FsmConfig` from JSON and checkpointing with `FsmSnapshot`
//!
//! Run with: RUST_LOG=statecraft=debug cargo run --example patrol_guard

use statecraft::action::{Action, ActionContext, ActionError};
use statecraft::{state_id, FnAction, FsmBuilder, FsmConfig, FsmSnapshot};
use std::cell::{Cell, RefCell};
use tracing_subscriber::EnvFilter;

state_id! {
    enum Guard {
        Patrol,
        Alert,
        Chase,
    }
}

#[derive(Default)]
struct Animator {
    clip: RefCell<String>,
}

struct Npc {
    position: Cell<f32>,
    speed: Cell<f32>,
    player_distance: Cell<f32>,
    animator: Option<Animator>,
    // Guards without a radio skip the alarm action entirely.
    radio: Option<Cell<u32>>,
}

/// Sets the owner's speed and plays a matching clip on enter.
struct Move {
    speed: f32,
    clip: &'static str,
}

impl Action<Npc> for Move {
    fn name(&self) -> &str {
        "Move"
    }

    fn init(&mut self, ctx: &mut ActionContext<'_, Npc>) -> Result<(), ActionError> {
        match ctx.owner().animator {
            Some(_) => Ok(()),
            None => Err(ActionError::missing("Move", "Animator")),
        }
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_, Npc>) {
        let npc = ctx.owner();
        npc.speed.set(self.speed);
        if let Some(animator) = &npc.animator {
            *animator.clip.borrow_mut() = self.clip.to_string();
        }
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, Npc>) {
        let npc = ctx.owner();
        npc.position.set(npc.position.get() + npc.speed.get());
        npc.player_distance
            .set(npc.player_distance.get() - npc.speed.get() * 0.5);
    }

    fn exit(&mut self, ctx: &mut ActionContext<'_, Npc>) {
        ctx.owner().speed.set(0.0);
    }
}

/// Raises the alarm over the owner's radio.
struct RaiseAlarm;

impl Action<Npc> for RaiseAlarm {
    fn name(&self) -> &str {
        "RaiseAlarm"
    }

    fn init(&mut self, ctx: &mut ActionContext<'_, Npc>) -> Result<(), ActionError> {
        if ctx.owner().radio.is_some() {
            Ok(())
        } else {
            Err(ActionError::missing("RaiseAlarm", "Radio"))
        }
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_, Npc>) {
        if let Some(radio) = &ctx.owner().radio {
            radio.set(radio.get() + 1);
        }
    }
}

fn spotted(distance: f32) -> FnAction<Npc> {
    FnAction::update(move |ctx: &mut ActionContext<'_, Npc>| {
        if ctx.owner().player_distance.get() < distance {
            ctx.transition("spotted");
        }
    })
    .named("Spotted")
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Patrol Guard State Machine ===\n");

    let config = FsmConfig::from_json(r#"{ "history_limit": 16 }"#)?;

    let npc = Npc {
        position: Cell::new(0.0),
        speed: Cell::new(0.0),
        player_distance: Cell::new(12.0),
        animator: Some(Animator::default()),
        radio: None,
    };

    let mut guard = FsmBuilder::new()
        .owner(npc)
        .config(config)
        .default_state(Guard::Patrol)
        .state(Guard::Patrol, |s| {
            s.action(Move { speed: 1.0, clip: "walk" })
                .action(spotted(8.0))
                .transition("spotted", Guard::Alert)
        })
        .state(Guard::Alert, |s| {
            s.action(RaiseAlarm)
                .enter(|ctx| {
                    ctx.transition("chase");
                })
                .transition("chase", Guard::Chase)
        })
        .state(Guard::Chase, |s| {
            s.action(Move { speed: 3.0, clip: "run" })
                .update(|ctx| {
                    if ctx.owner().player_distance.get() <= 0.0 {
                        ctx.transition("lost");
                    }
                })
                .transition("lost", Guard::Patrol)
        })
        .build()?;

    let mut checkpoint: Option<FsmSnapshot<Guard>> = None;
    for tick in 1..=10 {
        guard.tick()?;
        let npc = guard.owner();
        println!(
            "  tick {:>2}: {:?} at {:>5.1}, player {:>5.1} away",
            tick,
            guard.current_id(),
            npc.position.get(),
            npc.player_distance.get()
        );
        if guard.current_id() == Some(&Guard::Chase) && checkpoint.is_none() {
            checkpoint = Some(guard.snapshot());
        }
    }

    if let Some(snapshot) = checkpoint {
        let json = snapshot.to_json()?;
        let restored = FsmSnapshot::<Guard>::from_json(&json)?;
        guard.restore(restored)?;
        println!("\n  restored checkpoint, now in {:?}", guard.current_id());
    }

    let alarm_inert = guard
        .get_state(&Guard::Alert)
        .and_then(|state| state.actions().first())
        .map(|slot| slot.is_inert())
        .unwrap_or(false);
    println!("  alarm action inert (no radio): {}", alarm_inert);

    guard.exit();
    println!("\nPath: {:?}", guard.history().get_path());

    println!("\n=== Example Complete ===");
    Ok(())
}
