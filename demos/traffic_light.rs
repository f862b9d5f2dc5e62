//! Traffic Light State Machine
//!
//! This example demonstrates a cyclic machine driven purely by ticks.
//!
//! Key concepts:
//! - Timed states that request their own transition from `update`
//! - Shared owner data read and written through the action context
//! - One transition name ("next") declared per state
//!
//! Run with: RUST_LOG=debug cargo run --example traffic_light

use statecraft::action::{Action, ActionContext};
use statecraft::{state_id, FsmBuilder};
use std::cell::Cell;
use tracing_subscriber::EnvFilter;

state_id! {
    enum TrafficLight {
        Red,
        Green,
        Yellow,
    }
}

#[derive(Default)]
struct Intersection {
    cars_passed: Cell<u32>,
}

/// Stays in the state for `ticks` updates, then requests "next".
struct Timer {
    ticks: u32,
    elapsed: u32,
}

impl Timer {
    fn new(ticks: u32) -> Self {
        Self { ticks, elapsed: 0 }
    }
}

impl Action<Intersection> for Timer {
    fn name(&self) -> &str {
        "Timer"
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_, Intersection>) {
        self.elapsed = 0;
        println!("  {} for {} ticks", ctx.state_name(), self.ticks);
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, Intersection>) {
        self.elapsed += 1;
        if self.elapsed >= self.ticks {
            ctx.transition("next");
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Traffic Light State Machine ===\n");

    let mut light = FsmBuilder::new()
        .owner(Intersection::default())
        .default_state(TrafficLight::Red)
        .state(TrafficLight::Red, |s| {
            s.action(Timer::new(3))
                .transition("next", TrafficLight::Green)
        })
        .state(TrafficLight::Green, |s| {
            s.action(Timer::new(4))
                .update(|ctx| {
                    let passed = &ctx.owner().cars_passed;
                    passed.set(passed.get() + 1);
                })
                .transition("next", TrafficLight::Yellow)
        })
        .state(TrafficLight::Yellow, |s| {
            s.action(Timer::new(1))
                .transition("next", TrafficLight::Red)
        })
        .build()?;

    light.on_exit(|| println!("\n  light switched off"));

    for _ in 0..16 {
        light.tick()?;
    }

    let report = light.exit();
    println!("Ticks run:       {}", light.ticks());
    println!("Cars passed:     {}", light.owner().cars_passed.get());
    println!("Exit listeners:  {}", report.notified);
    println!(
        "Path:            {:?}",
        light.history().get_path()
    );

    println!("\n=== Example Complete ===");
    Ok(())
}
