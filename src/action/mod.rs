//! Actions: units of behavior owned by a state.
//!
//! An action has a four-phase lifecycle:
//!
//! 1. `init` - runs once, lazily, right before the first `enter`
//! 2. `enter` - runs every time the owning state becomes current
//! 3. `update` - runs on every tick while the owning state is current
//! 4. `exit` - runs when the owning state stops being current
//!
//! The lifecycle bookkeeping lives in [`ActionSlot`], so implementors
//! only write behavior.

mod closure;
mod context;
mod error;

pub use closure::{ActionFn, FnAction, InitFn};
pub use context::{ActionContext, Phase};
pub use error::ActionError;

use std::fmt;

/// A unit of behavior attached to a state.
///
/// Every method has a no-op default, so an action implements only the
/// phases it cares about. `O` is the owner type of the machine.
///
/// # Example
///
/// ```rust
/// use statecraft::action::{Action, ActionContext};
/// use std::cell::Cell;
///
/// struct Stamina {
///     points: u32,
/// }
///
/// impl Action<Cell<u32>> for Stamina {
///     fn name(&self) -> &str {
///         "Stamina"
///     }
///
///     fn enter(&mut self, _ctx: &mut ActionContext<'_, Cell<u32>>) {
///         self.points = 3;
///     }
///
///     fn update(&mut self, ctx: &mut ActionContext<'_, Cell<u32>>) {
///         self.points -= 1;
///         ctx.owner().set(self.points);
///         if self.points == 0 {
///             ctx.transition("rest");
///         }
///     }
/// }
/// ```
pub trait Action<O> {
    /// Display name, cosmetic only.
    fn name(&self) -> &str {
        std::any::type_name::<Self>()
    }

    /// One-time setup, typically resolving collaborators on the owner.
    ///
    /// Returning an error makes the action permanently inert.
    fn init(&mut self, _ctx: &mut ActionContext<'_, O>) -> Result<(), ActionError> {
        Ok(())
    }

    fn enter(&mut self, _ctx: &mut ActionContext<'_, O>) {}

    fn update(&mut self, _ctx: &mut ActionContext<'_, O>) {}

    fn exit(&mut self, _ctx: &mut ActionContext<'_, O>) {}
}

/// An action together with its lifecycle flags.
///
/// The slot guarantees that `init` runs at most once and strictly before
/// the first `enter`, that `update` only runs between `enter` and `exit`,
/// and that `exit` is a no-op for an action that was never entered.
pub struct ActionSlot<O> {
    action: Box<dyn Action<O>>,
    initialized: bool,
    active: bool,
    inert: bool,
}

impl<O> ActionSlot<O> {
    pub fn new(action: impl Action<O> + 'static) -> Self {
        Self::from_boxed(Box::new(action))
    }

    pub fn from_boxed(action: Box<dyn Action<O>>) -> Self {
        Self {
            action,
            initialized: false,
            active: false,
            inert: false,
        }
    }

    pub fn name(&self) -> &str {
        self.action.name()
    }

    /// Whether `init` has run.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether the action has been entered and not yet exited.
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Whether `init` failed, disabling every later phase.
    pub fn is_inert(&self) -> bool {
        self.inert
    }

    pub(crate) fn enter(&mut self, ctx: &mut ActionContext<'_, O>) {
        if !self.initialized {
            self.initialized = true;
            ctx.set_phase(Phase::Init);
            let result = self.action.init(ctx);
            ctx.set_phase(Phase::Enter);
            if let Err(err) = result {
                tracing::warn!(
                    state = ctx.state_name(),
                    action = self.action.name(),
                    error = %err,
                    "action init failed, action is now inert"
                );
                self.inert = true;
            }
        }
        if self.inert {
            return;
        }
        self.active = true;
        self.action.enter(ctx);
    }

    pub(crate) fn update(&mut self, ctx: &mut ActionContext<'_, O>) {
        if self.active {
            self.action.update(ctx);
        }
    }

    pub(crate) fn exit(&mut self, ctx: &mut ActionContext<'_, O>) {
        if !self.active {
            return;
        }
        self.active = false;
        self.action.exit(ctx);
    }
}

impl<O> fmt::Debug for ActionSlot<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActionSlot")
            .field("name", &self.name())
            .field("initialized", &self.initialized)
            .field("active", &self.active)
            .field("inert", &self.inert)
            .finish()
    }
}
