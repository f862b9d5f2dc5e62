//! Closure-backed actions.

use super::{Action, ActionContext, ActionError};

/// Phase callback of a [`FnAction`].
pub type ActionFn<O> = Box<dyn FnMut(&mut ActionContext<'_, O>)>;

/// Init callback of a [`FnAction`].
pub type InitFn<O> = Box<dyn FnMut(&mut ActionContext<'_, O>) -> Result<(), ActionError>>;

/// An action assembled from optional per-phase closures.
///
/// Phases without a closure do nothing.
///
/// # Example
///
/// ```rust
/// use statecraft::action::FnAction;
/// use std::cell::Cell;
///
/// let jumps = FnAction::<Cell<u32>>::new("CountJumps")
///     .on_enter(|ctx| ctx.owner().set(ctx.owner().get() + 1))
///     .on_update(|ctx| {
///         if ctx.owner().get() > 2 {
///             ctx.transition("land");
///         }
///     });
/// ```
pub struct FnAction<O> {
    name: String,
    on_init: Option<InitFn<O>>,
    on_enter: Option<ActionFn<O>>,
    on_update: Option<ActionFn<O>>,
    on_exit: Option<ActionFn<O>>,
}

impl<O> FnAction<O> {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            on_init: None,
            on_enter: None,
            on_update: None,
            on_exit: None,
        }
    }

    /// Action that only runs `f` on enter.
    pub fn enter<F>(f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        Self::new("Enter").on_enter(f)
    }

    /// Action that only runs `f` on update.
    pub fn update<F>(f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        Self::new("Update").on_update(f)
    }

    /// Action that only runs `f` on exit.
    pub fn exit<F>(f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        Self::new("Exit").on_exit(f)
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn on_init<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) -> Result<(), ActionError> + 'static,
    {
        self.on_init = Some(Box::new(f));
        self
    }

    pub fn on_enter<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        self.on_enter = Some(Box::new(f));
        self
    }

    pub fn on_update<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        self.on_update = Some(Box::new(f));
        self
    }

    pub fn on_exit<F>(mut self, f: F) -> Self
    where
        F: FnMut(&mut ActionContext<'_, O>) + 'static,
    {
        self.on_exit = Some(Box::new(f));
        self
    }
}

impl<O> Action<O> for FnAction<O> {
    fn name(&self) -> &str {
        &self.name
    }

    fn init(&mut self, ctx: &mut ActionContext<'_, O>) -> Result<(), ActionError> {
        match self.on_init.as_mut() {
            Some(f) => f(ctx),
            None => Ok(()),
        }
    }

    fn enter(&mut self, ctx: &mut ActionContext<'_, O>) {
        if let Some(f) = self.on_enter.as_mut() {
            f(ctx);
        }
    }

    fn update(&mut self, ctx: &mut ActionContext<'_, O>) {
        if let Some(f) = self.on_update.as_mut() {
            f(ctx);
        }
    }

    fn exit(&mut self, ctx: &mut ActionContext<'_, O>) {
        if let Some(f) = self.on_exit.as_mut() {
            f(ctx);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::{ActionSlot, Phase};
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn shorthand_constructors_are_named_after_phase() {
        assert_eq!(Action::<()>::name(&FnAction::<()>::enter(|_| {})), "Enter");
        assert_eq!(Action::<()>::name(&FnAction::<()>::update(|_| {})), "Update");
        assert_eq!(Action::<()>::name(&FnAction::<()>::exit(|_| {})), "Exit");
    }

    #[test]
    fn exit_closure_runs_on_exit_only() {
        let calls = Rc::new(Cell::new(0));
        let counter = Rc::clone(&calls);
        let mut slot = ActionSlot::new(FnAction::<()>::exit(move |_| {
            counter.set(counter.get() + 1)
        }));
        let owner = ();

        slot.enter(&mut ActionContext::new(&owner, "A", Phase::Enter));
        slot.update(&mut ActionContext::new(&owner, "A", Phase::Update));
        assert_eq!(calls.get(), 0);

        slot.exit(&mut ActionContext::new(&owner, "A", Phase::Exit));
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn closures_can_read_owner_and_request_transitions() {
        let owner = Cell::new(5_u32);
        let mut action = FnAction::new("Drain").on_update(|ctx: &mut ActionContext<'_, Cell<u32>>| {
            let left = ctx.owner().get() - 1;
            ctx.owner().set(left);
            if left == 4 {
                ctx.transition("tired");
            }
        });

        let mut ctx = ActionContext::new(&owner, "Run", Phase::Update);
        action.update(&mut ctx);

        assert_eq!(owner.get(), 4);
        assert_eq!(ctx.requested(), Some("tired"));
    }

    #[test]
    fn init_closure_error_is_returned() {
        let owner = ();
        let mut action = FnAction::<()>::new("Needy")
            .on_init(|_| Err(ActionError::Setup("no animator".into())));

        let result = action.init(&mut ActionContext::new(&owner, "A", Phase::Init));
        assert_eq!(result, Err(ActionError::Setup("no animator".into())));
    }
}
