// Generic named-state machine with enter/update/exit hooks

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;

/// Errors raised by the state machine.
///
/// These indicate wiring bugs (a state was never registered), so callers are
/// expected to propagate them rather than recover.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum StateMachineError {
    #[error("Unknown state: {0}")]
    UnknownState(String),
}

/// Hook run when a state becomes active or stops being active
pub type TransitionHook<C> = Box<dyn FnMut(&mut C)>;

/// Hook run once per frame while a state is active
pub type UpdateHook<Id, C> = Box<dyn FnMut(&mut C, f32, &mut Transitions<Id>)>;

/// Transition requests collected while an update hook runs.
///
/// Requests are applied in order right after the hook returns.
#[derive(Debug)]
pub struct Transitions<Id> {
    requested: Vec<Id>,
}

impl<Id> Transitions<Id> {
    fn new() -> Self {
        Self {
            requested: Vec::with_capacity(2),
        }
    }

    /// Request a transition to `id`
    pub fn request(&mut self, id: Id) {
        self.requested.push(id);
    }
}

/// The three optional hooks of a state. Unset hooks are no-ops.
pub struct StateHooks<Id, C> {
    on_enter: TransitionHook<C>,
    on_update: UpdateHook<Id, C>,
    on_exit: TransitionHook<C>,
}

impl<Id, C> Default for StateHooks<Id, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, C> StateHooks<Id, C> {
    /// Hooks that do nothing
    pub fn new() -> Self {
        Self {
            on_enter: Box::new(|_| {}),
            on_update: Box::new(|_, _, _| {}),
            on_exit: Box::new(|_| {}),
        }
    }

    pub fn on_enter(mut self, hook: impl FnMut(&mut C) + 'static) -> Self {
        self.on_enter = Box::new(hook);
        self
    }

    pub fn on_update(mut self, hook: impl FnMut(&mut C, f32, &mut Transitions<Id>) + 'static) -> Self {
        self.on_update = Box::new(hook);
        self
    }

    pub fn on_exit(mut self, hook: impl FnMut(&mut C) + 'static) -> Self {
        self.on_exit = Box::new(hook);
        self
    }
}

/// A registry of named states with exactly one active state.
///
/// The context `C` is not stored here; it is handed to every call so the
/// owner can keep the machine and its context side by side.
pub struct StateMachine<Id, C> {
    states: HashMap<Id, StateHooks<Id, C>>,
    current: Option<Id>,
    previous: Option<Id>,
    time_in_state_ms: f32,
}

impl<Id, C> Default for StateMachine<Id, C>
where
    Id: Copy + Eq + Hash + fmt::Debug,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<Id, C> StateMachine<Id, C>
where
    Id: Copy + Eq + Hash + fmt::Debug,
{
    pub fn new() -> Self {
        Self {
            states: HashMap::new(),
            current: None,
            previous: None,
            time_in_state_ms: 0.0,
        }
    }

    /// Register a state. A duplicate id replaces the earlier hooks.
    pub fn add_state(&mut self, id: Id, hooks: StateHooks<Id, C>) -> &mut Self {
        if self.states.insert(id, hooks).is_some() {
            log::warn!("State {:?} registered twice, keeping the latest hooks", id);
        }
        self
    }

    /// Activate `id`, running the outgoing exit hook and then the incoming
    /// enter hook. Activating the current state does nothing.
    pub fn set_state(&mut self, id: Id, ctx: &mut C) -> Result<(), StateMachineError> {
        if self.current == Some(id) {
            return Ok(());
        }

        if !self.states.contains_key(&id) {
            return Err(StateMachineError::UnknownState(format!("{:?}", id)));
        }

        if let Some(outgoing) = self.current {
            if let Some(hooks) = self.states.get_mut(&outgoing) {
                (hooks.on_exit)(ctx);
            }
        }

        log::debug!("State transition: {:?} -> {:?}", self.current, id);
        self.previous = self.current;
        self.current = Some(id);
        self.time_in_state_ms = 0.0;

        if let Some(hooks) = self.states.get_mut(&id) {
            (hooks.on_enter)(ctx);
        }

        Ok(())
    }

    /// Run the active state's update hook, then apply the transitions it
    /// requested. Does nothing before the first `set_state`.
    pub fn update(&mut self, elapsed_ms: f32, ctx: &mut C) -> Result<(), StateMachineError> {
        let Some(id) = self.current else {
            return Ok(());
        };

        self.time_in_state_ms += elapsed_ms;

        let mut transitions = Transitions::new();
        if let Some(hooks) = self.states.get_mut(&id) {
            (hooks.on_update)(ctx, elapsed_ms, &mut transitions);
        }

        for next in transitions.requested {
            self.set_state(next, ctx)?;
        }

        Ok(())
    }

    /// The active state, if any
    pub fn current(&self) -> Option<Id> {
        self.current
    }

    /// The state active before the last transition
    pub fn previous(&self) -> Option<Id> {
        self.previous
    }

    /// Check if a state is registered
    pub fn has_state(&self, id: Id) -> bool {
        self.states.contains_key(&id)
    }

    /// Number of registered states
    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    /// Milliseconds accumulated by `update` since the last transition
    pub fn time_in_state_ms(&self) -> f32 {
        self.time_in_state_ms
    }
}

impl<Id: fmt::Debug, C> fmt::Debug for StateMachine<Id, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StateMachine")
            .field("states", &self.states.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .field("previous", &self.previous)
            .field("time_in_state_ms", &self.time_in_state_ms)
            .finish()
    }
}
