// Per-frame action state for the local player

use super::action::Action;
use std::collections::HashMap;

/// Level and edge state of one action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ActionState {
    held: bool,
    /// Went down since the last `end_frame`
    pressed_edge: bool,
    /// Went up since the last `end_frame`
    released_edge: bool,
}

/// Held actions plus the press and release edges of the current frame.
///
/// An edge survives until `end_frame`, so a key tapped and released between
/// two frames still shows up as pressed for the frame that follows.
#[derive(Debug, Default)]
pub struct PlayerInput {
    actions: HashMap<Action, ActionState>,
}

impl PlayerInput {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self, action: Action) -> ActionState {
        self.actions.get(&action).copied().unwrap_or_default()
    }

    /// Held down right now
    pub fn is_pressed(&self, action: Action) -> bool {
        self.state(action).held
    }

    pub fn just_pressed(&self, action: Action) -> bool {
        self.state(action).pressed_edge
    }

    pub fn just_released(&self, action: Action) -> bool {
        self.state(action).released_edge
    }

    /// Pressing an action that is already held changes nothing
    pub fn press(&mut self, action: Action) {
        let state = self.actions.entry(action).or_default();
        if !state.held {
            state.held = true;
            state.pressed_edge = true;
        }
    }

    pub fn release(&mut self, action: Action) {
        let state = self.actions.entry(action).or_default();
        if state.held {
            state.held = false;
            state.released_edge = true;
        }
    }

    /// Clear the per-frame edges. Call once per frame after the tick.
    pub fn end_frame(&mut self) {
        for state in self.actions.values_mut() {
            state.pressed_edge = false;
            state.released_edge = false;
        }
    }

    /// Forget everything, e.g. when the window loses focus and releases
    /// can no longer be observed
    pub fn reset(&mut self) {
        self.actions.clear();
    }
}
