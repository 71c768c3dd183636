// Input manager - turns winit keyboard events into action state

use super::action::InputSource;
use super::config::InputConfig;
use super::player::PlayerInput;
use super::sampler::{InputFacts, InputSampler};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::PhysicalKey;

/// Owns the key bindings and the local player's action state
#[derive(Debug, Default)]
pub struct InputManager {
    config: InputConfig,
    player: PlayerInput,
}

impl InputManager {
    /// Create an input manager with the default bindings
    pub fn new() -> Self {
        Self::with_config(InputConfig::with_defaults())
    }

    /// Create an input manager with custom bindings
    pub fn with_config(config: InputConfig) -> Self {
        Self {
            config,
            player: PlayerInput::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        // Only process physical key presses
        if let PhysicalKey::Code(key_code) = event.physical_key {
            self.process_input(InputSource::key(key_code), event.state, event.repeat);
        }
    }

    /// Apply a press or release of an input source
    pub fn process_input(&mut self, source: InputSource, state: ElementState, repeat: bool) {
        let Some(action) = self.config.action_for(source) else {
            return;
        };

        match state {
            ElementState::Pressed => {
                // OS key repeat must not produce a fresh press edge
                if !repeat {
                    self.player.press(action);
                }
            }
            ElementState::Released => self.player.release(action),
        }
    }

    /// Sample this frame's facts for the player controller
    pub fn sample(&self) -> InputFacts {
        InputSampler::sample(&self.player)
    }

    /// Clear per-frame edges. Call once per frame after the tick.
    pub fn end_frame(&mut self) {
        self.player.end_frame();
    }

    /// Drop all held keys (e.g. when the window loses focus)
    pub fn reset(&mut self) {
        self.player.reset();
    }

    pub fn player(&self) -> &PlayerInput {
        &self.player
    }

    pub fn config(&self) -> &InputConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut InputConfig {
        &mut self.config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::Action;
    use winit::keyboard::KeyCode;

    fn key(code: KeyCode) -> InputSource {
        InputSource::key(code)
    }

    #[test]
    fn test_bound_key_press() {
        let mut manager = InputManager::new();
        manager.process_input(key(KeyCode::ArrowLeft), ElementState::Pressed, false);
        assert!(manager.player().is_pressed(Action::MoveLeft));
    }

    #[test]
    fn test_unbound_key_ignored() {
        let mut manager = InputManager::new();
        manager.process_input(key(KeyCode::KeyQ), ElementState::Pressed, false);
        assert_eq!(manager.sample(), InputFacts::default());
    }

    #[test]
    fn test_repeat_does_not_refire_jump() {
        let mut manager = InputManager::new();
        manager.process_input(key(KeyCode::Space), ElementState::Pressed, false);
        assert!(manager.sample().jump_pressed_this_frame);
        manager.end_frame();

        manager.process_input(key(KeyCode::Space), ElementState::Pressed, true);
        assert!(!manager.sample().jump_pressed_this_frame);
        assert!(manager.player().is_pressed(Action::Jump));
    }

    #[test]
    fn test_release_clears_held() {
        let mut manager = InputManager::new();
        manager.process_input(key(KeyCode::ArrowRight), ElementState::Pressed, false);
        manager.end_frame();
        manager.process_input(key(KeyCode::ArrowRight), ElementState::Released, false);

        assert!(!manager.sample().right_held);
    }

    #[test]
    fn test_remapped_key() {
        let mut manager = InputManager::new();
        manager.config_mut().bind(key(KeyCode::KeyK), Action::Jump);
        manager.process_input(key(KeyCode::KeyK), ElementState::Pressed, false);
        assert!(manager.sample().jump_pressed_this_frame);
    }

    #[test]
    fn test_reset_drops_held_keys() {
        let mut manager = InputManager::new();
        manager.process_input(key(KeyCode::KeyA), ElementState::Pressed, false);
        manager.reset();
        assert!(!manager.sample().left_held);
    }
}
