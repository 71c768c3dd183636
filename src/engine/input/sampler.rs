// Reduces action state to the facts the player controller reads each frame

use super::action::Action;
use super::player::PlayerInput;

/// Read-only input facts for a single frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputFacts {
    /// Left is held (level-triggered)
    pub left_held: bool,
    /// Right is held (level-triggered)
    pub right_held: bool,
    /// Jump went from up to down this frame (edge-triggered)
    pub jump_pressed_this_frame: bool,
}

impl InputFacts {
    /// Whether either horizontal direction is held
    pub fn horizontal_held(&self) -> bool {
        self.left_held || self.right_held
    }
}

pub struct InputSampler;

impl InputSampler {
    pub fn sample(input: &PlayerInput) -> InputFacts {
        InputFacts {
            left_held: input.is_pressed(Action::MoveLeft),
            right_held: input.is_pressed(Action::MoveRight),
            jump_pressed_this_frame: input.just_pressed(Action::Jump),
        }
    }
}
