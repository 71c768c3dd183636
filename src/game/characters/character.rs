// The player character as seen by its state machine

use glam::Vec2;

use super::animation::{AnimationPlayer, MotionClip};
use super::stats::CharacterStats;
use crate::engine::input::InputFacts;

/// Horizontal direction the character faces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

/// Velocity components commanded this frame. `None` leaves that axis to the
/// physics simulation.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct MotionCommand {
    pub x: Option<f32>,
    pub y: Option<f32>,
}

impl MotionCommand {
    pub fn is_empty(&self) -> bool {
        self.x.is_none() && self.y.is_none()
    }
}

/// Kinematic intent, facing, grounding and animation of the player.
///
/// This is the context every player state hook operates on. It never talks
/// to the physics world directly: velocity changes are recorded as a
/// [`MotionCommand`] that the level writes into the rigid body.
#[derive(Debug)]
pub struct Character {
    /// Movement tuning
    pub stats: CharacterStats,
    /// Sprite animation playback
    pub animation: AnimationPlayer,

    facing: Facing,
    grounded: bool,

    /// Latest known velocity (observed from physics, then overridden by commands)
    velocity: Vec2,
    /// Components commanded since the last `take_motion_command`
    command: MotionCommand,

    /// Input facts for the frame being processed
    input: InputFacts,
}

impl Character {
    pub fn new(stats: CharacterStats) -> Self {
        Self {
            stats,
            animation: AnimationPlayer::with_frog_animations(),
            facing: Facing::Right,
            grounded: false,
            velocity: Vec2::ZERO,
            command: MotionCommand::default(),
            input: InputFacts::default(),
        }
    }

    pub fn facing(&self) -> Facing {
        self.facing
    }

    /// Turn to face `facing`, flipping the sprite when facing left
    pub fn face(&mut self, facing: Facing) {
        self.facing = facing;
        self.animation.set_flipped(facing == Facing::Left);
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Only the landing rule and the airborne states write this flag
    pub(super) fn set_grounded(&mut self, grounded: bool) {
        self.grounded = grounded;
    }

    pub fn velocity(&self) -> Vec2 {
        self.velocity
    }

    pub fn set_velocity_x(&mut self, x: f32) {
        self.velocity.x = x;
        self.command.x = Some(x);
    }

    pub fn set_velocity_y(&mut self, y: f32) {
        self.velocity.y = y;
        self.command.y = Some(y);
    }

    /// Record the velocity the physics body actually has
    pub fn sync_velocity(&mut self, observed: Vec2) {
        self.velocity = observed;
    }

    /// Take the velocity components commanded since the last call
    pub fn take_motion_command(&mut self) -> MotionCommand {
        std::mem::take(&mut self.command)
    }

    pub fn input(&self) -> InputFacts {
        self.input
    }

    pub(super) fn set_input(&mut self, input: InputFacts) {
        self.input = input;
    }

    pub fn play(&mut self, clip: MotionClip) {
        self.animation.play(clip);
    }

    pub fn stop_motion(&mut self) {
        self.animation.stop();
    }

    /// Apply horizontal input at `speed`: left wins over right, no input
    /// stops. Returns whether a direction was held.
    pub fn steer(&mut self, speed: f32) -> bool {
        let input = self.input;
        if input.left_held {
            self.face(Facing::Left);
            self.set_velocity_x(-speed);
            true
        } else if input.right_held {
            self.face(Facing::Right);
            self.set_velocity_x(speed);
            true
        } else {
            self.set_velocity_x(0.0);
            false
        }
    }
}
