// Player state chart: idle, run, jump, fall

use super::animation::MotionClip;
use super::character::Character;
use crate::engine::state_machine::{StateHooks, StateMachine, Transitions};

/// Represents the current locomotion state of the player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still
    #[default]
    Idle,
    /// Moving horizontally on the ground
    Run,
    /// Launched upward, steering in the air
    Jump,
    /// Dropping, steering in the air
    Fall,
}

impl PlayerState {
    pub const ALL: [PlayerState; 4] = [Self::Idle, Self::Run, Self::Jump, Self::Fall];

    /// Check if the character is in the air
    pub fn is_airborne(&self) -> bool {
        matches!(self, Self::Jump | Self::Fall)
    }
}

pub type PlayerStateMachine = StateMachine<PlayerState, Character>;

/// Register all four player states
pub fn build_state_machine() -> PlayerStateMachine {
    let mut machine = PlayerStateMachine::new();
    machine
        .add_state(
            PlayerState::Idle,
            StateHooks::new()
                .on_enter(idle_on_enter)
                .on_update(idle_on_update),
        )
        .add_state(
            PlayerState::Run,
            StateHooks::new()
                .on_enter(run_on_enter)
                .on_update(run_on_update)
                .on_exit(run_on_exit),
        )
        .add_state(
            PlayerState::Jump,
            StateHooks::new()
                .on_enter(jump_on_enter)
                .on_update(jump_on_update)
                .on_exit(jump_on_exit),
        )
        .add_state(
            PlayerState::Fall,
            StateHooks::new()
                .on_enter(fall_on_enter)
                .on_update(fall_on_update),
        );
    machine
}

/// A fresh jump press only counts while standing on something
fn wants_jump(character: &Character) -> bool {
    character.input().jump_pressed_this_frame && character.is_grounded()
}

fn idle_on_enter(character: &mut Character) {
    character.set_velocity_x(0.0);
    character.play(MotionClip::Idle);
}

fn idle_on_update(character: &mut Character, _elapsed_ms: f32, next: &mut Transitions<PlayerState>) {
    if character.input().horizontal_held() {
        next.request(PlayerState::Run);
    }

    if wants_jump(character) {
        next.request(PlayerState::Jump);
    }
}

fn run_on_enter(character: &mut Character) {
    character.play(MotionClip::Run);
}

fn run_on_update(character: &mut Character, _elapsed_ms: f32, next: &mut Transitions<PlayerState>) {
    let speed = character.stats.run_speed;
    if !character.steer(speed) {
        next.request(PlayerState::Idle);
    }

    if wants_jump(character) {
        next.request(PlayerState::Jump);
    }
}

fn run_on_exit(character: &mut Character) {
    character.stop_motion();
}

fn jump_on_enter(character: &mut Character) {
    character.set_grounded(false);
    character.play(MotionClip::Jump);
    let impulse = character.stats.jump_impulse;
    character.set_velocity_y(-impulse);
}

fn jump_on_update(character: &mut Character, _elapsed_ms: f32, _next: &mut Transitions<PlayerState>) {
    // Only the landing rule ends a jump
    let speed = character.stats.jump_air_speed;
    character.steer(speed);
}

fn jump_on_exit(character: &mut Character) {
    // Landing sets grounded again after this runs
    character.set_grounded(false);
    character.play(MotionClip::Jump);
}

fn fall_on_enter(character: &mut Character) {
    character.play(MotionClip::Fall);
}

fn fall_on_update(character: &mut Character, _elapsed_ms: f32, next: &mut Transitions<PlayerState>) {
    let speed = character.stats.fall_air_speed;
    if !character.steer(speed) {
        next.request(PlayerState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::InputFacts;
    use crate::game::characters::character::Facing;
    use crate::game::characters::stats::CharacterStats;

    const FRAME_MS: f32 = 16.0;

    fn setup(state: PlayerState, grounded: bool) -> (PlayerStateMachine, Character) {
        let mut machine = build_state_machine();
        let mut character = Character::new(CharacterStats::default());
        character.set_grounded(grounded);
        machine.set_state(state, &mut character).unwrap();
        (machine, character)
    }

    fn frame(machine: &mut PlayerStateMachine, character: &mut Character, input: InputFacts) {
        character.set_input(input);
        machine.update(FRAME_MS, character).unwrap();
    }

    fn left() -> InputFacts {
        InputFacts {
            left_held: true,
            ..Default::default()
        }
    }

    fn right() -> InputFacts {
        InputFacts {
            right_held: true,
            ..Default::default()
        }
    }

    fn jump() -> InputFacts {
        InputFacts {
            jump_pressed_this_frame: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_all_states_registered() {
        let machine = build_state_machine();
        assert_eq!(machine.state_count(), PlayerState::ALL.len());
        for state in PlayerState::ALL {
            assert!(machine.has_state(state));
        }
    }

    #[test]
    fn test_airborne_states() {
        assert!(PlayerState::Jump.is_airborne());
        assert!(PlayerState::Fall.is_airborne());
        assert!(!PlayerState::Idle.is_airborne());
        assert!(!PlayerState::Run.is_airborne());
    }

    #[test]
    fn test_idle_enter_stops_and_plays_idle() {
        let (_, mut character) = setup(PlayerState::Idle, true);
        assert_eq!(character.velocity().x, 0.0);
        assert_eq!(character.animation.current_animation(), "frog-idle");
        assert_eq!(character.take_motion_command().x, Some(0.0));
    }

    #[test]
    fn test_idle_to_run_on_either_direction() {
        for input in [left(), right()] {
            let (mut machine, mut character) = setup(PlayerState::Idle, true);
            frame(&mut machine, &mut character, input);
            assert_eq!(machine.current(), Some(PlayerState::Run));
            assert_eq!(character.animation.current_animation(), "frog-run");
        }
    }

    #[test]
    fn test_idle_stays_without_input() {
        let (mut machine, mut character) = setup(PlayerState::Idle, true);
        frame(&mut machine, &mut character, InputFacts::default());
        assert_eq!(machine.current(), Some(PlayerState::Idle));
    }

    #[test]
    fn test_idle_jump_requires_ground() {
        let (mut machine, mut character) = setup(PlayerState::Idle, false);
        frame(&mut machine, &mut character, jump());
        assert_eq!(machine.current(), Some(PlayerState::Idle));

        let (mut machine, mut character) = setup(PlayerState::Idle, true);
        frame(&mut machine, &mut character, jump());
        assert_eq!(machine.current(), Some(PlayerState::Jump));
        assert!(!character.is_grounded());
        assert_eq!(character.velocity().y, -character.stats.jump_impulse);
    }

    #[test]
    fn test_held_jump_does_not_refire() {
        let (mut machine, mut character) = setup(PlayerState::Idle, true);
        // Jump key held from an earlier frame: no edge this frame
        frame(&mut machine, &mut character, InputFacts::default());
        assert_eq!(machine.current(), Some(PlayerState::Idle));
        assert!(character.is_grounded());
    }

    #[test]
    fn test_run_moves_and_faces() {
        let (mut machine, mut character) = setup(PlayerState::Run, true);
        let speed = character.stats.run_speed;

        frame(&mut machine, &mut character, left());
        assert_eq!(character.velocity().x, -speed);
        assert_eq!(character.facing(), Facing::Left);

        frame(&mut machine, &mut character, right());
        assert_eq!(character.velocity().x, speed);
        assert_eq!(character.facing(), Facing::Right);
        assert_eq!(machine.current(), Some(PlayerState::Run));
    }

    #[test]
    fn test_run_to_idle_without_input() {
        let (mut machine, mut character) = setup(PlayerState::Run, true);
        frame(&mut machine, &mut character, right());
        frame(&mut machine, &mut character, InputFacts::default());

        assert_eq!(machine.current(), Some(PlayerState::Idle));
        assert_eq!(character.velocity().x, 0.0);
        // Facing survives the stop
        assert_eq!(character.facing(), Facing::Right);
    }

    #[test]
    fn test_run_to_jump() {
        let (mut machine, mut character) = setup(PlayerState::Run, true);
        frame(
            &mut machine,
            &mut character,
            InputFacts {
                right_held: true,
                jump_pressed_this_frame: true,
                ..Default::default()
            },
        );

        assert_eq!(machine.current(), Some(PlayerState::Jump));
        assert_eq!(character.velocity().x, character.stats.run_speed);
        assert!(!character.is_grounded());
    }

    #[test]
    fn test_stopping_and_jumping_in_one_frame_ends_in_jump() {
        let (mut machine, mut character) = setup(PlayerState::Run, true);
        frame(&mut machine, &mut character, jump());

        assert_eq!(machine.current(), Some(PlayerState::Jump));
        assert_eq!(machine.previous(), Some(PlayerState::Idle));
        assert_eq!(character.velocity().x, 0.0);
    }

    #[test]
    fn test_jump_air_control_never_leaves_jump() {
        let (mut machine, mut character) = setup(PlayerState::Jump, false);
        let air = character.stats.jump_air_speed;

        frame(&mut machine, &mut character, left());
        assert_eq!(character.velocity().x, -air);
        assert_eq!(character.facing(), Facing::Left);

        frame(&mut machine, &mut character, InputFacts::default());
        assert_eq!(character.velocity().x, 0.0);
        assert_eq!(machine.current(), Some(PlayerState::Jump));
    }

    #[test]
    fn test_jump_exit_clears_grounded() {
        let (mut machine, mut character) = setup(PlayerState::Jump, false);
        character.set_grounded(true);
        machine.set_state(PlayerState::Idle, &mut character).unwrap();

        assert!(!character.is_grounded());
        // Idle entry runs after the exit hook, so idle is what plays
        assert_eq!(character.animation.current_animation(), "frog-idle");
    }

    #[test]
    fn test_fall_steers_with_fall_speed() {
        let (mut machine, mut character) = setup(PlayerState::Fall, false);
        frame(&mut machine, &mut character, right());

        assert_eq!(character.velocity().x, character.stats.fall_air_speed);
        assert_eq!(machine.current(), Some(PlayerState::Fall));
        assert_eq!(character.animation.current_animation(), "frog-fall");
    }

    #[test]
    fn test_fall_to_idle_without_input() {
        let (mut machine, mut character) = setup(PlayerState::Fall, false);
        frame(&mut machine, &mut character, InputFacts::default());

        assert_eq!(machine.current(), Some(PlayerState::Idle));
        assert_eq!(character.velocity().x, 0.0);
    }
}
