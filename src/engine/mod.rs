// Engine modules: state machine, physics, input, timing, notifications

pub mod game_loop;
pub mod input;
pub mod notify;
pub mod physics;
pub mod state_machine;
