// Input handling system
//
// Turns raw keyboard events into the three per-frame facts the player
// controller consumes.
//
// ## Architecture
//
// - `action`: Defines game actions and default key bindings
// - `config`: Key binding and remapping
// - `player`: Pressed / just-pressed tracking for the local player
// - `manager`: Feeds winit keyboard events through the bindings
// - `sampler`: Reduces action state to `InputFacts`
//
// ## Usage Example
//
// ```rust
// use engine::input::InputManager;
//
// let mut input = InputManager::new();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Once per frame: sample, tick the level, then clear the edges
// let facts = input.sample();
// level.tick(time_ms, elapsed_ms, facts)?;
// input.end_frame();
// ```

pub mod action;
pub mod config;
pub mod manager;
pub mod player;
pub mod sampler;

// Re-export commonly used types
pub use action::{Action, InputSource};
pub use config::InputConfig;
pub use manager::InputManager;
pub use player::PlayerInput;
pub use sampler::{InputFacts, InputSampler};
