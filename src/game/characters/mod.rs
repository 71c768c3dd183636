// Character system
//
// This module contains everything that decides how the player moves:
// - Character context (facing, grounding, commanded velocity)
// - Movement tuning
// - The idle/run/jump/fall state chart
// - Ground contact detection
// - The per-frame controller tying them together

pub mod animation;
pub mod character;
pub mod controller;
pub mod ground;
pub mod state;
pub mod stats;

// Re-export the types the level wires together
pub use controller::PlayerController;
pub use ground::GroundContactResolver;
pub use state::PlayerState;
pub use stats::CharacterStats;
