// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, BodyBuilder, ColliderBuilder2D, ColliderHandle, RigidBodyHandle};
pub use collision::{CollisionEvent, CollisionGroups};
pub use world::{PhysicsWorld, GRAVITY, MAX_TIMESTEP};

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::Real;
