// Ground contact detection for the player character

use std::collections::HashSet;

use crate::engine::physics::{ColliderHandle, CollisionEvent, PhysicsWorld};

/// A contact between the character and solid terrain, with the floor test
/// sampled at the moment the contact began
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroundContact {
    /// The character's lower edge rests on a solid surface
    pub on_floor: bool,
}

/// Filters physics collision events down to the character/terrain pair and
/// turns each contact onset into a [`GroundContact`].
#[derive(Debug)]
pub struct GroundContactResolver {
    collider: ColliderHandle,
    terrain: HashSet<ColliderHandle>,
}

impl GroundContactResolver {
    pub fn new(collider: ColliderHandle) -> Self {
        Self {
            collider,
            terrain: HashSet::new(),
        }
    }

    /// Mark a collider as solid terrain
    pub fn add_terrain(&mut self, collider: ColliderHandle) {
        self.terrain.insert(collider);
    }

    pub fn is_terrain(&self, collider: ColliderHandle) -> bool {
        self.terrain.contains(&collider)
    }

    /// Whether the event is a contact onset between the character and terrain
    pub fn is_ground_contact(&self, event: &CollisionEvent) -> bool {
        event.is_started()
            && event
                .other(self.collider)
                .is_some_and(|other| self.is_terrain(other))
    }

    /// Convert this step's collision events into ground contacts
    pub fn resolve(&self, events: &[CollisionEvent], physics: &PhysicsWorld) -> Vec<GroundContact> {
        events
            .iter()
            .filter(|event| self.is_ground_contact(event))
            .map(|_| GroundContact {
                on_floor: physics.is_on_floor(self.collider),
            })
            .collect()
    }
}
