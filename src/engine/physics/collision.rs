use rapier2d::prelude::*;
use std::sync::Mutex;

/// What a collider is, for contact filtering
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Touches everything
    Default = 0b0000_0001,

    /// The player character
    Player = 0b0000_0010,

    /// Solid terrain tiles
    Terrain = 0b0000_0100,
}

impl CollisionGroups {
    fn group(self) -> Group {
        Group::from_bits_truncate(self as u32)
    }

    /// Groups this one generates contacts with
    pub fn partners(self) -> Group {
        match self {
            // The player only stands on terrain
            Self::Player => Self::Terrain.group(),
            // Neighbouring tiles never touch each other
            Self::Terrain => Self::Player.group() | Self::Default.group(),
            Self::Default => Group::ALL,
        }
    }

    pub fn to_interaction_groups(self) -> InteractionGroups {
        InteractionGroups::new(self.group(), self.partners())
    }
}

/// A contact between two colliders beginning or ending during a step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionEvent {
    Started(ColliderHandle, ColliderHandle),
    Stopped(ColliderHandle, ColliderHandle),
}

impl CollisionEvent {
    pub fn is_started(&self) -> bool {
        matches!(self, Self::Started(..))
    }

    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            Self::Started(a, b) | Self::Stopped(a, b) => (a, b),
        }
    }

    /// The collider paired with `collider`, if it takes part in this event
    pub fn other(&self, collider: ColliderHandle) -> Option<ColliderHandle> {
        match self.colliders() {
            (a, b) if a == collider => Some(b),
            (a, b) if b == collider => Some(a),
            _ => None,
        }
    }
}

impl From<rapier2d::prelude::CollisionEvent> for CollisionEvent {
    fn from(event: rapier2d::prelude::CollisionEvent) -> Self {
        match event {
            rapier2d::prelude::CollisionEvent::Started(a, b, _) => Self::Started(a, b),
            rapier2d::prelude::CollisionEvent::Stopped(a, b, _) => Self::Stopped(a, b),
        }
    }
}

/// Collects the collision events of one physics step. Rapier hands events
/// to a shared reference, hence the lock.
#[derive(Debug, Default)]
pub struct CollisionEventQueue {
    events: Mutex<Vec<CollisionEvent>>,
}

impl CollisionEventQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forget the previous step's events
    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    /// Events recorded since the last `clear`, in arrival order
    pub fn events(&self) -> Vec<CollisionEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn push(&self, event: CollisionEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl EventHandler for CollisionEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: rapier2d::prelude::CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        self.push(event.into());
    }

    // Contact forces are never requested
    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}
