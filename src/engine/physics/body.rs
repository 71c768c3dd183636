// Rigid bodies and colliders for the character and terrain tiles

use super::collision::CollisionGroups;
use rapier2d::prelude::*;

pub use rapier2d::prelude::{ColliderHandle, RigidBodyHandle};

/// Builder for the two kinds of body a level contains: one moving character
/// and any number of immovable tiles
pub struct BodyBuilder {
    body_type: RigidBodyType,
    translation: Vector<Real>,
    linvel: Vector<Real>,
    upright: bool,
    always_awake: bool,
}

impl BodyBuilder {
    fn of_type(body_type: RigidBodyType) -> Self {
        Self {
            body_type,
            translation: Vector::zeros(),
            linvel: Vector::zeros(),
            upright: false,
            always_awake: false,
        }
    }

    /// Body moved by gravity, contacts and commanded velocity
    pub fn dynamic() -> Self {
        Self::of_type(RigidBodyType::Dynamic)
    }

    /// Body that never moves
    pub fn fixed() -> Self {
        Self::of_type(RigidBodyType::Fixed)
    }

    /// Place the body's centre at (`x`, `y`)
    pub fn at(mut self, x: Real, y: Real) -> Self {
        self.translation = vector![x, y];
        self
    }

    /// Start with a velocity already applied
    pub fn moving(mut self, x: Real, y: Real) -> Self {
        self.linvel = vector![x, y];
        self
    }

    /// Keep the body from tipping over on tile edges
    pub fn upright(mut self) -> Self {
        self.upright = true;
        self
    }

    /// Never let the solver put the body to sleep
    pub fn always_awake(mut self) -> Self {
        self.always_awake = true;
        self
    }

    pub fn build(self) -> RigidBody {
        let locked = if self.upright {
            LockedAxes::ROTATION_LOCKED
        } else {
            LockedAxes::empty()
        };

        RigidBodyBuilder::new(self.body_type)
            .translation(self.translation)
            .linvel(self.linvel)
            .locked_axes(locked)
            .can_sleep(!self.always_awake)
            .build()
    }
}

/// Builder for character and tile colliders. Every collider it makes
/// reports collision events.
pub struct ColliderBuilder2D {
    shape: SharedShape,
    group: CollisionGroups,
    friction: Real,
}

impl ColliderBuilder2D {
    fn with_shape(shape: SharedShape) -> Self {
        Self {
            shape,
            group: CollisionGroups::Default,
            friction: 0.5,
        }
    }

    /// Square tile with edge length `size`
    pub fn tile(size: Real) -> Self {
        Self::with_shape(SharedShape::cuboid(size / 2.0, size / 2.0))
    }

    /// Upright capsule filling a `width` x `height` box. The rounded ends
    /// slide over seams between neighbouring tiles.
    pub fn character(width: Real, height: Real) -> Self {
        let radius = width / 2.0;
        let straight_half = (height / 2.0 - radius).max(0.0);
        Self::with_shape(SharedShape::capsule_y(straight_half, radius))
    }

    pub fn in_group(mut self, group: CollisionGroups) -> Self {
        self.group = group;
        self
    }

    /// No friction: horizontal speed is written directly every frame
    pub fn slippery(mut self) -> Self {
        self.friction = 0.0;
        self
    }

    pub fn build(self) -> Collider {
        ColliderBuilder::new(self.shape)
            .collision_groups(self.group.to_interaction_groups())
            .friction(self.friction)
            .restitution(0.0)
            .active_events(ActiveEvents::COLLISION_EVENTS)
            .build()
    }
}

/// The bodies and colliders a level is built from
pub mod presets {
    use super::*;

    pub fn player_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::dynamic().at(x, y).upright().always_awake().build()
    }

    pub fn player_collider(width: Real, height: Real) -> Collider {
        ColliderBuilder2D::character(width, height)
            .in_group(CollisionGroups::Player)
            .slippery()
            .build()
    }

    /// Fixed body for a terrain tile, positioned at the tile centre
    pub fn tile_body(x: Real, y: Real) -> RigidBody {
        BodyBuilder::fixed().at(x, y).build()
    }

    pub fn tile_collider(size: Real) -> Collider {
        ColliderBuilder2D::tile(size)
            .in_group(CollisionGroups::Terrain)
            .slippery()
            .build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_dynamic_body_placement() {
        let body = BodyBuilder::dynamic().at(10.0, 20.0).moving(5.0, 0.0).build();

        assert!(body.is_dynamic());
        assert_eq!(*body.translation(), vector![10.0, 20.0]);
        assert_eq!(body.linvel().x, 5.0);
        assert!(!body.is_rotation_locked());
    }

    #[test]
    fn test_character_capsule_fills_box() {
        let collider = ColliderBuilder2D::character(20.0, 28.0).build();
        let aabb = collider.compute_aabb();

        assert_relative_eq!(aabb.half_extents().x, 10.0, epsilon = 1e-4);
        assert_relative_eq!(aabb.half_extents().y, 14.0, epsilon = 1e-4);
    }

    #[test]
    fn test_player_preset() {
        let body = presets::player_body(0.0, 0.0);
        let collider = presets::player_collider(20.0, 28.0);

        assert!(body.is_dynamic());
        assert!(body.is_rotation_locked());
        assert!(!collider.is_sensor());
        assert_eq!(collider.friction(), 0.0);
        assert_eq!(
            collider.collision_groups(),
            CollisionGroups::Player.to_interaction_groups()
        );
    }

    #[test]
    fn test_tile_preset() {
        let body = presets::tile_body(8.0, 8.0);
        let collider = presets::tile_collider(16.0);

        assert!(body.is_fixed());
        assert!(collider
            .active_events()
            .contains(ActiveEvents::COLLISION_EVENTS));
        assert_relative_eq!(collider.compute_aabb().half_extents().x, 8.0, epsilon = 1e-4);
    }
}
