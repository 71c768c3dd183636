use rapier2d::prelude::*;

use super::collision::{CollisionEvent as GameCollisionEvent, CollisionEventQueue};

/// Handle to identify rigid bodies
pub type RigidBodyHandle = rapier2d::prelude::RigidBodyHandle;

/// Handle to identify colliders
pub type ColliderHandle = rapier2d::prelude::ColliderHandle;

/// Downward acceleration in world units (pixels) per second squared.
/// The y axis points down, matching tile/screen coordinates.
pub const GRAVITY: Real = 800.0;

/// Largest timestep a single `step` will integrate
pub const MAX_TIMESTEP: Real = 1.0 / 20.0;

/// Smallest downward component a contact normal needs to count as floor.
/// Tile tops and tile corners pass; walls and ceilings do not.
const FLOOR_NORMAL_MIN_Y: Real = 0.3;

/// Physics world that manages all physics simulation
pub struct PhysicsWorld {
    gravity: Vector<Real>,
    integration_parameters: IntegrationParameters,
    physics_pipeline: PhysicsPipeline,
    island_manager: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    impulse_joint_set: ImpulseJointSet,
    multibody_joint_set: MultibodyJointSet,
    ccd_solver: CCDSolver,

    rigid_body_set: RigidBodySet,
    collider_set: ColliderSet,

    /// Collision events from the most recent step
    collision_event_queue: CollisionEventQueue,
}

impl PhysicsWorld {
    /// Create a new physics world with y-down gravity
    pub fn new() -> Self {
        Self::with_gravity(vector![0.0, GRAVITY])
    }

    /// Create a new physics world with custom gravity
    pub fn with_gravity(gravity: Vector<Real>) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = 1.0 / 60.0;

        Self {
            gravity,
            integration_parameters,
            physics_pipeline: PhysicsPipeline::new(),
            island_manager: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            impulse_joint_set: ImpulseJointSet::new(),
            multibody_joint_set: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            rigid_body_set: RigidBodySet::new(),
            collider_set: ColliderSet::new(),
            collision_event_queue: CollisionEventQueue::new(),
        }
    }

    /// Step the simulation forward by `dt` seconds (clamped to `MAX_TIMESTEP`)
    pub fn step(&mut self, dt: Real) {
        // Clear previous step's collision events
        self.collision_event_queue.clear();

        self.integration_parameters.dt = dt.clamp(0.0, MAX_TIMESTEP);
        if self.integration_parameters.dt <= 0.0 {
            return;
        }

        let event_handler = &self.collision_event_queue;

        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            event_handler,
        );
    }

    /// Add a rigid body to the physics world
    pub fn add_rigid_body(&mut self, body: RigidBody) -> RigidBodyHandle {
        self.rigid_body_set.insert(body)
    }

    /// Add a collider attached to a rigid body
    pub fn add_collider(
        &mut self,
        collider: Collider,
        parent_handle: RigidBodyHandle,
    ) -> ColliderHandle {
        self.collider_set
            .insert_with_parent(collider, parent_handle, &mut self.rigid_body_set)
    }

    /// Get a reference to a rigid body
    pub fn get_rigid_body(&self, handle: RigidBodyHandle) -> Option<&RigidBody> {
        self.rigid_body_set.get(handle)
    }

    /// Get a mutable reference to a rigid body
    pub fn get_rigid_body_mut(&mut self, handle: RigidBodyHandle) -> Option<&mut RigidBody> {
        self.rigid_body_set.get_mut(handle)
    }

    /// Get a reference to a collider
    pub fn get_collider(&self, handle: ColliderHandle) -> Option<&Collider> {
        self.collider_set.get(handle)
    }

    /// Overwrite the chosen velocity components of a body, keeping the rest
    pub fn set_linvel_axes(&mut self, handle: RigidBodyHandle, x: Option<Real>, y: Option<Real>) {
        if x.is_none() && y.is_none() {
            return;
        }
        if let Some(body) = self.rigid_body_set.get_mut(handle) {
            let mut velocity = *body.linvel();
            if let Some(x) = x {
                velocity.x = x;
            }
            if let Some(y) = y {
                velocity.y = y;
            }
            body.set_linvel(velocity, true);
        }
    }

    /// Check if a collider's lower edge rests on solid ground.
    ///
    /// Looks at every contact the collider has after the last step and
    /// accepts any whose normal points down into the other shape. This covers
    /// the whole lower edge, so a body resting on the two corners of a gap
    /// is on the floor even though nothing lies under its centre.
    pub fn is_on_floor(&self, collider: ColliderHandle) -> bool {
        self.narrow_phase.contact_pairs_with(collider).any(|pair| {
            if !pair.has_any_active_contact {
                return false;
            }
            // Manifold normals point from collider1 towards collider2
            let towards_other = if pair.collider1 == collider { 1.0 } else { -1.0 };
            pair.manifolds.iter().any(|manifold| {
                !manifold.points.is_empty()
                    && manifold.data.normal.y * towards_other >= FLOOR_NORMAL_MIN_Y
            })
        })
    }

    /// Get all collision events from the most recent step
    pub fn collision_events(&self) -> Vec<GameCollisionEvent> {
        self.collision_event_queue.events()
    }

    /// Get current gravity
    pub fn gravity(&self) -> Vector<Real> {
        self.gravity
    }

    /// Get the timestep used by the most recent step
    pub fn timestep(&self) -> Real {
        self.integration_parameters.dt
    }
}

impl Default for PhysicsWorld {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::physics::body::presets;
    use approx::assert_relative_eq;

    #[test]
    fn test_gravity_points_down() {
        let world = PhysicsWorld::new();
        assert!(world.gravity().y > 0.0);
        assert_eq!(world.gravity().x, 0.0);
    }

    #[test]
    fn test_step_clamps_timestep() {
        let mut world = PhysicsWorld::new();
        world.step(1.0);
        assert_relative_eq!(world.timestep(), MAX_TIMESTEP);
    }

    #[test]
    fn test_body_falls() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(presets::player_body(0.0, 0.0));
        world.add_collider(presets::player_collider(16.0, 24.0), handle);

        for _ in 0..10 {
            world.step(1.0 / 60.0);
        }

        let body = world.get_rigid_body(handle).unwrap();
        assert!(body.translation().y > 0.0);
        assert!(body.linvel().y > 0.0);
    }

    #[test]
    fn test_set_linvel_axes_keeps_other_axis() {
        let mut world = PhysicsWorld::new();
        let handle = world.add_rigid_body(
            crate::engine::physics::BodyBuilder::dynamic()
                .moving(3.0, 4.0)
                .build(),
        );

        world.set_linvel_axes(handle, Some(-200.0), None);
        let velocity = *world.get_rigid_body(handle).unwrap().linvel();
        assert_eq!(velocity.x, -200.0);
        assert_eq!(velocity.y, 4.0);

        world.set_linvel_axes(handle, None, Some(-500.0));
        let velocity = *world.get_rigid_body(handle).unwrap().linvel();
        assert_eq!(velocity.x, -200.0);
        assert_eq!(velocity.y, -500.0);
    }

    /// World with a tile whose top edge is at y = 100, centred on x = 0
    fn world_with_tile(gravity: Vector<Real>) -> PhysicsWorld {
        let mut world = PhysicsWorld::with_gravity(gravity);
        let tile = world.add_rigid_body(presets::tile_body(0.0, 108.0));
        world.add_collider(presets::tile_collider(16.0), tile);
        world
    }

    fn add_player(world: &mut PhysicsWorld, x: Real, y: Real) -> ColliderHandle {
        let body = world.add_rigid_body(presets::player_body(x, y));
        world.add_collider(presets::player_collider(20.0, 28.0), body)
    }

    fn touching(world: &PhysicsWorld, collider: ColliderHandle) -> bool {
        world
            .narrow_phase
            .contact_pairs_with(collider)
            .any(|pair| pair.has_any_active_contact)
    }

    fn steps(world: &mut PhysicsWorld, count: usize) {
        for _ in 0..count {
            world.step(1.0 / 60.0);
        }
    }

    #[test]
    fn test_resting_on_tile_is_floor() {
        let mut world = world_with_tile(vector![0.0, GRAVITY]);
        let player = add_player(&mut world, 0.0, 80.0);
        steps(&mut world, 60);

        assert!(world.is_on_floor(player));
    }

    #[test]
    fn test_airborne_is_not_floor() {
        let mut world = world_with_tile(vector![0.0, GRAVITY]);
        let player = add_player(&mut world, 200.0, 0.0);
        steps(&mut world, 5);

        assert!(!world.is_on_floor(player));
    }

    #[test]
    fn test_wall_contact_is_not_floor() {
        // Pressed against the tile's left side with no gravity
        let mut world = world_with_tile(vector![0.0, 0.0]);
        let player = add_player(&mut world, -17.9, 108.0);
        steps(&mut world, 1);

        assert!(touching(&world, player));
        assert!(!world.is_on_floor(player));
    }

    #[test]
    fn test_ceiling_contact_is_not_floor() {
        // Head just inside the tile's lower edge (y = 116) with no gravity
        let mut world = world_with_tile(vector![0.0, 0.0]);
        let player = add_player(&mut world, 0.0, 129.9);
        steps(&mut world, 1);

        assert!(touching(&world, player));
        assert!(!world.is_on_floor(player));
    }
}
